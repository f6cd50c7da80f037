// Copyright 2020 TiKV Project Authors. Licensed under Apache-2.0.

//! The `#[calltrace]` attribute. Use it through the `calltrace` crate, which the expansion refers to
//! as `::calltrace`.

#![recursion_limit = "256"]

mod features;

extern crate proc_macro;

#[macro_use]
extern crate proc_macro_error;

use crate::features::{FORMAT_PLACEHOLDER, SKIPPED_PLACEHOLDER};
use proc_macro2::{TokenStream, TokenTree};
use quote::{quote, quote_spanned, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::*;

/// Contains the internal representation of this proc-macro arguments.
/// See [MacroArgs::parse()] for more info.
struct MacroArgs {
    /// If `None`, records go to stdout. Otherwise, any expression yielding an `AsRef<Path>`
    destination: Option<Expr>,
    /// Parameters rendered in the keyed map of the inputs, instead of the positional tuple
    keyed: Vec<String>,
    /// Parameters rendered as `<skipped>`, so they don't need to implement `Debug`
    skip: Vec<String>,
    /// If `None`, a function is fallible when its return type is a `Result`
    fallible: Option<bool>,
    /// If specified, causes the expanded function code to be shown in a panic!, for inspection
    debug: bool,
}

impl Parse for MacroArgs {
    /// `args` comes from one of the forms bellow
    ///    1) <empty> -- records go to stdout
    ///    2) "PATH" -- records are appended to the file at PATH
    ///    3) destination=EXPR -- same as #2, where EXPR is any expression yielding an `AsRef<Path>`
    ///    4) keyed=[list] -- the parameters in [list] are rendered as `{"name": value}` instead of in the positional tuple
    ///    5) skip=[list] -- the parameters in [list] are rendered as `<skipped>`
    ///    6) fallible=BOOL -- overrides the detection of a `Result` return type
    ///    7) debug=true -- panics with the expanded function, for inspection
    ///    8) "PATH", destination=EXPR -- error: the destination can only be given once
    /// note:
    ///   All named parameters may come in any order and be combined.
    ///   There is a requirement, 'though, that the literal "PATH" must be the first one, if present
    fn parse(args: ParseStream) -> Result<MacroArgs> {
        // match & consume the optional legacy destination literal
        let legacy_destination = if args.peek(LitStr) {
            Some(args.parse::<LitStr>()?)
        } else {
            None
        };
        // consumes the "," between the literal and the "name=val" list that may, possibly, follow
        if legacy_destination.is_some() && !args.is_empty() {
            args.parse::<Token![,]>()?;
        }

        // from this point on, all other acceptable parameters will be in the form "name=val<, ...>"
        let mut destination = None;
        let mut keyed = Vec::new();
        let mut skip = Vec::new();
        let mut fallible = None;
        let mut debug = false;
        let name_values = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(args)?;
        for name_value in &name_values {
            let Some(name) = name_value.path.get_ident().map(|ident| ident.to_string()) else {
                abort_call_site!("On `name=val` parameters, `name` must be an identifier");
            };
            match name.as_str() {
                "destination" => {
                    destination.replace(name_value.value.clone());
                }
                "keyed" => keyed.extend(parse_ident_list(&name, &name_value.value)),
                "skip" => skip.extend(parse_ident_list(&name, &name_value.value)),
                "fallible" => {
                    fallible.replace(parse_bool(&name, &name_value.value));
                }
                "debug" => debug = parse_bool(&name, &name_value.value),
                _ => abort_call_site!("Unknown `name` parameter in the `name=value` form: {}. Name must be `destination`, `keyed`, `skip`, `fallible` or `debug`", name),
            }
        }

        let destination = match (legacy_destination, destination) {
            (Some(_), Some(_)) => abort_call_site!(
                "`calltrace`: the destination was given both as the leading literal and as `destination=`"
            ),
            (Some(literal), None) => Some(Expr::Lit(ExprLit {
                attrs: Vec::new(),
                lit: Lit::Str(literal),
            })),
            (None, destination) => destination,
        };

        Ok(MacroArgs {
            destination,
            keyed,
            skip,
            fallible,
            debug,
        })
    }
}

/// Parses `[a, b, self, ...]`
fn parse_ident_list(name: &str, value: &Expr) -> Vec<String> {
    let Expr::Array(expr_array) = value else {
        abort_call_site!("`{}` parameter, if present, should be an array of identifiers: {}=[a,b,c,...]", name, name);
    };
    expr_array
        .elems
        .iter()
        .map(|elem| {
            let Expr::Path(path) = elem else {
                abort_call_site!("unknown element type -- `{}` must be an array of identifiers", name);
            };
            path.to_token_stream().to_string()
        })
        .collect()
}

/// Parses `true`, `false`, `"true"` or `"false"`
fn parse_bool(name: &str, value: &Expr) -> bool {
    match value {
        Expr::Lit(ExprLit {
            lit: Lit::Bool(lit_bool),
            ..
        }) => lit_bool.value,
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) if ["true", "false"].contains(&lit_str.value().as_str()) => lit_str.value() == "true",
        _ => abort_call_site!("`{}` must be either `true` or `false`", name),
    }
}

/// An attribute macro that records whether each call of the function succeeded or failed.
///
/// A call records `"{name} ok"`, or, when a function returning a `Result` returns an `Err`,
/// `"{name} error: {err}. Inputs: {positional}, {keyed}"`. The function's signature and
/// return value are left untouched: an `Err` still reaches the caller.
#[proc_macro_attribute]
#[proc_macro_error]
pub fn calltrace(
    macro_args_tokens: proc_macro::TokenStream,
    fn_tokens: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let fn_item = syn::parse_macro_input!(fn_tokens as ItemFn);
    let macro_args = syn::parse_macro_input!(macro_args_tokens as MacroArgs);

    if fn_item.sig.constness.is_some() {
        abort_call_site!("`calltrace` cannot be applied to a `const fn`");
    }

    let fn_name = fn_item.sig.ident.to_string();
    let fn_args: Vec<Ident> = fn_item
        .sig
        .inputs
        .iter()
        .cloned()
        .map(|arg| match arg {
            FnArg::Receiver(arg) => arg.self_token.into(),
            FnArg::Typed(pat_type) => {
                if let Pat::Ident(ident) = *pat_type.pat {
                    ident.ident
                } else {
                    abort_call_site!("`calltrace`: unsupported parameter pattern `{}`", pat_type.pat.to_token_stream());
                }
            }
        })
        .collect();

    for listed in macro_args.keyed.iter().chain(&macro_args.skip) {
        if !fn_args.iter().any(|ident| ident == listed) {
            abort_call_site!("`calltrace`: `{}` has no parameter named `{}`", fn_name, listed);
        }
    }

    let fallible = macro_args
        .fallible
        .unwrap_or_else(|| returns_result(&fn_item.sig.output));
    let ret_type = match &fn_item.sig.output {
        ReturnType::Type(_, ty) if !contains_impl_trait(ty.to_token_stream()) => Some(ty.clone()),
        _ => None,
    };

    let func_body = gen_ingress_block(
        gen_egress_block(
            &fn_item.block,
            fn_item.sig.asyncness.is_some(),
            fallible,
            ret_type.as_deref(),
        ),
        &fn_name,
        &fn_args,
        fallible,
        &macro_args,
    );

    let ItemFn {
        attrs, vis, sig, ..
    } = fn_item;

    let Signature {
        output: return_type,
        inputs: params,
        unsafety,
        abi,
        ident,
        asyncness,
        generics:
            Generics {
                params: gen_params,
                where_clause,
                ..
            },
        ..
    } = sig;

    let tokens = quote::quote!(
        #(#attrs) *
        #vis #unsafety #asyncness #abi fn #ident<#gen_params>(#params) #return_type
        #where_clause
        {
            #func_body
        }
    );
    if macro_args.debug {
        panic!("`calltrace` debug=true, so: FUNCTION is defined as:\n{}", tokens.to_string());
    }
    tokens.into()
}

/// Generates code to be executed before entering a function's block:
/// the interceptor lookup and, for fallible functions, the rendering of the inputs
fn gen_ingress_block(
    block: TokenStream,
    fn_name: &str,
    fn_args: &[Ident],
    fallible: bool,
    macro_args: &MacroArgs,
) -> TokenStream {
    let interceptor = gen_interceptor(fn_name, &macro_args.destination);
    let inputs = fallible.then(|| gen_ingress_inputs(fn_args, macro_args));
    quote_spanned!(block.span()=>
        #interceptor
        #inputs
        #block
    )
}

/// The interceptor is built on the first call and kept in a static, so the sink is fixed from then on
fn gen_interceptor(fn_name: &str, destination: &Option<Expr>) -> TokenStream {
    let destination = match destination {
        Some(destination) => quote!(::std::option::Option::Some(#destination)),
        None => quote!(::std::option::Option::<&str>::None),
    };
    quote!(
        let __calltrace_interceptor = {
            static __CALLTRACE_INTERCEPTOR: ::std::sync::OnceLock<::calltrace::Interceptor> =
                ::std::sync::OnceLock::new();
            __CALLTRACE_INTERCEPTOR.get_or_init(|| {
                ::calltrace::Interceptor::new(
                    #fn_name,
                    ::calltrace::Sink::from_destination(#destination),
                )
            })
        };
    )
}

/// Renders every parameter, in declaration order, before the block takes ownership of them
fn gen_ingress_inputs(fn_args: &[Ident], macro_args: &MacroArgs) -> TokenStream {
    let rendered = fn_args.iter().map(|ident| {
        let param_name = ident.to_string();
        let repr = if macro_args.skip.contains(&param_name) {
            quote!(#SKIPPED_PLACEHOLDER)
        } else {
            quote!(::std::format!(#FORMAT_PLACEHOLDER, &#ident))
        };
        if macro_args.keyed.contains(&param_name) {
            quote!(.keyed(#param_name, #repr))
        } else {
            quote!(.positional(#repr))
        }
    });
    quote!(
        let __calltrace_inputs = ::calltrace::Inputs::new() #(#rendered)*;
    )
}

/// Generates code to be executed after exiting a function's block
fn gen_egress_block(
    block: &Block,
    async_context: bool,
    fallible: bool,
    ret_type: Option<&Type>,
) -> TokenStream {
    let record = if fallible {
        quote_spanned!(block.span()=>
            __calltrace_interceptor.observe(&__ret_value, &__calltrace_inputs);
        )
    } else {
        quote_spanned!(block.span()=>
            __calltrace_interceptor.observe_returned();
        )
    };

    // Generate the instrumented function body.
    // If the function is an `async fn`, this will wrap it in an async block.
    if async_context {
        let annotation = ret_type.map(|ty| quote!(: #ty));
        quote_spanned!(block.span()=>
            let __ret_value #annotation = async move { #block }.await;
            #record
            __ret_value
        )
    } else {
        // `return` and `?` inside the block must leave the closure, not the wrapper
        let annotation = ret_type.map(|ty| quote!(-> #ty));
        quote_spanned!(block.span()=>
            #[allow(unknown_lints)]
            #[allow(clippy::redundant_closure_call)]
            let __ret_value = (move || #annotation #block)();
            #record
            __ret_value
        )
    }
}

/// `true` if the return type's last path segment is `Result` -- `Result<T, E>`, `io::Result<T>`, `anyhow::Result<T>`...
fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(type_path) = ty.as_ref() else {
        return false;
    };
    type_path
        .path
        .segments
        .last()
        .map(|segment| segment.ident == "Result")
        .unwrap_or(false)
}

// `impl Trait` can't be named in a closure or `let` annotation, so such return types are left to inference
fn contains_impl_trait(tokens: TokenStream) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => ident == "impl",
        TokenTree::Group(group) => contains_impl_trait(group.stream()),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(tokens: TokenStream) -> ReturnType {
        syn::parse2(tokens).unwrap()
    }

    #[test]
    fn detects_result_return_types() {
        assert!(returns_result(&output(quote!(-> Result<u32, String>))));
        assert!(returns_result(&output(quote!(-> std::io::Result<()>))));
        assert!(returns_result(&output(quote!(-> anyhow::Result<u32>))));
        assert!(!returns_result(&output(quote!(-> u32))));
        assert!(!returns_result(&output(quote!(-> Option<u32>))));
        assert!(!returns_result(&output(quote!())));
    }

    #[test]
    fn detects_impl_trait() {
        assert!(contains_impl_trait(quote!(impl Iterator<Item = u32>)));
        assert!(contains_impl_trait(quote!(Result<impl Display, String>)));
        assert!(!contains_impl_trait(quote!(Result<Box<dyn Display>, String>)));
    }

    #[test]
    fn parses_legacy_destination_and_options() {
        let args: MacroArgs =
            syn::parse2(quote!("logs/log_file.txt", keyed = [y], skip = [token], fallible = true))
                .unwrap();
        assert_eq!(
            args.destination.to_token_stream().to_string(),
            "\"logs/log_file.txt\""
        );
        assert_eq!(args.keyed, ["y"]);
        assert_eq!(args.skip, ["token"]);
        assert_eq!(args.fallible, Some(true));
        assert!(!args.debug);
    }

    #[test]
    fn parses_destination_expressions() {
        let args: MacroArgs =
            syn::parse2(quote!(destination = concat!(env!("TMP"), "/log.txt"))).unwrap();
        assert!(matches!(args.destination, Some(Expr::Macro(_))));
        assert!(args.keyed.is_empty());
        assert_eq!(args.fallible, None);
    }

    #[test]
    fn parses_empty_arguments() {
        let args: MacroArgs = syn::parse2(quote!()).unwrap();
        assert!(args.destination.is_none());
        assert!(args.keyed.is_empty() && args.skip.is_empty());
        assert!(!args.debug);
    }
}
