//! Pre-rendered inputs of a single invocation.

use std::borrow::Cow;
use std::fmt;

/// The inputs a target was called with, already rendered to strings.
///
/// Targets take their arguments by value, so the inputs are rendered before the call
/// and kept around in case the call fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    positional: Vec<String>,
    keyed: Vec<(Cow<'static, str>, String)>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional input.
    pub fn positional(mut self, repr: impl Into<String>) -> Self {
        self.positional.push(repr.into());
        self
    }

    /// Appends a keyed input. Keys keep their insertion order.
    pub fn keyed(mut self, name: impl Into<Cow<'static, str>>, repr: impl Into<String>) -> Self {
        self.keyed.push((name.into(), repr.into()));
        self
    }

    pub fn positional_values(&self) -> &[String] {
        &self.positional
    }

    pub fn keyed_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keyed
            .iter()
            .map(|(name, repr)| (name.as_ref(), repr.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyed.is_empty()
    }
}

impl fmt::Display for Inputs {
    /// `(4, "a"), {"z": 1}`: a tuple of the positional inputs, then a map of the keyed ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, repr) in self.positional.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(repr)?;
        }
        // a one-element tuple keeps its trailing comma
        if self.positional.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str("), {")?;
        for (index, (name, repr)) in self.keyed.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {}", name, repr)?;
        }
        f.write_str("}")
    }
}

/// Argument tuples that can describe themselves as positional [Inputs].
///
/// Implemented for tuples of up to 8 `Debug` elements; this is what
/// [Interceptor::wrap](crate::Interceptor::wrap) takes as its argument.
pub trait IntoInputs {
    fn to_inputs(&self) -> Inputs;
}

macro_rules! impl_into_inputs {
    ($($ty:ident $var:ident)*) => {
        impl<$($ty: fmt::Debug,)*> IntoInputs for ($($ty,)*) {
            fn to_inputs(&self) -> Inputs {
                let ($($var,)*) = self;
                Inputs::new()
                    $(.positional(format!("{:?}", $var)))*
            }
        }
    };
}

impl_into_inputs!();
impl_into_inputs!(A a);
impl_into_inputs!(A a B b);
impl_into_inputs!(A a B b C c);
impl_into_inputs!(A a B b C c D d);
impl_into_inputs!(A a B b C c D d E e);
impl_into_inputs!(A a B b C c D d E e F f);
impl_into_inputs!(A a B b C c D d E e F f G g);
impl_into_inputs!(A a B b C c D d E e F f G g H h);
