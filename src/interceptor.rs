//! The call interceptor: run a target, classify its outcome, and record it.

use std::borrow::Cow;
use std::fmt::Display;

use crate::error::SinkError;
use crate::inputs::{Inputs, IntoInputs};
use crate::outcome::Outcome;
use crate::sink::Sink;

/// Records one line per call of a named function into a fixed [Sink].
///
/// This is what `#[calltrace]` expands into; it can also wrap closures directly:
///
/// ```
/// use calltrace::{Interceptor, Sink};
///
/// let adds = Interceptor::new("adds", Sink::Stdout)
///     .wrap(|(x, y): (i64, &str)| y.parse::<i64>().map(|y| x + y));
///
/// assert_eq!(adds((4, "5")), Ok(9));  // prints "adds ok"
/// assert!(adds((4, "a")).is_err());   // prints "adds error: invalid digit found in string. Inputs: (4, "a"), {}"
/// ```
#[derive(Debug, Clone)]
pub struct Interceptor {
    function: Cow<'static, str>,
    sink: Sink,
}

impl Interceptor {
    pub fn new(function: impl Into<Cow<'static, str>>, sink: Sink) -> Self {
        Self {
            function: function.into(),
            sink,
        }
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Formats `outcome` and dispatches it to the sink, exactly once.
    pub fn record(&self, outcome: &Outcome<'_>) -> Result<(), SinkError> {
        self.sink.dispatch(&outcome.to_string())
    }

    /// Records the outcome of a finished fallible call.
    ///
    /// # Panics
    ///
    /// If the record cannot be written. Sink failures are not recovered.
    pub fn observe<T, E: Display>(&self, result: &Result<T, E>, inputs: &Inputs) {
        let outcome = Outcome::classify(&self.function, result, inputs);
        self.record_or_panic(&outcome);
    }

    /// Records a finished call of a target that cannot fail.
    ///
    /// # Panics
    ///
    /// If the record cannot be written.
    pub fn observe_returned(&self) {
        let outcome = Outcome::Success {
            function: &self.function,
        };
        self.record_or_panic(&outcome);
    }

    /// Runs `target` and records its outcome.
    ///
    /// The target's result is handed back untouched; the outer `Result` is the sink's.
    pub fn try_call<T, E, F>(&self, inputs: Inputs, target: F) -> Result<Result<T, E>, SinkError>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        let result = target();
        self.record(&Outcome::classify(&self.function, &result, &inputs))?;
        Ok(result)
    }

    /// Runs `target`, records its outcome and returns its result.
    ///
    /// # Panics
    ///
    /// If the record cannot be written.
    pub fn call<T, E, F>(&self, inputs: Inputs, target: F) -> Result<T, E>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        let result = target();
        self.observe(&result, &inputs);
        result
    }

    /// Turns `target` into a function with the same argument and return types
    /// that records every call.
    ///
    /// Multiple arguments are passed as one tuple, whose elements make up the positional inputs.
    pub fn wrap<A, T, E, F>(self, target: F) -> impl Fn(A) -> Result<T, E>
    where
        A: IntoInputs,
        E: Display,
        F: Fn(A) -> Result<T, E>,
    {
        move |args: A| {
            let inputs = args.to_inputs();
            self.call(inputs, || target(args))
        }
    }

    fn record_or_panic(&self, outcome: &Outcome<'_>) {
        if let Err(err) = self.record(outcome) {
            panic!("`calltrace`: could not record a call of `{}`: {err}", self.function);
        }
    }
}
