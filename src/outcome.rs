//! Success/failure classification of one invocation.

use std::fmt;

use crate::inputs::Inputs;

/// The outcome of a single call. Its `Display` form is the record written to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// `"{function} ok"`
    Success { function: &'a str },
    /// `"{function} error: {error}. Inputs: {inputs}"`
    Failure {
        function: &'a str,
        error: String,
        inputs: &'a Inputs,
    },
}

impl<'a> Outcome<'a> {
    /// Classifies a finished call by its `Result`.
    pub fn classify<T, E: fmt::Display>(
        function: &'a str,
        result: &Result<T, E>,
        inputs: &'a Inputs,
    ) -> Self {
        match result {
            Ok(_) => Outcome::Success { function },
            Err(err) => Outcome::Failure {
                function,
                error: err.to_string(),
                inputs,
            },
        }
    }

    pub fn function(&self) -> &'a str {
        match self {
            Outcome::Success { function } | Outcome::Failure { function, .. } => *function,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success { function } => write!(f, "{function} ok"),
            Outcome::Failure {
                function,
                error,
                inputs,
            } => write!(f, "{function} error: {error}. Inputs: {inputs}"),
        }
    }
}
