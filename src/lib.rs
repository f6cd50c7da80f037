// Copyright 2020 TiKV Project Authors. Licensed under Apache-2.0.

#![doc = include_str!("../README.md")]

mod error;
mod inputs;
mod interceptor;
mod outcome;
mod sink;

pub use calltrace_macros::calltrace;

pub use crate::error::SinkError;
pub use crate::inputs::{Inputs, IntoInputs};
pub use crate::interceptor::Interceptor;
pub use crate::outcome::Outcome;
pub use crate::sink::Sink;
