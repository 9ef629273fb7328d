#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

uniffi::setup_scaffolding!();

pub mod aggregate;
pub mod collect;
pub mod completion;
pub mod date;
pub mod error;
pub mod ffi;
pub mod models;
pub mod parser;
pub mod template;

// Re-export common error types for convenience
pub use error::{
    ClassifyError, DateError, DateResult, ParseError, ParseResult, WeeknoteError, WeeknoteResult,
};
