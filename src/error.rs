//! Crate-level error type
//!
//! Each stage has its own error; [`Error`] is what the pipeline entry points
//! in `lib.rs` return. The first error wins and nothing is recovered.

use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::SourceLocation;
use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Lex errors reach the parser because tokens are pulled lazily; report
    /// them as lex errors rather than parse errors.
    pub fn from_parse(err: ParseError) -> Self {
        match err {
            ParseError::Lex(lex) => Error::Lex(lex),
            other => Error::Parse(other),
        }
    }

    /// Process exit status for this error. Every fatal script error maps to 1.
    pub fn exit_code(&self) -> i32 {
        1
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Error::Lex(err) => err.location(),
            Error::Parse(err) => err.location(),
            Error::Runtime(err) => err.location(),
        }
    }
}
