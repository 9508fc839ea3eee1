//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to lex or parse errors).
//!
//! All runtime errors are fatal - the first one stops the run and is reported
//! by the outermost driver.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Operand type mismatch
    #[error("type mismatch at {location}: expected {expected}, got {got}")]
    TypeError {
        expected: String,
        got: String,
        location: SourceLocation,
    },

    /// Read or assignment of a name no frame has declared
    #[error("undefined variable '{name}' at {location}")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Call to a name that is neither a defined function nor a builtin
    #[error("could not find fn: '{name}' at {location}")]
    UndefinedFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("division by zero at {location}")]
    DivisionByZero { location: SourceLocation },

    /// Function argument count mismatch
    #[error("fn '{function}' expects {expected} arguments, got {got} at {location}")]
    ArityMismatch {
        function: String,
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    /// Integer overflow in arithmetic operation
    #[error("integer overflow in {operation} at {location}")]
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// Number literal that does not fit the integer type
    #[error("invalid number literal {literal} at {location}")]
    InvalidNumber {
        literal: String,
        location: SourceLocation,
    },

    /// A call that produced no value was used where a value is required
    #[error("fn '{name}' returned no value at {location}")]
    MissingValue {
        name: String,
        location: SourceLocation,
    },

    #[error("maximum call depth of {limit} exceeded at {location}")]
    CallDepthExceeded {
        limit: usize,
        location: SourceLocation,
    },

    /// Writing program output failed
    #[error("could not write output at {location}: {message}")]
    Output {
        message: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::TypeError { location, .. }
            | RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::UndefinedFunction { location, .. }
            | RuntimeError::DivisionByZero { location }
            | RuntimeError::ArityMismatch { location, .. }
            | RuntimeError::IntegerOverflow { location, .. }
            | RuntimeError::InvalidNumber { location, .. }
            | RuntimeError::MissingValue { location, .. }
            | RuntimeError::CallDepthExceeded { location, .. }
            | RuntimeError::Output { location, .. } => *location,
        }
    }

    pub(crate) fn type_error(
        expected: impl Into<String>,
        got: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        RuntimeError::TypeError {
            expected: expected.into(),
            got: got.into(),
            location,
        }
    }
}
