//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the closed set of runtime types:
//!
//! - [`Value::Number`]: 64-bit signed integer
//! - [`Value::String`]: owned text
//! - [`Value::Boolean`]: `true` / `false`
//!
//! Every expression evaluation produces a fresh value; variables are rebound,
//! never mutated in place.

use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(i64),
    String(String),
    Boolean(bool),
}

impl Value {
    /// Name of the runtime type, used in type error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
        }
    }

    pub fn same_type(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Textual form written by `print`
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}
