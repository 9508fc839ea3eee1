//! Runtime memory model
//!
//! This module provides the core runtime abstractions:
//! - [`value`]: Runtime value representation (Number, String, Boolean)
//! - [`environment`]: The runtime scope chain, an arena of parent-linked frames
//!
//! The runtime scope chain is separate from the parser's
//! [`ParseScope`](crate::parser::scope::ParseScope); the two are built from
//! the same block structure but never share state.

pub mod environment;
pub mod value;
