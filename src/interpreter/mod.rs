//! Tree-walking execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the [`engine::Interpreter`] and statement dispatch
//! - [`builtins`]: host functions such as `print`
//! - [`config`]: call scoping and recursion limits
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! The interpreter walks the AST one statement at a time. Every statement
//! yields a [`engine::ControlFlow`] signal; a block stops at the first signal
//! that is not `Normal` and hands it to its enclosing construct. Loops absorb
//! `break`/`continue`, calls absorb everything and turn `return` into a value.

pub mod builtins;
pub mod config;
pub mod engine;
pub mod errors;

mod calls;
mod expressions;
mod loops;
mod ops;
mod statements;
