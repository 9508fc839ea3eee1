//! Source code parser
//!
//! This module transforms quill source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → lazy token stream)
//! - [`parse`]: Parsing (tokens → AST), split across `statements` and `expressions`
//! - [`scope`]: Parse-time declared-name tracking
//! - [`ast`]: AST node definitions and their parenthesised dump form
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod scope;
mod statements;
