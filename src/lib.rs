//! # Introduction
//!
//! Quill lexes, parses and runs a small dynamically typed scripting language
//! with variables, `if`/`while`, first-order functions and a `print` builtin.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source -> Lexer -> Parser (+ scope check) -> AST -> Interpreter -> Terminal
//! ```
//!
//! 1. [`parser`]: the lexer produces tokens on demand; the recursive-descent
//!    parser builds the AST and rejects references to undeclared variables
//!    before anything runs.
//! 2. [`interpreter`]: walks the AST, threading a control-flow signal through
//!    blocks, loops and calls.
//! 3. [`memory`]: runtime [`memory::value::Value`]s and the frame chain they
//!    are bound in.
//! 4. [`terminal`]: where `print` writes, either stdout or an in-memory capture.
//!
//! ## Language
//!
//! Types: numbers (64-bit integers), strings, booleans.
//! Statements: `var`, assignment, `if`, `while`, `break`, `continue`, `fn`,
//! `return`, calls.
//! Operators: `or`, `and`, `== != >= > < <=`, `+ -`, `* /`, `not`.
//!
//! ```
//! use quill::interpreter::config::InterpreterConfig;
//! use quill::terminal::Terminal;
//!
//! let source = "var i = 0; while i < 3 { print(i); i = i + 1; }";
//! let terminal = quill::run(source, InterpreterConfig::default(), Terminal::capture()).unwrap();
//! assert_eq!(terminal.get_output(), vec!["0", "1", "2"]);
//! ```

pub mod error;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod terminal;

pub use error::Error;

use interpreter::config::InterpreterConfig;
use interpreter::engine::Interpreter;
use parser::ast::Block;
use parser::lexer::{LexError, Lexer, Token};
use parser::parse::{ParseError, Parser};
use terminal::Terminal;

/// Tokenize the whole source, ending with the `eof` token
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Parse and scope-check a program
pub fn parse(source: &str) -> Result<Block, ParseError> {
    Parser::new(source)?.parse_program()
}

/// Parse and execute a program, returning the terminal that received its output
pub fn run(source: &str, config: InterpreterConfig, terminal: Terminal) -> Result<Terminal, Error> {
    let program = parse(source).map_err(Error::from_parse)?;

    let mut interpreter = Interpreter::with_config(program, terminal, config);
    interpreter.run()?;
    Ok(interpreter.into_terminal())
}
