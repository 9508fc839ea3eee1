//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements (declarations, if, while, fn, ...)
//! - `expressions`: Parsing expressions level by level
//!
//! Tokens are pulled from the [`Lexer`] one at a time; the parser holds only
//! the current token. Identifier references are checked against a
//! [`ParseScope`] as they are consumed, so a program that mentions an
//! undeclared variable is rejected before anything runs.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use crate::parser::scope::ParseScope;
use thiserror::Error;

/// How deeply blocks, parentheses, `not` chains and call arguments may nest
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, got {found} at {location}")]
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    #[error("unrecognized var '{name}' at {location}")]
    UndeclaredVariable {
        name: String,
        location: SourceLocation,
    },

    #[error("nesting deeper than {limit} levels at {location}")]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::UndeclaredVariable { location, .. }
            | ParseError::NestingTooDeep { location, .. } => *location,
            ParseError::Lex(err) => err.location(),
        }
    }
}

/// Recursive descent parser
pub struct Parser {
    lexer: Lexer,
    pub(crate) current: Token,
    pub(crate) scope: ParseScope,
    /// Current nesting level, bounded by [`MAX_NESTING_DEPTH`]
    nesting: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::from_lexer(Lexer::new(source))
    }

    pub fn from_lexer(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            scope: ParseScope::new(),
            nesting: 0,
        })
    }

    /// Parse the entire program into its root block
    pub fn parse_program(&mut self) -> Result<Block, ParseError> {
        let location = self.current_location();
        let statements = self.parse_block_statements()?;
        self.expect(&TokenKind::Eof, "end of input")?;
        Ok(Block::new(statements, location))
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Pull the next token from the lexer and hand back the one it replaces.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = if self.is_at_end() {
            self.current.clone()
        } else {
            self.lexer.next_token()?
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current.kind.to_string(),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub(crate) fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        self.expect(&TokenKind::Semicolon, "';'").map(|_| ())
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        if let TokenKind::Ident(name) = &self.current.kind {
            let name = name.clone();
            let location = self.advance()?.location;
            Ok((name, location))
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// Run `parse` one nesting level deeper. Recursive grammar rules go
    /// through here so pathological input fails instead of exhausting the stack.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.nesting >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                location: self.current_location(),
            });
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    /// Reject `name` unless a visible block has declared it.
    pub(crate) fn check_declared(
        &self,
        name: &str,
        location: SourceLocation,
    ) -> Result<(), ParseError> {
        if self.scope.resolves(name) {
            Ok(())
        } else {
            Err(ParseError::UndeclaredVariable {
                name: name.to_string(),
                location,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Result<Block, ParseError> {
        Parser::new(source)?.parse_program()
    }

    #[test]
    fn test_parse_declaration_and_print() {
        let program = parse("var x = 1 + 2; print(x);").unwrap();
        assert_eq!(program.statements.len(), 2);
        assert_eq!(
            program.to_string(),
            "(block (declaration x (additive (number 1) + (number 2))) \
             (call print (identifier x)))"
        );
    }

    #[test]
    fn test_parse_empty_program() {
        assert_eq!(parse("").unwrap().to_string(), "(block nil)");
    }

    #[test]
    fn test_precedence() {
        let program = parse("var a = 2 + 3 * 4 == 14 and not false;").unwrap();
        assert_eq!(
            program.to_string(),
            "(block (declaration a (boolean (boolean (additive (number 2) + \
             (multiplicative (number 3) * (number 4))) == (number 14)) and \
             (not (bool false)))))"
        );
    }

    #[test]
    fn test_left_associative_arithmetic() {
        let program = parse("var a = 8 - 4 - 2;").unwrap();
        assert_eq!(
            program.to_string(),
            "(block (declaration a (additive (additive (number 8) - (number 4)) - (number 2))))"
        );
    }

    #[test]
    fn test_comparison_is_not_associative() {
        let err = parse("var b = 1 < 2 < 3;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref found, .. } if found == "'<'"));
    }

    #[test]
    fn test_function_definition() {
        let program = parse("fn add(a, b) { return a + b; } fn nop() { return; }").unwrap();
        assert_eq!(
            program.to_string(),
            "(block (function add a b (block (return (additive (identifier a) + (identifier b))))) \
             (function nop nil (block (return nil))))"
        );
    }

    #[test]
    fn test_undeclared_variable() {
        let err = parse("var a = 1;\nprint(b);").unwrap_err();
        assert_eq!(
            err,
            ParseError::UndeclaredVariable {
                name: "b".to_string(),
                location: SourceLocation::new(2, 7),
            }
        );
    }

    #[test]
    fn test_declaration_not_visible_in_own_initializer() {
        let err = parse("var a = a;").unwrap_err();
        assert!(matches!(err, ParseError::UndeclaredVariable { ref name, .. } if name == "a"));
    }

    #[test]
    fn test_block_locals_do_not_leak() {
        let err = parse("if true { var inner = 1; } print(inner);").unwrap_err();
        assert!(matches!(err, ParseError::UndeclaredVariable { ref name, .. } if name == "inner"));
    }

    #[test]
    fn test_parameters_scoped_to_body() {
        assert!(parse("fn f(p) { print(p); }").is_ok());
        let err = parse("fn f(p) { } print(p);").unwrap_err();
        assert!(matches!(err, ParseError::UndeclaredVariable { ref name, .. } if name == "p"));
    }

    #[test]
    fn test_assignment_target_must_be_declared() {
        let err = parse("x = 1;").unwrap_err();
        assert!(matches!(err, ParseError::UndeclaredVariable { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_unexpected_leading_token() {
        let err = parse("var a = 1;\n+ a;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected statement, got '+' at line 2, column 1"
        );
    }

    #[test]
    fn test_stray_closing_brace() {
        let err = parse("var a = 1; }").unwrap_err();
        assert_eq!(err.to_string(), "expected end of input, got '}' at line 1, column 12");
    }

    #[test]
    fn test_lex_error_surfaces_through_parser() {
        let err = parse("var a = 1 # 2;").unwrap_err();
        assert!(matches!(err, ParseError::Lex(LexError::UnrecognizedChar { ch: '#', .. })));
    }

    #[test]
    fn test_deep_parentheses_rejected() {
        let depth = 20_000;
        let source = format!("var x = {}1{};", "(".repeat(depth), ")".repeat(depth));
        let err = parse(&source).unwrap_err();
        assert!(matches!(
            err,
            ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                ..
            }
        ));
    }

    #[test]
    fn test_moderate_nesting_accepted() {
        let source = format!("var x = {}1{};", "(".repeat(32), ")".repeat(32));
        assert!(parse(&source).is_ok());
        assert!(parse(&format!("var b = {}true;", "not ".repeat(32))).is_ok());
    }

    #[test]
    fn test_deep_not_chain_rejected() {
        let source = format!("var b = {}true;", "not ".repeat(10_000));
        assert!(matches!(
            parse(&source).unwrap_err(),
            ParseError::NestingTooDeep { .. }
        ));
    }

    #[test]
    fn test_deep_blocks_and_calls_rejected() {
        let blocks = format!("{}{}", "if true { ".repeat(1_000), "}".repeat(1_000));
        assert!(matches!(
            parse(&blocks).unwrap_err(),
            ParseError::NestingTooDeep { .. }
        ));

        let calls = format!("f({}1{});", "f(".repeat(1_000), ")".repeat(1_000));
        assert!(matches!(
            parse(&calls).unwrap_err(),
            ParseError::NestingTooDeep { .. }
        ));
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let source = "var i = 0; while i < 3 { if i == 1 { break; } i = i + 1; }";
        assert_eq!(parse(source).unwrap(), parse(source).unwrap());
    }
}
