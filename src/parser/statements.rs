//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement ::= "var" id "=" expr ";"
//!             | "if" expr body
//!             | "while" expr body
//!             | "break" ";" | "continue" ";"
//!             | "fn" id "(" [id {"," id}] ")" body
//!             | "return" [expr] ";"
//!             | id "=" expr ";"
//!             | id "(" [expr {"," expr}] ")" ";"
//! body      ::= "{" {statement} "}"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use std::rc::Rc;

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse statements up to (not including) a closing brace or end of input
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a braced body in a fresh parse scope. `params` are declared in
    /// that scope before the first statement.
    fn parse_body(&mut self, params: &[String]) -> Result<Block, ParseError> {
        let location = self.expect(&TokenKind::LBrace, "'{'")?.location;

        let statements = self.nested(|parser| {
            parser.scope.push();
            tracing::trace!(depth = parser.scope.depth(), "entering block");
            for param in params {
                parser.scope.declare(param);
            }
            let statements = parser.parse_block_statements();
            parser.scope.pop();
            statements
        })?;

        self.expect(&TokenKind::RBrace, "'}'")?;
        Ok(Block::new(statements, location))
    }

    /// Parse a statement, dispatching on its leading token
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match &self.current.kind {
            TokenKind::Var => self.parse_declaration(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Break => {
                let location = self.advance()?.location;
                self.expect_semicolon()?;
                Ok(Stmt::Break { location })
            }
            TokenKind::Continue => {
                let location = self.advance()?.location;
                self.expect_semicolon()?;
                Ok(Stmt::Continue { location })
            }
            TokenKind::Fn => self.parse_function_definition(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Ident(_) => self.parse_assignment_or_call(),
            _ => Err(self.unexpected("statement")),
        }
    }

    /// `var id = expr;`: the name becomes visible only after its initializer
    fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        let location = self.advance()?.location;
        let (name, _) = self.expect_identifier()?;
        self.expect(&TokenKind::Assign, "'='")?;
        let init = self.parse_expression()?;
        self.expect_semicolon()?;

        self.scope.declare(&name);

        Ok(Stmt::Declaration {
            name,
            init,
            location,
        })
    }

    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.advance()?.location;
        let condition = self.parse_expression()?;
        let body = self.parse_body(&[])?;

        Ok(Stmt::If {
            condition,
            body,
            location,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.advance()?.location;
        let condition = self.parse_expression()?;
        let body = self.parse_body(&[])?;

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// `fn name(a, b) { ... }`
    fn parse_function_definition(&mut self) -> Result<Stmt, ParseError> {
        let location = self.advance()?.location;
        let (name, _) = self.expect_identifier()?;
        self.expect(&TokenKind::LParen, "'('")?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let (param, _) = self.expect_identifier()?;
                params.push(param);
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;

        tracing::trace!(%name, params = params.len(), "parsing function body");
        let body = self.parse_body(&params)?;

        Ok(Stmt::FunctionDef(Rc::new(FunctionDef {
            name,
            params,
            body,
            location,
        })))
    }

    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.advance()?.location;

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_semicolon()?;

        Ok(Stmt::Return { value, location })
    }

    /// A leading identifier is either `id = expr;` or `id(args);`
    fn parse_assignment_or_call(&mut self) -> Result<Stmt, ParseError> {
        let (name, location) = self.expect_identifier()?;

        let stmt = if self.match_token(&TokenKind::Assign)? {
            self.check_declared(&name, location)?;
            let value = self.parse_expression()?;
            Stmt::Assignment {
                name,
                value,
                location,
            }
        } else if self.check(&TokenKind::LParen) {
            Stmt::Expression(self.parse_call(name, location)?)
        } else {
            return Err(self.unexpected("'=' or '('"));
        };

        self.expect_semicolon()?;
        Ok(stmt)
    }
}
