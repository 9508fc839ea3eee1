//! Expression parsing implementation
//!
//! One method per precedence level, lowest first:
//!
//! ```text
//! expression     ::= and_expr {"or" and_expr}
//! and_expr       ::= comparison {"and" comparison}
//! comparison     ::= additive [("==" | "!=" | ">=" | ">" | "<" | "<=") additive]
//! additive       ::= multiplicative {("+" | "-") multiplicative}
//! multiplicative ::= not_expr {("*" | "/") not_expr}
//! not_expr       ::= "not" not_expr | atom
//! atom           ::= id | id "(" args ")" | number | string | "true" | "false"
//!                  | "(" expression ")"
//! ```
//!
//! A comparison takes at most one operator; `a < b < c` is a parse error.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.check(&TokenKind::Or) {
            let location = self.advance()?.location;
            let right = self.parse_logical_and()?;
            left = Expr::Boolean {
                left: Box::new(left),
                op: BooleanOp::Or,
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;

        while self.check(&TokenKind::And) {
            let location = self.advance()?.location;
            let right = self.parse_comparison()?;
            left = Expr::Boolean {
                left: Box::new(left),
                op: BooleanOp::And,
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_additive()?;

        let op = match self.current.kind {
            TokenKind::EqEq => BooleanOp::Eq,
            TokenKind::NotEq => BooleanOp::Ne,
            TokenKind::Ge => BooleanOp::Ge,
            TokenKind::Gt => BooleanOp::Gt,
            TokenKind::Lt => BooleanOp::Lt,
            TokenKind::Le => BooleanOp::Le,
            _ => return Ok(left),
        };
        let location = self.advance()?.location;
        let right = self.parse_additive()?;

        Ok(Expr::Boolean {
            left: Box::new(left),
            op,
            right: Box::new(right),
            location,
        })
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => AdditiveOp::Add,
                TokenKind::Minus => AdditiveOp::Sub,
                _ => break,
            };
            let location = self.advance()?.location;
            let right = self.parse_multiplicative()?;
            left = Expr::Additive {
                left: Box::new(left),
                op,
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Star => MultiplicativeOp::Mul,
                TokenKind::Slash => MultiplicativeOp::Div,
                _ => break,
            };
            let location = self.advance()?.location;
            let right = self.parse_not()?;
            left = Expr::Multiplicative {
                left: Box::new(left),
                op,
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    /// `not` is prefix and right-associative: `not not x`
    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Not) {
            let location = self.advance()?.location;
            let inner = self.nested(Self::parse_not)?;
            return Ok(Expr::Not {
                inner: Box::new(inner),
                location,
            });
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let token = match &self.current.kind {
            TokenKind::Ident(_)
            | TokenKind::Number(_)
            | TokenKind::Str(_)
            | TokenKind::True
            | TokenKind::False
            | TokenKind::LParen => self.advance()?,
            _ => return Err(self.unexpected("expression")),
        };
        let location = token.location;

        match token.kind {
            TokenKind::Ident(name) => {
                if self.check(&TokenKind::LParen) {
                    return Ok(Expr::Call(self.parse_call(name, location)?));
                }
                self.check_declared(&name, location)?;
                Ok(Expr::Identifier(name, location))
            }
            TokenKind::Number(text) => Ok(Expr::NumberLiteral(text, location)),
            TokenKind::Str(text) => Ok(Expr::StringLiteral(text, location)),
            TokenKind::True => Ok(Expr::BooleanLiteral(true, location)),
            TokenKind::False => Ok(Expr::BooleanLiteral(false, location)),
            _ => {
                let expr = self.nested(Self::parse_expression)?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(expr)
            }
        }
    }

    /// Parse the argument list of a call whose name was already consumed.
    /// Call targets are resolved at run time, not against the parse scope.
    pub(crate) fn parse_call(
        &mut self,
        name: String,
        location: SourceLocation,
    ) -> Result<Call, ParseError> {
        self.expect(&TokenKind::LParen, "'('")?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.nested(Self::parse_expression)?);
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;

        Ok(Call {
            name,
            args,
            location,
        })
    }
}
