//! Expression evaluation implementation
//!
//! Handles every expression form:
//!
//! - Literals (numbers, strings, booleans)
//! - Identifiers, resolved through the runtime scope chain
//! - Boolean, additive and multiplicative operators (see `ops/binary.rs`)
//! - `not` (see `ops/unary.rs`)
//! - Calls used as values
//!
//! # Safety
//!
//! All arithmetic uses checked math, so overflow is a runtime error rather
//! than a panic or a wrapped result.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::environment::ScopeId;
use crate::memory::value::Value;
use crate::parser::ast::Expr;

impl Interpreter {
    /// Evaluate an expression in `scope` and return its value
    pub(crate) fn evaluate_expr(&mut self, expr: &Expr, scope: ScopeId) -> Result<Value, RuntimeError> {
        match expr {
            Expr::NumberLiteral(text, loc) => {
                text.parse::<i64>()
                    .map(Value::Number)
                    .map_err(|_| RuntimeError::InvalidNumber {
                        literal: text.clone(),
                        location: *loc,
                    })
            }

            Expr::StringLiteral(s, _) => Ok(Value::String(s.clone())),

            Expr::BooleanLiteral(b, _) => Ok(Value::Boolean(*b)),

            Expr::Identifier(name, loc) => self.env.resolve(scope, name).cloned().ok_or_else(|| {
                RuntimeError::UndefinedVariable {
                    name: name.clone(),
                    location: *loc,
                }
            }),

            Expr::Boolean {
                left,
                op,
                right,
                location,
            } => self.evaluate_boolean_op(left, *op, right, *location, scope),

            Expr::Additive {
                left,
                op,
                right,
                location,
            } => self.evaluate_additive_op(left, *op, right, *location, scope),

            Expr::Multiplicative {
                left,
                op,
                right,
                location,
            } => self.evaluate_multiplicative_op(left, *op, right, *location, scope),

            Expr::Not { inner, location } => self.evaluate_not_op(inner, *location, scope),

            Expr::Call(call) => self.call(call, scope)?.ok_or_else(|| RuntimeError::MissingValue {
                name: call.name.clone(),
                location: call.location,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::Interpreter;
    use crate::interpreter::errors::RuntimeError;
    use crate::memory::value::Value;
    use crate::terminal::Terminal;
    use pretty_assertions::assert_eq;

    fn global_after(source: &str, name: &str) -> Value {
        let program = crate::parse(source).unwrap();
        let mut interp = Interpreter::new(program, Terminal::capture());
        interp.run().unwrap();
        interp.global(name).cloned().unwrap()
    }

    fn run_err(source: &str) -> RuntimeError {
        let program = crate::parse(source).unwrap();
        let mut interp = Interpreter::new(program, Terminal::capture());
        interp.run().unwrap_err()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(global_after("var x = 2 + 3 * 4;", "x"), Value::Number(14));
        assert_eq!(global_after("var x = (2 + 3) * 4;", "x"), Value::Number(20));
        assert_eq!(global_after("var x = 10 - 3 - 2;", "x"), Value::Number(5));
    }

    #[test]
    fn test_not_and_logic() {
        assert_eq!(
            global_after("var x = not false and true;", "x"),
            Value::Boolean(true)
        );
        assert_eq!(
            global_after("var x = not not true;", "x"),
            Value::Boolean(true)
        );
        assert_eq!(
            global_after("var x = 1 < 2 or false;", "x"),
            Value::Boolean(true)
        );
    }

    #[test]
    fn test_string_comparison() {
        assert_eq!(
            global_after("var x = \"abc\" == \"abc\";", "x"),
            Value::Boolean(true)
        );
        assert_eq!(global_after("var x = \"b\" >= \"a\";", "x"), Value::Boolean(true));
    }

    #[test]
    fn test_not_requires_boolean() {
        let err = run_err("var x = not 1;");
        assert!(matches!(err, RuntimeError::TypeError { .. }));
    }

    #[test]
    fn test_number_literal_out_of_range() {
        let err = run_err("var x = 99999999999999999999;");
        assert!(matches!(err, RuntimeError::InvalidNumber { .. }));
    }

    #[test]
    fn test_call_without_value_in_expression() {
        let err = run_err("fn f() { } var x = f();");
        assert_eq!(
            err,
            RuntimeError::MissingValue {
                name: "f".to_string(),
                location: crate::parser::ast::SourceLocation::new(1, 20),
            }
        );
    }
}
