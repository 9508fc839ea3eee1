//! Binary operator evaluation
//!
//! Both operands are always evaluated, left first, before the operator is
//! applied. `and`/`or` do not short-circuit.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::environment::ScopeId;
use crate::memory::value::Value;
use crate::parser::ast::{AdditiveOp, BooleanOp, Expr, MultiplicativeOp, SourceLocation};
use std::cmp::Ordering;

impl Interpreter {
    pub(crate) fn evaluate_boolean_op(
        &mut self,
        left: &Expr,
        op: BooleanOp,
        right: &Expr,
        location: SourceLocation,
        scope: ScopeId,
    ) -> Result<Value, RuntimeError> {
        let left_val = self.evaluate_expr(left, scope)?;
        let right_val = self.evaluate_expr(right, scope)?;

        match op {
            BooleanOp::And | BooleanOp::Or => {
                Self::logical_values(&left_val, op, &right_val, location)
            }
            _ => Self::compare_values(&left_val, op, &right_val, location),
        }
    }

    pub(crate) fn evaluate_additive_op(
        &mut self,
        left: &Expr,
        op: AdditiveOp,
        right: &Expr,
        location: SourceLocation,
        scope: ScopeId,
    ) -> Result<Value, RuntimeError> {
        let left_val = self.evaluate_expr(left, scope)?;
        let right_val = self.evaluate_expr(right, scope)?;

        match op {
            AdditiveOp::Add => Self::checked_add_values(&left_val, &right_val, location),
            AdditiveOp::Sub => Self::checked_sub_values(&left_val, &right_val, location),
        }
    }

    pub(crate) fn evaluate_multiplicative_op(
        &mut self,
        left: &Expr,
        op: MultiplicativeOp,
        right: &Expr,
        location: SourceLocation,
        scope: ScopeId,
    ) -> Result<Value, RuntimeError> {
        let left_val = self.evaluate_expr(left, scope)?;
        let right_val = self.evaluate_expr(right, scope)?;

        match op {
            MultiplicativeOp::Mul => Self::checked_mul_values(&left_val, &right_val, location),
            MultiplicativeOp::Div => Self::checked_div_values(&left_val, &right_val, location),
        }
    }

    /// Both operands of an arithmetic operator must be numbers
    fn number_operands(
        left: &Value,
        symbol: &str,
        right: &Value,
        location: SourceLocation,
    ) -> Result<(i64, i64), RuntimeError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            _ => Err(RuntimeError::type_error(
                "number",
                format!("{} {} {}", left.type_name(), symbol, right.type_name()),
                location,
            )),
        }
    }

    #[inline]
    pub(crate) fn checked_add_values(
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let (a, b) = Self::number_operands(left, "+", right, location)?;
        a.checked_add(b)
            .ok_or(RuntimeError::IntegerOverflow {
                operation: format!("{} + {}", a, b),
                location,
            })
            .map(Value::Number)
    }

    #[inline]
    pub(crate) fn checked_sub_values(
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let (a, b) = Self::number_operands(left, "-", right, location)?;
        a.checked_sub(b)
            .ok_or(RuntimeError::IntegerOverflow {
                operation: format!("{} - {}", a, b),
                location,
            })
            .map(Value::Number)
    }

    #[inline]
    pub(crate) fn checked_mul_values(
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let (a, b) = Self::number_operands(left, "*", right, location)?;
        a.checked_mul(b)
            .ok_or(RuntimeError::IntegerOverflow {
                operation: format!("{} * {}", a, b),
                location,
            })
            .map(Value::Number)
    }

    /// Integer division, truncating toward zero
    #[inline]
    pub(crate) fn checked_div_values(
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let (a, b) = Self::number_operands(left, "/", right, location)?;
        if b == 0 {
            return Err(RuntimeError::DivisionByZero { location });
        }
        // i64::MIN / -1 is the only other failure
        a.checked_div(b)
            .ok_or(RuntimeError::IntegerOverflow {
                operation: format!("{} / {}", a, b),
                location,
            })
            .map(Value::Number)
    }

    fn logical_values(
        left: &Value,
        op: BooleanOp,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(match op {
                BooleanOp::And => *a && *b,
                _ => *a || *b,
            })),
            _ => Err(RuntimeError::type_error(
                "boolean",
                format!("{} {} {}", left.type_name(), op.symbol(), right.type_name()),
                location,
            )),
        }
    }

    /// Equality works on any two values of the same type; ordering only on
    /// numbers (numeric) and strings (lexicographic).
    pub(crate) fn compare_values(
        left: &Value,
        op: BooleanOp,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if !left.same_type(right) {
            return Err(RuntimeError::type_error(
                left.type_name(),
                right.type_name(),
                location,
            ));
        }

        if !op.is_ordering() {
            let equal = left == right;
            return Ok(Value::Boolean(if op == BooleanOp::Eq {
                equal
            } else {
                !equal
            }));
        }

        let ordering = match (left, right) {
            (Value::Number(a), Value::Number(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => {
                return Err(RuntimeError::type_error(
                    "number or string",
                    format!("{} {} {}", left.type_name(), op.symbol(), right.type_name()),
                    location,
                ))
            }
        };

        let result = match op {
            BooleanOp::Ge => ordering != Ordering::Less,
            BooleanOp::Gt => ordering == Ordering::Greater,
            BooleanOp::Lt => ordering == Ordering::Less,
            _ => ordering != Ordering::Greater,
        };
        Ok(Value::Boolean(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    fn num(n: i64) -> Value {
        Value::Number(n)
    }

    fn string(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        assert_eq!(
            Interpreter::checked_div_values(&num(7), &num(2), loc()).unwrap(),
            num(3)
        );
        assert_eq!(
            Interpreter::checked_div_values(&num(-7), &num(2), loc()).unwrap(),
            num(-3)
        );
    }

    #[test]
    fn test_division_by_zero() {
        let err = Interpreter::checked_div_values(&num(1), &num(0), loc()).unwrap_err();
        assert_eq!(err, RuntimeError::DivisionByZero { location: loc() });
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = Interpreter::checked_add_values(&num(i64::MAX), &num(1), loc()).unwrap_err();
        assert!(matches!(err, RuntimeError::IntegerOverflow { .. }));

        let err = Interpreter::checked_div_values(&num(i64::MIN), &num(-1), loc()).unwrap_err();
        assert!(matches!(err, RuntimeError::IntegerOverflow { .. }));
    }

    #[test]
    fn test_arithmetic_rejects_strings() {
        let err = Interpreter::checked_add_values(&string("a"), &num(1), loc()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch at line 1, column 1: expected number, got string + number"
        );
    }

    #[test]
    fn test_string_ordering_is_lexicographic() {
        let result =
            Interpreter::compare_values(&string("apple"), BooleanOp::Lt, &string("banana"), loc());
        assert_eq!(result.unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_equality_across_types_is_an_error() {
        let err =
            Interpreter::compare_values(&num(1), BooleanOp::Eq, &string("1"), loc()).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeError { .. }));
    }

    #[test]
    fn test_boolean_equality_but_no_ordering() {
        let t = Value::Boolean(true);
        let f = Value::Boolean(false);
        assert_eq!(
            Interpreter::compare_values(&t, BooleanOp::Ne, &f, loc()).unwrap(),
            Value::Boolean(true)
        );
        assert!(Interpreter::compare_values(&t, BooleanOp::Lt, &f, loc()).is_err());
    }

    #[test]
    fn test_logical_operands_must_be_boolean() {
        let err = Interpreter::logical_values(&num(1), BooleanOp::And, &Value::Boolean(true), loc())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::TypeError { .. }));
    }
}
