//! Unary operator evaluation

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::environment::ScopeId;
use crate::memory::value::Value;
use crate::parser::ast::{Expr, SourceLocation};

impl Interpreter {
    /// `not e`: e must be a boolean
    pub(crate) fn evaluate_not_op(
        &mut self,
        operand: &Expr,
        location: SourceLocation,
        scope: ScopeId,
    ) -> Result<Value, RuntimeError> {
        match self.evaluate_expr(operand, scope)? {
            Value::Boolean(b) => Ok(Value::Boolean(!b)),
            other => Err(RuntimeError::type_error(
                "boolean",
                other.type_name(),
                location,
            )),
        }
    }
}
