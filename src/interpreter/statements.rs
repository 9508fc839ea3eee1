//! Statement execution implementation
//!
//! Declarations, assignments, `if` and `return`. Loops live in `loops.rs`,
//! calls in `calls.rs`; dispatch is in [`Interpreter::execute_block`].
//!
//! # Control Flow
//!
//! Every statement yields a [`ControlFlow`] signal. `if` runs its body in a
//! fresh frame and hands back whatever signal the body ended with, so a
//! `break` inside an `if` still reaches the enclosing loop.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::environment::ScopeId;
use crate::memory::value::Value;
use crate::parser::ast::{Block, Expr, SourceLocation};

impl Interpreter {
    /// `var name = init;` binds in the current frame, shadowing outer bindings
    /// and replacing an earlier one in the same frame.
    pub(crate) fn execute_var_decl(
        &mut self,
        name: &str,
        init: &Expr,
        scope: ScopeId,
    ) -> Result<(), RuntimeError> {
        let value = self.evaluate_expr(init, scope)?;
        self.env.declare(scope, name, value);
        Ok(())
    }

    pub(crate) fn execute_assignment(
        &mut self,
        name: &str,
        value: &Expr,
        location: SourceLocation,
        scope: ScopeId,
    ) -> Result<(), RuntimeError> {
        let value = self.evaluate_expr(value, scope)?;
        if self.env.assign(scope, name, value) {
            Ok(())
        } else {
            // Only reachable when a function body assigns a name that was
            // visible at parse time but not in the frame chain of the call
            Err(RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            })
        }
    }

    pub(crate) fn execute_if(
        &mut self,
        condition: &Expr,
        body: &Block,
        location: SourceLocation,
        scope: ScopeId,
    ) -> Result<ControlFlow, RuntimeError> {
        if self.evaluate_condition(condition, scope)? {
            tracing::trace!(%location, "if branch taken");
            self.execute_scoped(body, scope)
        } else {
            Ok(ControlFlow::Normal)
        }
    }

    pub(crate) fn execute_return(
        &mut self,
        value: Option<&Expr>,
        scope: ScopeId,
    ) -> Result<ControlFlow, RuntimeError> {
        let value = value
            .map(|expr| self.evaluate_expr(expr, scope))
            .transpose()?;
        Ok(ControlFlow::Return(value))
    }

    /// Evaluate an `if`/`while` condition, which must be a boolean
    pub(crate) fn evaluate_condition(
        &mut self,
        condition: &Expr,
        scope: ScopeId,
    ) -> Result<bool, RuntimeError> {
        match self.evaluate_expr(condition, scope)? {
            Value::Boolean(b) => Ok(b),
            other => Err(RuntimeError::type_error(
                "boolean",
                other.type_name(),
                condition.location(),
            )),
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

    fn run(source: &str) -> Result<Interpreter, RuntimeError> {
        let program = crate::parse(source).unwrap();
        let mut interp = Interpreter::new(program, Terminal::capture());
        interp.run()?;
        Ok(interp)
    }

    #[test]
    fn test_redeclaration_replaces_binding() {
        let interp = run("var x = 1; var x = \"one\";").unwrap();
        assert_eq!(interp.global("x"), Some(&Value::String("one".to_string())));
    }

    #[test]
    fn test_assignment_updates_outer_frame() {
        let interp = run("var x = 1; if true { x = x + 41; }").unwrap();
        assert_eq!(interp.global("x"), Some(&Value::Number(42)));
    }

    #[test]
    fn test_shadowing_leaves_outer_untouched() {
        let interp = run("var x = 1; if true { var x = 2; x = 3; print(x); }").unwrap();
        assert_eq!(interp.global("x"), Some(&Value::Number(1)));
        assert_eq!(interp.terminal().get_output(), vec!["3"]);
    }

    #[test]
    fn test_if_body_locals_are_dropped() {
        let interp = run("if true { var y = 1; }").unwrap();
        assert_eq!(interp.global("y"), None);
    }

    #[test]
    fn test_if_condition_must_be_boolean() {
        let err = run("if \"yes\" { print(1); }").err().unwrap();
        assert!(matches!(err, RuntimeError::TypeError { .. }));
    }

    #[test]
    fn test_return_at_top_level_ends_program() {
        let interp = run("print(1); return; print(2);").unwrap();
        assert_eq!(interp.terminal().get_output(), vec!["1"]);
    }
}
