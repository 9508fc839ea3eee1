//! Loop statement execution (`while`).
//!
//! `break` and `continue` are consumed here via `LoopBodyResult` so the loop
//! driver can react without re-inspecting the signal. `return` inside a loop
//! body comes back as `LoopBodyResult::Exit`, which unwinds the loop and hands
//! the signal to the enclosing block.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::environment::ScopeId;
use crate::parser::ast::{Block, Expr, SourceLocation};

/// Result returned by [`Interpreter::execute_loop_body`] to signal how the body ended.
pub(crate) enum LoopBodyResult {
    /// Body completed normally or via `continue`; re-test the condition.
    Continue,
    /// `break` was encountered; leave the loop.
    Break,
    /// Any other signal; leave the loop and propagate it.
    Exit(ControlFlow),
}

impl Interpreter {
    /// Executes `body` once in a fresh child frame of `scope`.
    pub(crate) fn execute_loop_body(
        &mut self,
        body: &Block,
        scope: ScopeId,
    ) -> Result<LoopBodyResult, RuntimeError> {
        Ok(match self.execute_scoped(body, scope)? {
            ControlFlow::Normal | ControlFlow::Continue => LoopBodyResult::Continue,
            ControlFlow::Break => LoopBodyResult::Break,
            flow @ ControlFlow::Return(_) => LoopBodyResult::Exit(flow),
        })
    }

    /// Executes a `while condition { body }` loop.
    ///
    /// The condition is evaluated in the enclosing scope before each iteration
    /// and must be a boolean.
    pub(crate) fn execute_while(
        &mut self,
        condition: &Expr,
        body: &Block,
        location: SourceLocation,
        scope: ScopeId,
    ) -> Result<ControlFlow, RuntimeError> {
        let mut iterations: u64 = 0;
        loop {
            if !self.evaluate_condition(condition, scope)? {
                break;
            }
            iterations += 1;

            match self.execute_loop_body(body, scope)? {
                LoopBodyResult::Exit(flow) => return Ok(flow),
                LoopBodyResult::Break => break,
                LoopBodyResult::Continue => continue,
            }
        }
        tracing::trace!(%location, iterations, "while loop finished");

        Ok(ControlFlow::Normal)
    }
}
