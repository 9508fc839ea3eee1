//! Function calls
//!
//! A call resolves its name against the user function table first and falls
//! back to the builtin registry. User calls run the body in a new frame that
//! holds the parameters; which frame that one is parented to depends on
//! [`CallScoping`].

use crate::interpreter::config::CallScoping;
use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::environment::ScopeId;
use crate::memory::value::Value;
use crate::parser::ast::{Call, FunctionDef};
use std::rc::Rc;

impl Interpreter {
    /// Perform a call from `scope`. Yields `None` when the callee produced no value.
    pub(crate) fn call(&mut self, call: &Call, scope: ScopeId) -> Result<Option<Value>, RuntimeError> {
        if let Some(def) = self.functions.get(&call.name).map(Rc::clone) {
            return self.call_user_function(&def, call, scope);
        }

        let args = self.evaluate_args(call, scope)?;
        self.builtins
            .dispatch(&call.name, &mut self.terminal, &args, call.location)
    }

    /// Arguments are evaluated left to right in the caller's scope
    fn evaluate_args(&mut self, call: &Call, scope: ScopeId) -> Result<Vec<Value>, RuntimeError> {
        call.args
            .iter()
            .map(|arg| self.evaluate_expr(arg, scope))
            .collect()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = %call.name))]
    fn call_user_function(
        &mut self,
        def: &FunctionDef,
        call: &Call,
        scope: ScopeId,
    ) -> Result<Option<Value>, RuntimeError> {
        if call.args.len() != def.params.len() {
            return Err(RuntimeError::ArityMismatch {
                function: def.name.clone(),
                expected: def.params.len(),
                got: call.args.len(),
                location: call.location,
            });
        }
        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                limit: self.config.max_call_depth,
                location: call.location,
            });
        }

        let args = self.evaluate_args(call, scope)?;

        let parent = match self.config.call_scoping {
            CallScoping::Global => ScopeId::ROOT,
            CallScoping::Caller => scope,
        };

        let frame = self.env.push(parent);
        for (param, value) in def.params.iter().zip(args) {
            self.env.declare(frame, param, value);
        }

        self.call_depth += 1;
        let result = self.execute_block(&def.body, frame);
        self.call_depth -= 1;
        self.env.pop();

        // break/continue that escape the body stop at the call boundary
        match result? {
            ControlFlow::Return(value) => Ok(value),
            ControlFlow::Normal | ControlFlow::Break | ControlFlow::Continue => Ok(None),
        }
    }
}
