// Execution engine for the interpreter

use crate::interpreter::builtins::Builtins;
use crate::interpreter::config::InterpreterConfig;
use crate::interpreter::errors::RuntimeError;
use crate::memory::environment::{Environment, ScopeId};
use crate::memory::value::Value;
use crate::parser::ast::{Block, FunctionDef, Stmt};
use crate::terminal::Terminal;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Signal produced by executing a statement or block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlFlow {
    Normal,
    Break,
    Continue,
    /// `return`, with its value if one was given
    Return(Option<Value>),
}

/// The tree-walking interpreter for one parsed program
pub struct Interpreter {
    /// Parsed program (the root block)
    program: Rc<Block>,

    /// Runtime scope chain
    pub(crate) env: Environment,

    /// Functions whose `fn` statement has executed (name -> definition)
    pub(crate) functions: FxHashMap<String, Rc<FunctionDef>>,

    /// Host functions, consulted when no user function matches
    pub(crate) builtins: Builtins,

    /// Receives `print` output
    pub(crate) terminal: Terminal,

    pub(crate) config: InterpreterConfig,

    /// Number of user function calls currently executing
    pub(crate) call_depth: usize,
}

impl Interpreter {
    /// Create a new interpreter with the parsed program and default configuration
    pub fn new(program: Block, terminal: Terminal) -> Self {
        Self::with_config(program, terminal, InterpreterConfig::default())
    }

    pub fn with_config(program: Block, terminal: Terminal, config: InterpreterConfig) -> Self {
        Interpreter {
            program: Rc::new(program),
            env: Environment::new(),
            functions: FxHashMap::default(),
            builtins: Builtins::standard(),
            terminal,
            config,
            call_depth: 0,
        }
    }

    /// Run the program from start to finish.
    ///
    /// Each run starts from an empty root scope and an empty function table,
    /// so an interpreter can run its program more than once.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        self.env = Environment::new();
        self.functions.clear();
        self.call_depth = 0;

        let program = Rc::clone(&self.program);
        tracing::debug!(statements = program.statements.len(), "running program");

        // A signal reaching the root simply ends the program
        let flow = self.execute_block(&program, ScopeId::ROOT)?;
        if flow != ControlFlow::Normal {
            tracing::debug!(?flow, "program ended by control-flow signal");
        }
        Ok(())
    }

    /// Execute statements in order within `scope`. The first non-`Normal`
    /// signal stops the block and is handed back unchanged.
    pub(crate) fn execute_block(
        &mut self,
        block: &Block,
        scope: ScopeId,
    ) -> Result<ControlFlow, RuntimeError> {
        for stmt in &block.statements {
            let flow = self.execute_statement(stmt, scope)?;
            if flow != ControlFlow::Normal {
                return Ok(flow);
            }
        }
        Ok(ControlFlow::Normal)
    }

    /// Execute `block` in a fresh child frame of `parent`
    pub(crate) fn execute_scoped(
        &mut self,
        block: &Block,
        parent: ScopeId,
    ) -> Result<ControlFlow, RuntimeError> {
        let scope = self.env.push(parent);
        tracing::trace!(depth = self.env.depth(), "entered scope");
        let result = self.execute_block(block, scope);
        self.env.pop();
        result
    }

    /// Execute a single statement
    fn execute_statement(&mut self, stmt: &Stmt, scope: ScopeId) -> Result<ControlFlow, RuntimeError> {
        match stmt {
            Stmt::Declaration { name, init, .. } => {
                self.execute_var_decl(name, init, scope)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::Assignment {
                name,
                value,
                location,
            } => {
                self.execute_assignment(name, value, *location, scope)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::If {
                condition,
                body,
                location,
            } => self.execute_if(condition, body, *location, scope),

            Stmt::While {
                condition,
                body,
                location,
            } => self.execute_while(condition, body, *location, scope),

            Stmt::Break { .. } => Ok(ControlFlow::Break),

            Stmt::Continue { .. } => Ok(ControlFlow::Continue),

            Stmt::FunctionDef(def) => {
                self.define_function(def);
                Ok(ControlFlow::Normal)
            }

            Stmt::Return { value, .. } => self.execute_return(value.as_ref(), scope),

            Stmt::Expression(call) => {
                // Call as statement (any value is discarded)
                self.call(call, scope)?;
                Ok(ControlFlow::Normal)
            }
        }
    }

    /// Register a function. Later definitions of the same name replace earlier ones.
    fn define_function(&mut self, def: &Rc<FunctionDef>) {
        tracing::debug!(name = %def.name, params = def.params.len(), "defined function");
        self.functions.insert(def.name.clone(), Rc::clone(def));
    }

    // ===== Accessors =====

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn into_terminal(self) -> Terminal {
        self.terminal
    }

    /// Functions defined so far in the current run
    pub fn function_defs(&self) -> &FxHashMap<String, Rc<FunctionDef>> {
        &self.functions
    }

    /// Look up a variable in the root scope (top-level declarations)
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.env.resolve(ScopeId::ROOT, name)
    }

    /// Host builtins; register more before calling [`Interpreter::run`]
    pub fn builtins_mut(&mut self) -> &mut Builtins {
        &mut self.builtins
    }
}
