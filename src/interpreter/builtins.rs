//! Built-in function registry
//!
//! Builtins are host functions resolved by name only when no user function
//! of that name has been defined. They receive already-evaluated arguments.
//!
//! # Supported Built-ins
//!
//! - `print(args...)`: writes each argument on its own line (numbers in
//!   decimal, strings verbatim, booleans as `true`/`false`) and returns no value
//!
//! Hosts embedding the interpreter can add more with [`Builtins::register`].

use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::SourceLocation;
use crate::terminal::Terminal;
use rustc_hash::FxHashMap;
use std::fmt;

/// Signature shared by all builtins
pub type BuiltinFn =
    fn(&mut Terminal, &[Value], SourceLocation) -> Result<Option<Value>, RuntimeError>;

/// Name-keyed builtin table
#[derive(Clone)]
pub struct Builtins {
    table: FxHashMap<String, BuiltinFn>,
}

impl fmt::Debug for Builtins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Builtins").field("names", &names).finish()
    }
}

impl Builtins {
    /// A registry with no builtins at all
    pub fn empty() -> Self {
        Builtins {
            table: FxHashMap::default(),
        }
    }

    /// The standard registry: just `print`
    pub fn standard() -> Self {
        let mut builtins = Self::empty();
        builtins.register("print", builtin_print);
        builtins
    }

    /// Add or replace a builtin
    pub fn register(&mut self, name: &str, function: BuiltinFn) {
        self.table.insert(name.to_string(), function);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn dispatch(
        &self,
        name: &str,
        terminal: &mut Terminal,
        args: &[Value],
        location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        let function = self
            .table
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedFunction {
                name: name.to_string(),
                location,
            })?;
        function(terminal, args, location)
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::standard()
    }
}

fn builtin_print(
    terminal: &mut Terminal,
    args: &[Value],
    location: SourceLocation,
) -> Result<Option<Value>, RuntimeError> {
    for arg in args {
        terminal
            .print_line(arg.to_string(), location)
            .map_err(|err| RuntimeError::Output {
                message: err.to_string(),
                location,
            })?;
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_print_formats_each_type() {
        let builtins = Builtins::standard();
        let mut terminal = Terminal::capture();
        let args = [
            Value::Number(-42),
            Value::String("hello world".to_string()),
            Value::Boolean(true),
        ];

        let result = builtins
            .dispatch("print", &mut terminal, &args, SourceLocation::new(1, 1))
            .unwrap();

        assert_eq!(result, None);
        assert_eq!(terminal.get_output(), vec!["-42", "hello world", "true"]);
    }

    #[test]
    fn test_unknown_builtin() {
        let builtins = Builtins::standard();
        let mut terminal = Terminal::capture();
        let err = builtins
            .dispatch("nope", &mut terminal, &[], SourceLocation::new(3, 2))
            .unwrap_err();
        assert_eq!(err.to_string(), "could not find fn: 'nope' at line 3, column 2");
    }

    #[test]
    fn test_register_host_builtin() {
        fn answer(
            _: &mut Terminal,
            _: &[Value],
            _: SourceLocation,
        ) -> Result<Option<Value>, RuntimeError> {
            Ok(Some(Value::Number(42)))
        }

        let mut builtins = Builtins::empty();
        assert!(!builtins.contains("print"));
        builtins.register("answer", answer);

        let mut terminal = Terminal::capture();
        let result = builtins
            .dispatch("answer", &mut terminal, &[], SourceLocation::default())
            .unwrap();
        assert_eq!(result, Some(Value::Number(42)));
    }
}
