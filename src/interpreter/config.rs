// Interpreter configuration

/// Default limit on nested user function calls. Fits a 2 MiB thread stack,
/// the size of test threads and of most threads an embedder spawns.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 128;

/// Largest limit the command-line driver accepts
pub const MAX_CALL_DEPTH_LIMIT: usize = 4096;

/// Native stack reserved per nested user call when sizing an interpreter thread
pub const STACK_BYTES_PER_CALL: usize = 32 * 1024;

/// Stack size for a thread that runs programs with the given call limit.
/// Never less than 8 MiB.
pub fn stack_size_for(max_call_depth: usize) -> usize {
    max_call_depth
        .saturating_mul(STACK_BYTES_PER_CALL)
        .max(8 * 1024 * 1024)
}

/// Which frame a user function call's frame is parented to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallScoping {
    /// Parent to the program root: a function sees its parameters, its own
    /// locals and top-level variables, never its caller's locals.
    #[default]
    Global,
    /// Parent to the scope active at the call site, so a function can read
    /// and assign its caller's locals.
    Caller,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub call_scoping: CallScoping,
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            call_scoping: CallScoping::Global,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
