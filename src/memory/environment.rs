//! Runtime scope chain
//!
//! Frames live in an arena and refer to their parent by [`ScopeId`]. Frames
//! are strictly stack-lifetime (nothing captures them), so entering a block
//! pushes a frame and leaving it pops the most recent one.
//!
//! - [`Environment::declare`] binds in the given frame only, replacing any
//!   earlier binding of the same name in that frame.
//! - [`Environment::assign`] rebinds the nearest frame that declared the name.
//! - [`Environment::resolve`] walks the chain; the innermost binding wins.

use super::value::Value;
use rustc_hash::FxHashMap;

/// Handle to a frame in the [`Environment`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The program root frame
    pub const ROOT: ScopeId = ScopeId(0);
}

#[derive(Debug, Clone, Default)]
struct Frame {
    vars: FxHashMap<String, Value>,
    parent: Option<ScopeId>,
}

/// Arena of runtime frames
#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// An environment holding only the root frame
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::default()],
        }
    }

    /// Push a new frame whose parent is `parent`
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        self.frames.push(Frame {
            vars: FxHashMap::default(),
            parent: Some(parent),
        });
        ScopeId(self.frames.len() - 1)
    }

    /// Pop the most recently pushed frame. The root frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of live frames, root included
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn declare(&mut self, scope: ScopeId, name: &str, value: Value) {
        if let Some(frame) = self.frames.get_mut(scope.0) {
            frame.vars.insert(name.to_string(), value);
        }
    }

    /// Rebind `name` in the nearest frame that declared it.
    /// Returns `false` if no frame in the chain has it.
    pub fn assign(&mut self, scope: ScopeId, name: &str, value: Value) -> bool {
        match self.owner_of(scope, name) {
            Some(owner) => {
                self.frames[owner.0].vars.insert(name.to_string(), value);
                true
            }
            None => false,
        }
    }

    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<&Value> {
        let owner = self.owner_of(scope, name)?;
        self.frames[owner.0].vars.get(name)
    }

    fn owner_of(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let frame = self.frames.get(id.0)?;
            if frame.vars.contains_key(name) {
                return Some(id);
            }
            current = frame.parent;
        }
        None
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
