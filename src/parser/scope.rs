//! Parse-time scope tracking
//!
//! A stack of declared-name sets, one frame per lexical block being parsed.
//! It exists only so that references to undeclared variables are rejected
//! while parsing; the interpreter never consults it.

use rustc_hash::FxHashSet;

#[derive(Debug, Clone)]
pub struct ParseScope {
    frames: Vec<FxHashSet<String>>,
}

impl ParseScope {
    /// A tracker holding only the program root frame.
    pub fn new() -> Self {
        ParseScope {
            frames: vec![FxHashSet::default()],
        }
    }

    /// Enter a nested block (if-body, while-body, function body)
    pub fn push(&mut self) {
        self.frames.push(FxHashSet::default());
    }

    /// Leave the innermost block. The root frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Mark `name` as declared in the innermost frame.
    pub fn declare(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string());
        }
    }

    /// Whether `name` is visible from the innermost frame.
    pub fn resolves(&self, name: &str) -> bool {
        self.frames.iter().rev().any(|frame| frame.contains(name))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for ParseScope {
    fn default() -> Self {
        Self::new()
    }
}
