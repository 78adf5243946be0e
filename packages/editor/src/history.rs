//! # Undo/Redo History
//!
//! Two bounded stacks of whole-document snapshots.
//!
//! ## Design
//!
//! - Every committed edit pushes the *pre-edit* document onto the undo
//!   stack and clears the redo stack
//! - Undo pops the undo stack and parks the current document on the redo
//!   stack; redo is the symmetric inverse
//! - Both stacks are bounded: pushing past the bound evicts the oldest
//!   snapshot, never the newest
//! - Underflow (undo/redo with an empty stack) is a silent no-op
//!
//! Snapshots are owned clones. Once pushed they are never handed out as
//! the live mutable document, so mutating the live tree can never reach
//! into history.

use pagecraft_schema::Project;

/// Maximum number of retained undo (and redo) snapshots
pub const MAX_HISTORY: usize = 100;

/// Bounded undo/redo snapshot stacks
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<Project>,
    redo: Vec<Project>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new edit: snapshot the pre-edit document and invalidate
    /// the redo future.
    pub fn record(&mut self, snapshot: Project) {
        self.undo.push(snapshot);
        if self.undo.len() > MAX_HISTORY {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    pub fn pop_undo(&mut self) -> Option<Project> {
        self.undo.pop()
    }

    pub fn pop_redo(&mut self) -> Option<Project> {
        self.redo.pop()
    }

    /// Park the current document on the redo stack (during undo).
    pub fn push_redo(&mut self, snapshot: Project) {
        self.redo.push(snapshot);
        if self.redo.len() > MAX_HISTORY {
            self.redo.remove(0);
        }
    }

    /// Return a snapshot to the undo stack without clearing redo
    /// (during redo).
    pub fn push_undo(&mut self, snapshot: Project) {
        self.undo.push(snapshot);
        if self.undo.len() > MAX_HISTORY {
            self.undo.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo.len()
    }

    /// Oldest retained undo snapshot, if any. Useful for eviction tests.
    pub fn oldest_undo(&self) -> Option<&Project> {
        self.undo.first()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str) -> Project {
        let mut project = Project::default();
        project.meta.name = name.to_string();
        project
    }

    #[test]
    fn test_empty_history() {
        let history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_levels(), 0);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.record(snapshot("a"));
        history.push_redo(snapshot("b"));

        history.record(snapshot("c"));
        assert_eq!(history.redo_levels(), 0);
        assert_eq!(history.undo_levels(), 2);
    }

    #[test]
    fn test_bound_evicts_oldest() {
        let mut history = History::new();
        for i in 0..(MAX_HISTORY + 5) {
            history.record(snapshot(&format!("edit-{}", i)));
        }

        assert_eq!(history.undo_levels(), MAX_HISTORY);
        // The first five snapshots are gone
        assert_eq!(
            history.oldest_undo().map(|p| p.meta.name.as_str()),
            Some("edit-5")
        );
    }

    #[test]
    fn test_underflow_is_silent() {
        let mut history = History::new();
        assert!(history.pop_undo().is_none());
        assert!(history.pop_redo().is_none());
    }
}
