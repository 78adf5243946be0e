//! # Editor State
//!
//! One `EditorState` per editing session: the live document, the current
//! selection, the save status and the undo/redo history. Constructed once
//! and threaded through the host explicitly; there is no global store.
//!
//! The live document is exclusively owned by the state. Every committed
//! edit replaces it with a freshly built tree and moves the previous tree
//! into history, so snapshots are never aliased with the live document.

use pagecraft_schema::{normalize_project, IdGenerator, Project};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::EditError;
use crate::history::History;
use crate::selection::{reconcile, SelectionState};

/// Persistence status surfaced to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveStatus {
    /// Document matches what the persistence collaborator last saw
    Saved,
    /// Document has uncommitted changes
    Dirty,
    /// Last operation was rejected; carries a human-readable message
    Error(String),
}

/// Per-session document state machine
#[derive(Debug)]
pub struct EditorState {
    pub(crate) project: Project,
    pub(crate) selection: SelectionState,
    pub(crate) save_status: SaveStatus,
    pub(crate) history: History,
    pub(crate) ids: IdGenerator,
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl EditorState {
    /// Create a fresh, empty project.
    pub fn new(name: &str) -> Self {
        let name = if name.trim().is_empty() {
            "Untitled"
        } else {
            name
        };
        let now = now_millis();
        let mut project = Project::default();
        project.meta.name = name.to_string();
        project.meta.created_at = now;
        project.meta.updated_at = now;

        Self {
            ids: IdGenerator::new(name),
            project,
            selection: SelectionState::page(),
            save_status: SaveStatus::Saved,
            history: History::new(),
        }
    }

    /// Load a raw (possibly legacy/malformed) project document. The input
    /// is always re-normalized; the persisted shape is never required to
    /// be canonical.
    pub fn load(raw: &Value) -> Self {
        let project = normalize_project(raw);
        let ids = project.id_generator();

        Self {
            ids,
            project,
            selection: SelectionState::page(),
            save_status: SaveStatus::Saved,
            history: History::new(),
        }
    }

    /// The live canonical document (read-only; mutate via `apply`)
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Current selection
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current save status
    pub fn save_status(&self) -> &SaveStatus {
        &self.save_status
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_levels(&self) -> usize {
        self.history.undo_levels()
    }

    pub fn redo_levels(&self) -> usize {
        self.history.redo_levels()
    }

    /// Serialize the canonical document for the persistence collaborator.
    pub fn export(&self) -> Value {
        serde_json::to_value(&self.project).unwrap_or(Value::Null)
    }

    /// Commit a candidate document if it differs structurally from the
    /// current one. The comparison runs before the `updatedAt` stamp, so
    /// the volatile timestamp never forces a commit by itself.
    pub(crate) fn commit(&mut self, candidate: Project) -> bool {
        if candidate == self.project {
            tracing::debug!("Edit produced no change, skipping commit");
            return false;
        }
        let previous = std::mem::replace(&mut self.project, candidate);
        self.history.record(previous);
        self.project.meta.updated_at = now_millis();
        self.save_status = SaveStatus::Dirty;
        true
    }

    fn locate_unlocked(&self, section_id: &str) -> Result<usize, EditError> {
        let index = self
            .project
            .section_index(section_id)
            .ok_or_else(|| EditError::SectionNotFound(section_id.to_string()))?;
        if self.project.sections[index].locked {
            return Err(EditError::SectionLocked(section_id.to_string()));
        }
        Ok(index)
    }

    /// Resolve a section for mutation: missing targets and locked
    /// sections both yield `None`. A locked section additionally surfaces
    /// a policy rejection on the save status; state is otherwise
    /// unchanged and no history entry is created.
    pub(crate) fn resolve_unlocked(&mut self, section_id: &str) -> Option<usize> {
        match self.locate_unlocked(section_id) {
            Ok(index) => Some(index),
            Err(err @ EditError::SectionLocked(_)) => {
                tracing::warn!("Rejected edit: {}", err);
                self.save_status = SaveStatus::Error(format!(
                    "Section {} is locked and cannot be edited",
                    section_id
                ));
                None
            }
            Err(err) => {
                tracing::debug!("Edit skipped: {}", err);
                None
            }
        }
    }

    /// Restore the most recent undo snapshot. Underflow is a silent no-op.
    pub(crate) fn undo(&mut self) {
        let Some(snapshot) = self.history.pop_undo() else {
            tracing::debug!("Nothing to undo");
            return;
        };
        let current = std::mem::replace(&mut self.project, snapshot);
        self.history.push_redo(current);
        self.save_status = SaveStatus::Dirty;
        self.selection = reconcile(&self.selection, &self.project);
    }

    /// Reapply the most recently undone edit. Underflow is a silent no-op.
    pub(crate) fn redo(&mut self) {
        let Some(snapshot) = self.history.pop_redo() else {
            tracing::debug!("Nothing to redo");
            return;
        };
        let current = std::mem::replace(&mut self.project, snapshot);
        self.history.push_undo(current);
        self.save_status = SaveStatus::Dirty;
        self.selection = reconcile(&self.selection, &self.project);
    }
}
