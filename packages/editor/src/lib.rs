//! # Pagecraft Editor
//!
//! Transactional document editing engine for Pagecraft.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: canonical tree + normalize + merge  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorState + Action dispatch       │
//! │  - Resolve target, check lock state         │
//! │  - Build candidate via normalize/merge      │
//! │  - Structural equality gate                 │
//! │  - Snapshot history (bounded undo/redo)     │
//! │  - Repair selection after structural edits  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: renderer / persistence collaborators  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One state machine per session**: `EditorState` is constructed
//!    explicitly and threaded through the host, never a global
//! 2. **Every dispatch returns a valid state**: bad targets are no-ops,
//!    locked sections surface a readable error on the save status, and
//!    no operation panics
//! 3. **Equality-gated history**: an edit that changes nothing commits
//!    nothing, so the undo stack only grows on real changes
//! 4. **Snapshots never alias**: committed documents move into history
//!    whole; the live tree is always a fresh value
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_editor::{Action, EditorState};
//! use pagecraft_schema::SectionType;
//!
//! let mut state = EditorState::new("Spring campaign");
//!
//! state.apply(Action::AddSection {
//!     kind: SectionType::Hero,
//!     index: None,
//! });
//!
//! let hero_id = state.project().sections[0].id.clone();
//! state.apply(Action::UpdateSectionStyle {
//!     section_id: hero_id,
//!     patch: serde_json::json!({"align": "center"}),
//! });
//!
//! state.apply(Action::Undo);
//! state.apply(Action::Redo);
//! ```

mod actions;
mod errors;
mod history;
mod reducer;
mod selection;
mod state;

pub use actions::Action;
pub use errors::EditError;
pub use history::{History, MAX_HISTORY};
pub use selection::{
    after_image_removed, after_item_removed, after_line_removed, after_section_removed, reconcile,
    select_block, select_section, SelectionState, SelectionTarget,
};
pub use state::{EditorState, SaveStatus};

// Re-export the schema surface hosts need alongside the editor
pub use pagecraft_schema::{Project, Section, SectionType};
