//! # Edit Actions
//!
//! High-level semantic operations on a Pagecraft document.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each action represents one semantic edit
//! 2. **Total**: dispatching an action always yields a valid state; bad
//!    targets degrade to no-ops, locked sections to policy rejections
//! 3. **Equality-checked**: an action whose effect equals the current
//!    value commits nothing and grows no history
//! 4. **Serializable**: actions cross process boundaries as plain JSON

use pagecraft_schema::{
    ButtonTarget, ButtonVariant, ContentItemKind, ImageLayout, SectionType, StoreCsv,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic edit operations (the reducer's full public surface)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Action {
    // ---- project ----
    RenameProject {
        name: String,
    },
    UpdatePageSettings {
        patch: Value,
    },
    UpdatePageBaseStyle {
        patch: Value,
    },
    SetPreviewFontScale {
        scale: f64,
    },

    // ---- sections ----
    AddSection {
        kind: SectionType,
        index: Option<usize>,
    },
    DuplicateSection {
        section_id: String,
    },
    RemoveSection {
        section_id: String,
    },
    MoveSection {
        section_id: String,
        index: usize,
    },
    SetSectionVisible {
        section_id: String,
        visible: bool,
    },
    SetSectionLocked {
        section_id: String,
        locked: bool,
    },
    UpdateSectionData {
        section_id: String,
        patch: Value,
    },
    UpdateSectionStyle {
        section_id: String,
        patch: Value,
    },
    UpdateSectionCardStyle {
        section_id: String,
        patch: Value,
    },
    ClearSectionCardStyle {
        section_id: String,
    },
    ApplyStylePreset {
        section_id: String,
        preset: Value,
    },

    // ---- content items ----
    AddContentItem {
        section_id: String,
        kind: ContentItemKind,
        index: Option<usize>,
    },
    RemoveContentItem {
        section_id: String,
        item_id: String,
    },
    MoveContentItem {
        section_id: String,
        item_id: String,
        index: usize,
    },
    DuplicateContentItem {
        section_id: String,
        item_id: String,
    },
    UpdateTitleText {
        section_id: String,
        item_id: String,
        text: String,
    },
    UpdateTitleMarks {
        section_id: String,
        item_id: String,
        patch: Value,
    },

    // ---- lines ----
    AddLine {
        section_id: String,
        item_id: String,
        index: Option<usize>,
        text: String,
    },
    UpdateLineText {
        section_id: String,
        item_id: String,
        line_id: String,
        text: String,
    },
    UpdateLineMarks {
        section_id: String,
        item_id: String,
        line_id: String,
        patch: Value,
    },
    SetLineAnimation {
        section_id: String,
        item_id: String,
        line_id: String,
        patch: Value,
    },
    RemoveLine {
        section_id: String,
        item_id: String,
        line_id: String,
    },
    MoveLine {
        section_id: String,
        item_id: String,
        line_id: String,
        index: usize,
    },

    // ---- images ----
    AddImage {
        section_id: String,
        item_id: String,
        src: String,
        index: Option<usize>,
    },
    UpdateImage {
        section_id: String,
        item_id: String,
        image_id: String,
        patch: Value,
    },
    RemoveImage {
        section_id: String,
        item_id: String,
        image_id: String,
    },
    MoveImage {
        section_id: String,
        item_id: String,
        image_id: String,
        index: usize,
    },
    SetImageLayout {
        section_id: String,
        item_id: String,
        layout: ImageLayout,
    },

    // ---- buttons ----
    UpdateButtonLabel {
        section_id: String,
        item_id: String,
        label: String,
    },
    SetButtonTarget {
        section_id: String,
        item_id: String,
        target: ButtonTarget,
    },
    SetButtonVariant {
        section_id: String,
        item_id: String,
        variant: ButtonVariant,
    },
    UpdateButtonStyle {
        section_id: String,
        item_id: String,
        patch: Value,
    },

    // ---- store table ----
    ImportStoreCsv {
        section_id: String,
        csv: StoreCsv,
    },
    UpdateStoreLabels {
        section_id: String,
        patch: Value,
    },
    UpdateStoreFilters {
        section_id: String,
        patch: Value,
    },

    // ---- history ----
    Undo,
    Redo,

    // ---- persistence boundary ----
    MarkSaved,

    // ---- selection ----
    SelectPage,
    SelectSection {
        section_id: String,
    },
    SelectBlock {
        section_id: String,
        item_id: String,
    },
    SelectLine {
        section_id: String,
        item_id: String,
        line_id: String,
    },
    SelectImages {
        section_id: String,
        item_id: String,
        image_ids: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization_round_trip() {
        let action = Action::UpdateLineText {
            section_id: "s-1".to_string(),
            item_id: "i-2".to_string(),
            line_id: "l-3".to_string(),
            text: "Hello".to_string(),
        };

        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, back);
    }

    #[test]
    fn test_action_with_patch_round_trip() {
        let action = Action::UpdateSectionStyle {
            section_id: "s-1".to_string(),
            patch: serde_json::json!({"fontSize": 20, "align": "center"}),
        };

        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, back);
    }
}
