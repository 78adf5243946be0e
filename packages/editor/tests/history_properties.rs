//! History properties: bounded stacks, undo/redo symmetry, and selection
//! validity over randomized operation sequences.

use pagecraft_editor::{reconcile, Action, EditorState, MAX_HISTORY};
use pagecraft_schema::{ContentItem, SectionType};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn test_bounded_history_keeps_most_recent() {
    let mut state = EditorState::new("bound");

    // 105 distinct mutations
    let scales: Vec<f64> = (1..=105).map(|i| 0.25 + (i as f64) * 0.03).collect();
    for scale in &scales {
        state.apply(Action::SetPreviewFontScale { scale: *scale });
    }
    assert_eq!(state.undo_levels(), MAX_HISTORY);

    // unwinding all retained history lands on the pre-state of mutation #6
    for _ in 0..MAX_HISTORY {
        state.apply(Action::Undo);
    }
    assert_eq!(state.project().settings.preview_font_scale, scales[4]);

    // the earliest five snapshots are gone: further undo is a no-op
    state.apply(Action::Undo);
    assert_eq!(state.project().settings.preview_font_scale, scales[4]);
}

#[test]
fn test_redo_stack_cleared_by_new_edit() {
    let mut state = EditorState::new("redo");
    state.apply(Action::SetPreviewFontScale { scale: 2.0 });
    state.apply(Action::Undo);
    assert_eq!(state.redo_levels(), 1);

    state.apply(Action::SetPreviewFontScale { scale: 3.0 });
    assert_eq!(state.redo_levels(), 0);
}

/// Drive the state with one semi-random operation.
fn apply_op(state: &mut EditorState, op: u8, arg: u8) {
    let section_count = state.project().sections.len();
    let pick = |n: usize| (arg as usize) % n.max(1);

    match op {
        0 => {
            let kinds = [
                SectionType::Hero,
                SectionType::Text,
                SectionType::Cta,
                SectionType::LegalNotes,
            ];
            state.apply(Action::AddSection {
                kind: kinds[(arg as usize) % kinds.len()],
                index: None,
            });
        }
        1 if section_count > 0 => {
            let section_id = state.project().sections[pick(section_count)].id.clone();
            state.apply(Action::UpdateSectionStyle {
                section_id,
                patch: json!({"fontSize": 10 + (arg as i64)}),
            });
        }
        2 if section_count > 0 => {
            let section_id = state.project().sections[pick(section_count)].id.clone();
            state.apply(Action::RemoveSection { section_id });
        }
        3 if section_count > 0 => {
            let section = &state.project().sections[pick(section_count)];
            let section_id = section.id.clone();
            let text_item = section.content.items.iter().find_map(|i| match i {
                ContentItem::Text { id, .. } => Some(id.clone()),
                _ => None,
            });
            if let Some(item_id) = text_item {
                state.apply(Action::AddLine {
                    section_id,
                    item_id,
                    index: None,
                    text: format!("line {}", arg),
                });
            }
        }
        4 => state.apply(Action::Undo),
        5 => state.apply(Action::Redo),
        _ => {}
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// For any reachable state, undo immediately followed by redo
    /// restores the exact document.
    #[test]
    fn undo_then_redo_restores_document(ops in prop::collection::vec((0u8..6, any::<u8>()), 1..25)) {
        let mut state = EditorState::new("prop");

        for (op, arg) in ops {
            apply_op(&mut state, op, arg);

            let before = state.project().clone();
            if state.can_undo() {
                state.apply(Action::Undo);
                state.apply(Action::Redo);
                prop_assert_eq!(state.project(), &before);
            } else {
                // underflow: undo alone must leave the document untouched
                state.apply(Action::Undo);
                prop_assert_eq!(state.project(), &before);
            }
        }
    }

    /// The undo stack never exceeds its bound.
    #[test]
    fn undo_stack_stays_bounded(ops in prop::collection::vec((0u8..4, any::<u8>()), 1..150)) {
        let mut state = EditorState::new("prop");

        for (op, arg) in ops {
            apply_op(&mut state, op, arg);
            prop_assert!(state.undo_levels() <= MAX_HISTORY);
            prop_assert!(state.redo_levels() <= MAX_HISTORY);
        }
    }

    /// Selection pointers always reference ids present in the document.
    #[test]
    fn selection_always_valid(ops in prop::collection::vec((0u8..6, any::<u8>()), 1..40)) {
        let mut state = EditorState::new("prop");

        for (op, arg) in ops {
            apply_op(&mut state, op, arg);

            let selection = state.selection().clone();
            let reconciled = reconcile(&selection, state.project());
            prop_assert_eq!(selection, reconciled);
        }
    }
}
