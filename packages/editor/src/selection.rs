//! # Selection Resolver
//!
//! Keeps the "currently selected entity" pointer valid across structural
//! edits. The selection names a page / section / block scope plus
//! auxiliary item, line and image pointers; after any deletion or restore
//! the resolver recomputes them so they only ever reference ids present
//! in the current document.
//!
//! Policy on deletion: prefer the entity now at the deleted entity's
//! index; if none exists, fall back to the new last entity; if the
//! container is empty, fall back to the parent scope.

use pagecraft_schema::{ContentItem, Project, Section};
use serde::{Deserialize, Serialize};

/// What scope the selection points at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SelectionTarget {
    Page,
    #[serde(rename_all = "camelCase")]
    Section { id: String },
    #[serde(rename_all = "camelCase")]
    Block { section_id: String, id: String },
}

impl Default for SelectionTarget {
    fn default() -> Self {
        SelectionTarget::Page
    }
}

/// Current selection plus auxiliary entity pointers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionState {
    pub target: SelectionTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
    pub image_ids: Vec<String>,
}

impl SelectionState {
    pub fn page() -> Self {
        Self::default()
    }

    /// Section the selection lives in, if any
    pub fn section_id(&self) -> Option<&str> {
        match &self.target {
            SelectionTarget::Page => None,
            SelectionTarget::Section { id } => Some(id),
            SelectionTarget::Block { section_id, .. } => Some(section_id),
        }
    }
}

/// Select a section, recomputing auxiliary pointers to its first item
/// (first text item's first line, or first image). Falls back to page
/// scope if the section does not exist.
pub fn select_section(project: &Project, section_id: &str) -> SelectionState {
    let Some(section) = project.section(section_id) else {
        return SelectionState::page();
    };
    let mut selection = SelectionState {
        target: SelectionTarget::Section {
            id: section.id.clone(),
        },
        ..SelectionState::default()
    };
    point_at_first_item(&mut selection, section);
    selection
}

/// Select a specific content item (block scope).
pub fn select_block(project: &Project, section_id: &str, item_id: &str) -> SelectionState {
    let Some(section) = project.section(section_id) else {
        return SelectionState::page();
    };
    let Some(item) = section.item(item_id) else {
        return select_section(project, section_id);
    };
    let mut selection = SelectionState {
        target: SelectionTarget::Block {
            section_id: section.id.clone(),
            id: item.id().to_string(),
        },
        item_id: Some(item.id().to_string()),
        ..SelectionState::default()
    };
    point_at_item(&mut selection, item);
    selection
}

fn point_at_first_item(selection: &mut SelectionState, section: &Section) {
    if let Some(first) = section.content.items.first() {
        selection.item_id = Some(first.id().to_string());
        point_at_item(selection, first);
    }
}

fn point_at_item(selection: &mut SelectionState, item: &ContentItem) {
    match item {
        ContentItem::Text { lines, .. } => {
            selection.line_id = lines.first().map(|l| l.id.clone());
        }
        ContentItem::Image { images, .. } => {
            selection.image_ids = images.first().map(|e| e.id.clone()).into_iter().collect();
        }
        _ => {}
    }
}

/// Compute the selection after removing the section that sat at
/// `removed_index`.
pub fn after_section_removed(project: &Project, removed_index: usize) -> SelectionState {
    if project.sections.is_empty() {
        return SelectionState::page();
    }
    let index = removed_index.min(project.sections.len() - 1);
    select_section(project, &project.sections[index].id)
}

/// Compute the selection after removing the item that sat at
/// `removed_index` inside `section_id`.
pub fn after_item_removed(
    project: &Project,
    section_id: &str,
    removed_index: usize,
) -> SelectionState {
    let Some(section) = project.section(section_id) else {
        return SelectionState::page();
    };
    if section.content.items.is_empty() {
        return SelectionState {
            target: SelectionTarget::Section {
                id: section.id.clone(),
            },
            ..SelectionState::default()
        };
    }
    let index = removed_index.min(section.content.items.len() - 1);
    let item_id = section.content.items[index].id().to_string();
    select_block(project, section_id, &item_id)
}

/// Compute the selection after removing the line that sat at
/// `removed_index` inside a text item.
pub fn after_line_removed(
    project: &Project,
    section_id: &str,
    item_id: &str,
    removed_index: usize,
) -> SelectionState {
    let mut selection = select_block(project, section_id, item_id);
    if let Some(ContentItem::Text { lines, .. }) =
        project.section(section_id).and_then(|s| s.item(item_id))
    {
        if !lines.is_empty() {
            let index = removed_index.min(lines.len() - 1);
            selection.line_id = Some(lines[index].id.clone());
        }
    }
    selection
}

/// Compute the selection after removing the image that sat at
/// `removed_index` inside an image item.
pub fn after_image_removed(
    project: &Project,
    section_id: &str,
    item_id: &str,
    removed_index: usize,
) -> SelectionState {
    let mut selection = select_block(project, section_id, item_id);
    if let Some(ContentItem::Image { images, .. }) =
        project.section(section_id).and_then(|s| s.item(item_id))
    {
        selection.image_ids = if images.is_empty() {
            Vec::new()
        } else {
            let index = removed_index.min(images.len() - 1);
            vec![images[index].id.clone()]
        };
    }
    selection
}

/// Validity sweep: drop or recompute any pointer that no longer resolves.
/// Used after undo/redo and load, where the structural delta is unknown.
pub fn reconcile(selection: &SelectionState, project: &Project) -> SelectionState {
    let Some(section_id) = selection.section_id() else {
        return SelectionState::page();
    };
    let Some(section) = project.section(section_id) else {
        return SelectionState::page();
    };

    if let SelectionTarget::Block { id, .. } = &selection.target {
        if section.item(id).is_none() {
            return select_section(project, &section.id);
        }
    }

    let mut out = selection.clone();

    match out.item_id.clone() {
        Some(item_id) => match section.item(&item_id) {
            Some(item) => {
                if let Some(line_id) = &out.line_id {
                    let line_exists = matches!(
                        item,
                        ContentItem::Text { lines, .. } if lines.iter().any(|l| &l.id == line_id)
                    );
                    if !line_exists {
                        out.line_id = match item {
                            ContentItem::Text { lines, .. } => lines.first().map(|l| l.id.clone()),
                            _ => None,
                        };
                    }
                }
                out.image_ids.retain(|image_id| {
                    matches!(
                        item,
                        ContentItem::Image { images, .. }
                            if images.iter().any(|e| &e.id == image_id)
                    )
                });
            }
            None => {
                out.item_id = None;
                out.line_id = None;
                out.image_ids.clear();
                point_at_first_item(&mut out, section);
            }
        },
        None => {
            out.line_id = None;
            out.image_ids.clear();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_schema::{IdGenerator, Section, SectionType};

    fn project_with_sections(kinds: &[SectionType]) -> Project {
        let mut project = Project::default();
        let mut ids = IdGenerator::new("sel-test");
        for kind in kinds {
            project.sections.push(Section::with_kind(*kind, &mut ids));
        }
        project
    }

    #[test]
    fn test_select_section_points_at_first_line() {
        let project = project_with_sections(&[SectionType::LegalNotes]);
        let selection = select_section(&project, &project.sections[0].id);

        assert!(selection.item_id.is_some());
        assert!(selection.line_id.is_some());
    }

    #[test]
    fn test_after_section_removed_prefers_same_index() {
        let mut project = project_with_sections(&[
            SectionType::Hero,
            SectionType::Text,
            SectionType::Cta,
        ]);
        // remove the middle section
        project.sections.remove(1);

        let selection = after_section_removed(&project, 1);
        assert_eq!(selection.section_id(), Some(project.sections[1].id.as_str()));
    }

    #[test]
    fn test_after_last_section_removed_falls_back_to_new_last() {
        let mut project = project_with_sections(&[SectionType::Hero, SectionType::Text]);
        project.sections.remove(1);

        let selection = after_section_removed(&project, 1);
        assert_eq!(selection.section_id(), Some(project.sections[0].id.as_str()));
    }

    #[test]
    fn test_empty_project_selects_page() {
        let project = Project::default();
        let selection = after_section_removed(&project, 0);
        assert_eq!(selection, SelectionState::page());
    }

    #[test]
    fn test_reconcile_drops_dangling_ids() {
        let project = project_with_sections(&[SectionType::Text]);
        let stale = SelectionState {
            target: SelectionTarget::Section {
                id: project.sections[0].id.clone(),
            },
            item_id: Some("gone".to_string()),
            line_id: Some("gone-too".to_string()),
            image_ids: vec!["gone-three".to_string()],
        };

        let fixed = reconcile(&stale, &project);
        let first_item = project.sections[0].content.items[0].id();
        assert_eq!(fixed.item_id.as_deref(), Some(first_item));
        assert!(fixed.image_ids.is_empty());
    }

    #[test]
    fn test_reconcile_missing_section_selects_page() {
        let project = Project::default();
        let stale = SelectionState {
            target: SelectionTarget::Section {
                id: "gone".to_string(),
            },
            ..SelectionState::default()
        };

        assert_eq!(reconcile(&stale, &project), SelectionState::page());
    }
}
