//! # Mutation Reducer
//!
//! Every public operation follows one protocol:
//!
//! 1. Resolve the target entity by id; a missing target is a silent no-op
//! 2. A locked owning section rejects the edit: the save status becomes an
//!    error with a readable message, nothing else changes
//! 3. Build a candidate document on a clone, patched through the merge
//!    engine / normalizer, with structural invariants re-enforced on the
//!    affected subtree
//! 4. Compare candidate and current document structurally (the volatile
//!    `updatedAt` stamp is applied only after the comparison); equal means
//!    no commit and no history growth
//! 5. On change, move the previous document onto the undo stack, clear
//!    redo, stamp `updatedAt`, mark the state dirty
//! 6. Structural edits then repair the selection
//!
//! No operation panics and no error escapes; every dispatch leaves the
//! state valid.

use pagecraft_schema::{
    coerce_string, deep_merge, enforce_content_invariants, merge_animation, merge_base_style,
    merge_button_style, merge_card_style, merge_marks, merge_section_style, merge_settings,
    new_item, normalize_store_filters, normalize_store_labels, ButtonTarget, ButtonVariant,
    ContentItem, ContentItemKind, IdGenerator, ImageEntry, ImageLayout, Line, Section,
    SectionType, StoreCsv, StoreFilters,
};
use serde_json::Value;

use crate::actions::Action;
use crate::errors::EditError;
use crate::selection::{self, SelectionState};
use crate::state::{EditorState, SaveStatus};

fn text_lines<'a>(section: &'a mut Section, item_id: &str) -> Result<&'a mut Vec<Line>, EditError> {
    match section.item_mut(item_id) {
        Some(ContentItem::Text { lines, .. }) => Ok(lines),
        Some(_) => Err(EditError::WrongItemKind("text")),
        None => Err(EditError::ItemNotFound(item_id.to_string())),
    }
}

fn image_entries<'a>(
    section: &'a mut Section,
    item_id: &str,
) -> Result<&'a mut Vec<ImageEntry>, EditError> {
    match section.item_mut(item_id) {
        Some(ContentItem::Image { images, .. }) => Ok(images),
        Some(_) => Err(EditError::WrongItemKind("image")),
        None => Err(EditError::ItemNotFound(item_id.to_string())),
    }
}

impl EditorState {
    /// Dispatch one edit operation.
    pub fn apply(&mut self, action: Action) {
        match action {
            // ---- project ----
            Action::RenameProject { name } => self.rename_project(name),
            Action::UpdatePageSettings { patch } => self.update_page_settings(&patch),
            Action::UpdatePageBaseStyle { patch } => self.update_page_base_style(&patch),
            Action::SetPreviewFontScale { scale } => self.set_preview_font_scale(scale),

            // ---- sections ----
            Action::AddSection { kind, index } => self.add_section(kind, index),
            Action::DuplicateSection { section_id } => self.duplicate_section(&section_id),
            Action::RemoveSection { section_id } => self.remove_section(&section_id),
            Action::MoveSection { section_id, index } => self.move_section(&section_id, index),
            Action::SetSectionVisible {
                section_id,
                visible,
            } => self.set_section_visible(&section_id, visible),
            Action::SetSectionLocked { section_id, locked } => {
                self.set_section_locked(&section_id, locked)
            }
            Action::UpdateSectionData { section_id, patch } => {
                self.update_section_data(&section_id, &patch)
            }
            Action::UpdateSectionStyle { section_id, patch } => {
                self.update_section_style(&section_id, &patch)
            }
            Action::UpdateSectionCardStyle { section_id, patch } => {
                self.update_section_card_style(&section_id, &patch)
            }
            Action::ClearSectionCardStyle { section_id } => {
                self.clear_section_card_style(&section_id)
            }
            Action::ApplyStylePreset { section_id, preset } => {
                self.update_section_style(&section_id, &preset)
            }

            // ---- content items ----
            Action::AddContentItem {
                section_id,
                kind,
                index,
            } => self.add_content_item(&section_id, kind, index),
            Action::RemoveContentItem {
                section_id,
                item_id,
            } => self.remove_content_item(&section_id, &item_id),
            Action::MoveContentItem {
                section_id,
                item_id,
                index,
            } => self.move_content_item(&section_id, &item_id, index),
            Action::DuplicateContentItem {
                section_id,
                item_id,
            } => self.duplicate_content_item(&section_id, &item_id),
            Action::UpdateTitleText {
                section_id,
                item_id,
                text,
            } => self.update_title_text(&section_id, &item_id, text),
            Action::UpdateTitleMarks {
                section_id,
                item_id,
                patch,
            } => self.update_title_marks(&section_id, &item_id, &patch),

            // ---- lines ----
            Action::AddLine {
                section_id,
                item_id,
                index,
                text,
            } => self.add_line(&section_id, &item_id, index, text),
            Action::UpdateLineText {
                section_id,
                item_id,
                line_id,
                text,
            } => self.update_line_text(&section_id, &item_id, &line_id, text),
            Action::UpdateLineMarks {
                section_id,
                item_id,
                line_id,
                patch,
            } => self.update_line_marks(&section_id, &item_id, &line_id, &patch),
            Action::SetLineAnimation {
                section_id,
                item_id,
                line_id,
                patch,
            } => self.set_line_animation(&section_id, &item_id, &line_id, &patch),
            Action::RemoveLine {
                section_id,
                item_id,
                line_id,
            } => self.remove_line(&section_id, &item_id, &line_id),
            Action::MoveLine {
                section_id,
                item_id,
                line_id,
                index,
            } => self.move_line(&section_id, &item_id, &line_id, index),

            // ---- images ----
            Action::AddImage {
                section_id,
                item_id,
                src,
                index,
            } => self.add_image(&section_id, &item_id, src, index),
            Action::UpdateImage {
                section_id,
                item_id,
                image_id,
                patch,
            } => self.update_image(&section_id, &item_id, &image_id, &patch),
            Action::RemoveImage {
                section_id,
                item_id,
                image_id,
            } => self.remove_image(&section_id, &item_id, &image_id),
            Action::MoveImage {
                section_id,
                item_id,
                image_id,
                index,
            } => self.move_image(&section_id, &item_id, &image_id, index),
            Action::SetImageLayout {
                section_id,
                item_id,
                layout,
            } => self.set_image_layout(&section_id, &item_id, layout),

            // ---- buttons ----
            Action::UpdateButtonLabel {
                section_id,
                item_id,
                label,
            } => self.update_button_label(&section_id, &item_id, label),
            Action::SetButtonTarget {
                section_id,
                item_id,
                target,
            } => self.set_button_target(&section_id, &item_id, target),
            Action::SetButtonVariant {
                section_id,
                item_id,
                variant,
            } => self.set_button_variant(&section_id, &item_id, variant),
            Action::UpdateButtonStyle {
                section_id,
                item_id,
                patch,
            } => self.update_button_style(&section_id, &item_id, &patch),

            // ---- store table ----
            Action::ImportStoreCsv { section_id, csv } => self.import_store_csv(&section_id, csv),
            Action::UpdateStoreLabels { section_id, patch } => {
                self.update_store_labels(&section_id, &patch)
            }
            Action::UpdateStoreFilters { section_id, patch } => {
                self.update_store_filters(&section_id, &patch)
            }

            // ---- history ----
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),

            // ---- persistence boundary ----
            Action::MarkSaved => self.save_status = SaveStatus::Saved,

            // ---- selection ----
            Action::SelectPage => self.selection = SelectionState::page(),
            Action::SelectSection { section_id } => self.select_section(&section_id),
            Action::SelectBlock {
                section_id,
                item_id,
            } => self.select_block(&section_id, &item_id),
            Action::SelectLine {
                section_id,
                item_id,
                line_id,
            } => self.select_line(&section_id, &item_id, &line_id),
            Action::SelectImages {
                section_id,
                item_id,
                image_ids,
            } => self.select_images(&section_id, &item_id, image_ids),
        }
    }

    /// Resolve + lock-check + candidate-edit + invariants + commit, for
    /// edits confined to one section. Returns whether a commit happened.
    fn edit_section<F>(&mut self, section_id: &str, edit: F) -> bool
    where
        F: FnOnce(&mut Section, &mut IdGenerator) -> Result<(), EditError>,
    {
        let Some(index) = self.resolve_unlocked(section_id) else {
            return false;
        };
        let mut candidate = self.project.clone();
        if let Err(err) = edit(&mut candidate.sections[index], &mut self.ids) {
            tracing::debug!("Edit skipped: {}", err);
            return false;
        }
        enforce_content_invariants(&mut candidate.sections[index].content, &mut self.ids);
        self.commit(candidate)
    }

    // ---- project ----

    fn rename_project(&mut self, name: String) {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("Ignoring blank project name");
            return;
        }
        let mut candidate = self.project.clone();
        candidate.meta.name = name.to_string();
        self.commit(candidate);
    }

    fn update_page_settings(&mut self, patch: &Value) {
        let mut candidate = self.project.clone();
        candidate.settings = merge_settings(&self.project.settings, patch);
        self.commit(candidate);
    }

    fn update_page_base_style(&mut self, patch: &Value) {
        let mut candidate = self.project.clone();
        candidate.page_base_style = merge_base_style(&self.project.page_base_style, patch);
        self.commit(candidate);
    }

    fn set_preview_font_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            tracing::debug!("Ignoring non-finite preview font scale");
            return;
        }
        let mut candidate = self.project.clone();
        candidate.settings.preview_font_scale = scale.clamp(0.25, 4.0);
        self.commit(candidate);
    }

    // ---- sections ----

    fn add_section(&mut self, kind: SectionType, index: Option<usize>) {
        let section = Section::with_kind(kind, &mut self.ids);
        let section_id = section.id.clone();

        let mut candidate = self.project.clone();
        let at = index
            .unwrap_or(candidate.sections.len())
            .min(candidate.sections.len());
        candidate.sections.insert(at, section);

        if self.commit(candidate) {
            self.selection = selection::select_section(&self.project, &section_id);
        }
    }

    fn duplicate_section(&mut self, section_id: &str) {
        let Some(index) = self.project.section_index(section_id) else {
            tracing::debug!("Section not found: {}", section_id);
            return;
        };
        let mut candidate = self.project.clone();
        let mut copy = candidate.sections[index].clone();
        copy.reassign_ids(&mut self.ids);
        // the copy starts editable regardless of the original's lock
        copy.locked = false;
        let copy_id = copy.id.clone();
        candidate.sections.insert(index + 1, copy);
        candidate.rebuild_stores();

        if self.commit(candidate) {
            self.selection = selection::select_section(&self.project, &copy_id);
        }
    }

    fn remove_section(&mut self, section_id: &str) {
        let Some(index) = self.resolve_unlocked(section_id) else {
            return;
        };
        let was_selected = self.selection.section_id() == Some(section_id);

        let mut candidate = self.project.clone();
        candidate.sections.remove(index);
        candidate.rebuild_stores();

        if self.commit(candidate) {
            self.selection = if was_selected {
                selection::after_section_removed(&self.project, index)
            } else {
                selection::reconcile(&self.selection, &self.project)
            };
        }
    }

    fn move_section(&mut self, section_id: &str, index: usize) {
        let Some(from) = self.resolve_unlocked(section_id) else {
            return;
        };
        let mut candidate = self.project.clone();
        let section = candidate.sections.remove(from);
        let to = index.min(candidate.sections.len());
        candidate.sections.insert(to, section);
        // the derived store table follows section order
        candidate.rebuild_stores();
        self.commit(candidate);
    }

    fn set_section_visible(&mut self, section_id: &str, visible: bool) {
        self.edit_section(section_id, |section, _ids| {
            section.visible = visible;
            Ok(())
        });
    }

    /// Exempt from the lock policy so locked sections can be unlocked.
    fn set_section_locked(&mut self, section_id: &str, locked: bool) {
        let Some(index) = self.project.section_index(section_id) else {
            tracing::debug!("Section not found: {}", section_id);
            return;
        };
        let mut candidate = self.project.clone();
        candidate.sections[index].locked = locked;
        self.commit(candidate);
    }

    fn update_section_data(&mut self, section_id: &str, patch: &Value) {
        self.edit_section(section_id, |section, _ids| {
            let mut value = Value::Object(section.data.clone());
            deep_merge(&mut value, patch);
            if let Value::Object(map) = value {
                section.data = map;
            }
            Ok(())
        });
    }

    fn update_section_style(&mut self, section_id: &str, patch: &Value) {
        self.edit_section(section_id, |section, _ids| {
            section.style = merge_section_style(&section.style, patch);
            Ok(())
        });
    }

    fn update_section_card_style(&mut self, section_id: &str, patch: &Value) {
        self.edit_section(section_id, |section, _ids| {
            let base = section.section_card_style.clone().unwrap_or_default();
            section.section_card_style = Some(merge_card_style(&base, patch));
            Ok(())
        });
    }

    fn clear_section_card_style(&mut self, section_id: &str) {
        self.edit_section(section_id, |section, _ids| {
            section.section_card_style = None;
            Ok(())
        });
    }

    // ---- content items ----

    fn add_content_item(&mut self, section_id: &str, kind: ContentItemKind, index: Option<usize>) {
        let Some(sec_index) = self.resolve_unlocked(section_id) else {
            return;
        };
        let item = new_item(kind, &mut self.ids);
        let item_id = item.id().to_string();

        let mut candidate = self.project.clone();
        let section = &mut candidate.sections[sec_index];
        let at = index
            .unwrap_or(section.content.items.len())
            .min(section.content.items.len());
        section.content.items.insert(at, item);
        enforce_content_invariants(&mut section.content, &mut self.ids);

        if self.commit(candidate) {
            self.selection = selection::select_block(&self.project, section_id, &item_id);
        }
    }

    fn remove_content_item(&mut self, section_id: &str, item_id: &str) {
        let Some(sec_index) = self.resolve_unlocked(section_id) else {
            return;
        };
        let Some(item_index) = self.project.sections[sec_index].item_index(item_id) else {
            tracing::debug!("Content item not found: {}", item_id);
            return;
        };
        let was_selected = self.selection.section_id() == Some(section_id)
            && self.selection.item_id.as_deref() == Some(item_id);

        let mut candidate = self.project.clone();
        candidate.sections[sec_index].content.items.remove(item_index);
        enforce_content_invariants(
            &mut candidate.sections[sec_index].content,
            &mut self.ids,
        );

        if self.commit(candidate) {
            self.selection = if was_selected {
                selection::after_item_removed(&self.project, section_id, item_index)
            } else {
                selection::reconcile(&self.selection, &self.project)
            };
        }
    }

    fn move_content_item(&mut self, section_id: &str, item_id: &str, index: usize) {
        self.edit_section(section_id, |section, _ids| {
            let from = section
                .item_index(item_id)
                .ok_or_else(|| EditError::ItemNotFound(item_id.to_string()))?;
            let item = section.content.items.remove(from);
            let to = index.min(section.content.items.len());
            section.content.items.insert(to, item);
            Ok(())
        });
    }

    fn duplicate_content_item(&mut self, section_id: &str, item_id: &str) {
        let Some(sec_index) = self.resolve_unlocked(section_id) else {
            return;
        };
        let Some(item_index) = self.project.sections[sec_index].item_index(item_id) else {
            tracing::debug!("Content item not found: {}", item_id);
            return;
        };

        let mut candidate = self.project.clone();
        let section = &mut candidate.sections[sec_index];
        let mut copy = section.content.items[item_index].clone();
        copy.reassign_ids(&mut self.ids);
        let copy_id = copy.id().to_string();
        section.content.items.insert(item_index + 1, copy);
        enforce_content_invariants(&mut section.content, &mut self.ids);

        if self.commit(candidate) {
            self.selection = selection::select_block(&self.project, section_id, &copy_id);
        }
    }

    fn update_title_text(&mut self, section_id: &str, item_id: &str, text: String) {
        self.edit_section(section_id, |section, _ids| match section.item_mut(item_id) {
            Some(ContentItem::Title { text: slot, .. }) => {
                *slot = text;
                Ok(())
            }
            Some(_) => Err(EditError::WrongItemKind("title")),
            None => Err(EditError::ItemNotFound(item_id.to_string())),
        });
    }

    fn update_title_marks(&mut self, section_id: &str, item_id: &str, patch: &Value) {
        self.edit_section(section_id, |section, _ids| match section.item_mut(item_id) {
            Some(ContentItem::Title { marks, .. }) => {
                *marks = merge_marks(marks, patch);
                Ok(())
            }
            Some(_) => Err(EditError::WrongItemKind("title")),
            None => Err(EditError::ItemNotFound(item_id.to_string())),
        });
    }

    // ---- lines ----

    fn add_line(&mut self, section_id: &str, item_id: &str, index: Option<usize>, text: String) {
        let mut new_line_id = None;
        let committed = self.edit_section(section_id, |section, ids| {
            let lines = text_lines(section, item_id)?;
            let line = Line {
                id: ids.new_id(),
                text,
                ..Line::default()
            };
            new_line_id = Some(line.id.clone());
            let at = index.unwrap_or(lines.len()).min(lines.len());
            lines.insert(at, line);
            Ok(())
        });

        if committed {
            if let Some(line_id) = new_line_id {
                let mut selection = selection::select_block(&self.project, section_id, item_id);
                selection.line_id = Some(line_id);
                self.selection = selection;
            }
        }
    }

    fn update_line_text(&mut self, section_id: &str, item_id: &str, line_id: &str, text: String) {
        self.edit_section(section_id, |section, _ids| {
            let lines = text_lines(section, item_id)?;
            let line = lines
                .iter_mut()
                .find(|l| l.id == line_id)
                .ok_or_else(|| EditError::LineNotFound(line_id.to_string()))?;
            line.text = text;
            Ok(())
        });
    }

    fn update_line_marks(&mut self, section_id: &str, item_id: &str, line_id: &str, patch: &Value) {
        self.edit_section(section_id, |section, _ids| {
            let lines = text_lines(section, item_id)?;
            let line = lines
                .iter_mut()
                .find(|l| l.id == line_id)
                .ok_or_else(|| EditError::LineNotFound(line_id.to_string()))?;
            line.marks = merge_marks(&line.marks, patch);
            Ok(())
        });
    }

    fn set_line_animation(&mut self, section_id: &str, item_id: &str, line_id: &str, patch: &Value) {
        self.edit_section(section_id, |section, _ids| {
            let lines = text_lines(section, item_id)?;
            let line = lines
                .iter_mut()
                .find(|l| l.id == line_id)
                .ok_or_else(|| EditError::LineNotFound(line_id.to_string()))?;
            line.animation = if patch.is_null() {
                None
            } else {
                let base = line.animation.clone().unwrap_or_default();
                Some(merge_animation(&base, patch))
            };
            Ok(())
        });
    }

    fn remove_line(&mut self, section_id: &str, item_id: &str, line_id: &str) {
        let mut removed_index = None;
        let committed = self.edit_section(section_id, |section, _ids| {
            let lines = text_lines(section, item_id)?;
            let index = lines
                .iter()
                .position(|l| l.id == line_id)
                .ok_or_else(|| EditError::LineNotFound(line_id.to_string()))?;
            // removing the last line leaves an empty list here; the
            // invariant pass refills it with one empty line
            lines.remove(index);
            removed_index = Some(index);
            Ok(())
        });

        if committed {
            let was_selected = self.selection.line_id.as_deref() == Some(line_id);
            self.selection = if was_selected {
                selection::after_line_removed(
                    &self.project,
                    section_id,
                    item_id,
                    removed_index.unwrap_or(0),
                )
            } else {
                selection::reconcile(&self.selection, &self.project)
            };
        }
    }

    fn move_line(&mut self, section_id: &str, item_id: &str, line_id: &str, index: usize) {
        self.edit_section(section_id, |section, _ids| {
            let lines = text_lines(section, item_id)?;
            let from = lines
                .iter()
                .position(|l| l.id == line_id)
                .ok_or_else(|| EditError::LineNotFound(line_id.to_string()))?;
            let line = lines.remove(from);
            let to = index.min(lines.len());
            lines.insert(to, line);
            Ok(())
        });
    }

    // ---- images ----

    fn add_image(&mut self, section_id: &str, item_id: &str, src: String, index: Option<usize>) {
        let mut new_image_id = None;
        let committed = self.edit_section(section_id, |section, ids| {
            let images = image_entries(section, item_id)?;
            let entry = ImageEntry {
                id: ids.new_id(),
                src,
                ..ImageEntry::default()
            };
            new_image_id = Some(entry.id.clone());
            let at = index.unwrap_or(images.len()).min(images.len());
            images.insert(at, entry);
            Ok(())
        });

        if committed {
            if let Some(image_id) = new_image_id {
                let mut selection = selection::select_block(&self.project, section_id, item_id);
                selection.image_ids = vec![image_id];
                self.selection = selection;
            }
        }
    }

    fn update_image(&mut self, section_id: &str, item_id: &str, image_id: &str, patch: &Value) {
        self.edit_section(section_id, |section, _ids| {
            let images = image_entries(section, item_id)?;
            let entry = images
                .iter_mut()
                .find(|e| e.id == image_id)
                .ok_or_else(|| EditError::ImageNotFound(image_id.to_string()))?;
            if let Some(v) = patch.get("src") {
                let src = coerce_string(Some(v), &entry.src);
                entry.src = src;
            }
            if let Some(v) = patch.get("alt") {
                let alt = coerce_string(Some(v), &entry.alt);
                entry.alt = alt;
            }
            if let Some(v) = patch.get("assetId") {
                entry.asset_id = match v {
                    Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                    _ => None,
                };
            }
            if let Some(v) = patch.get("animation") {
                entry.animation = if v.is_null() {
                    None
                } else {
                    let base = entry.animation.clone().unwrap_or_default();
                    Some(merge_animation(&base, v))
                };
            }
            Ok(())
        });
    }

    fn remove_image(&mut self, section_id: &str, item_id: &str, image_id: &str) {
        let mut removed_index = None;
        let committed = self.edit_section(section_id, |section, _ids| {
            let images = image_entries(section, item_id)?;
            let index = images
                .iter()
                .position(|e| e.id == image_id)
                .ok_or_else(|| EditError::ImageNotFound(image_id.to_string()))?;
            images.remove(index);
            removed_index = Some(index);
            Ok(())
        });

        if committed {
            let was_selected = self.selection.image_ids.iter().any(|id| id == image_id);
            self.selection = if was_selected {
                selection::after_image_removed(
                    &self.project,
                    section_id,
                    item_id,
                    removed_index.unwrap_or(0),
                )
            } else {
                selection::reconcile(&self.selection, &self.project)
            };
        }
    }

    fn move_image(&mut self, section_id: &str, item_id: &str, image_id: &str, index: usize) {
        self.edit_section(section_id, |section, _ids| {
            let images = image_entries(section, item_id)?;
            let from = images
                .iter()
                .position(|e| e.id == image_id)
                .ok_or_else(|| EditError::ImageNotFound(image_id.to_string()))?;
            let entry = images.remove(from);
            let to = index.min(images.len());
            images.insert(to, entry);
            Ok(())
        });
    }

    fn set_image_layout(&mut self, section_id: &str, item_id: &str, layout: ImageLayout) {
        self.edit_section(section_id, |section, _ids| match section.item_mut(item_id) {
            Some(ContentItem::Image { layout: slot, .. }) => {
                *slot = layout;
                Ok(())
            }
            Some(_) => Err(EditError::WrongItemKind("image")),
            None => Err(EditError::ItemNotFound(item_id.to_string())),
        });
    }

    // ---- buttons ----

    fn update_button_label(&mut self, section_id: &str, item_id: &str, label: String) {
        self.edit_section(section_id, |section, _ids| match section.item_mut(item_id) {
            Some(ContentItem::Button { label: slot, .. }) => {
                *slot = label;
                Ok(())
            }
            Some(_) => Err(EditError::WrongItemKind("button")),
            None => Err(EditError::ItemNotFound(item_id.to_string())),
        });
    }

    fn set_button_target(&mut self, section_id: &str, item_id: &str, target: ButtonTarget) {
        self.edit_section(section_id, |section, _ids| match section.item_mut(item_id) {
            Some(ContentItem::Button { target: slot, .. }) => {
                *slot = target;
                Ok(())
            }
            Some(_) => Err(EditError::WrongItemKind("button")),
            None => Err(EditError::ItemNotFound(item_id.to_string())),
        });
    }

    fn set_button_variant(&mut self, section_id: &str, item_id: &str, variant: ButtonVariant) {
        self.edit_section(section_id, |section, _ids| match section.item_mut(item_id) {
            Some(ContentItem::Button { variant: slot, .. }) => {
                *slot = variant;
                Ok(())
            }
            Some(_) => Err(EditError::WrongItemKind("button")),
            None => Err(EditError::ItemNotFound(item_id.to_string())),
        });
    }

    fn update_button_style(&mut self, section_id: &str, item_id: &str, patch: &Value) {
        self.edit_section(section_id, |section, _ids| match section.item_mut(item_id) {
            Some(ContentItem::Button { style, .. }) => {
                *style = merge_button_style(style, patch);
                Ok(())
            }
            Some(_) => Err(EditError::WrongItemKind("button")),
            None => Err(EditError::ItemNotFound(item_id.to_string())),
        });
    }

    // ---- store table ----

    fn import_store_csv(&mut self, section_id: &str, csv: StoreCsv) {
        let Some(index) = self.resolve_unlocked(section_id) else {
            return;
        };
        let mut candidate = self.project.clone();
        candidate.sections[index].content.store_csv = Some(csv);
        candidate.rebuild_stores();
        self.commit(candidate);
    }

    fn update_store_labels(&mut self, section_id: &str, patch: &Value) {
        self.edit_section(section_id, |section, _ids| {
            if patch.is_null() {
                section.content.store_labels = None;
                return Ok(());
            }
            let base = section.content.store_labels.clone().unwrap_or_default();
            let mut value = serde_json::to_value(&base).unwrap_or(Value::Null);
            deep_merge(&mut value, patch);
            section.content.store_labels = normalize_store_labels(Some(&value));
            Ok(())
        });
    }

    fn update_store_filters(&mut self, section_id: &str, patch: &Value) {
        self.edit_section(section_id, |section, _ids| {
            if patch.is_null() {
                section.content.store_filters = None;
                return Ok(());
            }
            let base = section
                .content
                .store_filters
                .clone()
                .unwrap_or_else(StoreFilters::default);
            let mut value = serde_json::to_value(&base).unwrap_or(Value::Null);
            deep_merge(&mut value, patch);
            section.content.store_filters = normalize_store_filters(Some(&value));
            Ok(())
        });
    }

    // ---- selection ----

    fn select_section(&mut self, section_id: &str) {
        if self.project.section(section_id).is_none() {
            tracing::debug!("Section not found: {}", section_id);
            return;
        }
        self.selection = selection::select_section(&self.project, section_id);
    }

    fn select_block(&mut self, section_id: &str, item_id: &str) {
        let exists = self
            .project
            .section(section_id)
            .and_then(|s| s.item(item_id))
            .is_some();
        if !exists {
            tracing::debug!("Content item not found: {}", item_id);
            return;
        }
        self.selection = selection::select_block(&self.project, section_id, item_id);
    }

    fn select_line(&mut self, section_id: &str, item_id: &str, line_id: &str) {
        let line_exists = matches!(
            self.project.section(section_id).and_then(|s| s.item(item_id)),
            Some(ContentItem::Text { lines, .. }) if lines.iter().any(|l| l.id == line_id)
        );
        if !line_exists {
            tracing::debug!("Line not found: {}", line_id);
            return;
        }
        let mut selection = selection::select_block(&self.project, section_id, item_id);
        selection.line_id = Some(line_id.to_string());
        self.selection = selection;
    }

    fn select_images(&mut self, section_id: &str, item_id: &str, image_ids: Vec<String>) {
        let Some(ContentItem::Image { images, .. }) =
            self.project.section(section_id).and_then(|s| s.item(item_id))
        else {
            tracing::debug!("Image item not found: {}", item_id);
            return;
        };
        let valid: Vec<String> = image_ids
            .into_iter()
            .filter(|id| images.iter().any(|e| &e.id == id))
            .collect();
        let mut selection = selection::select_block(&self.project, section_id, item_id);
        selection.image_ids = valid;
        self.selection = selection;
    }
}
