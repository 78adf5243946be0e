//! Schema normalization: loose/legacy JSON in, canonical tree out.
//!
//! Every function here is total. Wrong types, missing fields and stray
//! keys are repaired deterministically, never reported as errors. Known
//! legacy shapes are migrated explicitly before canonical validation:
//!
//! - bare strings inside an item list become one-line text items
//! - `data.items: ["a", "b"]` becomes a text item with two lines
//! - `data.primaryText` / `data.body` strings are split on newlines
//! - a single legacy `data.image` / `data.button` is lifted into the
//!   item sequence
//!
//! Re-normalizing canonical output is structurally a no-op.

use serde_json::Value;

use crate::defaults::{DefaultContent, StandardDefaults};
use crate::ids::IdGenerator;
use crate::model::{
    AssetRef, ButtonTarget, ContentItem, ImageEntry, Line, Project, ProjectMeta, Section,
    SectionContent, SectionType,
};
use crate::stores::{StoreCsv, StoreFilters, StoreLabels};
use crate::style::{
    Animation, Background, ButtonStyle, CalloutBox, CardStyle, PageBaseStyle, PageSettings,
    Padding, SectionStyle, TextMarks,
};

/// Coerce a JSON value to a finite number, clamped to `[min, max]`.
///
/// Numeric strings parse; anything else, and non-finite results, fall
/// back to `default` before clamping.
pub fn coerce_number(v: Option<&Value>, default: f64, min: f64, max: f64) -> f64 {
    let n = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite()).unwrap_or(default).clamp(min, max)
}

/// Coerce a JSON value to a bool. Recognizes `"true"` / `"false"` strings.
pub fn coerce_bool(v: Option<&Value>, default: bool) -> bool {
    match v {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => match s.trim() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Coerce a JSON value to a string. Numbers stringify; everything else
/// falls back to `default`.
pub fn coerce_string(v: Option<&Value>, default: &str) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

/// Like [`coerce_string`] but blank results also fall back to the default.
/// Used for fields where an empty value has no rendering meaning (colors,
/// font families).
fn coerce_nonblank(v: Option<&Value>, default: &str) -> String {
    let s = coerce_string(v, default);
    if s.trim().is_empty() {
        default.to_string()
    } else {
        s
    }
}

/// Parse an enum-valued field, falling back to the enum's default on
/// unrecognized input.
fn coerce_enum<T>(v: Option<&Value>) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    v.cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

fn opt_string(v: Option<&Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn coerce_millis(v: Option<&Value>) -> i64 {
    let n = match v {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    n.filter(|n| *n >= 0).unwrap_or(0)
}

/// Normalize a whole raw project document.
pub fn normalize_project(raw: &Value) -> Project {
    let meta = normalize_meta(raw.get("meta"));
    let mut ids = IdGenerator::new(&meta.name);
    collect_existing_ids(raw, &mut ids);

    let mut project = Project {
        meta,
        settings: normalize_settings(raw.get("settings")),
        page_base_style: normalize_base_style(raw.get("pageBaseStyle")),
        sections: Vec::new(),
        assets: normalize_assets(raw.get("assets")),
        stores: Vec::new(),
    };

    if let Some(Value::Array(sections)) = raw.get("sections") {
        for raw_section in sections {
            project.sections.push(normalize_section(raw_section, &mut ids));
        }
    }

    project.rebuild_stores();
    project
}

/// Walk raw input for `id` fields and advance the generator past them so
/// minted ids never collide with persisted ones.
fn collect_existing_ids(value: &Value, ids: &mut IdGenerator) {
    match value {
        Value::Object(o) => {
            if let Some(Value::String(id)) = o.get("id") {
                ids.skip_past(id);
            }
            for v in o.values() {
                collect_existing_ids(v, ids);
            }
        }
        Value::Array(a) => {
            for v in a {
                collect_existing_ids(v, ids);
            }
        }
        _ => {}
    }
}

fn normalize_meta(v: Option<&Value>) -> ProjectMeta {
    ProjectMeta {
        name: coerce_nonblank(v.and_then(|m| m.get("name")), "Untitled"),
        created_at: coerce_millis(v.and_then(|m| m.get("createdAt"))),
        updated_at: coerce_millis(v.and_then(|m| m.get("updatedAt"))),
    }
}

fn normalize_assets(v: Option<&Value>) -> std::collections::BTreeMap<String, AssetRef> {
    let mut assets = std::collections::BTreeMap::new();
    if let Some(Value::Object(o)) = v {
        for (key, entry) in o {
            assets.insert(
                key.clone(),
                AssetRef {
                    id: key.clone(),
                    name: coerce_string(entry.get("name"), ""),
                    mime: coerce_string(entry.get("mime"), ""),
                },
            );
        }
    }
    assets
}

/// Normalize a section using the standard default-content provider.
pub fn normalize_section(raw: &Value, ids: &mut IdGenerator) -> Section {
    normalize_section_with(raw, ids, &StandardDefaults)
}

/// Normalize a section with a caller-supplied default-content provider.
pub fn normalize_section_with(
    raw: &Value,
    ids: &mut IdGenerator,
    provider: &dyn DefaultContent,
) -> Section {
    let mut section = Section::default();

    section.id = match opt_string(raw.get("id")) {
        Some(id) => id,
        None => ids.new_id(),
    };
    section.kind = coerce_enum::<SectionType>(raw.get("type"));
    section.visible = coerce_bool(raw.get("visible"), true);
    section.locked = coerce_bool(raw.get("locked"), false);
    if let Some(Value::Object(data)) = raw.get("data") {
        section.data = data.clone();
    }
    section.style = normalize_style(raw.get("style"));
    section.section_card_style = match raw.get("sectionCardStyle") {
        Some(v @ Value::Object(_)) => Some(normalize_card_style(Some(v))),
        _ => None,
    };
    section.content =
        normalize_content(raw.get("content"), &section.data, section.kind, ids, provider);

    section
}

/// Normalize a section's content tree, migrating legacy `data` shapes and
/// re-applying structural invariants.
pub fn normalize_content(
    raw: Option<&Value>,
    data: &serde_json::Map<String, Value>,
    kind: SectionType,
    ids: &mut IdGenerator,
    provider: &dyn DefaultContent,
) -> SectionContent {
    let mut content = SectionContent::default();

    // Content arrives either as the canonical object or as a bare legacy
    // item array.
    let raw_items = match raw {
        Some(v @ Value::Array(_)) => Some(v),
        Some(Value::Object(o)) => {
            content.store_csv = normalize_store_csv(o.get("storeCsv"));
            content.store_labels = normalize_store_labels(o.get("storeLabels"));
            content.store_filters = normalize_store_filters(o.get("storeFilters"));
            o.get("items")
        }
        _ => None,
    };

    if let Some(Value::Array(items)) = raw_items {
        for raw_item in items {
            if let Some(item) = normalize_item(raw_item, ids) {
                content.items.push(item);
            }
        }
    }

    migrate_legacy_data(&mut content, data, kind, ids);
    enforce_content_invariants(&mut content, ids);
    provider.fill(kind, &mut content, ids);
    enforce_content_invariants(&mut content, ids);

    content
}

/// Lift known legacy `data` fields into the item sequence. Only fills
/// gaps: a section that already has an item of the matching kind keeps it.
fn migrate_legacy_data(
    content: &mut SectionContent,
    data: &serde_json::Map<String, Value>,
    kind: SectionType,
    ids: &mut IdGenerator,
) {
    // Legal-note lists render bulleted; migrated bare lines inherit that.
    let line_marks = match kind {
        SectionType::LegalNotes => TextMarks {
            bullet: crate::style::Bullet::Disc,
            ..TextMarks::default()
        },
        _ => TextMarks::default(),
    };

    let has_title = content.items.iter().any(ContentItem::is_title);
    let has_text = content
        .items
        .iter()
        .any(|i| matches!(i, ContentItem::Text { .. }));
    let has_image = content
        .items
        .iter()
        .any(|i| matches!(i, ContentItem::Image { .. }));
    let has_button = content
        .items
        .iter()
        .any(|i| matches!(i, ContentItem::Button { .. }));

    if !has_title {
        if let Some(Value::String(text)) = data.get("title") {
            if !text.trim().is_empty() {
                content.items.insert(
                    0,
                    ContentItem::Title {
                        id: ids.new_id(),
                        text: text.clone(),
                        marks: TextMarks::default(),
                    },
                );
            }
        }
    }

    if !has_text {
        let lines: Vec<Line> = if let Some(Value::Array(items)) = data.get("items") {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|text| Line {
                    id: ids.new_id(),
                    text: text.to_string(),
                    marks: line_marks.clone(),
                    ..Line::default()
                })
                .collect()
        } else if let Some(text) = data
            .get("primaryText")
            .or_else(|| data.get("body"))
            .and_then(Value::as_str)
        {
            text.split('\n')
                .map(|part| Line {
                    id: ids.new_id(),
                    text: part.to_string(),
                    marks: line_marks.clone(),
                    ..Line::default()
                })
                .collect()
        } else {
            Vec::new()
        };

        if !lines.is_empty() {
            content.items.push(ContentItem::Text {
                id: ids.new_id(),
                lines,
            });
        }
    }

    if !has_image {
        let src = match data.get("image") {
            Some(Value::String(src)) => Some(src.clone()),
            Some(Value::Object(o)) => opt_string(o.get("src")),
            _ => None,
        };
        if let Some(src) = src {
            let alt = data
                .get("image")
                .and_then(|i| i.get("alt"))
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            content.items.push(ContentItem::Image {
                id: ids.new_id(),
                images: vec![ImageEntry {
                    id: ids.new_id(),
                    src,
                    alt,
                    ..ImageEntry::default()
                }],
                layout: Default::default(),
            });
        }
    }

    if !has_button {
        if let Some(raw_button @ Value::Object(button)) = data.get("button") {
            content.items.push(ContentItem::Button {
                id: ids.new_id(),
                label: coerce_string(button.get("label"), "Learn more"),
                // legacy flat shape {label, url} is handled by the
                // untagged branch of the target normalizer
                target: normalize_button_target(button.get("target").or(Some(raw_button))),
                variant: coerce_enum(button.get("variant")),
                style: normalize_button_style(button.get("style")),
            });
        }
    }
}

fn normalize_item(raw: &Value, ids: &mut IdGenerator) -> Option<ContentItem> {
    match raw {
        // A bare string is a legacy one-line text item
        Value::String(text) => Some(ContentItem::Text {
            id: ids.new_id(),
            lines: vec![Line {
                id: ids.new_id(),
                text: text.clone(),
                ..Line::default()
            }],
        }),
        Value::Object(o) => {
            let id = opt_string(o.get("id")).unwrap_or_else(|| ids.new_id());
            match o.get("type").and_then(Value::as_str) {
                Some("title") => Some(ContentItem::Title {
                    id,
                    text: coerce_string(o.get("text"), ""),
                    marks: normalize_marks(o.get("marks")),
                }),
                Some("text") => Some(ContentItem::Text {
                    id,
                    lines: normalize_lines(o.get("lines"), ids),
                }),
                Some("image") => {
                    let images = match o.get("images") {
                        Some(Value::Array(entries)) => entries
                            .iter()
                            .filter_map(|e| normalize_image_entry(e, ids))
                            .collect(),
                        // legacy single-image shape: the item itself carries src
                        _ => match opt_string(o.get("src")) {
                            Some(_) => normalize_image_entry(raw, ids).into_iter().collect(),
                            None => Vec::new(),
                        },
                    };
                    Some(ContentItem::Image {
                        id,
                        images,
                        layout: coerce_enum(o.get("layout")),
                    })
                }
                Some("button") => Some(ContentItem::Button {
                    id,
                    label: coerce_string(o.get("label"), ""),
                    target: normalize_button_target(o.get("target").or(Some(raw))),
                    variant: coerce_enum(o.get("variant")),
                    style: normalize_button_style(o.get("style")),
                }),
                // Unknown item types are dropped
                _ => None,
            }
        }
        _ => None,
    }
}

fn normalize_lines(v: Option<&Value>, ids: &mut IdGenerator) -> Vec<Line> {
    let mut lines = Vec::new();
    if let Some(Value::Array(entries)) = v {
        for entry in entries {
            match entry {
                Value::String(text) => lines.push(Line {
                    id: ids.new_id(),
                    text: text.clone(),
                    ..Line::default()
                }),
                Value::Object(o) => lines.push(Line {
                    id: opt_string(o.get("id")).unwrap_or_else(|| ids.new_id()),
                    text: coerce_string(o.get("text"), ""),
                    marks: normalize_marks(o.get("marks")),
                    animation: normalize_animation_opt(o.get("animation")),
                }),
                _ => {}
            }
        }
    }
    lines
}

fn normalize_image_entry(v: &Value, ids: &mut IdGenerator) -> Option<ImageEntry> {
    match v {
        Value::String(src) => Some(ImageEntry {
            id: ids.new_id(),
            src: src.clone(),
            ..ImageEntry::default()
        }),
        Value::Object(o) => Some(ImageEntry {
            id: opt_string(o.get("id")).unwrap_or_else(|| ids.new_id()),
            src: coerce_string(o.get("src"), ""),
            asset_id: opt_string(o.get("assetId")),
            alt: coerce_string(o.get("alt"), ""),
            animation: normalize_animation_opt(o.get("animation")),
        }),
        _ => None,
    }
}

fn normalize_button_target(v: Option<&Value>) -> ButtonTarget {
    match v {
        Some(Value::String(url)) => ButtonTarget::Url { url: url.clone() },
        Some(Value::Object(o)) => match o.get("type").and_then(Value::as_str) {
            Some("url") => ButtonTarget::Url {
                url: coerce_string(o.get("url"), ""),
            },
            Some("section") => ButtonTarget::Section {
                section_id: coerce_string(o.get("sectionId"), ""),
            },
            // legacy untagged shapes
            _ => {
                if let Some(section_id) = opt_string(o.get("sectionId")) {
                    ButtonTarget::Section { section_id }
                } else {
                    ButtonTarget::Url {
                        url: coerce_string(o.get("url"), ""),
                    }
                }
            }
        },
        _ => ButtonTarget::default(),
    }
}

/// Normalize formatting marks, materializing every default.
pub fn normalize_marks(v: Option<&Value>) -> TextMarks {
    let mut marks = TextMarks::default();
    if let Some(Value::Object(o)) = v {
        marks.bold = coerce_bool(o.get("bold"), false);
        marks.color = coerce_nonblank(o.get("color"), "#333333");
        marks.size = coerce_number(o.get("size"), 16.0, 8.0, 96.0);
        marks.align = coerce_enum(o.get("align"));
        marks.bullet = coerce_enum(o.get("bullet"));
        marks.callout = match o.get("callout") {
            Some(v @ Value::Object(_)) => Some(normalize_callout(v)),
            _ => None,
        };
    }
    marks
}

fn normalize_callout(v: &Value) -> CalloutBox {
    CalloutBox {
        tone: coerce_enum(v.get("tone")),
        fill_color: coerce_nonblank(v.get("fillColor"), "#f5f7fa"),
        border_color: coerce_nonblank(v.get("borderColor"), "#d0d7e2"),
        radius: coerce_number(v.get("radius"), 8.0, 0.0, 64.0),
        padding: coerce_number(v.get("padding"), 12.0, 0.0, 96.0),
    }
}

/// Normalize a section style object.
pub fn normalize_style(v: Option<&Value>) -> SectionStyle {
    SectionStyle {
        align: coerce_enum(v.and_then(|s| s.get("align"))),
        text_color: coerce_nonblank(v.and_then(|s| s.get("textColor")), "#333333"),
        font_size: coerce_number(v.and_then(|s| s.get("fontSize")), 16.0, 8.0, 96.0),
        line_height: coerce_number(v.and_then(|s| s.get("lineHeight")), 1.6, 1.0, 3.0),
        padding: normalize_padding(v.and_then(|s| s.get("padding"))),
        background: normalize_background(v.and_then(|s| s.get("background"))),
        animation: normalize_animation(v.and_then(|s| s.get("animation"))),
        preset_id: opt_string(v.and_then(|s| s.get("presetId"))),
    }
}

fn normalize_padding(v: Option<&Value>) -> Padding {
    Padding {
        top: coerce_number(v.and_then(|p| p.get("top")), 24.0, 0.0, 240.0),
        bottom: coerce_number(v.and_then(|p| p.get("bottom")), 24.0, 0.0, 240.0),
    }
}

/// Normalize a background fill.
pub fn normalize_background(v: Option<&Value>) -> Background {
    Background {
        kind: coerce_enum(v.and_then(|b| b.get("kind"))),
        color: coerce_nonblank(v.and_then(|b| b.get("color")), "#ffffff"),
        image_src: opt_string(v.and_then(|b| b.get("imageSrc"))),
        preset_id: opt_string(v.and_then(|b| b.get("presetId"))),
        opacity: coerce_number(v.and_then(|b| b.get("opacity")), 1.0, 0.0, 1.0),
    }
}

/// Normalize an animation record.
pub fn normalize_animation(v: Option<&Value>) -> Animation {
    Animation {
        kind: coerce_enum(v.and_then(|a| a.get("kind"))),
        easing: coerce_enum(v.and_then(|a| a.get("easing"))),
        duration_ms: coerce_number(v.and_then(|a| a.get("durationMs")), 400.0, 0.0, 10_000.0),
        delay_ms: coerce_number(v.and_then(|a| a.get("delayMs")), 0.0, 0.0, 10_000.0),
    }
}

fn normalize_animation_opt(v: Option<&Value>) -> Option<Animation> {
    match v {
        Some(a @ Value::Object(_)) => Some(normalize_animation(Some(a))),
        _ => None,
    }
}

/// Normalize a card style object.
pub fn normalize_card_style(v: Option<&Value>) -> CardStyle {
    CardStyle {
        fill_color: coerce_nonblank(v.and_then(|c| c.get("fillColor")), "#ffffff"),
        border_color: coerce_nonblank(v.and_then(|c| c.get("borderColor")), "#e5e5e5"),
        border_width: coerce_number(v.and_then(|c| c.get("borderWidth")), 1.0, 0.0, 16.0),
        radius: coerce_number(v.and_then(|c| c.get("radius")), 12.0, 0.0, 64.0),
        shadow: coerce_enum(v.and_then(|c| c.get("shadow"))),
        padding: coerce_number(v.and_then(|c| c.get("padding")), 24.0, 0.0, 96.0),
    }
}

/// Normalize a button style patch.
pub fn normalize_button_style(v: Option<&Value>) -> ButtonStyle {
    ButtonStyle {
        fill_color: coerce_nonblank(v.and_then(|b| b.get("fillColor")), "#2563eb"),
        text_color: coerce_nonblank(v.and_then(|b| b.get("textColor")), "#ffffff"),
        radius: coerce_number(v.and_then(|b| b.get("radius")), 6.0, 0.0, 64.0),
    }
}

/// Normalize page settings.
pub fn normalize_settings(v: Option<&Value>) -> PageSettings {
    PageSettings {
        page_width: coerce_enum(v.and_then(|s| s.get("pageWidth"))),
        max_width: coerce_number(v.and_then(|s| s.get("maxWidth")), 1080.0, 320.0, 1920.0),
        background: normalize_background(v.and_then(|s| s.get("background"))),
        preview_font_scale: coerce_number(
            v.and_then(|s| s.get("previewFontScale")),
            1.0,
            0.25,
            4.0,
        ),
    }
}

/// Normalize the page base style.
pub fn normalize_base_style(v: Option<&Value>) -> PageBaseStyle {
    PageBaseStyle {
        font_family: coerce_nonblank(v.and_then(|s| s.get("fontFamily")), "sans-serif"),
        font_size: coerce_number(v.and_then(|s| s.get("fontSize")), 16.0, 8.0, 96.0),
        text_color: coerce_nonblank(v.and_then(|s| s.get("textColor")), "#333333"),
        line_height: coerce_number(v.and_then(|s| s.get("lineHeight")), 1.6, 1.0, 3.0),
        section_spacing: coerce_number(v.and_then(|s| s.get("sectionSpacing")), 48.0, 0.0, 240.0),
        animation: normalize_animation(v.and_then(|s| s.get("animation"))),
    }
}

/// Normalize a raw storeCsv fragment. Cells coerce to strings; a
/// non-object input clears the fragment.
pub fn normalize_store_csv(v: Option<&Value>) -> Option<StoreCsv> {
    let o = match v {
        Some(Value::Object(o)) => o,
        _ => return None,
    };
    let headers = match o.get("headers") {
        Some(Value::Array(h)) => h
            .iter()
            .map(|cell| coerce_string(Some(cell), ""))
            .collect(),
        _ => Vec::new(),
    };
    let rows = match o.get("rows") {
        Some(Value::Array(rows)) => rows
            .iter()
            .filter_map(|row| match row {
                Value::Array(cells) => Some(
                    cells
                        .iter()
                        .map(|cell| coerce_string(Some(cell), ""))
                        .collect::<Vec<String>>(),
                ),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Some(StoreCsv { headers, rows })
}

/// Normalize store column labels.
pub fn normalize_store_labels(v: Option<&Value>) -> Option<StoreLabels> {
    match v {
        Some(Value::Object(o)) => Some(
            o.iter()
                .map(|(k, v)| (k.clone(), coerce_string(Some(v), "")))
                .collect(),
        ),
        _ => None,
    }
}

/// Normalize store filters.
pub fn normalize_store_filters(v: Option<&Value>) -> Option<StoreFilters> {
    let o = match v {
        Some(Value::Object(o)) => o,
        _ => return None,
    };
    let prefectures = match o.get("prefectures") {
        Some(Value::Array(p)) => p
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    Some(StoreFilters {
        prefectures,
        search: coerce_string(o.get("search"), ""),
    })
}

/// Re-apply the structural invariants of a content tree:
///
/// - at most one title item, pinned to index 0 (surplus titles demote to
///   one-line text items, preserving their text)
/// - every text item keeps at least one line
pub fn enforce_content_invariants(content: &mut SectionContent, ids: &mut IdGenerator) {
    let items = std::mem::take(&mut content.items);
    let mut title: Option<ContentItem> = None;
    let mut rest = Vec::with_capacity(items.len());

    for item in items {
        match item {
            ContentItem::Title { id, text, marks } if title.is_some() => {
                rest.push(ContentItem::Text {
                    id,
                    lines: vec![Line {
                        id: ids.new_id(),
                        text,
                        marks,
                        animation: None,
                    }],
                });
            }
            item @ ContentItem::Title { .. } => title = Some(item),
            item => rest.push(item),
        }
    }

    content.items = rest;
    if let Some(title) = title {
        content.items.insert(0, title);
    }

    for item in &mut content.items {
        if let ContentItem::Text { lines, .. } = item {
            if lines.is_empty() {
                lines.push(Line {
                    id: ids.new_id(),
                    ..Line::default()
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentItemKind;
    use crate::style::{Align, AnimationKind, Bullet};
    use serde_json::json;

    #[test]
    fn test_coerce_number_parses_and_clamps() {
        assert_eq!(coerce_number(Some(&json!(20)), 16.0, 8.0, 96.0), 20.0);
        assert_eq!(coerce_number(Some(&json!("24.5")), 16.0, 8.0, 96.0), 24.5);
        assert_eq!(coerce_number(Some(&json!(400)), 16.0, 8.0, 96.0), 96.0);
        assert_eq!(coerce_number(Some(&json!("NaN")), 16.0, 8.0, 96.0), 16.0);
        assert_eq!(coerce_number(Some(&json!(null)), 16.0, 8.0, 96.0), 16.0);
        assert_eq!(coerce_number(None, 16.0, 8.0, 96.0), 16.0);
    }

    #[test]
    fn test_enum_fallback() {
        let marks = normalize_marks(Some(&json!({"align": "middle", "bullet": "disc"})));
        assert_eq!(marks.align, Align::Left);
        assert_eq!(marks.bullet, Bullet::Disc);
    }

    #[test]
    fn test_legal_notes_items_migration() {
        let mut ids = IdGenerator::new("test");
        let raw = json!({"type": "legalNotes", "data": {"items": ["a", "b"]}});
        let section = normalize_section(&raw, &mut ids);

        let text = section
            .content
            .items
            .iter()
            .find(|i| i.kind() == ContentItemKind::Text)
            .expect("text item");
        match text {
            ContentItem::Text { lines, .. } => {
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].text, "a");
                assert_eq!(lines[1].text, "b");
                assert_eq!(lines[0].marks.bullet, Bullet::Disc);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_primary_text_splits_on_newlines() {
        let mut ids = IdGenerator::new("test");
        let raw = json!({"type": "text", "data": {"primaryText": "first\nsecond"}});
        let section = normalize_section(&raw, &mut ids);

        match &section.content.items[0] {
            ContentItem::Text { lines, .. } => {
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].text, "first");
                assert_eq!(lines[1].text, "second");
            }
            other => panic!("expected text item, got {:?}", other),
        }
    }

    #[test]
    fn test_title_pinned_first_and_surplus_demoted() {
        let mut ids = IdGenerator::new("test");
        let raw = json!({
            "type": "text",
            "content": {"items": [
                {"type": "text", "lines": ["body"]},
                {"type": "title", "text": "First"},
                {"type": "title", "text": "Second"}
            ]}
        });
        let section = normalize_section(&raw, &mut ids);

        assert!(section.content.items[0].is_title());
        let titles = section
            .content
            .items
            .iter()
            .filter(|i| i.is_title())
            .count();
        assert_eq!(titles, 1);

        // The surplus title survives as a text item
        let demoted = section.content.items.iter().any(|i| match i {
            ContentItem::Text { lines, .. } => lines.iter().any(|l| l.text == "Second"),
            _ => false,
        });
        assert!(demoted);
    }

    #[test]
    fn test_text_items_never_empty() {
        let mut ids = IdGenerator::new("test");
        let raw = json!({
            "type": "text",
            "content": {"items": [{"type": "text", "lines": []}]}
        });
        let section = normalize_section(&raw, &mut ids);

        match &section.content.items[0] {
            ContentItem::Text { lines, .. } => assert_eq!(lines.len(), 1),
            other => panic!("expected text item, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_data_keys_preserved() {
        let mut ids = IdGenerator::new("test");
        let raw = json!({"type": "video", "data": {"videoUrl": "v.mp4", "loop": true}});
        let section = normalize_section(&raw, &mut ids);

        assert_eq!(section.data.get("videoUrl"), Some(&json!("v.mp4")));
        assert_eq!(section.data.get("loop"), Some(&json!(true)));
    }

    #[test]
    fn test_unknown_section_type_falls_back() {
        let mut ids = IdGenerator::new("test");
        let section = normalize_section(&json!({"type": "sparkles"}), &mut ids);
        assert_eq!(section.kind, SectionType::Custom);
    }

    #[test]
    fn test_legacy_single_image_lifted() {
        let mut ids = IdGenerator::new("test");
        let raw = json!({"type": "image", "data": {"image": {"src": "a.png", "alt": "hero"}}});
        let section = normalize_section(&raw, &mut ids);

        match &section.content.items[0] {
            ContentItem::Image { images, .. } => {
                assert_eq!(images[0].src, "a.png");
                assert_eq!(images[0].alt, "hero");
            }
            other => panic!("expected image item, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_is_total_on_garbage() {
        let mut ids = IdGenerator::new("test");
        for garbage in [
            json!(null),
            json!(42),
            json!("nonsense"),
            json!([1, 2, 3]),
            json!({"type": 17, "content": "not-a-tree", "style": [1]}),
        ] {
            let section = normalize_section(&garbage, &mut ids);
            assert!(!section.id.is_empty());
        }
    }

    #[test]
    fn test_normalize_section_idempotent() {
        let mut ids = IdGenerator::new("test");
        let raw = json!({
            "type": "legalNotes",
            "data": {"items": ["a", "b"], "keep": {"me": 1}},
            "style": {"fontSize": "999", "align": "bogus"},
            "content": {"items": [
                {"type": "title", "text": "T"},
                {"type": "text", "lines": ["x", {"text": "y", "marks": {"size": 2}}]}
            ]}
        });
        let once = normalize_section(&raw, &mut ids);

        let round_tripped = serde_json::to_value(&once).expect("serialize");
        let twice = normalize_section(&round_tripped, &mut ids);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_project_derives_stores() {
        let raw = json!({
            "meta": {"name": "p"},
            "sections": [{
                "type": "targetStores",
                "content": {
                    "storeCsv": {
                        "headers": ["id", "name", "pref"],
                        "rows": [["1", "Shibuya", "Tokyo"], ["2", "Umeda", "Osaka"]]
                    }
                }
            }]
        });
        let project = normalize_project(&raw);

        assert_eq!(project.stores.len(), 2);
        assert_eq!(project.stores[1].prefecture, "Osaka");
    }

    #[test]
    fn test_animation_enum_and_duration_clamp() {
        let anim = normalize_animation(Some(&json!({
            "kind": "slideUp",
            "easing": "bounce",
            "durationMs": 99999
        })));
        assert_eq!(anim.kind, AnimationKind::SlideUp);
        assert_eq!(anim.easing, crate::style::Easing::Ease);
        assert_eq!(anim.duration_ms, 10_000.0);
    }
}
