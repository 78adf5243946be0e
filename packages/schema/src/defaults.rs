//! Per-type default content and fresh-entity factories.
//!
//! Product copy lives here, behind the [`DefaultContent`] trait, so the
//! generic normalizer stays type-agnostic. Providers only fill gaps;
//! user-entered values are never overwritten.

use crate::ids::IdGenerator;
use crate::model::{
    ContentItem, ContentItemKind, ImageEntry, Line, Section, SectionContent, SectionType,
};
use crate::normalize::enforce_content_invariants;
use crate::style::{Bullet, TextMarks};

/// Supplies type-specific default content for sections that lack it.
pub trait DefaultContent {
    /// Fill gaps in `content` for a section of the given type.
    fn fill(&self, kind: SectionType, content: &mut SectionContent, ids: &mut IdGenerator);
}

/// Stock defaults shipped with the editor.
pub struct StandardDefaults;

const LEGAL_NOTE_LINES: [&str; 3] = [
    "Prices shown include tax.",
    "Offer contents may change without notice.",
    "Photos are for illustration purposes only.",
];

const STORE_ADVISORY: &str = "Available at the participating stores listed below.";

impl DefaultContent for StandardDefaults {
    fn fill(&self, kind: SectionType, content: &mut SectionContent, ids: &mut IdGenerator) {
        match kind {
            SectionType::Hero => ensure_title(content, ids, "Welcome"),
            SectionType::Headline => ensure_title(content, ids, "Headline"),
            SectionType::Campaign => ensure_title(content, ids, "Campaign"),
            SectionType::Text | SectionType::Faq => ensure_text(content, ids, &[], Bullet::None),
            SectionType::LegalNotes => {
                ensure_text(content, ids, &LEGAL_NOTE_LINES, Bullet::Disc)
            }
            SectionType::Image => ensure_image(content, ids),
            SectionType::Cta => ensure_button(content, ids, "Learn more"),
            SectionType::Coupon => ensure_button(content, ids, "Get coupon"),
            SectionType::TargetStores => ensure_store_advisory(content, ids),
            _ => {}
        }
    }
}

fn ensure_title(content: &mut SectionContent, ids: &mut IdGenerator, text: &str) {
    if content.items.iter().any(ContentItem::is_title) {
        return;
    }
    content.items.insert(
        0,
        ContentItem::Title {
            id: ids.new_id(),
            text: text.to_string(),
            marks: TextMarks::default(),
        },
    );
}

fn ensure_text(content: &mut SectionContent, ids: &mut IdGenerator, texts: &[&str], bullet: Bullet) {
    if content
        .items
        .iter()
        .any(|i| matches!(i, ContentItem::Text { .. }))
    {
        return;
    }
    let lines: Vec<Line> = if texts.is_empty() {
        vec![Line {
            id: ids.new_id(),
            ..Line::default()
        }]
    } else {
        texts
            .iter()
            .map(|text| Line {
                id: ids.new_id(),
                text: text.to_string(),
                marks: TextMarks {
                    bullet,
                    ..TextMarks::default()
                },
                ..Line::default()
            })
            .collect()
    };
    content.items.push(ContentItem::Text {
        id: ids.new_id(),
        lines,
    });
}

fn ensure_image(content: &mut SectionContent, ids: &mut IdGenerator) {
    if content
        .items
        .iter()
        .any(|i| matches!(i, ContentItem::Image { .. }))
    {
        return;
    }
    content.items.push(ContentItem::Image {
        id: ids.new_id(),
        images: vec![ImageEntry {
            id: ids.new_id(),
            ..ImageEntry::default()
        }],
        layout: Default::default(),
    });
}

fn ensure_button(content: &mut SectionContent, ids: &mut IdGenerator, label: &str) {
    if content
        .items
        .iter()
        .any(|i| matches!(i, ContentItem::Button { .. }))
    {
        return;
    }
    content.items.push(ContentItem::Button {
        id: ids.new_id(),
        label: label.to_string(),
        target: Default::default(),
        variant: Default::default(),
        style: Default::default(),
    });
}

/// A target-stores section always carries a non-empty advisory text item
/// as its first non-title item.
fn ensure_store_advisory(content: &mut SectionContent, ids: &mut IdGenerator) {
    match content.items.iter_mut().find(|i| !i.is_title()) {
        Some(ContentItem::Text { lines, .. }) => {
            let all_blank = lines.iter().all(|l| l.text.trim().is_empty());
            if all_blank {
                match lines.first_mut() {
                    Some(first) => first.text = STORE_ADVISORY.to_string(),
                    None => lines.push(Line {
                        id: ids.new_id(),
                        text: STORE_ADVISORY.to_string(),
                        ..Line::default()
                    }),
                }
            }
        }
        _ => {
            let at = usize::from(content.items.first().is_some_and(ContentItem::is_title));
            content.items.insert(
                at,
                ContentItem::Text {
                    id: ids.new_id(),
                    lines: vec![Line {
                        id: ids.new_id(),
                        text: STORE_ADVISORY.to_string(),
                        ..Line::default()
                    }],
                },
            );
        }
    }
}

/// Build a fresh, empty content item of the given kind.
pub fn new_item(kind: ContentItemKind, ids: &mut IdGenerator) -> ContentItem {
    match kind {
        ContentItemKind::Title => ContentItem::Title {
            id: ids.new_id(),
            text: String::new(),
            marks: TextMarks::default(),
        },
        ContentItemKind::Text => ContentItem::Text {
            id: ids.new_id(),
            lines: vec![Line {
                id: ids.new_id(),
                ..Line::default()
            }],
        },
        ContentItemKind::Image => ContentItem::Image {
            id: ids.new_id(),
            images: vec![ImageEntry {
                id: ids.new_id(),
                ..ImageEntry::default()
            }],
            layout: Default::default(),
        },
        ContentItemKind::Button => ContentItem::Button {
            id: ids.new_id(),
            label: "Learn more".to_string(),
            target: Default::default(),
            variant: Default::default(),
            style: Default::default(),
        },
    }
}

impl Section {
    /// Factory for a fresh section of the given type with its default
    /// content filled in.
    pub fn with_kind(kind: SectionType, ids: &mut IdGenerator) -> Section {
        let mut section = Section {
            id: ids.new_id(),
            kind,
            ..Section::default()
        };
        StandardDefaults.fill(kind, &mut section.content, ids);
        enforce_content_invariants(&mut section.content, ids);
        section
    }
}
