//! Canonical document tree: Project → Section → ContentItem → Line.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::IdGenerator;
use crate::stores::{project_stores, StoreCsv, StoreFilters, StoreLabels, StoreRecord};
use crate::style::{
    Animation, ButtonStyle, CardStyle, PageBaseStyle, PageSettings, SectionStyle, TextMarks,
};

/// Root aggregate: one editable page project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub meta: ProjectMeta,
    pub settings: PageSettings,
    pub page_base_style: PageBaseStyle,
    pub sections: Vec<Section>,
    /// Opaque references into the external asset store, keyed by asset id
    pub assets: BTreeMap<String, AssetRef>,
    /// Derived store table, rebuilt whenever a section's storeCsv changes
    pub stores: Vec<StoreRecord>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            meta: ProjectMeta::default(),
            settings: PageSettings::default(),
            page_base_style: PageBaseStyle::default(),
            sections: Vec::new(),
            assets: BTreeMap::new(),
            stores: Vec::new(),
        }
    }
}

/// Project name and timestamps (epoch milliseconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMeta {
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Default for ProjectMeta {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Reference to a binary payload owned by the asset-store collaborator.
/// The core never interprets payload bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetRef {
    pub id: String,
    pub name: String,
    pub mime: String,
}

/// Section type. Unrecognized input normalizes to `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionType {
    Hero,
    Headline,
    Text,
    Image,
    Video,
    Cta,
    Campaign,
    Coupon,
    PriceList,
    Faq,
    Schedule,
    Access,
    TargetStores,
    LegalNotes,
    Divider,
    Custom,
}

impl Default for SectionType {
    fn default() -> Self {
        SectionType::Custom
    }
}

impl SectionType {
    pub const ALL: [SectionType; 16] = [
        SectionType::Hero,
        SectionType::Headline,
        SectionType::Text,
        SectionType::Image,
        SectionType::Video,
        SectionType::Cta,
        SectionType::Campaign,
        SectionType::Coupon,
        SectionType::PriceList,
        SectionType::Faq,
        SectionType::Schedule,
        SectionType::Access,
        SectionType::TargetStores,
        SectionType::LegalNotes,
        SectionType::Divider,
        SectionType::Custom,
    ];
}

/// One ordered entry in the project's page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionType,
    pub visible: bool,
    /// Locked sections reject all mutating operations
    pub locked: bool,
    /// Free-form legacy fields, preserved untouched for forward compatibility
    pub data: serde_json::Map<String, serde_json::Value>,
    pub content: SectionContent,
    pub style: SectionStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_card_style: Option<CardStyle>,
}

impl Default for Section {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: SectionType::Custom,
            visible: true,
            locked: false,
            data: serde_json::Map::new(),
            content: SectionContent::default(),
            style: SectionStyle::default(),
            section_card_style: None,
        }
    }
}

/// Typed content tree of a section plus optional store-table fragments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionContent {
    pub items: Vec<ContentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_csv: Option<StoreCsv>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_labels: Option<StoreLabels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_filters: Option<StoreFilters>,
}

/// Discriminant for [`ContentItem`], used when creating fresh items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentItemKind {
    Title,
    Text,
    Image,
    Button,
}

/// Typed node inside a section's content sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentItem {
    /// Single heading text. At most one per section, always pinned to index 0.
    #[serde(rename_all = "camelCase")]
    Title {
        id: String,
        text: String,
        marks: TextMarks,
    },

    /// Ordered, never-empty list of lines
    #[serde(rename_all = "camelCase")]
    Text { id: String, lines: Vec<Line> },

    /// Ordered image entries with a layout mode
    #[serde(rename_all = "camelCase")]
    Image {
        id: String,
        images: Vec<ImageEntry>,
        layout: ImageLayout,
    },

    /// Call-to-action button
    #[serde(rename_all = "camelCase")]
    Button {
        id: String,
        label: String,
        target: ButtonTarget,
        variant: ButtonVariant,
        style: ButtonStyle,
    },
}

impl ContentItem {
    pub fn id(&self) -> &str {
        match self {
            ContentItem::Title { id, .. }
            | ContentItem::Text { id, .. }
            | ContentItem::Image { id, .. }
            | ContentItem::Button { id, .. } => id,
        }
    }

    pub fn kind(&self) -> ContentItemKind {
        match self {
            ContentItem::Title { .. } => ContentItemKind::Title,
            ContentItem::Text { .. } => ContentItemKind::Text,
            ContentItem::Image { .. } => ContentItemKind::Image,
            ContentItem::Button { .. } => ContentItemKind::Button,
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, ContentItem::Title { .. })
    }
}

/// One row of text within a text content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Line {
    pub id: String,
    pub text: String,
    pub marks: TextMarks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            id: String::new(),
            text: String::new(),
            marks: TextMarks::default(),
            animation: None,
        }
    }
}

/// One image entry inside an image content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageEntry {
    pub id: String,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

impl Default for ImageEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            src: String::new(),
            asset_id: None,
            alt: String::new(),
            animation: None,
        }
    }
}

/// Image arrangement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageLayout {
    Auto,
    Vertical,
    Horizontal,
    Columns2,
    Columns3,
    Grid,
    Slideshow,
}

impl Default for ImageLayout {
    fn default() -> Self {
        ImageLayout::Auto
    }
}

/// Where a button leads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ButtonTarget {
    #[serde(rename_all = "camelCase")]
    Url { url: String },
    #[serde(rename_all = "camelCase")]
    Section { section_id: String },
}

impl Default for ButtonTarget {
    fn default() -> Self {
        ButtonTarget::Url { url: String::new() }
    }
}

/// Button appearance variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonVariant {
    Solid,
    Outline,
    Ghost,
    Link,
}

impl Default for ButtonVariant {
    fn default() -> Self {
        ButtonVariant::Solid
    }
}

impl Project {
    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    /// Id generator seeded for this project, advanced past every id
    /// already present so fresh ids never collide with persisted ones.
    pub fn id_generator(&self) -> IdGenerator {
        let mut ids = IdGenerator::new(&self.meta.name);
        for section in &self.sections {
            ids.skip_past(&section.id);
            for item in &section.content.items {
                ids.skip_past(item.id());
                match item {
                    ContentItem::Text { lines, .. } => {
                        for line in lines {
                            ids.skip_past(&line.id);
                        }
                    }
                    ContentItem::Image { images, .. } => {
                        for image in images {
                            ids.skip_past(&image.id);
                        }
                    }
                    _ => {}
                }
            }
        }
        ids
    }

    /// Rebuild the derived store table from every section's storeCsv,
    /// concatenated in section order.
    pub fn rebuild_stores(&mut self) {
        let mut stores = Vec::new();
        for section in &self.sections {
            if let Some(csv) = &section.content.store_csv {
                stores.extend(project_stores(csv));
            }
        }
        self.stores = stores;
    }
}

impl Section {
    pub fn item_index(&self, item_id: &str) -> Option<usize> {
        self.content.items.iter().position(|i| i.id() == item_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&ContentItem> {
        self.content.items.iter().find(|i| i.id() == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut ContentItem> {
        self.content.items.iter_mut().find(|i| i.id() == item_id)
    }

    /// Mint fresh ids for this section and everything nested inside it.
    /// Used when duplicating, so copies never alias the original.
    pub fn reassign_ids(&mut self, ids: &mut IdGenerator) {
        self.id = ids.new_id();
        for item in &mut self.content.items {
            item.reassign_ids(ids);
        }
    }
}

impl ContentItem {
    /// Mint fresh ids for this item and its nested lines/images.
    pub fn reassign_ids(&mut self, ids: &mut IdGenerator) {
        match self {
            ContentItem::Title { id, .. } => *id = ids.new_id(),
            ContentItem::Text { id, lines } => {
                *id = ids.new_id();
                for line in lines {
                    line.id = ids.new_id();
                }
            }
            ContentItem::Image { id, images, .. } => {
                *id = ids.new_id();
                for image in images {
                    image.id = ids.new_id();
                }
            }
            ContentItem::Button { id, .. } => *id = ids.new_id(),
        }
    }
}
