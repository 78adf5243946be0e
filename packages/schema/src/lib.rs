//! # Pagecraft Schema
//!
//! Canonical document model for the Pagecraft page editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ persistence / import: raw JSON, CSV rows    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ schema: canonical document tree             │
//! │  - Normalize loose/legacy input             │
//! │  - Merge partial style patches              │
//! │  - Enforce structural invariants            │
//! │  - Project store tables                     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: mutations + history + selection     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Normalization is total**: any JSON shape in, canonical tree out,
//!    no panics and no errors
//! 2. **Normalization is idempotent**: re-normalizing canonical output is
//!    a no-op
//! 3. **Repairs are non-destructive**: defaults fill gaps, user-entered
//!    values are never overwritten
//! 4. **Invariants live with the tree**: title pinning and non-empty line
//!    lists are re-enforced after every structural edit, not only on load

mod defaults;
mod ids;
mod merge;
mod model;
mod normalize;
mod stores;
mod style;

pub use defaults::{new_item, DefaultContent, StandardDefaults};
pub use ids::IdGenerator;
pub use merge::{
    deep_merge, merge_animation, merge_base_style, merge_button_style, merge_card_style,
    merge_marks, merge_section_style, merge_settings,
};
pub use model::{
    AssetRef, ButtonTarget, ButtonVariant, ContentItem, ContentItemKind, ImageEntry, ImageLayout,
    Line, Project, ProjectMeta, Section, SectionContent, SectionType,
};
pub use normalize::{
    coerce_bool, coerce_number, coerce_string, enforce_content_invariants, normalize_animation,
    normalize_background, normalize_base_style, normalize_button_style, normalize_card_style,
    normalize_content, normalize_marks, normalize_project, normalize_section,
    normalize_section_with, normalize_settings, normalize_store_csv, normalize_store_filters,
    normalize_store_labels, normalize_style,
};
pub use stores::{project_stores, StoreCsv, StoreFilters, StoreLabels, StoreRecord};
pub use style::{
    Align, Animation, AnimationKind, Background, BackgroundKind, Bullet, ButtonStyle, CalloutBox,
    CalloutTone, CardStyle, Easing, PageBaseStyle, PageSettings, PageWidth, Padding, SectionStyle,
    Shadow, TextMarks,
};
