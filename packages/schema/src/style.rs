//! Style records: page settings, typography, backgrounds, marks.
//!
//! Every field carries a documented default and a clamped range. The
//! normalizer materializes defaults explicitly, so a canonical style
//! object never has a field whose absence silently changes rendering.

use serde::{Deserialize, Serialize};

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Default for Align {
    fn default() -> Self {
        Align::Left
    }
}

/// Bullet kind for text lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bullet {
    None,
    Disc,
    Number,
}

impl Default for Bullet {
    fn default() -> Self {
        Bullet::None
    }
}

/// Entrance animation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationKind {
    None,
    Fade,
    SlideUp,
    Zoom,
}

impl Default for AnimationKind {
    fn default() -> Self {
        AnimationKind::None
    }
}

/// Animation easing curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Ease,
    Linear,
    EaseIn,
    EaseOut,
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Ease
    }
}

/// Entrance animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Animation {
    pub kind: AnimationKind,
    pub easing: Easing,
    pub duration_ms: f64,
    pub delay_ms: f64,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            kind: AnimationKind::None,
            easing: Easing::Ease,
            duration_ms: 400.0,
            delay_ms: 0.0,
        }
    }
}

/// Background fill kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundKind {
    None,
    Color,
    Image,
    Preset,
}

impl Default for BackgroundKind {
    fn default() -> Self {
        BackgroundKind::None
    }
}

/// Background fill for a page or section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Background {
    pub kind: BackgroundKind,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<String>,
    pub opacity: f64,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::None,
            color: "#ffffff".to_string(),
            image_src: None,
            preset_id: None,
            opacity: 1.0,
        }
    }
}

/// Callout box tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalloutTone {
    Info,
    Warn,
    Success,
}

impl Default for CalloutTone {
    fn default() -> Self {
        CalloutTone::Info
    }
}

/// Callout box drawn around a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalloutBox {
    pub tone: CalloutTone,
    pub fill_color: String,
    pub border_color: String,
    pub radius: f64,
    pub padding: f64,
}

impl Default for CalloutBox {
    fn default() -> Self {
        Self {
            tone: CalloutTone::Info,
            fill_color: "#f5f7fa".to_string(),
            border_color: "#d0d7e2".to_string(),
            radius: 8.0,
            padding: 12.0,
        }
    }
}

/// Formatting marks attached to a line or title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextMarks {
    pub bold: bool,
    pub color: String,
    pub size: f64,
    pub align: Align,
    pub bullet: Bullet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callout: Option<CalloutBox>,
}

impl Default for TextMarks {
    fn default() -> Self {
        Self {
            bold: false,
            color: "#333333".to_string(),
            size: 16.0,
            align: Align::Left,
            bullet: Bullet::None,
            callout: None,
        }
    }
}

/// Style patch carried on a button item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonStyle {
    pub fill_color: String,
    pub text_color: String,
    pub radius: f64,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            fill_color: "#2563eb".to_string(),
            text_color: "#ffffff".to_string(),
            radius: 6.0,
        }
    }
}

/// Vertical padding of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 24.0,
            bottom: 24.0,
        }
    }
}

/// Per-section styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionStyle {
    pub align: Align,
    pub text_color: String,
    pub font_size: f64,
    pub line_height: f64,
    pub padding: Padding,
    pub background: Background,
    pub animation: Animation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<String>,
}

impl Default for SectionStyle {
    fn default() -> Self {
        Self {
            align: Align::Left,
            text_color: "#333333".to_string(),
            font_size: 16.0,
            line_height: 1.6,
            padding: Padding::default(),
            background: Background::default(),
            animation: Animation::default(),
            preset_id: None,
        }
    }
}

/// Card shadow depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shadow {
    None,
    Soft,
    Hard,
}

impl Default for Shadow {
    fn default() -> Self {
        Shadow::Soft
    }
}

/// Card framing applied around a section's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardStyle {
    pub fill_color: String,
    pub border_color: String,
    pub border_width: f64,
    pub radius: f64,
    pub shadow: Shadow,
    pub padding: f64,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            fill_color: "#ffffff".to_string(),
            border_color: "#e5e5e5".to_string(),
            border_width: 1.0,
            radius: 12.0,
            shadow: Shadow::Soft,
            padding: 24.0,
        }
    }
}

/// Page width mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageWidth {
    Fixed,
    Full,
}

impl Default for PageWidth {
    fn default() -> Self {
        PageWidth::Fixed
    }
}

/// Page-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSettings {
    pub page_width: PageWidth,
    pub max_width: f64,
    pub background: Background,
    pub preview_font_scale: f64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_width: PageWidth::Fixed,
            max_width: 1080.0,
            background: Background::default(),
            preview_font_scale: 1.0,
        }
    }
}

/// Global typography/spacing/animation defaults for the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageBaseStyle {
    pub font_family: String,
    pub font_size: f64,
    pub text_color: String,
    pub line_height: f64,
    pub section_spacing: f64,
    pub animation: Animation,
}

impl Default for PageBaseStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 16.0,
            text_color: "#333333".to_string(),
            line_height: 1.6,
            section_spacing: 48.0,
            animation: Animation::default(),
        }
    }
}
