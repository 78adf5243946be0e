//! Merge Engine: apply a partial patch onto a normalized base value.
//!
//! Patches are plain JSON objects (manual edits and opaque preset bundles
//! travel the same path). The typed wrappers serialize the base, deep-merge
//! the patch, and re-normalize, so numeric clamping and enum fallback are
//! inherited from the normalizer for free.

use serde_json::Value;

use crate::normalize::{
    normalize_animation, normalize_base_style, normalize_button_style, normalize_card_style,
    normalize_marks, normalize_settings, normalize_style,
};
use crate::style::{
    Animation, ButtonStyle, CardStyle, PageBaseStyle, PageSettings, SectionStyle, TextMarks,
};

/// Deep-merge `patch` into `base`. Objects merge key-wise recursively;
/// arrays and scalars replace. A `null` patch value resets the slot, and
/// re-normalization then restores the documented default.
pub fn deep_merge(base: &mut Value, patch: &Value) {
    if let (Value::Object(base_map), Value::Object(patch_map)) = (&mut *base, patch) {
        for (key, patch_value) in patch_map {
            match base_map.get_mut(key) {
                Some(slot) if slot.is_object() && patch_value.is_object() => {
                    deep_merge(slot, patch_value);
                }
                _ => {
                    base_map.insert(key.clone(), patch_value.clone());
                }
            }
        }
        return;
    }
    *base = patch.clone();
}

fn merged_value<T: serde::Serialize>(base: &T, patch: &Value) -> Value {
    let mut value = serde_json::to_value(base).unwrap_or(Value::Null);
    deep_merge(&mut value, patch);
    value
}

/// Merge a patch onto a section style.
pub fn merge_section_style(base: &SectionStyle, patch: &Value) -> SectionStyle {
    normalize_style(Some(&merged_value(base, patch)))
}

/// Merge a patch onto a card style.
pub fn merge_card_style(base: &CardStyle, patch: &Value) -> CardStyle {
    normalize_card_style(Some(&merged_value(base, patch)))
}

/// Merge a patch onto line/title marks.
pub fn merge_marks(base: &TextMarks, patch: &Value) -> TextMarks {
    normalize_marks(Some(&merged_value(base, patch)))
}

/// Merge a patch onto a button style.
pub fn merge_button_style(base: &ButtonStyle, patch: &Value) -> ButtonStyle {
    normalize_button_style(Some(&merged_value(base, patch)))
}

/// Merge a patch onto an animation record.
pub fn merge_animation(base: &Animation, patch: &Value) -> Animation {
    normalize_animation(Some(&merged_value(base, patch)))
}

/// Merge a patch onto the page settings.
pub fn merge_settings(base: &PageSettings, patch: &Value) -> PageSettings {
    normalize_settings(Some(&merged_value(base, patch)))
}

/// Merge a patch onto the page base style.
pub fn merge_base_style(base: &PageBaseStyle, patch: &Value) -> PageBaseStyle {
    normalize_base_style(Some(&merged_value(base, patch)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Align, BackgroundKind};
    use serde_json::json;

    #[test]
    fn test_deep_merge_nested_objects() {
        let mut base = json!({"a": {"x": 1, "y": 2}, "b": 3});
        deep_merge(&mut base, &json!({"a": {"y": 9}}));

        assert_eq!(base, json!({"a": {"x": 1, "y": 9}, "b": 3}));
    }

    #[test]
    fn test_deep_merge_arrays_replace() {
        let mut base = json!({"list": [1, 2, 3]});
        deep_merge(&mut base, &json!({"list": [9]}));

        assert_eq!(base, json!({"list": [9]}));
    }

    #[test]
    fn test_merge_style_clamps_and_falls_back() {
        let base = SectionStyle::default();
        let merged = merge_section_style(
            &base,
            &json!({"fontSize": 500, "align": "center", "background": {"kind": "color", "color": "#ffeecc"}}),
        );

        assert_eq!(merged.font_size, 96.0);
        assert_eq!(merged.align, Align::Center);
        assert_eq!(merged.background.kind, BackgroundKind::Color);
        assert_eq!(merged.background.color, "#ffeecc");
        // untouched fields keep their base values
        assert_eq!(merged.line_height, base.line_height);
    }

    #[test]
    fn test_null_resets_to_default() {
        let base = SectionStyle {
            font_size: 32.0,
            ..SectionStyle::default()
        };
        let merged = merge_section_style(&base, &json!({"fontSize": null}));

        assert_eq!(merged.font_size, 16.0);
    }

    #[test]
    fn test_preset_patch_carries_opaque_id() {
        let base = SectionStyle::default();
        let merged = merge_section_style(
            &base,
            &json!({"presetId": "warm-sunset", "background": {"kind": "preset", "presetId": "warm-sunset"}}),
        );

        assert_eq!(merged.preset_id.as_deref(), Some("warm-sunset"));
        assert_eq!(merged.background.preset_id.as_deref(), Some("warm-sunset"));
    }

    #[test]
    fn test_merge_marks_keeps_callout_when_untouched() {
        let base = normalize_marks(Some(&json!({"callout": {"tone": "warn"}})));
        let merged = merge_marks(&base, &json!({"bold": true}));

        assert!(merged.bold);
        assert_eq!(merged.callout, base.callout);
    }
}
