//! Per-kind style payloads ("extras")
//!
//! An extra keeps the user's selected style even while the style is disabled,
//! so toggling a border off and on restores the same glyphs.

use crate::{
    AnchorChar, CornerPattern, DashPattern, FillStyle, HorizontalAlign, SerializableLineExtra,
    SerializableRectExtra, SerializableTextExtra, StrokeStyle, StyleRegistry, TextAlign,
    VerticalAlign,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RectangleExtra {
    pub is_fill_enabled: bool,
    pub user_selected_fill_style: FillStyle,
    pub is_border_enabled: bool,
    pub user_selected_border_style: StrokeStyle,
    pub dash_pattern: DashPattern,
    pub corner: CornerPattern,
}

impl RectangleExtra {
    pub fn fill_style(&self) -> Option<&FillStyle> {
        self.is_fill_enabled.then_some(&self.user_selected_fill_style)
    }

    /// The effective border glyphs, with the rounded variant applied
    pub fn border_style(&self, registry: &StyleRegistry) -> Option<StrokeStyle> {
        if !self.is_border_enabled {
            return None;
        }
        Some(if self.corner.is_rounded() {
            registry.rounded_stroke_style(&self.user_selected_border_style)
        } else {
            self.user_selected_border_style.clone()
        })
    }

    pub fn is_rounded_corner(&self) -> bool {
        self.corner.is_rounded()
    }

    pub fn to_serializable(&self) -> SerializableRectExtra {
        SerializableRectExtra {
            is_fill_enabled: self.is_fill_enabled,
            user_selected_fill_style_id: self.user_selected_fill_style.id.clone(),
            is_border_enabled: self.is_border_enabled,
            user_selected_border_style_id: self.user_selected_border_style.id.clone(),
            dash_pattern: self.dash_pattern.to_string(),
            corner: self.corner.to_string(),
        }
    }

    /// Unknown style ids resolve to the registry's defaults
    pub fn from_serializable(extra: &SerializableRectExtra, registry: &StyleRegistry) -> Self {
        let defaults = registry.default_rectangle_extra();
        Self {
            is_fill_enabled: extra.is_fill_enabled,
            user_selected_fill_style: registry.fill_style_or(
                &extra.user_selected_fill_style_id,
                &defaults.user_selected_fill_style,
            ),
            is_border_enabled: extra.is_border_enabled,
            user_selected_border_style: registry.stroke_style_or(
                &extra.user_selected_border_style_id,
                &defaults.user_selected_border_style,
            ),
            dash_pattern: extra.dash_pattern.parse().unwrap_or_default(),
            corner: extra.corner.parse().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineExtra {
    pub is_stroke_enabled: bool,
    pub user_selected_stroke_style: StrokeStyle,
    pub is_start_anchor_enabled: bool,
    pub user_selected_start_anchor: AnchorChar,
    pub is_end_anchor_enabled: bool,
    pub user_selected_end_anchor: AnchorChar,
    pub dash_pattern: DashPattern,
    pub is_rounded_corner: bool,
}

impl LineExtra {
    pub fn stroke_style(&self, registry: &StyleRegistry) -> Option<StrokeStyle> {
        if !self.is_stroke_enabled {
            return None;
        }
        Some(if self.is_rounded_corner {
            registry.rounded_stroke_style(&self.user_selected_stroke_style)
        } else {
            self.user_selected_stroke_style.clone()
        })
    }

    pub fn start_anchor(&self) -> Option<&AnchorChar> {
        self.is_start_anchor_enabled
            .then_some(&self.user_selected_start_anchor)
    }

    pub fn end_anchor(&self) -> Option<&AnchorChar> {
        self.is_end_anchor_enabled.then_some(&self.user_selected_end_anchor)
    }

    pub fn to_serializable(&self) -> SerializableLineExtra {
        SerializableLineExtra {
            is_stroke_enabled: self.is_stroke_enabled,
            user_selected_stroke_style_id: self.user_selected_stroke_style.id.clone(),
            is_start_anchor_enabled: self.is_start_anchor_enabled,
            user_selected_start_anchor_id: self.user_selected_start_anchor.id.clone(),
            is_end_anchor_enabled: self.is_end_anchor_enabled,
            user_selected_end_anchor_id: self.user_selected_end_anchor.id.clone(),
            dash_pattern: self.dash_pattern.to_string(),
            is_rounded_corner: self.is_rounded_corner,
        }
    }

    pub fn from_serializable(extra: &SerializableLineExtra, registry: &StyleRegistry) -> Self {
        let defaults = registry.default_line_extra();
        Self {
            is_stroke_enabled: extra.is_stroke_enabled,
            user_selected_stroke_style: registry.stroke_style_or(
                &extra.user_selected_stroke_style_id,
                &defaults.user_selected_stroke_style,
            ),
            is_start_anchor_enabled: extra.is_start_anchor_enabled,
            user_selected_start_anchor: registry.anchor_char_or(
                &extra.user_selected_start_anchor_id,
                &defaults.user_selected_start_anchor,
            ),
            is_end_anchor_enabled: extra.is_end_anchor_enabled,
            user_selected_end_anchor: registry.anchor_char_or(
                &extra.user_selected_end_anchor_id,
                &defaults.user_selected_end_anchor,
            ),
            dash_pattern: extra.dash_pattern.parse().unwrap_or_default(),
            is_rounded_corner: extra.is_rounded_corner,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextExtra {
    pub bound_extra: RectangleExtra,
    pub text_align: TextAlign,
}

impl TextExtra {
    /// Plain text: no fill, no border, anchored top-left
    pub fn no_bound(registry: &StyleRegistry) -> Self {
        let mut bound_extra = registry.default_rectangle_extra();
        bound_extra.is_fill_enabled = false;
        bound_extra.is_border_enabled = false;
        Self {
            bound_extra,
            text_align: TextAlign::new(HorizontalAlign::Left, VerticalAlign::Top),
        }
    }

    pub fn has_border(&self) -> bool {
        self.bound_extra.is_border_enabled
    }

    pub fn to_serializable(&self) -> SerializableTextExtra {
        let (horizontal, vertical) = self.text_align.to_indexes();
        SerializableTextExtra {
            bound_extra: self.bound_extra.to_serializable(),
            text_horizontal_align: horizontal,
            text_vertical_align: vertical,
        }
    }

    pub fn from_serializable(extra: &SerializableTextExtra, registry: &StyleRegistry) -> Self {
        Self {
            bound_extra: RectangleExtra::from_serializable(&extra.bound_extra, registry),
            text_align: TextAlign::from_indexes(
                extra.text_horizontal_align,
                extra.text_vertical_align,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_style_survives_round_trip() {
        let registry = StyleRegistry::predefined();
        let mut extra = registry.default_rectangle_extra();
        extra.is_border_enabled = false;
        extra.user_selected_border_style = registry.stroke_style("S3").unwrap().clone();

        let restored = RectangleExtra::from_serializable(&extra.to_serializable(), &registry);
        assert_eq!(restored, extra);
        assert!(restored.border_style(&registry).is_none());
        assert_eq!(restored.user_selected_border_style.id, "S3");
    }

    #[test]
    fn test_unknown_ids_use_defaults() {
        let registry = StyleRegistry::predefined();
        let mut serialized = registry.default_line_extra().to_serializable();
        serialized.user_selected_stroke_style_id = "S99".to_string();
        serialized.user_selected_end_anchor_id = "nope".to_string();

        let extra = LineExtra::from_serializable(&serialized, &registry);
        assert_eq!(extra.user_selected_stroke_style.id, "S1");
        assert_eq!(extra.user_selected_end_anchor.id, "A1");
    }

    #[test]
    fn test_rounded_border_uses_variant() {
        let registry = StyleRegistry::predefined();
        let mut extra = registry.default_rectangle_extra();
        extra.corner = CornerPattern::ENABLED;
        let style = extra.border_style(&registry).unwrap();
        assert_eq!(style.up_right, '╭');
    }

    #[test]
    fn test_text_no_bound() {
        let registry = StyleRegistry::predefined();
        let extra = TextExtra::no_bound(&registry);
        assert!(!extra.has_border());
        assert!(extra.bound_extra.fill_style().is_none());
        assert_eq!(extra.text_align.horizontal, HorizontalAlign::Left);
    }
}
