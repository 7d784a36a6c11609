//! Style registry
//!
//! Named style tables looked up by string id. A registry is constructed and
//! handed to whatever needs it; tests can build their own with
//! [`StyleRegistry::new`] and the `register_*` methods.

use crate::{
    AnchorChar, CornerPattern, DashPattern, FillStyle, LineExtra, RectangleExtra, StrokeStyle,
    TextAlign, TextExtra, HALF_TRANSPARENT_CHAR, TRANSPARENT_CHAR,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct StyleRegistry {
    no_fill: FillStyle,
    fill_styles: Vec<FillStyle>,
    no_stroke: StrokeStyle,
    stroke_styles: Vec<StrokeStyle>,
    selectable_stroke_ids: Vec<String>,
    rounded_variants: HashMap<String, String>,
    anchor_chars: Vec<AnchorChar>,
}

impl StyleRegistry {
    /// An empty registry with only the "nothing" styles
    pub fn new(no_fill: FillStyle, no_stroke: StrokeStyle) -> Self {
        Self {
            no_fill,
            fill_styles: Vec::new(),
            no_stroke,
            stroke_styles: Vec::new(),
            selectable_stroke_ids: Vec::new(),
            rounded_variants: HashMap::new(),
            anchor_chars: Vec::new(),
        }
    }

    /// The built-in style tables
    pub fn predefined() -> Self {
        let mut registry = Self::new(
            FillStyle::new("F0", "No Fill", TRANSPARENT_CHAR),
            StrokeStyle::uniform("S0", "No Stroke", HALF_TRANSPARENT_CHAR),
        );

        for (id, c) in [("F1", ' '), ("F2", '█'), ("F3", '▒'), ("F4", '░'), ("F5", '▚')] {
            let name = if c == ' ' { "\u{a0}".to_string() } else { c.to_string() };
            registry.register_fill_style(FillStyle::new(id, name, c));
        }

        registry.register_stroke_style(StrokeStyle::new("S1", "─", '─', '│', '┐', '┌', '┘', '└'), true);
        registry.register_stroke_style(StrokeStyle::new("S2", "━", '━', '┃', '┓', '┏', '┛', '┗'), true);
        registry.register_stroke_style(StrokeStyle::new("S3", "═", '═', '║', '╗', '╔', '╝', '╚'), true);
        registry.register_stroke_style(StrokeStyle::new("S4", "▢", '─', '│', '╮', '╭', '╯', '╰'), false);
        registry.register_rounded_variant("S1", "S4");

        for anchor in [
            AnchorChar::new("A1", "▶", '◀', '▶', '▲', '▼'),
            AnchorChar::new("A12", "▷", '◁', '▷', '△', '▽'),
            AnchorChar::new("A13", "►", '◄', '►', '▲', '▼'),
            AnchorChar::new("A14", "▻", '◅', '▻', '△', '▽'),
            AnchorChar::single("A2", "■", '■'),
            AnchorChar::single("A21", "□", '□'),
            AnchorChar::single("A220", "◆", '◆'),
            AnchorChar::single("A221", "◇", '◇'),
            AnchorChar::single("A3", "○", '○'),
            AnchorChar::single("A4", "◎", '◎'),
            AnchorChar::single("A5", "●", '●'),
            AnchorChar::new("A6", "├", '├', '┤', '┬', '┴'),
            AnchorChar::new("A61", "┣", '┣', '┫', '┳', '┻'),
            AnchorChar::new("A62", "╠", '╠', '╣', '╦', '╩'),
        ] {
            registry.register_anchor_char(anchor);
        }
        registry
    }

    pub fn register_fill_style(&mut self, style: FillStyle) {
        self.fill_styles.retain(|s| s.id != style.id);
        self.fill_styles.push(style);
    }

    /// `selectable` styles are offered to the user; the rest are only reachable
    /// as rounded variants or by id
    pub fn register_stroke_style(&mut self, style: StrokeStyle, selectable: bool) {
        self.stroke_styles.retain(|s| s.id != style.id);
        self.selectable_stroke_ids.retain(|id| *id != style.id);
        if selectable {
            self.selectable_stroke_ids.push(style.id.clone());
        }
        self.stroke_styles.push(style);
    }

    pub fn register_rounded_variant(&mut self, style_id: &str, rounded_id: &str) {
        self.rounded_variants
            .insert(style_id.to_string(), rounded_id.to_string());
    }

    pub fn register_anchor_char(&mut self, anchor: AnchorChar) {
        self.anchor_chars.retain(|a| a.id != anchor.id);
        self.anchor_chars.push(anchor);
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    pub fn no_fill(&self) -> &FillStyle {
        &self.no_fill
    }

    pub fn no_stroke(&self) -> &StrokeStyle {
        &self.no_stroke
    }

    pub fn fill_style(&self, id: &str) -> Option<&FillStyle> {
        if id == self.no_fill.id {
            return Some(&self.no_fill);
        }
        self.fill_styles.iter().find(|s| s.id == id)
    }

    pub fn fill_style_or(&self, id: &str, default: &FillStyle) -> FillStyle {
        self.fill_style(id)
            .unwrap_or_else(|| {
                tracing::debug!(id, fallback = %default.id, "unknown fill style");
                default
            })
            .clone()
    }

    pub fn stroke_style(&self, id: &str) -> Option<&StrokeStyle> {
        if id == self.no_stroke.id {
            return Some(&self.no_stroke);
        }
        self.stroke_styles.iter().find(|s| s.id == id)
    }

    pub fn stroke_style_or(&self, id: &str, default: &StrokeStyle) -> StrokeStyle {
        self.stroke_style(id)
            .unwrap_or_else(|| {
                tracing::debug!(id, fallback = %default.id, "unknown stroke style");
                default
            })
            .clone()
    }

    /// The rounded-corner variant of `style`, or `style` itself when it has none
    pub fn rounded_stroke_style(&self, style: &StrokeStyle) -> StrokeStyle {
        self.rounded_variants
            .get(&style.id)
            .and_then(|id| self.stroke_style(id))
            .unwrap_or(style)
            .clone()
    }

    pub fn is_corner_roundable(&self, style_id: &str) -> bool {
        self.rounded_variants.contains_key(style_id)
    }

    pub fn anchor_char(&self, id: &str) -> Option<&AnchorChar> {
        self.anchor_chars.iter().find(|a| a.id == id)
    }

    pub fn anchor_char_or(&self, id: &str, default: &AnchorChar) -> AnchorChar {
        self.anchor_char(id)
            .unwrap_or_else(|| {
                tracing::debug!(id, fallback = %default.id, "unknown anchor char");
                default
            })
            .clone()
    }

    pub fn fill_styles(&self) -> &[FillStyle] {
        &self.fill_styles
    }

    pub fn selectable_stroke_styles(&self) -> Vec<&StrokeStyle> {
        self.selectable_stroke_ids
            .iter()
            .filter_map(|id| self.stroke_style(id))
            .collect()
    }

    pub fn anchor_chars(&self) -> &[AnchorChar] {
        &self.anchor_chars
    }

    // ------------------------------------------------------------------------
    // Initial extras
    // ------------------------------------------------------------------------

    /// Fill off, border on, solid, square corners
    pub fn default_rectangle_extra(&self) -> RectangleExtra {
        RectangleExtra {
            is_fill_enabled: false,
            user_selected_fill_style: self.first_fill(),
            is_border_enabled: true,
            user_selected_border_style: self.first_stroke(),
            dash_pattern: DashPattern::SOLID,
            corner: CornerPattern::DISABLED,
        }
    }

    /// Stroke on, no anchor glyphs, solid
    pub fn default_line_extra(&self) -> LineExtra {
        let anchor = self
            .anchor_chars
            .first()
            .cloned()
            .unwrap_or_else(|| AnchorChar::single("", "", TRANSPARENT_CHAR));
        LineExtra {
            is_stroke_enabled: true,
            user_selected_stroke_style: self.first_stroke(),
            is_start_anchor_enabled: false,
            user_selected_start_anchor: anchor.clone(),
            is_end_anchor_enabled: false,
            user_selected_end_anchor: anchor,
            dash_pattern: DashPattern::SOLID,
            is_rounded_corner: false,
        }
    }

    pub fn default_text_extra(&self) -> TextExtra {
        TextExtra {
            bound_extra: self.default_rectangle_extra(),
            text_align: TextAlign::default(),
        }
    }

    fn first_fill(&self) -> FillStyle {
        self.fill_styles
            .first()
            .unwrap_or(&self.no_fill)
            .clone()
    }

    fn first_stroke(&self) -> StrokeStyle {
        self.selectable_stroke_styles()
            .first()
            .copied()
            .unwrap_or(&self.no_stroke)
            .clone()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::predefined()
    }
}

/// Styles applied to newly created shapes; the user can change them at runtime
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDefaults {
    pub rectangle: RectangleExtra,
    pub line: LineExtra,
    pub text_align: TextAlign,
}

impl ShapeDefaults {
    pub fn from_registry(registry: &StyleRegistry) -> Self {
        Self {
            rectangle: registry.default_rectangle_extra(),
            line: registry.default_line_extra(),
            text_align: TextAlign::default(),
        }
    }

    pub fn text(&self) -> TextExtra {
        TextExtra {
            bound_extra: self.rectangle.clone(),
            text_align: self.text_align,
        }
    }

    /// Replace the rectangle border style by id; unknown ids are ignored
    pub fn set_border_style(&mut self, registry: &StyleRegistry, style_id: &str) {
        if let Some(style) = registry.stroke_style(style_id) {
            self.rectangle.user_selected_border_style = style.clone();
        }
    }

    pub fn set_line_stroke_style(&mut self, registry: &StyleRegistry, style_id: &str) {
        if let Some(style) = registry.stroke_style(style_id) {
            self.line.user_selected_stroke_style = style.clone();
        }
    }
}
