//! Style primitives: fill, stroke, anchor glyphs, dash and corner patterns

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Result, ShapeModelError};

/// A cell with nothing drawn
pub const TRANSPARENT_CHAR: char = '\0';

/// Invisible on the board but still counts as occupied for hit-testing
pub const HALF_TRANSPARENT_CHAR: char = '\u{1}';

/// Character used to flood a rectangle's area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillStyle {
    pub id: String,
    pub display_name: String,
    pub fill_char: char,
}

impl FillStyle {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, fill_char: char) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            fill_char,
        }
    }
}

/// Glyph set for straight strokes and right-angle corners.
///
/// Corner names follow the direction the stroke turns into: `down_left` is the
/// top-right corner of a box, `up_right` the top-left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub id: String,
    pub display_name: String,
    pub horizontal: char,
    pub vertical: char,
    pub down_left: char,
    pub up_right: char,
    pub up_left: char,
    pub down_right: char,
}

impl StrokeStyle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        horizontal: char,
        vertical: char,
        down_left: char,
        up_right: char,
        up_left: char,
        down_right: char,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            horizontal,
            vertical,
            down_left,
            up_right,
            up_left,
            down_right,
        }
    }

    pub fn uniform(id: impl Into<String>, display_name: impl Into<String>, c: char) -> Self {
        Self::new(id, display_name, c, c, c, c, c, c)
    }
}

/// End glyphs for line anchors, chosen by the direction the line arrives from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorChar {
    pub id: String,
    pub display_name: String,
    pub left: char,
    pub right: char,
    pub top: char,
    pub bottom: char,
}

impl AnchorChar {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        left: char,
        right: char,
        top: char,
        bottom: char,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn single(id: impl Into<String>, display_name: impl Into<String>, c: char) -> Self {
        Self::new(id, display_name, c, c, c, c)
    }
}

// ============================================================================
// Dash pattern
// ============================================================================

/// `dash` solid cells followed by `gap` blank cells, shifted by `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DashPattern {
    pub dash: i32,
    pub gap: i32,
    pub offset: i32,
}

impl DashPattern {
    pub const SOLID: DashPattern = DashPattern {
        dash: 1,
        gap: 0,
        offset: 0,
    };

    pub fn new(dash: i32, gap: i32, offset: i32) -> Self {
        Self { dash, gap, offset }
    }

    /// Whether the cell at stroke index `index` falls in a gap
    pub fn is_gap(&self, index: usize) -> bool {
        let segment = self.dash.max(1) as i64;
        let gap = self.gap.max(0) as i64;
        if gap == 0 {
            return false;
        }
        let total = segment + gap;
        let offset = (self.offset as i64).rem_euclid(total);
        (index as i64 + offset) % total >= segment
    }
}

impl Default for DashPattern {
    fn default() -> Self {
        Self::SOLID
    }
}

impl fmt::Display for DashPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.dash, self.gap, self.offset)
    }
}

impl FromStr for DashPattern {
    type Err = ShapeModelError;

    /// Missing or unparsable parts fall back to the solid values
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('|').map(|p| p.trim().parse::<i32>().ok());
        let dash = parts.next().flatten().filter(|v| *v != 0).unwrap_or(1);
        let gap = parts.next().flatten().unwrap_or(0);
        let offset = parts.next().flatten().unwrap_or(0);
        Ok(Self::new(dash, gap, offset))
    }
}

// ============================================================================
// Corner pattern
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CornerPattern {
    pub left_top_rounded: bool,
    pub left_bottom_rounded: bool,
    pub right_top_rounded: bool,
    pub right_bottom_rounded: bool,
}

impl CornerPattern {
    pub const DISABLED: CornerPattern = CornerPattern {
        left_top_rounded: false,
        left_bottom_rounded: false,
        right_top_rounded: false,
        right_bottom_rounded: false,
    };

    pub const ENABLED: CornerPattern = CornerPattern {
        left_top_rounded: true,
        left_bottom_rounded: true,
        right_top_rounded: true,
        right_bottom_rounded: true,
    };

    pub fn from_rounded(rounded: bool) -> Self {
        if rounded {
            Self::ENABLED
        } else {
            Self::DISABLED
        }
    }

    pub fn is_rounded(&self) -> bool {
        *self == Self::ENABLED
    }
}

impl fmt::Display for CornerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in [
            self.left_top_rounded,
            self.left_bottom_rounded,
            self.right_top_rounded,
            self.right_bottom_rounded,
        ] {
            f.write_str(if flag { "Y" } else { "N" })?;
        }
        Ok(())
    }
}

impl FromStr for CornerPattern {
    type Err = ShapeModelError;

    fn from_str(s: &str) -> Result<Self> {
        let flags: Vec<bool> = s.chars().map(|c| c == 'Y').collect();
        let at = |i: usize| flags.get(i).copied().unwrap_or(false);
        Ok(Self {
            left_top_rounded: at(0),
            left_bottom_rounded: at(1),
            right_top_rounded: at(2),
            right_bottom_rounded: at(3),
        })
    }
}

// ============================================================================
// Text alignment
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextAlign {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl TextAlign {
    pub fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Build from persisted indexes; out-of-range values use the default
    pub fn from_indexes(horizontal: u8, vertical: u8) -> Self {
        let horizontal = match horizontal {
            0 => HorizontalAlign::Left,
            2 => HorizontalAlign::Right,
            _ => HorizontalAlign::Middle,
        };
        let vertical = match vertical {
            0 => VerticalAlign::Top,
            2 => VerticalAlign::Bottom,
            _ => VerticalAlign::Middle,
        };
        Self::new(horizontal, vertical)
    }

    pub fn to_indexes(&self) -> (u8, u8) {
        let h = match self.horizontal {
            HorizontalAlign::Left => 0,
            HorizontalAlign::Middle => 1,
            HorizontalAlign::Right => 2,
        };
        let v = match self.vertical {
            VerticalAlign::Top => 0,
            VerticalAlign::Middle => 1,
            VerticalAlign::Bottom => 2,
        };
        (h, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_solid_has_no_gap() {
        assert!((0..20).all(|i| !DashPattern::SOLID.is_gap(i)));
    }

    #[test]
    fn test_dash_gap_offset() {
        let pattern = DashPattern::new(2, 1, 0);
        let gaps: Vec<bool> = (0..6).map(|i| pattern.is_gap(i)).collect();
        assert_eq!(gaps, vec![false, false, true, false, false, true]);

        let shifted = DashPattern::new(2, 1, -1);
        assert!(shifted.is_gap(0));
        assert!(!shifted.is_gap(1));
    }

    #[test]
    fn test_dash_parse_defaults() {
        assert_eq!("".parse::<DashPattern>().unwrap(), DashPattern::SOLID);
        assert_eq!("3|x".parse::<DashPattern>().unwrap(), DashPattern::new(3, 0, 0));
        assert_eq!("2|1|5".parse::<DashPattern>().unwrap().to_string(), "2|1|5");
    }

    #[test]
    fn test_corner_pattern_string() {
        assert_eq!(CornerPattern::ENABLED.to_string(), "YYYY");
        assert_eq!("NNNN".parse::<CornerPattern>().unwrap(), CornerPattern::DISABLED);
        assert!("YYYY".parse::<CornerPattern>().unwrap().is_rounded());
    }

    #[test]
    fn test_text_align_indexes() {
        let align = TextAlign::from_indexes(0, 2);
        assert_eq!(align, TextAlign::new(HorizontalAlign::Left, VerticalAlign::Bottom));
        assert_eq!(align.to_indexes(), (0, 2));
        assert_eq!(TextAlign::from_indexes(9, 9), TextAlign::default());
    }

    proptest! {
        #[test]
        fn prop_dash_is_periodic(dash in 0i32..6, gap in 0i32..6, offset in -10i32..10, i in 0usize..50) {
            let pattern = DashPattern::new(dash, gap, offset);
            let period = (dash.max(1) + gap.max(0)) as usize;
            prop_assert_eq!(pattern.is_gap(i), pattern.is_gap(i + period));
        }
    }
}
