//! Text rasterization: wrapped rows over an optional box background

use crate::{rectangle_bitmap, BitmapBuilder, MonoBitmap};
use shape_model::{HorizontalAlign, Size, StyleRegistry, TextExtra, VerticalAlign};

/// Rasterize a text shape. While editing, the glyphs are left to the editor
/// and a 1×1 box draws nothing.
pub fn text_bitmap(
    size: Size,
    renderable_text: &[String],
    extra: &TextExtra,
    is_text_editing: bool,
    registry: &StyleRegistry,
) -> MonoBitmap {
    let mut builder = BitmapBuilder::new(size.width, size.height);
    if !(size.width == 1 && size.height == 1 && is_text_editing) {
        let background = rectangle_bitmap(size, &extra.bound_extra, registry);
        builder.fill(0, 0, &background);
    }

    let rows: &[String] = if is_text_editing { &[] } else { renderable_text };
    fill_text(&mut builder, rows, size, extra);
    builder.build()
}

fn fill_text(builder: &mut BitmapBuilder, rows: &[String], size: Size, extra: &TextExtra) {
    let offset = i32::from(extra.has_border());
    let max_width = size.width - offset * 2;
    let max_height = (size.height - offset * 2).max(0);

    let row_count = rows.len() as i32;
    let row0 = match extra.text_align.vertical {
        VerticalAlign::Top => offset,
        _ if row_count > max_height => offset,
        VerticalAlign::Middle => (max_height - row_count).div_euclid(2) + offset,
        VerticalAlign::Bottom => max_height - row_count + offset,
    };

    for (row_index, row) in rows.iter().take(max_height as usize).enumerate() {
        let length = row.chars().count() as i32;
        let col0 = match extra.text_align.horizontal {
            HorizontalAlign::Left => offset,
            HorizontalAlign::Middle => (max_width - length).div_euclid(2) + offset,
            HorizontalAlign::Right => max_width - length + offset,
        };
        for (col_index, c) in row.chars().enumerate() {
            if c != ' ' {
                builder.put(row0 + row_index as i32, col0 + col_index as i32, c, c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_model::{wrap_text, TextAlign};

    #[test]
    fn test_wrapped_text_in_bordered_box() {
        let registry = StyleRegistry::predefined();
        let extra = registry.default_text_extra();
        let rows = wrap_text("012345678\nabc", 5);
        let bitmap = text_bitmap(Size::new(7, 5), &rows, &extra, false, &registry);
        assert_eq!(
            bitmap.to_string(),
            "┌─────┐\n│01234│\n│5678 │\n│ abc │\n└─────┘"
        );
    }

    #[test]
    fn test_alignment() {
        let registry = StyleRegistry::predefined();
        let mut extra = TextExtra::no_bound(&registry);
        extra.text_align = TextAlign::new(HorizontalAlign::Right, VerticalAlign::Bottom);
        let rows = vec!["ab".to_string()];
        let bitmap = text_bitmap(Size::new(4, 3), &rows, &extra, false, &registry);
        assert_eq!(bitmap.to_string(), "    \n    \n  ab");

        extra.text_align = TextAlign::new(HorizontalAlign::Middle, VerticalAlign::Middle);
        let bitmap = text_bitmap(Size::new(4, 3), &rows, &extra, false, &registry);
        assert_eq!(bitmap.to_string(), "    \n ab \n    ");
    }

    #[test]
    fn test_overflow_falls_back_to_top() {
        let registry = StyleRegistry::predefined();
        let mut extra = TextExtra::no_bound(&registry);
        extra.text_align = TextAlign::new(HorizontalAlign::Left, VerticalAlign::Bottom);
        let rows: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let bitmap = text_bitmap(Size::new(1, 2), &rows, &extra, false, &registry);
        assert_eq!(bitmap.to_string(), "a\nb");
    }

    #[test]
    fn test_editing_hides_text() {
        let registry = StyleRegistry::predefined();
        let extra = registry.default_text_extra();
        let rows = vec!["hi".to_string()];
        let bitmap = text_bitmap(Size::new(4, 3), &rows, &extra, true, &registry);
        assert_eq!(bitmap.to_string(), "┌──┐\n│  │\n└──┘");

        let tiny = text_bitmap(Size::new(1, 1), &rows, &extra, true, &registry);
        assert_eq!(tiny.occupied_cells().count(), 0);
    }
}
