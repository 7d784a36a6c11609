//! Rectangle rasterization

use crate::{BitmapBuilder, MonoBitmap, PointChar};
use shape_model::{DashPattern, RectangleExtra, Size, StrokeStyle, StyleRegistry};

/// Glyph used for a 1×1 border
pub const SINGLE_CELL_CHAR: char = '▫';

/// Rasterize a rectangle of `size`.
///
/// With neither fill nor border the outline is still drawn with the
/// half-transparent "no stroke" glyphs so the shape stays selectable.
pub fn rectangle_bitmap(size: Size, extra: &RectangleExtra, registry: &StyleRegistry) -> MonoBitmap {
    let mut builder = BitmapBuilder::new(size.width, size.height);
    let fill = extra.fill_style();
    let stroke = extra.border_style(registry);

    match (fill, stroke) {
        (None, None) => {
            draw_border(&mut builder, size, registry.no_stroke(), &extra.dash_pattern);
        }
        (fill, stroke) => {
            if let Some(fill) = fill {
                builder.fill_all(fill.fill_char);
            }
            let is_stroke_allowed = fill.is_none() || (size.width > 1 && size.height > 1);
            if let Some(stroke) = stroke.filter(|_| is_stroke_allowed) {
                draw_border(&mut builder, size, &stroke, &extra.dash_pattern);
            }
        }
    }
    builder.build()
}

fn draw_border(builder: &mut BitmapBuilder, size: Size, stroke: &StrokeStyle, dash: &DashPattern) {
    if size.width == 1 && size.height == 1 {
        builder.put(0, 0, SINGLE_CELL_CHAR, SINGLE_CELL_CHAR);
        return;
    }
    // A strip one cell thick has no border.
    if size.width <= 1 || size.height <= 1 {
        return;
    }

    let (left, top) = (0, 0);
    let right = size.width - 1;
    let bottom = size.height - 1;
    let parts = [
        PointChar::point(left, top, stroke.up_right),
        PointChar::horizontal_line(left, right, top, stroke.horizontal),
        PointChar::point(right, top, stroke.down_left),
        PointChar::vertical_line(right, top, bottom, stroke.vertical),
        PointChar::point(right, bottom, stroke.up_left),
        PointChar::horizontal_line(right, left, bottom, stroke.horizontal),
        PointChar::point(left, bottom, stroke.down_right),
        PointChar::vertical_line(left, bottom, top, stroke.vertical),
    ];

    for (index, point) in parts.iter().flatten().enumerate() {
        let visual = if dash.is_gap(index) { ' ' } else { point.char };
        builder.put(point.top, point.left, visual, point.char);
    }
}
