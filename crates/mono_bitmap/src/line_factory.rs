//! Line rasterization
//!
//! The polyline is walked as: first anchor, then each segment's interior
//! cells followed by the joint glyph, then the last segment and the last
//! anchor. The dash pattern is indexed along that walk.

use crate::{BitmapBuilder, MonoBitmap, PointChar};
use shape_model::{is_horizontal, AnchorChar, LineExtra, Point, Rect, StrokeStyle, StyleRegistry, TRANSPARENT_CHAR};

/// Rasterize a line from its (reduced) joint points. The grid's origin is the
/// top-left of the points' bounding box.
pub fn line_bitmap(joint_points: &[Point], extra: &LineExtra, registry: &StyleRegistry) -> MonoBitmap {
    let Some(bound) = Rect::bounding(joint_points) else {
        return MonoBitmap::empty();
    };
    let mut canvas = OffsetBuilder::new(bound);

    let stroke = extra
        .stroke_style(registry)
        .unwrap_or_else(|| registry.no_stroke().clone());
    for (index, point) in char_points(joint_points, &stroke).into_iter().enumerate() {
        let visual = if extra.dash_pattern.is_gap(index) { ' ' } else { point.char };
        canvas.put(point.left, point.top, visual, point.char);
    }

    if joint_points.len() >= 2 {
        let last = joint_points.len() - 1;
        if let Some(anchor) = extra.start_anchor() {
            canvas.put_anchor(joint_points[0], joint_points[1], anchor);
        }
        if let Some(anchor) = extra.end_anchor() {
            canvas.put_anchor(joint_points[last], joint_points[last - 1], anchor);
        }
    }
    canvas.builder.build()
}

fn char_points(points: &[Point], stroke: &StrokeStyle) -> Vec<PointChar> {
    if points.len() < 2 {
        return Vec::new();
    }
    let segments: Vec<(Point, Point)> = points.windows(2).map(|w| (w[0], w[1])).collect();
    let mut result = Vec::new();

    let (first_start, first_end) = segments[0];
    result.push(straight_char(first_start, first_end, stroke));

    for pair in segments.windows(2) {
        let (p0, p1) = pair[0];
        let (_, p2) = pair[1];
        result.extend(segment_chars(p0, p1, stroke));
        result.push(PointChar::new(p1.left, p1.top, joint_char(stroke, p0, p1, p2)));
    }

    if let Some(&(last_start, last_end)) = segments.last() {
        result.extend(segment_chars(last_start, last_end, stroke));
        result.push(straight_char(last_end, last_start, stroke));
    }
    result
}

fn segment_chars(p0: Point, p1: Point, stroke: &StrokeStyle) -> Vec<PointChar> {
    if is_horizontal(p0, p1) {
        PointChar::horizontal_line(p0.left, p1.left, p0.top, stroke.horizontal)
    } else {
        PointChar::vertical_line(p0.left, p0.top, p1.top, stroke.vertical)
    }
}

fn straight_char(p0: Point, p1: Point, stroke: &StrokeStyle) -> PointChar {
    let c = if is_horizontal(p0, p1) { stroke.horizontal } else { stroke.vertical };
    PointChar::new(p0.left, p0.top, c)
}

/// Glyph at `p1`, where the path turns from `p0` toward `p2`
fn joint_char(stroke: &StrokeStyle, p0: Point, p1: Point, p2: Point) -> char {
    let incoming_horizontal = is_horizontal(p0, p1);
    let outgoing_horizontal = is_horizontal(p1, p2);
    if incoming_horizontal == outgoing_horizontal {
        return if incoming_horizontal { stroke.horizontal } else { stroke.vertical };
    }

    let is_left = p0.left < p1.left || p2.left < p1.left;
    let is_upper = p0.top < p1.top || p2.top < p1.top;
    match (is_left, is_upper) {
        (true, true) => stroke.up_left,
        (true, false) => stroke.down_left,
        (false, true) => stroke.down_right,
        (false, false) => stroke.up_right,
    }
}

/// Builder addressed in board coordinates
struct OffsetBuilder {
    origin: Point,
    builder: BitmapBuilder,
}

impl OffsetBuilder {
    fn new(bound: Rect) -> Self {
        Self {
            origin: bound.position,
            builder: BitmapBuilder::new(bound.width(), bound.height()),
        }
    }

    fn put(&mut self, left: i32, top: i32, visual: char, direction: char) {
        self.builder
            .put(top - self.origin.top, left - self.origin.left, visual, direction);
    }

    fn put_anchor(&mut self, anchor: Point, previous: Point, anchor_char: &AnchorChar) {
        let c = if is_horizontal(anchor, previous) {
            if anchor.left < previous.left {
                anchor_char.left
            } else {
                anchor_char.right
            }
        } else if anchor.top < previous.top {
            anchor_char.top
        } else {
            anchor_char.bottom
        };
        self.put(anchor.left, anchor.top, c, TRANSPARENT_CHAR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_model::{create_joint_points, reduce_joint_points, DashPattern, DirectedPoint};

    fn extra_with_anchors(registry: &StyleRegistry) -> LineExtra {
        let mut extra = registry.default_line_extra();
        extra.is_start_anchor_enabled = true;
        extra.user_selected_start_anchor = AnchorChar::single("T0", "0", '0');
        extra.is_end_anchor_enabled = true;
        extra.user_selected_end_anchor = AnchorChar::single("T1", "1", '1');
        extra
    }

    fn pts(list: &[(i32, i32)]) -> Vec<Point> {
        list.iter().map(|(l, t)| Point::new(*l, *t)).collect()
    }

    #[test]
    fn test_straight_line_with_anchors() {
        let registry = StyleRegistry::predefined();
        let bitmap = line_bitmap(&pts(&[(2, 0), (6, 0)]), &extra_with_anchors(&registry), &registry);
        assert_eq!(bitmap.to_string(), "0───1");
    }

    #[test]
    fn test_corner_glyphs() {
        let registry = StyleRegistry::predefined();
        let extra = registry.default_line_extra();
        let points = pts(&[(0, 0), (3, 0), (3, 2), (6, 2)]);
        assert_eq!(line_bitmap(&points, &extra, &registry).to_string(), "───┐   \n   │   \n   └───");

        let up = pts(&[(0, 2), (0, 0), (3, 0)]);
        assert_eq!(line_bitmap(&up, &extra, &registry).to_string(), "┌───\n│   \n│   ");
    }

    #[test]
    fn test_anchor_glyph_follows_arrival_direction() {
        let registry = StyleRegistry::predefined();
        let mut extra = registry.default_line_extra();
        extra.is_end_anchor_enabled = true;
        extra.user_selected_end_anchor = registry.anchor_char("A1").unwrap().clone();

        let down = line_bitmap(&pts(&[(0, 0), (0, 2)]), &extra, &registry);
        assert_eq!(down.to_string(), "│\n│\n▼");
        let left = line_bitmap(&pts(&[(3, 0), (0, 0)]), &extra, &registry);
        assert_eq!(left.to_string(), "◀───");
        assert_eq!(left.direction(0, 0), '─');
    }

    #[test]
    fn test_dash_and_rounded() {
        let registry = StyleRegistry::predefined();
        let mut extra = registry.default_line_extra();
        extra.dash_pattern = DashPattern::new(2, 1, 0);
        let dashed = line_bitmap(&pts(&[(0, 0), (5, 0)]), &extra, &registry);
        assert_eq!(dashed.to_string(), "── ── ");

        let mut rounded = registry.default_line_extra();
        rounded.is_rounded_corner = true;
        let bitmap = line_bitmap(&pts(&[(0, 0), (2, 0), (2, 1)]), &rounded, &registry);
        assert_eq!(bitmap.to_string(), "──╮\n  │");
    }

    #[test]
    fn test_disabled_stroke_is_half_transparent() {
        let registry = StyleRegistry::predefined();
        let mut extra = registry.default_line_extra();
        extra.is_stroke_enabled = false;
        let bitmap = line_bitmap(&pts(&[(0, 0), (3, 0)]), &extra, &registry);
        assert_eq!(bitmap.to_string(), "    ");
        assert!(bitmap.is_occupied(0, 2));
    }

    #[test]
    fn test_routed_line_every_point_is_drawn() {
        let registry = StyleRegistry::predefined();
        let points = reduce_joint_points(&create_joint_points(
            DirectedPoint::horizontal(0, 0),
            DirectedPoint::vertical(6, 4),
        ));
        let bitmap = line_bitmap(&points, &registry.default_line_extra(), &registry);
        let bound = Rect::bounding(&points).unwrap();
        for point in &points {
            assert!(bitmap.is_occupied(point.top - bound.top(), point.left - bound.left()));
        }
    }
}
