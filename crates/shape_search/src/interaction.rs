//! Drag handles around the selected shapes
//!
//! Handle positions are fractional board coordinates. Hit-testing converts
//! them to canvas pixels, so the grab radius is the same at every zoom.

use serde::{Deserialize, Serialize};
use shape_model::{Edge, Line, LineAnchor, PointF, Rect, Shape, ShapeId, ShapeKind};

/// Cursor hint for the handle under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseCursor {
    Move,
    NwseResize,
    NsResize,
    NeswResize,
    EwResize,
    RowResize,
    ColResize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Grab distance in pixels, per axis
    pub handle_radius_px: f64,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            handle_radius_px: 6.0,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
        }
    }
}

// ============================================================================
// Scale handles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleHandle {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl ScaleHandle {
    pub const ALL: [ScaleHandle; 8] = [
        ScaleHandle::TopLeft,
        ScaleHandle::TopMiddle,
        ScaleHandle::TopRight,
        ScaleHandle::MiddleLeft,
        ScaleHandle::MiddleRight,
        ScaleHandle::BottomLeft,
        ScaleHandle::BottomMiddle,
        ScaleHandle::BottomRight,
    ];

    pub fn cursor(self) -> MouseCursor {
        match self {
            ScaleHandle::TopLeft | ScaleHandle::BottomRight => MouseCursor::NwseResize,
            ScaleHandle::TopMiddle | ScaleHandle::BottomMiddle => MouseCursor::NsResize,
            ScaleHandle::TopRight | ScaleHandle::BottomLeft => MouseCursor::NeswResize,
            ScaleHandle::MiddleLeft | ScaleHandle::MiddleRight => MouseCursor::EwResize,
        }
    }

    /// Bound after dragging this handle of `bound` to `point`.
    ///
    /// Leading edges snap up and trailing edges snap down, so the cursor has
    /// to travel most of a cell before the shape changes size.
    pub fn create_new_shape_bound(self, bound: Rect, point: PointF) -> Rect {
        let (l, t, r, b) = (bound.left(), bound.top(), bound.right(), bound.bottom());
        let (x, y) = (point.left, point.top);
        match self {
            ScaleHandle::TopLeft => Rect::by_ltrb(adjust_upper(x), adjust_upper(y), r, b),
            ScaleHandle::TopMiddle => Rect::by_ltrb(l, adjust_upper(y), r, b),
            ScaleHandle::TopRight => Rect::by_ltrb(l, adjust_upper(y), adjust_lower(x), b),
            ScaleHandle::MiddleLeft => Rect::by_ltrb(adjust_upper(x), t, r, b),
            ScaleHandle::MiddleRight => Rect::by_ltrb(l, t, adjust_lower(x), b),
            ScaleHandle::BottomLeft => Rect::by_ltrb(adjust_upper(x), t, r, adjust_lower(y)),
            ScaleHandle::BottomMiddle => Rect::by_ltrb(l, t, r, adjust_lower(y)),
            ScaleHandle::BottomRight => Rect::by_ltrb(l, t, adjust_lower(x), adjust_lower(y)),
        }
    }
}

fn adjust_upper(value: f64) -> i32 {
    (value + 0.8).floor() as i32
}

fn adjust_lower(value: f64) -> i32 {
    (value - 0.8).floor() as i32
}

// ============================================================================
// Interaction points
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionPoint {
    Scale {
        shape_id: ShapeId,
        handle: ScaleHandle,
        left: f64,
        top: f64,
    },
    LineAnchor {
        shape_id: ShapeId,
        anchor: LineAnchor,
        left: f64,
        top: f64,
    },
    LineEdge {
        shape_id: ShapeId,
        edge_id: u32,
        is_horizontal: bool,
        left: f64,
        top: f64,
    },
}

impl InteractionPoint {
    pub fn shape_id(&self) -> ShapeId {
        match *self {
            InteractionPoint::Scale { shape_id, .. }
            | InteractionPoint::LineAnchor { shape_id, .. }
            | InteractionPoint::LineEdge { shape_id, .. } => shape_id,
        }
    }

    pub fn position(&self) -> PointF {
        match *self {
            InteractionPoint::Scale { left, top, .. }
            | InteractionPoint::LineAnchor { left, top, .. }
            | InteractionPoint::LineEdge { left, top, .. } => PointF::new(left, top),
        }
    }

    pub fn cursor(&self) -> MouseCursor {
        match self {
            InteractionPoint::Scale { handle, .. } => handle.cursor(),
            InteractionPoint::LineAnchor { .. } => MouseCursor::Move,
            InteractionPoint::LineEdge { is_horizontal, .. } => {
                if *is_horizontal {
                    MouseCursor::RowResize
                } else {
                    MouseCursor::ColResize
                }
            }
        }
    }
}

// ============================================================================
// Interaction bounds
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionBound {
    target_id: ShapeId,
    points: Vec<InteractionPoint>,
}

impl InteractionBound {
    /// Handles for a shape; `None` for groups
    pub fn for_shape(shape: &Shape) -> Option<Self> {
        match shape.kind() {
            ShapeKind::Rectangle(r) => Some(Self::scalable(shape.id(), r.bound())),
            ShapeKind::Text(t) => Some(Self::scalable(shape.id(), t.bound())),
            ShapeKind::Line(line) => Some(Self::for_line(shape.id(), line)),
            ShapeKind::Group(_) => None,
        }
    }

    /// Eight scale handles on a bound inflated by a quarter cell
    pub fn scalable(target_id: ShapeId, bound: Rect) -> Self {
        let left = bound.left() as f64 - 0.25;
        let top = bound.top() as f64 - 0.25;
        let right = bound.right() as f64 + 1.25;
        let bottom = bound.bottom() as f64 + 1.25;
        let horizontal_middle = (left + right) / 2.0;
        let vertical_middle = (top + bottom) / 2.0;

        let points = ScaleHandle::ALL
            .iter()
            .map(|handle| {
                let (left, top) = match handle {
                    ScaleHandle::TopLeft => (left, top),
                    ScaleHandle::TopMiddle => (horizontal_middle, top),
                    ScaleHandle::TopRight => (right, top),
                    ScaleHandle::MiddleLeft => (left, vertical_middle),
                    ScaleHandle::MiddleRight => (right, vertical_middle),
                    ScaleHandle::BottomLeft => (left, bottom),
                    ScaleHandle::BottomMiddle => (horizontal_middle, bottom),
                    ScaleHandle::BottomRight => (right, bottom),
                };
                InteractionPoint::Scale {
                    shape_id: target_id,
                    handle: *handle,
                    left,
                    top,
                }
            })
            .collect();
        Self { target_id, points }
    }

    /// Anchor handles at both ends plus one handle per non-degenerate edge
    pub fn for_line(target_id: ShapeId, line: &Line) -> Self {
        let edges = line.edges();
        let mut reduced: Vec<&Edge> = edges.iter().filter(|e| e.start != e.end).collect();
        if reduced.is_empty() {
            reduced.extend(edges.first());
        }

        let mut points = Vec::with_capacity(reduced.len() + 2);
        if let (Some(first), Some(last)) = (reduced.first(), reduced.last()) {
            points.push(anchor_point(target_id, LineAnchor::Start, first));
            points.push(anchor_point(target_id, LineAnchor::End, last));
        }
        points.extend(reduced.iter().filter(|e| e.start != e.end).map(|edge| {
            InteractionPoint::LineEdge {
                shape_id: target_id,
                edge_id: edge.id,
                is_horizontal: edge.is_horizontal,
                left: edge.middle_left() + 0.5,
                top: edge.middle_top() + 0.5,
            }
        }));
        Self { target_id, points }
    }

    pub fn target_id(&self) -> ShapeId {
        self.target_id
    }

    pub fn points(&self) -> &[InteractionPoint] {
        &self.points
    }
}

/// Anchor handle nudged half a cell toward the outside of the line
fn anchor_point(shape_id: ShapeId, anchor: LineAnchor, edge: &Edge) -> InteractionPoint {
    let (point, other) = match anchor {
        LineAnchor::Start => (edge.start, edge.end),
        LineAnchor::End => (edge.end, edge.start),
    };
    let left_offset = if !edge.is_horizontal {
        0.5
    } else if point == other {
        match anchor {
            LineAnchor::Start => 0.0,
            LineAnchor::End => 1.0,
        }
    } else if point.left < other.left {
        0.0
    } else {
        1.0
    };
    let top_offset = if edge.is_horizontal {
        0.5
    } else if point.top <= other.top {
        0.0
    } else {
        1.0
    };
    InteractionPoint::LineAnchor {
        shape_id,
        anchor,
        left: point.left as f64 + left_offset,
        top: point.top as f64 + top_offset,
    }
}

// ============================================================================
// Hit-testing
// ============================================================================

/// Handle under a pointer given in canvas pixels. `board_offset_px` is the
/// pixel position of board cell (0, 0). Later bounds win, and within a bound
/// the last matching handle wins.
pub fn hit_test(
    bounds: &[InteractionBound],
    pointer_px: PointF,
    board_offset_px: PointF,
    config: &InteractionConfig,
) -> Option<InteractionPoint> {
    let to_x = |column: f64| (board_offset_px.left + config.cell_width_px * column).floor();
    let to_y = |row: f64| (board_offset_px.top + config.cell_height_px * row).floor();

    bounds.iter().rev().find_map(|bound| {
        bound
            .points
            .iter()
            .filter(|point| {
                let position = point.position();
                (to_x(position.left) - pointer_px.left).abs() < config.handle_radius_px
                    && (to_y(position.top) - pointer_px.top).abs() < config.handle_radius_px
            })
            .last()
            .copied()
    })
}
