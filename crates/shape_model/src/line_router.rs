//! Orthogonal line routing
//!
//! Pure functions turning a pair of directed anchors into a joint-point
//! polyline whose segments are all horizontal or vertical.
//!
//! Bend layouts by anchor orientation, from (0,0) to (10,10):
//!
//! | start | end | joint points                       |
//! |-------|-----|------------------------------------|
//! | H     | H   | (0,0) (5,0) (5,10) (10,10)         |
//! | H     | V   | (0,0) (10,0) (10,10)               |
//! | V     | H   | (0,0) (0,10) (10,10)               |
//! | V     | V   | (0,0) (0,5) (10,5) (10,10)         |
//!
//! Anchors sharing a row or column always connect directly.

use crate::{DirectedPoint, Direction, Point, Rect};

/// Build the joint points between two anchors, already reduced
pub fn create_joint_points(start: DirectedPoint, end: DirectedPoint) -> Vec<Point> {
    let mut anchors = Vec::with_capacity(3);
    anchors.push(start);
    if start.direction == end.direction && !is_same_row_or_column(start.point, end.point) {
        // Same orientation needs a perpendicular pivot halfway between.
        anchors.push(DirectedPoint {
            direction: start.direction.perpendicular(),
            point: Point::new(
                (start.left() + end.left()) / 2,
                (start.top() + end.top()) / 2,
            ),
        });
    }
    anchors.push(end);

    let mut points = Vec::with_capacity(5);
    points.push(start.point);
    for pair in anchors.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if !is_same_row_or_column(current.point, next.point) {
            let bend = match current.direction {
                Direction::Horizontal => Point::new(next.left(), current.top()),
                Direction::Vertical => Point::new(current.left(), next.top()),
            };
            points.push(bend);
        }
        points.push(next.point);
    }
    reduce_joint_points(&points)
}

/// Drop consecutive duplicates and collapse monotonic collinear runs to their
/// extremes. Back-tracking runs are kept as they are. The first and last points
/// never change.
pub fn reduce_joint_points(points: &[Point]) -> Vec<Point> {
    let mut distinct: Vec<Point> = Vec::with_capacity(points.len());
    for point in points {
        if distinct.last() != Some(point) {
            distinct.push(*point);
        }
    }
    if distinct.len() == 1 && points.len() > 1 {
        return vec![distinct[0], distinct[0]];
    }

    let mut reduced: Vec<Point> = Vec::with_capacity(distinct.len());
    for point in distinct {
        while reduced.len() >= 2
            && is_on_straight_line(
                reduced[reduced.len() - 2],
                reduced[reduced.len() - 1],
                point,
                true,
            )
        {
            reduced.pop();
        }
        reduced.push(point);
    }
    reduced
}

/// Whether the three points share a row or column. With `ordered` the middle
/// point must also lie between the other two.
pub fn is_on_straight_line(p1: Point, p2: Point, p3: Point, ordered: bool) -> bool {
    let same_left = p1.left == p2.left && p2.left == p3.left;
    let same_top = p1.top == p2.top && p2.top == p3.top;
    if ordered {
        (same_left && is_monotonic(p1.top, p2.top, p3.top))
            || (same_top && is_monotonic(p1.left, p2.left, p3.left))
    } else {
        same_left || same_top
    }
}

pub fn is_horizontal(p1: Point, p2: Point) -> bool {
    p1.top == p2.top
}

fn is_same_row_or_column(p1: Point, p2: Point) -> bool {
    p1.left == p2.left || p1.top == p2.top
}

fn is_monotonic(a: i32, b: i32, c: i32) -> bool {
    (a <= b && b <= c) || (a >= b && b >= c)
}

// ============================================================================
// Edges
// ============================================================================

/// A straight segment between two consecutive joint points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub id: u32,
    pub start: Point,
    pub end: Point,
    pub is_horizontal: bool,
}

impl Edge {
    pub fn new(id: u32, start: Point, end: Point) -> Self {
        Self {
            id,
            start,
            end,
            is_horizontal: is_horizontal(start, end),
        }
    }

    pub fn middle_left(&self) -> f64 {
        (self.start.left + self.end.left) as f64 / 2.0
    }

    pub fn middle_top(&self) -> f64 {
        (self.start.top + self.end.top) as f64 / 2.0
    }

    /// Shift the edge along its normal so that it passes through `point`
    pub fn translate(&self, point: Point) -> Edge {
        let (start, end) = if self.is_horizontal {
            (self.start.with_top(point.top), self.end.with_top(point.top))
        } else {
            (self.start.with_left(point.left), self.end.with_left(point.left))
        };
        Edge::new(self.id, start, end)
    }

    pub fn contains(&self, point: Point) -> bool {
        is_on_straight_line(self.start, point, self.end, true)
    }

    pub fn has_same_points(&self, other: &Edge) -> bool {
        self.start == other.start && self.end == other.end
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn bound(&self) -> Rect {
        Rect::by_ltrb(self.start.left, self.start.top, self.end.left, self.end.top)
    }
}

/// Pair consecutive points into edges, drawing fresh ids from `next_id`
pub fn create_edges(points: &[Point], next_id: &mut u32) -> Vec<Edge> {
    points
        .windows(2)
        .map(|pair| {
            *next_id += 1;
            Edge::new(*next_id, pair[0], pair[1])
        })
        .collect()
}
