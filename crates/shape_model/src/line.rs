//! Line shape: two directed anchors joined by an orthogonal polyline
//!
//! Until one of its edges is dragged, a line is re-routed from its anchors on
//! every anchor move. Dragging an edge "confirms" the current joint points and
//! from then on anchor moves patch the confirmed polyline instead.

use crate::line_router::{
    create_edges, create_joint_points, is_horizontal, is_on_straight_line, reduce_joint_points,
};
use crate::{DirectedPoint, Direction, Edge, LineExtra, Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineAnchor {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    start: DirectedPoint,
    end: DirectedPoint,
    joint_points: Vec<Point>,
    edges: Vec<Edge>,
    /// Non-empty once an edge has been moved
    confirmed_joint_points: Vec<Point>,
    extra: LineExtra,
    last_edge_id: u32,
}

impl Line {
    pub fn new(start: DirectedPoint, end: DirectedPoint, extra: LineExtra) -> Self {
        let joint_points = create_joint_points(start, end);
        let mut line = Self {
            start,
            end,
            joint_points,
            edges: Vec::new(),
            confirmed_joint_points: Vec::new(),
            extra,
            last_edge_id: 0,
        };
        line.rebuild_edges();
        line
    }

    /// Rebuild from persisted state. Edge-edited lines keep their literal points.
    pub fn restore(
        start: DirectedPoint,
        end: DirectedPoint,
        joint_points: Vec<Point>,
        was_moving_edge: bool,
        extra: LineExtra,
    ) -> Self {
        let joint_points = if joint_points.len() < 2 {
            create_joint_points(start, end)
        } else {
            joint_points
        };
        let confirmed_joint_points = if was_moving_edge {
            joint_points.clone()
        } else {
            Vec::new()
        };
        let mut line = Self {
            start,
            end,
            joint_points,
            edges: Vec::new(),
            confirmed_joint_points,
            extra,
            last_edge_id: 0,
        };
        line.rebuild_edges();
        line
    }

    pub fn start(&self) -> DirectedPoint {
        self.start
    }

    pub fn end(&self) -> DirectedPoint {
        self.end
    }

    pub fn anchor_point(&self, anchor: LineAnchor) -> DirectedPoint {
        match anchor {
            LineAnchor::Start => self.start,
            LineAnchor::End => self.end,
        }
    }

    pub fn direction(&self, anchor: LineAnchor) -> Direction {
        self.anchor_point(anchor).direction
    }

    pub fn joint_points(&self) -> &[Point] {
        &self.joint_points
    }

    pub fn reduced_joint_points(&self) -> Vec<Point> {
        reduce_joint_points(&self.joint_points)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, edge_id: u32) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    pub fn extra(&self) -> &LineExtra {
        &self.extra
    }

    pub fn was_moving_edge(&self) -> bool {
        !self.confirmed_joint_points.is_empty()
    }

    pub fn bound(&self) -> Rect {
        Rect::bounding(&self.reduced_joint_points()).unwrap_or(Rect::ZERO)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.edges.iter().any(|e| e.contains(point))
    }

    pub fn is_overlapped(&self, rect: &Rect) -> bool {
        self.edges.iter().any(|e| e.bound().is_overlapped(rect))
    }

    pub fn set_extra(&mut self, extra: LineExtra) -> bool {
        if self.extra == extra {
            return false;
        }
        self.extra = extra;
        true
    }

    /// Translate the whole line so its joint points start at the new bound's
    /// top-left. Size changes are ignored.
    pub fn set_bound(&mut self, bound: Rect) -> bool {
        let current = Rect::bounding(&self.joint_points).unwrap_or(Rect::ZERO);
        let offset = bound.position - current.position;
        if offset == Point::ZERO {
            return false;
        }
        self.start = self.start.translate(offset);
        self.end = self.end.translate(offset);
        for p in self.joint_points.iter_mut() {
            *p = *p + offset;
        }
        for p in self.confirmed_joint_points.iter_mut() {
            *p = *p + offset;
        }
        self.rebuild_edges();
        true
    }

    /// Move one anchor.
    ///
    /// A line that was never edge-edited (or whose confirmed path is a single
    /// segment) is re-routed from both anchors. Otherwise `just_move_anchor`
    /// slides the anchor and its neighbour along, keeping the path shape;
    /// without it a bend is added when the new point leaves the anchor's edge.
    pub fn move_anchor_point(
        &mut self,
        anchor: LineAnchor,
        point: DirectedPoint,
        reduce: bool,
        just_move_anchor: bool,
    ) -> bool {
        let previous = (self.start, self.end, self.joint_points.clone());
        match anchor {
            LineAnchor::Start => self.start = point,
            LineAnchor::End => self.end = point,
        }

        let is_edge_updated = self.was_moving_edge();
        let confirmed_len = self.confirmed_joint_points.len();
        let new_joint_points = if !is_edge_updated || confirmed_len == 2 {
            create_joint_points(self.start, self.end)
        } else if just_move_anchor {
            let mut points = self.confirmed_joint_points.clone();
            let (anchor_index, affected_index) = match anchor {
                LineAnchor::Start => (0, 1),
                LineAnchor::End => (points.len() - 1, points.len() - 2),
            };
            let new_point = point.point;
            points[affected_index] = if points[anchor_index].left == points[affected_index].left {
                points[affected_index].with_left(new_point.left)
            } else {
                points[affected_index].with_top(new_point.top)
            };
            points[anchor_index] = new_point;
            points
        } else {
            let new_joint_point = bend_for_anchor(&self.confirmed_joint_points, anchor, point.point);
            let mut points = self.confirmed_joint_points.clone();
            let (anchor_index, insert_index) = match anchor {
                LineAnchor::Start => (0, 1),
                LineAnchor::End => (points.len() - 1, points.len() - 1),
            };
            points[anchor_index] = point.point;
            if let Some(bend) = new_joint_point {
                points.insert(insert_index, bend);
            }
            points
        };

        self.joint_points = if reduce {
            reduce_joint_points(&new_joint_points)
        } else {
            new_joint_points
        };
        if reduce && is_edge_updated {
            self.confirmed_joint_points = self.joint_points.clone();
        }
        self.rebuild_edges();
        previous != (self.start, self.end, self.joint_points.clone())
    }

    /// Slide an edge so it passes through `point`. Anchors stay put; moving the
    /// first or last edge introduces a new joint point next to the anchor.
    pub fn move_edge(&mut self, edge_id: u32, point: Point, reduce: bool) -> bool {
        let Some(edge_index) = self.edges.iter().position(|e| e.id == edge_id) else {
            return false;
        };
        let edge = self.edges[edge_index];
        let moved = edge.translate(point);
        if edge.has_same_points(&moved) {
            return reduce && self.settle_reduced();
        }

        let previous = self.joint_points.clone();
        let mut points = self.joint_points.clone();
        let last_edge_index = self.edges.len() - 1;
        if edge_index == 0 && edge_index == last_edge_index {
            points.insert(1, moved.start);
            points.insert(2, moved.end);
        } else if edge_index == 0 {
            points.insert(1, moved.start);
            points[2] = moved.end;
        } else if edge_index == last_edge_index {
            let start_index = points.len() - 2;
            points[start_index] = moved.start;
            points.insert(start_index + 1, moved.end);
        } else {
            points[edge_index] = moved.start;
            points[edge_index + 1] = moved.end;
        }

        self.joint_points = if reduce {
            reduce_joint_points(&points)
        } else {
            points
        };
        self.confirmed_joint_points = self.joint_points.clone();
        self.rebuild_edges();

        if !reduce {
            // The dragged edge keeps its id so an ongoing drag can keep targeting it.
            let target = if edge_index == 0 { 1 } else { edge_index };
            if let Some(current) = self.edges.iter().position(|e| e.id == edge_id) {
                let displaced = self.edges[target].id;
                self.edges[current].id = displaced;
            }
            self.edges[target].id = edge_id;
        }
        previous != self.joint_points
    }

    /// Reduce the current joint points in place. Nothing is written when
    /// they are already reduced.
    fn settle_reduced(&mut self) -> bool {
        let reduced = reduce_joint_points(&self.joint_points);
        if reduced == self.joint_points {
            return false;
        }
        self.joint_points = reduced;
        self.confirmed_joint_points = self.joint_points.clone();
        self.rebuild_edges();
        true
    }

    /// Recreate edges, reusing ids by index
    fn rebuild_edges(&mut self) {
        let old_ids: Vec<u32> = self.edges.iter().map(|e| e.id).collect();
        let mut fresh = create_edges(&self.joint_points, &mut self.last_edge_id);
        for (edge, old_id) in fresh.iter_mut().zip(old_ids) {
            edge.id = old_id;
        }
        self.edges = fresh;
    }
}

/// The bend needed when an anchor leaves the line of its last segment
fn bend_for_anchor(points: &[Point], anchor: LineAnchor, new_point: Point) -> Option<Point> {
    let len = points.len();
    if len < 2 {
        return None;
    }
    let (anchor_point, previous_point) = match anchor {
        LineAnchor::Start => (points[0], points[1]),
        LineAnchor::End => (points[len - 1], points[len - 2]),
    };
    if is_on_straight_line(anchor_point, previous_point, new_point, false) {
        return None;
    }
    Some(if is_horizontal(anchor_point, previous_point) {
        Point::new(new_point.left, anchor_point.top)
    } else {
        Point::new(anchor_point.left, new_point.top)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleRegistry;

    fn pts(list: &[(i32, i32)]) -> Vec<Point> {
        list.iter().map(|(l, t)| Point::new(*l, *t)).collect()
    }

    fn line(start: DirectedPoint, end: DirectedPoint) -> Line {
        Line::new(start, end, StyleRegistry::predefined().default_line_extra())
    }

    #[test]
    fn test_new_line_routes_and_builds_edges() {
        let line = line(DirectedPoint::horizontal(0, 0), DirectedPoint::vertical(5, 3));
        assert_eq!(line.joint_points(), pts(&[(0, 0), (5, 0), (5, 3)]).as_slice());
        assert_eq!(line.edges().len(), 2);
        assert_eq!(line.bound(), Rect::by_ltrb(0, 0, 5, 3));
        assert!(!line.was_moving_edge());
    }

    #[test]
    fn test_move_anchor_reroutes_unedited_line() {
        let mut line = line(DirectedPoint::horizontal(0, 0), DirectedPoint::horizontal(10, 0));
        assert!(line.move_anchor_point(LineAnchor::End, DirectedPoint::horizontal(10, 10), true, false));
        assert_eq!(
            line.joint_points(),
            pts(&[(0, 0), (5, 0), (5, 10), (10, 10)]).as_slice()
        );
        assert!(!line.move_anchor_point(LineAnchor::End, DirectedPoint::horizontal(10, 10), true, false));
    }

    #[test]
    fn test_move_single_edge() {
        let mut line = line(DirectedPoint::horizontal(0, 0), DirectedPoint::horizontal(8, 0));
        let edge_id = line.edges()[0].id;
        assert!(line.move_edge(edge_id, Point::new(4, 3), false));
        assert_eq!(
            line.joint_points(),
            pts(&[(0, 0), (0, 3), (8, 3), (8, 0)]).as_slice()
        );
        assert!(line.was_moving_edge());
        assert_eq!(line.edges()[1].id, edge_id);
        assert!(line.edges()[1].is_horizontal);
    }

    #[test]
    fn test_move_middle_edge() {
        let mut line = line(DirectedPoint::horizontal(0, 0), DirectedPoint::horizontal(10, 10));
        let middle = line.edges()[1];
        assert!(!middle.is_horizontal);
        assert!(line.move_edge(middle.id, Point::new(7, 4), true));
        assert_eq!(
            line.joint_points(),
            pts(&[(0, 0), (7, 0), (7, 10), (10, 10)]).as_slice()
        );
    }

    #[test]
    fn test_move_edge_unchanged_is_noop() {
        let mut line = line(DirectedPoint::horizontal(0, 0), DirectedPoint::horizontal(8, 0));
        let edge_id = line.edges()[0].id;
        assert!(!line.move_edge(edge_id, Point::new(3, 0), false));
        assert!(!line.move_edge(999, Point::new(3, 3), false));
        assert!(!line.was_moving_edge());
    }

    #[test]
    fn test_reduce_on_unmoved_edge() {
        let mut line = line(DirectedPoint::horizontal(0, 0), DirectedPoint::horizontal(8, 0));
        let edge_id = line.edges()[0].id;
        assert!(line.move_edge(edge_id, Point::new(4, 3), false));
        let before = line.clone();

        // Drag back to the axis, then release on the same spot.
        let dragged = line.edges()[1].id;
        assert_eq!(dragged, edge_id);
        assert!(line.move_edge(dragged, Point::new(4, 0), false));
        assert!(line.move_edge(dragged, Point::new(4, 0), true));
        assert_eq!(line.joint_points(), pts(&[(0, 0), (8, 0)]).as_slice());

        // Already reduced: releasing again leaves everything as it was.
        let settled = line.clone();
        let edge_id = line.edges()[0].id;
        assert!(!line.move_edge(edge_id, Point::new(2, 0), true));
        assert_eq!(line, settled);
        assert_ne!(line, before);
    }

    #[test]
    fn test_edge_edited_anchor_move_adds_bend() {
        let mut line = line(DirectedPoint::horizontal(0, 0), DirectedPoint::horizontal(8, 0));
        let edge_id = line.edges()[0].id;
        line.move_edge(edge_id, Point::new(4, 3), true);
        // (0,0) (0,3) (8,3) (8,0): end edge is vertical, moving the end sideways bends.
        assert!(line.move_anchor_point(LineAnchor::End, DirectedPoint::horizontal(12, 1), true, false));
        assert_eq!(
            line.joint_points(),
            pts(&[(0, 0), (0, 3), (8, 3), (8, 1), (12, 1)]).as_slice()
        );
    }

    #[test]
    fn test_edge_edited_just_move_anchor() {
        let mut line = line(DirectedPoint::horizontal(0, 0), DirectedPoint::horizontal(8, 0));
        let edge_id = line.edges()[0].id;
        line.move_edge(edge_id, Point::new(4, 3), true);
        assert!(line.move_anchor_point(LineAnchor::End, DirectedPoint::horizontal(12, -2), true, true));
        assert_eq!(
            line.joint_points(),
            pts(&[(0, 0), (0, 3), (12, 3), (12, -2)]).as_slice()
        );
    }

    #[test]
    fn test_set_bound_translates() {
        let mut line = line(DirectedPoint::horizontal(0, 0), DirectedPoint::vertical(5, 3));
        assert!(line.set_bound(Rect::by_ltwh(2, 1, 1, 1)));
        assert_eq!(line.start().point, Point::new(2, 1));
        assert_eq!(line.end().point, Point::new(7, 4));
        assert_eq!(line.bound(), Rect::by_ltrb(2, 1, 7, 4));
        assert!(!line.set_bound(Rect::by_ltwh(2, 1, 9, 9)));
    }

    #[test]
    fn test_restore_edge_edited_keeps_points() {
        let registry = StyleRegistry::predefined();
        let points = pts(&[(0, 0), (0, 3), (8, 3), (8, 0)]);
        let line = Line::restore(
            DirectedPoint::horizontal(0, 0),
            DirectedPoint::horizontal(8, 0),
            points.clone(),
            true,
            registry.default_line_extra(),
        );
        assert_eq!(line.joint_points(), points.as_slice());
        assert!(line.was_moving_edge());
    }

    #[test]
    fn test_overlap_and_contains() {
        let line = line(DirectedPoint::horizontal(0, 0), DirectedPoint::vertical(5, 3));
        assert!(line.contains(Point::new(3, 0)));
        assert!(line.contains(Point::new(5, 2)));
        assert!(!line.contains(Point::new(2, 2)));
        assert!(line.is_overlapped(&Rect::by_ltwh(4, 2, 3, 3)));
        assert!(!line.is_overlapped(&Rect::by_ltwh(1, 1, 2, 2)));
    }
}
