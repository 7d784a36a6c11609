//! Line anchor and edge drags

use crate::{Command, LineConnector, ShapeConnector, ShapeManager};
use shape_model::{DirectedPoint, LineAnchor, Point, ShapeId, ShapeKind};

/// Move one end of a line.
///
/// With `connect_to` set, the moved end is glued to that box if it landed
/// close enough; otherwise any connector on that end is dropped.
/// `just_move_anchor` translates the end without re-routing the line.
#[derive(Debug, Clone)]
pub struct MoveLineAnchor {
    pub line_id: ShapeId,
    pub anchor: LineAnchor,
    pub point: DirectedPoint,
    pub reduce: bool,
    pub just_move_anchor: bool,
    pub connect_to: Option<ShapeId>,
}

impl MoveLineAnchor {
    pub fn new(line_id: ShapeId, anchor: LineAnchor, point: DirectedPoint, reduce: bool) -> Self {
        Self {
            line_id,
            anchor,
            point,
            reduce,
            just_move_anchor: false,
            connect_to: None,
        }
    }

    pub fn connecting_to(mut self, target: ShapeId) -> Self {
        self.connect_to = Some(target);
        self
    }
}

impl Command for MoveLineAnchor {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        manager.get(self.line_id)?.as_line()?;
        manager.parent_of(self.line_id)
    }

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId) {
        let (anchor, point) = (self.anchor, self.point);
        let (reduce, just_move) = (self.reduce, self.just_move_anchor);
        let moved = manager.update_shape(self.line_id, parent, |shape| {
            shape.update(|kind| match kind {
                ShapeKind::Line(line) => line.move_anchor_point(anchor, point, reduce, just_move),
                _ => false,
            })
        });

        // An anchor dropped where it already was can still attach or detach.
        let attached_before = attachment(manager.connectors(), self.line_id, anchor);
        let target = self
            .connect_to
            .filter(|id| *id != self.line_id)
            .and_then(|id| manager.get(id))
            .filter(|shape| shape.can_have_connectors())
            .map(|shape| shape.id());
        let anchor_point = manager
            .get(self.line_id)
            .and_then(|shape| shape.as_line())
            .map(|line| line.anchor_point(anchor));
        let target_bound = target.and_then(|id| manager.tree().bound(id));

        match (target, target_bound, anchor_point) {
            (Some(target), Some(bound), Some(anchor_point)) => {
                manager
                    .connectors_mut()
                    .add_connector(self.line_id, anchor, anchor_point, target, &bound);
            }
            _ => {
                manager.connectors_mut().remove_connector(self.line_id, anchor);
            }
        }

        if !moved && attachment(manager.connectors(), self.line_id, anchor) != attached_before {
            manager.tree_mut().bump_version(parent);
        }
    }

    fn display_name(&self) -> &str {
        "Move Line Anchor"
    }
}

/// The box a line end is glued to, with the connector geometry
fn attachment(
    connectors: &ShapeConnector,
    line_id: ShapeId,
    anchor: LineAnchor,
) -> Option<(ShapeId, LineConnector)> {
    let target = connectors.target_of(line_id, anchor)?;
    connectors
        .get_connectors(target)
        .into_iter()
        .find(|connector| connector.line_id == line_id && connector.anchor == anchor)
        .map(|connector| (target, connector.clone()))
}

/// Drag one edge of a line perpendicular to itself
#[derive(Debug, Clone)]
pub struct MoveLineEdge {
    pub line_id: ShapeId,
    pub edge_id: u32,
    pub point: Point,
    pub reduce: bool,
}

impl MoveLineEdge {
    pub fn new(line_id: ShapeId, edge_id: u32, point: Point, reduce: bool) -> Self {
        Self {
            line_id,
            edge_id,
            point,
            reduce,
        }
    }
}

impl Command for MoveLineEdge {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        manager.get(self.line_id)?.as_line()?;
        manager.parent_of(self.line_id)
    }

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId) {
        let (edge_id, point, reduce) = (self.edge_id, self.point, self.reduce);
        manager.update_shape(self.line_id, parent, |shape| {
            shape.update(|kind| match kind {
                ShapeKind::Line(line) => line.move_edge(edge_id, point, reduce),
                _ => false,
            })
        });
    }

    fn display_name(&self) -> &str {
        "Move Line Edge"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AddShape;
    use shape_model::{Line, Rect, Rectangle, Shape, StyleRegistry};

    fn setup() -> (ShapeManager, ShapeId, ShapeId) {
        let registry = StyleRegistry::predefined();
        let mut manager = ShapeManager::new();
        let rect = Shape::new(ShapeKind::Rectangle(Rectangle::new(
            Rect::by_ltwh(0, 0, 4, 3),
            registry.default_rectangle_extra(),
        )));
        let line = Shape::new(ShapeKind::Line(Line::new(
            DirectedPoint::horizontal(10, 1),
            DirectedPoint::horizontal(20, 1),
            registry.default_line_extra(),
        )));
        let (rect_id, line_id) = (rect.id(), line.id());
        manager.execute(&AddShape::new(rect));
        manager.execute(&AddShape::new(line));
        (manager, rect_id, line_id)
    }

    #[test]
    fn test_far_anchor_drops_connector() {
        let (mut manager, rect, line) = setup();
        let near = MoveLineAnchor::new(line, LineAnchor::Start, DirectedPoint::horizontal(4, 1), true)
            .connecting_to(rect);
        assert!(manager.execute(&near));
        assert!(manager.connectors().has_connector(line, LineAnchor::Start));

        let far = MoveLineAnchor::new(line, LineAnchor::Start, DirectedPoint::horizontal(7, 1), true)
            .connecting_to(rect);
        assert!(manager.execute(&far));
        assert!(!manager.connectors().has_connector(line, LineAnchor::Start));
    }

    #[test]
    fn test_unmoved_anchor_still_connects() {
        let (mut manager, rect, line) = setup();
        let onto_box = MoveLineAnchor::new(line, LineAnchor::Start, DirectedPoint::horizontal(4, 1), true);
        assert!(manager.execute(&onto_box));
        assert!(manager.connectors().is_empty());

        let version = manager.version();
        assert!(manager.execute(&onto_box.clone().connecting_to(rect)));
        assert_eq!(manager.connectors().target_of(line, LineAnchor::Start), Some(rect));
        assert!(manager.version() > version);

        // Same spot, same box: nothing to report.
        assert!(!manager.execute(&onto_box.clone().connecting_to(rect)));

        // Dropped in place without a target: detaches.
        assert!(manager.execute(&onto_box));
        assert!(!manager.connectors().has_connector(line, LineAnchor::Start));
    }

    #[test]
    fn test_anchor_without_target_disconnects() {
        let (mut manager, rect, line) = setup();
        manager.execute(
            &MoveLineAnchor::new(line, LineAnchor::End, DirectedPoint::horizontal(4, 1), true)
                .connecting_to(rect),
        );
        assert_eq!(manager.connectors().target_of(line, LineAnchor::End), Some(rect));

        manager.execute(&MoveLineAnchor::new(
            line,
            LineAnchor::End,
            DirectedPoint::horizontal(30, 1),
            true,
        ));
        assert!(manager.connectors().is_empty());
    }

    #[test]
    fn test_line_cannot_connect_to_line() {
        let (mut manager, _, line) = setup();
        let registry = StyleRegistry::predefined();
        let other = Shape::new(ShapeKind::Line(Line::new(
            DirectedPoint::vertical(5, 5),
            DirectedPoint::vertical(5, 9),
            registry.default_line_extra(),
        )));
        let other_id = other.id();
        manager.execute(&AddShape::new(other));

        manager.execute(
            &MoveLineAnchor::new(line, LineAnchor::Start, DirectedPoint::horizontal(6, 5), true)
                .connecting_to(other_id),
        );
        assert!(manager.connectors().is_empty());
    }

    #[test]
    fn test_move_edge_and_unknown_edge() {
        let (mut manager, rect, line) = setup();
        let edge_id = manager.get(line).and_then(|s| s.as_line()).unwrap().edges()[0].id;

        assert!(manager.execute(&MoveLineEdge::new(line, edge_id, Point::new(0, 3), false)));
        assert!(!manager.execute(&MoveLineEdge::new(line, 999, Point::new(0, 3), false)));
        assert!(!manager.execute(&MoveLineEdge::new(rect, edge_id, Point::new(0, 3), false)));
    }
}
