//! Geometry and style edits that apply to any leaf shape

use crate::{Command, LineConnector, ShapeManager};
use shape_model::{Rect, ShapeExtra, ShapeId, ShapeKind};

/// Move or resize a shape. Line ends connected to it follow the new bound.
#[derive(Debug, Clone)]
pub struct ChangeBound {
    pub shape_id: ShapeId,
    pub bound: Rect,
}

impl ChangeBound {
    pub fn new(shape_id: ShapeId, bound: Rect) -> Self {
        Self { shape_id, bound }
    }
}

impl Command for ChangeBound {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        manager.parent_of(self.shape_id)
    }

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId) {
        let bound = self.bound;
        let changed = manager.update_shape(self.shape_id, parent, |shape| shape.set_bound(bound));
        if changed {
            relocate_connected_lines(manager, self.shape_id, parent);
        }
    }

    fn display_name(&self) -> &str {
        "Change Bound"
    }
}

fn relocate_connected_lines(manager: &mut ShapeManager, target: ShapeId, parent: ShapeId) {
    let Some(bound) = manager.tree().bound(target) else {
        return;
    };
    let connectors: Vec<LineConnector> = manager
        .connectors()
        .get_connectors(target)
        .into_iter()
        .cloned()
        .collect();

    for connector in connectors {
        let Some(line_parent) = manager.parent_of(connector.line_id) else {
            continue;
        };
        let moved = manager.update_shape(connector.line_id, line_parent, |shape| {
            shape.update(|kind| match kind {
                ShapeKind::Line(line) => {
                    let direction = line.direction(connector.anchor);
                    let point = connector.point_in_new_bound(direction, &bound);
                    line.move_anchor_point(connector.anchor, point, false, true)
                }
                _ => false,
            })
        });
        if moved {
            manager.touch_outside(connector.line_id, parent);
            tracing::trace!(line = %connector.line_id, anchor = ?connector.anchor, "connector relocated");
        }
    }
}

/// Replace a shape's style. An extra of another shape kind is ignored.
#[derive(Debug, Clone)]
pub struct ChangeExtra {
    pub shape_id: ShapeId,
    pub extra: ShapeExtra,
}

impl ChangeExtra {
    pub fn new(shape_id: ShapeId, extra: ShapeExtra) -> Self {
        Self { shape_id, extra }
    }
}

impl Command for ChangeExtra {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        manager.parent_of(self.shape_id)
    }

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId) {
        let extra = self.extra.clone();
        manager.update_shape(self.shape_id, parent, |shape| shape.set_extra(extra));
    }

    fn display_name(&self) -> &str {
        "Change Extra"
    }
}
