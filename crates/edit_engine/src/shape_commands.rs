//! Structural commands: adding, removing, grouping and reordering shapes

use crate::{Command, ShapeManager};
use shape_model::{AddPosition, Group, MoveActionType, Shape, ShapeId, ShapeKind};
use std::collections::HashSet;

// ============================================================================
// Add / remove
// ============================================================================

/// Add a new shape at the top of a group
#[derive(Debug, Clone)]
pub struct AddShape {
    pub shape: Shape,
    /// Target group; the root when `None`
    pub parent: Option<ShapeId>,
}

impl AddShape {
    pub fn new(shape: Shape) -> Self {
        Self { shape, parent: None }
    }

    pub fn into_group(shape: Shape, parent: ShapeId) -> Self {
        Self {
            shape,
            parent: Some(parent),
        }
    }
}

impl Command for AddShape {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        if manager.tree().contains(self.shape.id()) {
            return None;
        }
        let parent = self.parent.unwrap_or_else(|| manager.root_id());
        manager.get(parent).filter(|s| s.is_group()).map(Shape::id)
    }

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId) {
        if let Err(e) = manager
            .tree_mut()
            .insert(self.shape.clone(), parent, AddPosition::Last)
        {
            tracing::warn!(shape = %self.shape.id(), "failed to add shape: {}", e);
        }
    }

    fn display_name(&self) -> &str {
        "Add Shape"
    }
}

/// Remove a shape and its subtree. A non-root group emptied by this is
/// removed too; one left with a single child is dissolved.
#[derive(Debug, Clone)]
pub struct RemoveShape {
    pub shape_id: ShapeId,
}

impl RemoveShape {
    pub fn new(shape_id: ShapeId) -> Self {
        Self { shape_id }
    }
}

impl Command for RemoveShape {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        manager.parent_of(self.shape_id)
    }

    fn execute(&self, manager: &mut ShapeManager, _parent: ShapeId) {
        manager.remove_with_cascade(self.shape_id);
    }

    fn display_name(&self) -> &str {
        "Remove Shape"
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// Wrap two or more siblings into a new group placed where the last of them
/// was
#[derive(Debug, Clone)]
pub struct GroupShapes {
    pub shape_ids: Vec<ShapeId>,
}

impl GroupShapes {
    pub fn new(shape_ids: Vec<ShapeId>) -> Self {
        Self { shape_ids }
    }
}

impl Command for GroupShapes {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        if self.shape_ids.len() < 2 {
            return None;
        }
        let distinct: HashSet<&ShapeId> = self.shape_ids.iter().collect();
        if distinct.len() != self.shape_ids.len() {
            return None;
        }
        let parent = manager.parent_of(self.shape_ids[0])?;
        self.shape_ids
            .iter()
            .all(|id| manager.parent_of(*id) == Some(parent))
            .then_some(parent)
    }

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId) {
        let Some(last) = self.shape_ids.last().copied() else {
            return;
        };
        let tree = manager.tree_mut();
        let group = match tree.add(
            ShapeKind::Group(Group::new()),
            parent,
            AddPosition::After(last),
        ) {
            Ok(group) => group,
            Err(e) => {
                tracing::warn!("failed to create group: {}", e);
                return;
            }
        };
        for id in &self.shape_ids {
            if let Err(e) = tree.move_to(*id, group, AddPosition::Last) {
                tracing::warn!(shape = %id, "failed to move into group: {}", e);
            }
        }
    }

    fn display_name(&self) -> &str {
        "Group Shapes"
    }
}

/// Replace a group with its children, keeping their order and layer
#[derive(Debug, Clone)]
pub struct Ungroup {
    pub group_id: ShapeId,
}

impl Ungroup {
    pub fn new(group_id: ShapeId) -> Self {
        Self { group_id }
    }
}

impl Command for Ungroup {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        manager.get(self.group_id).filter(|s| s.is_group())?;
        manager.parent_of(self.group_id)
    }

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId) {
        manager.dissolve(self.group_id, parent);
        manager.tidy_groups_from(parent);
    }

    fn display_name(&self) -> &str {
        "Ungroup"
    }
}

// ============================================================================
// Ordering
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrderType {
    /// One layer up
    Forward,
    /// One layer down
    Backward,
    /// Topmost layer
    Front,
    /// Bottom layer
    Back,
}

impl ChangeOrderType {
    fn action(self) -> MoveActionType {
        match self {
            ChangeOrderType::Forward => MoveActionType::Up,
            ChangeOrderType::Backward => MoveActionType::Down,
            ChangeOrderType::Front => MoveActionType::Top,
            ChangeOrderType::Back => MoveActionType::Bottom,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangeOrder {
    pub shape_id: ShapeId,
    pub order: ChangeOrderType,
}

impl ChangeOrder {
    pub fn new(shape_id: ShapeId, order: ChangeOrderType) -> Self {
        Self { shape_id, order }
    }
}

impl Command for ChangeOrder {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        manager.parent_of(self.shape_id)
    }

    fn execute(&self, manager: &mut ShapeManager, _parent: ShapeId) {
        if let Err(e) = manager
            .tree_mut()
            .change_order(self.shape_id, self.order.action())
        {
            tracing::warn!(shape = %self.shape_id, "failed to change order: {}", e);
        }
    }

    fn display_name(&self) -> &str {
        "Change Order"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_model::{Rect, Rectangle, StyleRegistry};

    fn add_rectangle(manager: &mut ShapeManager, left: i32) -> ShapeId {
        let registry = StyleRegistry::predefined();
        let shape = Shape::new(ShapeKind::Rectangle(Rectangle::new(
            Rect::by_ltwh(left, 0, 3, 3),
            registry.default_rectangle_extra(),
        )));
        let id = shape.id();
        assert!(manager.execute(&AddShape::new(shape)));
        id
    }

    fn root_children(manager: &ShapeManager) -> Vec<ShapeId> {
        manager.tree().children(manager.root_id()).to_vec()
    }

    #[test]
    fn test_add_shape_rejects_existing_id() {
        let mut manager = ShapeManager::new();
        let a = add_rectangle(&mut manager, 0);
        let duplicate = manager.get(a).unwrap().clone();
        let version = manager.version();
        assert!(!manager.execute(&AddShape::new(duplicate)));
        assert_eq!(manager.version(), version);
    }

    #[test]
    fn test_add_shape_into_non_group_is_noop() {
        let mut manager = ShapeManager::new();
        let a = add_rectangle(&mut manager, 0);
        let registry = StyleRegistry::predefined();
        let shape = Shape::new(ShapeKind::Rectangle(Rectangle::new(
            Rect::by_ltwh(0, 0, 1, 1),
            registry.default_rectangle_extra(),
        )));
        assert!(!manager.execute(&AddShape::into_group(shape, a)));
    }

    #[test]
    fn test_group_keeps_layer_position() {
        let mut manager = ShapeManager::new();
        let a = add_rectangle(&mut manager, 0);
        let b = add_rectangle(&mut manager, 4);
        let c = add_rectangle(&mut manager, 8);

        assert!(manager.execute(&GroupShapes::new(vec![a, b])));
        let group = manager.parent_of(a).unwrap();
        assert_ne!(group, manager.root_id());
        assert_eq!(manager.tree().children(group), &[a, b]);
        assert_eq!(root_children(&manager), vec![group, c]);
    }

    #[test]
    fn test_group_rejects_bad_selection() {
        let mut manager = ShapeManager::new();
        let a = add_rectangle(&mut manager, 0);
        let b = add_rectangle(&mut manager, 4);
        let c = add_rectangle(&mut manager, 8);

        assert!(!manager.execute(&GroupShapes::new(vec![a])));
        assert!(!manager.execute(&GroupShapes::new(vec![a, a])));
        assert!(manager.execute(&GroupShapes::new(vec![a, b])));
        // a now lives in the new group, c in the root
        assert!(!manager.execute(&GroupShapes::new(vec![a, c])));
    }

    #[test]
    fn test_ungroup_restores_order() {
        let mut manager = ShapeManager::new();
        let a = add_rectangle(&mut manager, 0);
        let b = add_rectangle(&mut manager, 4);
        let c = add_rectangle(&mut manager, 8);
        manager.execute(&GroupShapes::new(vec![a, b]));
        let group = manager.parent_of(a).unwrap();

        assert!(manager.execute(&Ungroup::new(group)));
        assert!(!manager.tree().contains(group));
        assert_eq!(root_children(&manager), vec![a, b, c]);
        assert!(!manager.execute(&Ungroup::new(c)));
    }

    #[test]
    fn test_remove_dissolves_single_child_group() {
        let mut manager = ShapeManager::new();
        let a = add_rectangle(&mut manager, 0);
        let b = add_rectangle(&mut manager, 4);
        let c = add_rectangle(&mut manager, 8);
        manager.execute(&GroupShapes::new(vec![a, b]));
        let group = manager.parent_of(a).unwrap();

        assert!(manager.execute(&RemoveShape::new(a)));
        assert!(!manager.tree().contains(group));
        assert_eq!(root_children(&manager), vec![b, c]);
    }

    #[test]
    fn test_remove_cascades_through_nested_groups() {
        let mut manager = ShapeManager::new();
        let a = add_rectangle(&mut manager, 0);
        let b = add_rectangle(&mut manager, 4);
        let c = add_rectangle(&mut manager, 8);
        let d = add_rectangle(&mut manager, 12);
        manager.execute(&GroupShapes::new(vec![a, b]));
        let inner = manager.parent_of(a).unwrap();
        manager.execute(&GroupShapes::new(vec![inner, c]));
        let outer = manager.parent_of(c).unwrap();

        // outer keeps only inner, so outer is dissolved into the root
        assert!(manager.execute(&RemoveShape::new(c)));
        assert!(!manager.tree().contains(outer));
        assert_eq!(manager.parent_of(inner), Some(manager.root_id()));
        assert_eq!(root_children(&manager), vec![inner, d]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut manager = ShapeManager::new();
        let version = manager.version();
        assert!(!manager.execute(&RemoveShape::new(ShapeId::new())));
        assert!(!manager.execute(&RemoveShape::new(manager.root_id())));
        assert_eq!(manager.version(), version);
    }

    #[test]
    fn test_change_order() {
        let mut manager = ShapeManager::new();
        let a = add_rectangle(&mut manager, 0);
        let b = add_rectangle(&mut manager, 4);
        let c = add_rectangle(&mut manager, 8);

        assert!(manager.execute(&ChangeOrder::new(a, ChangeOrderType::Forward)));
        assert_eq!(root_children(&manager), vec![b, a, c]);
        assert!(manager.execute(&ChangeOrder::new(a, ChangeOrderType::Front)));
        assert_eq!(root_children(&manager), vec![b, c, a]);
        assert!(!manager.execute(&ChangeOrder::new(a, ChangeOrderType::Front)));
        assert!(manager.execute(&ChangeOrder::new(a, ChangeOrderType::Back)));
        assert_eq!(root_children(&manager), vec![a, b, c]);
        assert!(manager.execute(&ChangeOrder::new(c, ChangeOrderType::Backward)));
        assert_eq!(root_children(&manager), vec![a, c, b]);
    }
}
