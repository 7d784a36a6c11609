//! Shape tree storage: id → shape table plus parent links
//!
//! Children are owned by id in each group's `QuickList`; every shape records
//! its parent id. The table is the only owner, so there are no reference
//! cycles. The root is a group with no parent and is never removed.

use crate::{
    AddPosition, Group, MoveActionType, Rect, Result, Shape, ShapeId, ShapeKind, ShapeModelError,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ShapeTree {
    root_id: ShapeId,
    shapes: HashMap<ShapeId, Shape>,
    /// Highest version each id has carried across root replacements
    version_marks: HashMap<ShapeId, u64>,
}

impl ShapeTree {
    /// Create a tree holding only an empty root group
    pub fn new() -> Self {
        Self::with_root_id(ShapeId::new())
    }

    pub fn with_root_id(root_id: ShapeId) -> Self {
        let mut shapes = HashMap::new();
        shapes.insert(root_id, Shape::with_id(root_id, ShapeKind::Group(Group::new())));
        Self {
            root_id,
            shapes,
            version_marks: HashMap::new(),
        }
    }

    pub fn root_id(&self) -> ShapeId {
        self.root_id
    }

    pub fn root_version(&self) -> u64 {
        self.version(self.root_id).unwrap_or(0)
    }

    /// Number of shapes, root included
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root_id).is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    pub fn version(&self, id: ShapeId) -> Option<u64> {
        self.shapes.get(&id).map(Shape::version)
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// Child ids in draw order; empty for leaves and unknown ids
    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        self.shapes
            .get(&id)
            .and_then(Shape::as_group)
            .map(|g| g.items().as_slice())
            .unwrap_or(&[])
    }

    pub fn parent_id(&self, id: ShapeId) -> Option<ShapeId> {
        self.shapes.get(&id).and_then(Shape::parent_id)
    }

    /// Parent first, root last
    pub fn ancestors(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut result = Vec::new();
        let mut current = self.parent_id(id);
        while let Some(parent) = current {
            result.push(parent);
            current = self.parent_id(parent);
        }
        result
    }

    pub fn is_ancestor(&self, ancestor: ShapeId, id: ShapeId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    /// A leaf's own bound, or the union of a group's descendants.
    /// Empty groups report `Rect::ZERO`.
    pub fn bound(&self, id: ShapeId) -> Option<Rect> {
        let shape = self.shapes.get(&id)?;
        if let Some(bound) = shape.kind().leaf_bound() {
            return Some(bound);
        }
        let bound = self
            .children(id)
            .iter()
            .filter_map(|child| self.bound(*child))
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or(Rect::ZERO);
        Some(bound)
    }

    /// Bump a shape's version without changing its payload
    pub fn bump_version(&mut self, id: ShapeId) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.bump_version();
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Structure edits
    // ========================================================================

    /// Create a shape under `parent`. The parent's version is bumped.
    pub fn add(
        &mut self,
        kind: ShapeKind,
        parent: ShapeId,
        position: AddPosition<ShapeId>,
    ) -> Result<ShapeId> {
        self.insert(Shape::new(kind), parent, position)
    }

    /// Insert a prepared shape (with its own id) under `parent`
    pub fn insert(
        &mut self,
        mut shape: Shape,
        parent: ShapeId,
        position: AddPosition<ShapeId>,
    ) -> Result<ShapeId> {
        let id = shape.id();
        if self.shapes.contains_key(&id) {
            return Err(ShapeModelError::TreeStructureError(format!(
                "duplicate shape id {}",
                id
            )));
        }
        self.attach(id, parent, position)?;
        shape.set_parent_id(Some(parent));
        self.shapes.insert(id, shape);
        Ok(id)
    }

    /// Remove a shape and all of its descendants. Returns every removed id,
    /// the shape itself first.
    pub fn remove(&mut self, id: ShapeId) -> Result<Vec<ShapeId>> {
        if id == self.root_id {
            return Err(ShapeModelError::TreeStructureError(
                "the root group cannot be removed".to_string(),
            ));
        }
        if !self.shapes.contains_key(&id) {
            return Err(ShapeModelError::ShapeNotFound(id));
        }
        self.detach(id);

        let mut removed = vec![id];
        removed.extend(self.descendants(id));
        for removed_id in &removed {
            self.shapes.remove(removed_id);
        }
        Ok(removed)
    }

    /// Re-parent a shape. Both the old and the new parent are bumped.
    pub fn move_to(
        &mut self,
        id: ShapeId,
        new_parent: ShapeId,
        position: AddPosition<ShapeId>,
    ) -> Result<()> {
        if !self.shapes.contains_key(&id) {
            return Err(ShapeModelError::ShapeNotFound(id));
        }
        if id == new_parent || self.is_ancestor(id, new_parent) {
            return Err(ShapeModelError::TreeStructureError(format!(
                "cannot move {} into its own subtree",
                id
            )));
        }
        self.require_group(new_parent)?;
        self.detach(id);
        self.attach(id, new_parent, position)?;
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.set_parent_id(Some(new_parent));
        }
        Ok(())
    }

    /// Reorder a shape among its siblings. Returns whether the order changed.
    pub fn change_order(&mut self, id: ShapeId, action: MoveActionType) -> Result<bool> {
        let parent = self
            .parent_id(id)
            .ok_or(ShapeModelError::ShapeNotFound(id))?;
        let moved = self
            .shapes
            .get_mut(&parent)
            .and_then(Shape::group_mut)
            .map(|g| g.items_mut().move_item(&id, action))
            .unwrap_or(false);
        if moved {
            self.bump_version(parent);
        }
        Ok(moved)
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Every descendant in pre-order, excluding `id` itself
    pub fn descendants(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut result = Vec::new();
        let mut stack: Vec<ShapeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// Non-group descendants in the order they are painted
    pub fn leaves_in_draw_order(&self, id: ShapeId) -> Vec<ShapeId> {
        self.descendants(id)
            .into_iter()
            .filter(|d| self.shapes.get(d).is_some_and(|s| !s.is_group()))
            .collect()
    }

    /// Swap in another tree's contents, keeping this tree's version history so
    /// a restored shape never reuses a version it already had.
    pub fn replace_contents(&mut self, other: ShapeTree) {
        let mut marks = std::mem::take(&mut self.version_marks);
        for shape in self.shapes.values() {
            let mark = marks.entry(shape.id()).or_insert(0);
            *mark = (*mark).max(shape.version());
        }
        for (id, mark) in other.version_marks {
            let entry = marks.entry(id).or_insert(0);
            *entry = (*entry).max(mark);
        }

        let mut shapes = other.shapes;
        for shape in shapes.values_mut() {
            if let Some(mark) = marks.get(&shape.id()) {
                if shape.version() <= *mark {
                    shape.set_version(mark + 1);
                }
            }
        }
        self.root_id = other.root_id;
        self.shapes = shapes;
        self.version_marks = marks;
    }

    fn require_group(&self, id: ShapeId) -> Result<()> {
        match self.shapes.get(&id) {
            Some(shape) if shape.is_group() => Ok(()),
            Some(_) => Err(ShapeModelError::NotAGroup(id)),
            None => Err(ShapeModelError::ShapeNotFound(id)),
        }
    }

    fn attach(&mut self, id: ShapeId, parent: ShapeId, position: AddPosition<ShapeId>) -> Result<()> {
        self.require_group(parent)?;
        let group = self
            .shapes
            .get_mut(&parent)
            .and_then(Shape::group_mut)
            .ok_or(ShapeModelError::NotAGroup(parent))?;
        let added = group.items_mut().add(id, position)
            || group.items_mut().add(id, AddPosition::Last);
        if !added {
            return Err(ShapeModelError::TreeStructureError(format!(
                "{} is already a child of {}",
                id, parent
            )));
        }
        self.bump_version(parent);
        Ok(())
    }

    fn detach(&mut self, id: ShapeId) {
        let Some(parent) = self.parent_id(id) else {
            return;
        };
        let removed = self
            .shapes
            .get_mut(&parent)
            .and_then(Shape::group_mut)
            .map(|g| g.items_mut().remove(&id))
            .unwrap_or(false);
        if removed {
            self.bump_version(parent);
        }
    }
}

impl Default for ShapeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rectangle, StyleRegistry};

    fn rect_kind(left: i32, top: i32, width: i32, height: i32) -> ShapeKind {
        let registry = StyleRegistry::predefined();
        ShapeKind::Rectangle(Rectangle::new(
            Rect::by_ltwh(left, top, width, height),
            registry.default_rectangle_extra(),
        ))
    }

    #[test]
    fn test_add_sets_parent_and_bumps() {
        let mut tree = ShapeTree::new();
        let root = tree.root_id();
        let id = tree.add(rect_kind(0, 0, 3, 3), root, AddPosition::Last).unwrap();

        assert_eq!(tree.parent_id(id), Some(root));
        assert_eq!(tree.children(root), &[id]);
        assert_eq!(tree.root_version(), 1);
        assert!(tree.add(rect_kind(0, 0, 1, 1), id, AddPosition::Last).is_err());
    }

    #[test]
    fn test_group_bound_is_union() {
        let mut tree = ShapeTree::new();
        let root = tree.root_id();
        let group = tree.add(ShapeKind::Group(Group::new()), root, AddPosition::Last).unwrap();
        assert_eq!(tree.bound(group), Some(Rect::ZERO));

        tree.add(rect_kind(0, 0, 3, 3), group, AddPosition::Last).unwrap();
        tree.add(rect_kind(5, 4, 2, 2), group, AddPosition::Last).unwrap();
        assert_eq!(tree.bound(group), Some(Rect::by_ltrb(0, 0, 6, 5)));
    }

    #[test]
    fn test_remove_takes_descendants() {
        let mut tree = ShapeTree::new();
        let root = tree.root_id();
        let group = tree.add(ShapeKind::Group(Group::new()), root, AddPosition::Last).unwrap();
        let a = tree.add(rect_kind(0, 0, 3, 3), group, AddPosition::Last).unwrap();
        let b = tree.add(rect_kind(5, 5, 3, 3), group, AddPosition::Last).unwrap();

        let removed = tree.remove(group).unwrap();
        assert_eq!(removed, vec![group, a, b]);
        assert_eq!(tree.len(), 1);
        assert!(tree.is_empty());
        assert!(tree.remove(root).is_err());
    }

    #[test]
    fn test_move_to_rejects_cycles() {
        let mut tree = ShapeTree::new();
        let root = tree.root_id();
        let outer = tree.add(ShapeKind::Group(Group::new()), root, AddPosition::Last).unwrap();
        let inner = tree.add(ShapeKind::Group(Group::new()), outer, AddPosition::Last).unwrap();

        assert!(tree.move_to(outer, inner, AddPosition::Last).is_err());
        assert!(tree.move_to(outer, outer, AddPosition::Last).is_err());

        tree.move_to(inner, root, AddPosition::First).unwrap();
        assert_eq!(tree.children(root), &[inner, outer]);
        assert!(tree.children(outer).is_empty());
    }

    #[test]
    fn test_change_order_and_draw_order() {
        let mut tree = ShapeTree::new();
        let root = tree.root_id();
        let a = tree.add(rect_kind(0, 0, 1, 1), root, AddPosition::Last).unwrap();
        let group = tree.add(ShapeKind::Group(Group::new()), root, AddPosition::Last).unwrap();
        let b = tree.add(rect_kind(0, 0, 1, 1), group, AddPosition::Last).unwrap();

        assert_eq!(tree.leaves_in_draw_order(root), vec![a, b]);
        assert!(tree.change_order(a, MoveActionType::Top).unwrap());
        assert_eq!(tree.leaves_in_draw_order(root), vec![b, a]);
        assert!(!tree.change_order(a, MoveActionType::Up).unwrap());
    }

    #[test]
    fn test_replace_contents_never_reuses_versions() {
        let mut tree = ShapeTree::new();
        let root = tree.root_id();
        let id = tree.add(rect_kind(0, 0, 3, 3), root, AddPosition::Last).unwrap();
        let snapshot = tree.clone();

        for left in 1..4 {
            tree.get_mut(id).unwrap().set_bound(Rect::by_ltwh(left, 0, 3, 3));
        }
        assert_eq!(tree.version(id), Some(3));

        tree.replace_contents(snapshot);
        assert_eq!(tree.bound(id), Some(Rect::by_ltwh(0, 0, 3, 3)));
        assert_eq!(tree.version(id), Some(4));
    }
}
