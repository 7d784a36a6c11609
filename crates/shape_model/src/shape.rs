//! Shape variants and the versioned shape node

use crate::{
    LineExtra, Line, QuickList, Rect, RectangleExtra, ShapeId, Text, TextExtra,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    bound: Rect,
    extra: RectangleExtra,
}

impl Rectangle {
    pub fn new(bound: Rect, extra: RectangleExtra) -> Self {
        Self { bound, extra }
    }

    pub fn bound(&self) -> Rect {
        self.bound
    }

    pub fn extra(&self) -> &RectangleExtra {
        &self.extra
    }

    pub fn set_bound(&mut self, bound: Rect) -> bool {
        if self.bound == bound {
            return false;
        }
        self.bound = bound;
        true
    }

    pub fn set_extra(&mut self, extra: RectangleExtra) -> bool {
        if self.extra == extra {
            return false;
        }
        self.extra = extra;
        true
    }
}

/// Ordered child references. Membership changes go through `ShapeTree` so the
/// children's parent ids stay in sync.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    items: QuickList<ShapeId>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &QuickList<ShapeId> {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut QuickList<ShapeId> {
        &mut self.items
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rectangle(Rectangle),
    Text(Text),
    Line(Line),
    Group(Group),
}

impl ShapeKind {
    /// Own bound of a leaf. Groups derive theirs from children, see
    /// `ShapeTree::bound`.
    pub fn leaf_bound(&self) -> Option<Rect> {
        match self {
            ShapeKind::Rectangle(r) => Some(r.bound()),
            ShapeKind::Text(t) => Some(t.bound()),
            ShapeKind::Line(l) => Some(l.bound()),
            ShapeKind::Group(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle(_) => "Rectangle",
            ShapeKind::Text(_) => "Text",
            ShapeKind::Line(_) => "Line",
            ShapeKind::Group(_) => "Group",
        }
    }
}

/// Style payload for `ChangeExtra`. Applying one to a shape of a different
/// kind does nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeExtra {
    Rectangle(RectangleExtra),
    Text(TextExtra),
    Line(LineExtra),
}

/// A node in the shape tree
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    parent_id: Option<ShapeId>,
    version: u64,
    kind: ShapeKind,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self::with_id(ShapeId::new(), kind)
    }

    pub fn with_id(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            parent_id: None,
            version: 0,
            kind,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn parent_id(&self) -> Option<ShapeId> {
        self.parent_id
    }

    pub(crate) fn set_parent_id(&mut self, parent_id: Option<ShapeId>) {
        self.parent_id = parent_id;
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ShapeKind::Group(_))
    }

    /// Only boxes accept line connectors
    pub fn can_have_connectors(&self) -> bool {
        matches!(self.kind, ShapeKind::Rectangle(_) | ShapeKind::Text(_))
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match &self.kind {
            ShapeKind::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            ShapeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match &self.kind {
            ShapeKind::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.kind {
            ShapeKind::Group(g) => Some(g),
            _ => None,
        }
    }

    pub(crate) fn group_mut(&mut self) -> Option<&mut Group> {
        match &mut self.kind {
            ShapeKind::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Run a mutation against the shape's payload. The version is bumped
    /// exactly once when `f` reports a change.
    ///
    /// Group membership cannot change through here; `Group` exposes no public
    /// mutators.
    pub fn update(&mut self, f: impl FnOnce(&mut ShapeKind) -> bool) -> bool {
        let changed = f(&mut self.kind);
        if changed {
            self.bump_version();
        }
        changed
    }

    /// Move or resize. Lines translate to the new position; groups ignore it.
    pub fn set_bound(&mut self, bound: Rect) -> bool {
        self.update(|kind| match kind {
            ShapeKind::Rectangle(r) => r.set_bound(bound),
            ShapeKind::Text(t) => t.set_bound(bound),
            ShapeKind::Line(l) => l.set_bound(bound),
            ShapeKind::Group(_) => false,
        })
    }

    pub fn set_extra(&mut self, extra: ShapeExtra) -> bool {
        self.update(|kind| match (kind, extra) {
            (ShapeKind::Rectangle(r), ShapeExtra::Rectangle(e)) => r.set_extra(e),
            (ShapeKind::Text(t), ShapeExtra::Text(e)) => t.set_extra(e),
            (ShapeKind::Line(l), ShapeExtra::Line(e)) => l.set_extra(e),
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleRegistry;

    fn rectangle() -> Shape {
        let registry = StyleRegistry::predefined();
        Shape::new(ShapeKind::Rectangle(Rectangle::new(
            Rect::by_ltwh(0, 0, 4, 3),
            registry.default_rectangle_extra(),
        )))
    }

    #[test]
    fn test_version_bumps_only_on_change() {
        let mut shape = rectangle();
        assert_eq!(shape.version(), 0);
        assert!(!shape.set_bound(Rect::by_ltwh(0, 0, 4, 3)));
        assert_eq!(shape.version(), 0);
        assert!(shape.set_bound(Rect::by_ltwh(1, 0, 4, 3)));
        assert_eq!(shape.version(), 1);
    }

    #[test]
    fn test_mismatched_extra_is_ignored() {
        let registry = StyleRegistry::predefined();
        let mut shape = rectangle();
        assert!(!shape.set_extra(ShapeExtra::Line(registry.default_line_extra())));
        assert_eq!(shape.version(), 0);

        let mut extra = registry.default_rectangle_extra();
        extra.is_fill_enabled = true;
        assert!(shape.set_extra(ShapeExtra::Rectangle(extra)));
        assert_eq!(shape.version(), 1);
    }

    #[test]
    fn test_connectable_kinds() {
        assert!(rectangle().can_have_connectors());
        assert!(!Shape::new(ShapeKind::Group(Group::new())).can_have_connectors());
    }
}
