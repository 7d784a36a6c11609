//! History and command invariants over random edit sequences

use edit_engine::{
    AddShape, ChangeBound, GroupShapes, HistoryConfig, HistoryEntry, HistoryManager, RemoveShape,
    ShapeManager,
};
use proptest::prelude::*;
use shape_model::{Rect, Rectangle, Shape, ShapeId, ShapeKind, ShapeTree, StyleRegistry};

fn rectangle(registry: &StyleRegistry, left: i32, top: i32) -> Shape {
    Shape::new(ShapeKind::Rectangle(Rectangle::new(
        Rect::by_ltwh(left, top, 3, 3),
        registry.default_rectangle_extra(),
    )))
}

fn config() -> HistoryConfig {
    HistoryConfig {
        debounce_millis: 0,
        max_entries: 1000,
    }
}

/// Every non-root group holds at least two shapes
fn groups_are_tidy(tree: &ShapeTree) -> bool {
    tree.descendants(tree.root_id())
        .into_iter()
        .filter(|id| tree.get(*id).is_some_and(|s| s.is_group()))
        .all(|id| tree.children(id).len() >= 2)
}

/// The direct child of the root that contains `id`
fn top_level(tree: &ShapeTree, id: ShapeId) -> ShapeId {
    let mut current = id;
    while let Some(parent) = tree.parent_id(current) {
        if parent == tree.root_id() {
            break;
        }
        current = parent;
    }
    current
}

proptest! {
    #[test]
    fn undo_walks_back_to_first_state(moves in prop::collection::vec((0i32..40, 0i32..40), 1..12)) {
        let registry = StyleRegistry::predefined();
        let mut manager = ShapeManager::new();
        let shape = rectangle(&registry, 0, 0);
        let id = shape.id();
        manager.execute(&AddShape::new(shape));
        let mut history = HistoryManager::new(config(), &manager);
        let first = HistoryEntry::capture(&manager);

        let mut pushed = 0;
        for (left, top) in moves {
            if manager.execute(&ChangeBound::new(id, Rect::by_ltwh(left, top, 3, 3))) {
                prop_assert!(history.push_state(&manager));
                pushed += 1;
            }
        }

        for _ in 0..pushed {
            prop_assert!(history.undo(&mut manager, &registry).unwrap());
        }
        prop_assert!(!history.undo(&mut manager, &registry).unwrap());
        prop_assert_eq!(manager.tree().bound(id), Some(Rect::by_ltwh(0, 0, 3, 3)));
        prop_assert_eq!(HistoryEntry::capture(&manager).connectors, first.connectors);

        if pushed > 0 {
            prop_assert!(history.can_redo());
            manager.execute(&ChangeBound::new(id, Rect::by_ltwh(50, 50, 3, 3)));
            history.push_state(&manager);
            prop_assert!(!history.can_redo());
        }
    }

    #[test]
    fn removal_keeps_groups_tidy(
        count in 3usize..8,
        groupings in prop::collection::vec((0usize..8, 0usize..8), 0..4),
        removals in prop::collection::vec(0usize..8, 1..6),
    ) {
        let registry = StyleRegistry::predefined();
        let mut manager = ShapeManager::new();
        let mut ids: Vec<ShapeId> = Vec::new();
        for i in 0..count {
            let shape = rectangle(&registry, i as i32 * 4, 0);
            ids.push(shape.id());
            manager.execute(&AddShape::new(shape));
        }

        for (a, b) in groupings {
            let ta = top_level(manager.tree(), ids[a % count]);
            let tb = top_level(manager.tree(), ids[b % count]);
            if ta != tb {
                manager.execute(&GroupShapes::new(vec![ta, tb]));
            }
            prop_assert!(groups_are_tidy(manager.tree()));
        }

        for index in removals {
            manager.execute(&RemoveShape::new(ids[index % count]));
            prop_assert!(groups_are_tidy(manager.tree()));
        }
    }
}
