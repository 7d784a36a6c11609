//! Version-keyed bitmap cache
//!
//! A shape's bitmap is reused while its (id, version) pair is unchanged.
//! Groups are composed from their children's cached bitmaps; a group's
//! version moves whenever a descendant changes, so its entry stays valid too.

use crate::{line_bitmap, rectangle_bitmap, text_bitmap, BitmapBuilder, MonoBitmap};
use shape_model::{Rect, ShapeId, ShapeKind, ShapeTree, StyleRegistry};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
struct VersionedBitmap {
    version: u64,
    bitmap: Rc<MonoBitmap>,
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitmapCacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl BitmapCacheStats {
    /// Hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }
}

#[derive(Debug, Default)]
pub struct BitmapManager {
    cache: HashMap<ShapeId, VersionedBitmap>,
    stats: BitmapCacheStats,
}

impl BitmapManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> BitmapCacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn invalidate(&mut self, id: ShapeId) {
        self.cache.remove(&id);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Drop entries for shapes no longer in the tree
    pub fn retain_live(&mut self, tree: &ShapeTree) {
        self.cache.retain(|id, _| tree.contains(*id));
    }

    /// The shape's bitmap, drawn with its top-left at the shape's bound
    /// position. `None` for unknown ids.
    pub fn get_bitmap(
        &mut self,
        tree: &ShapeTree,
        id: ShapeId,
        registry: &StyleRegistry,
    ) -> Option<Rc<MonoBitmap>> {
        let shape = tree.get(id)?;
        let version = shape.version();
        if let Some(cached) = self.cache.get(&id).filter(|c| c.version == version) {
            self.stats.hits += 1;
            return Some(Rc::clone(&cached.bitmap));
        }
        self.stats.misses += 1;

        let bitmap = match shape.kind() {
            ShapeKind::Rectangle(r) => rectangle_bitmap(r.bound().size, r.extra(), registry),
            ShapeKind::Text(t) => text_bitmap(
                t.bound().size,
                t.renderable_text(),
                t.extra(),
                t.is_text_editing(),
                registry,
            ),
            ShapeKind::Line(l) => line_bitmap(&l.reduced_joint_points(), l.extra(), registry),
            ShapeKind::Group(_) => self.compose(tree, tree.children(id), tree.bound(id)?, registry),
        };
        tracing::trace!(shape = %id, version, "bitmap rebuilt");

        let bitmap = Rc::new(bitmap);
        self.cache.insert(
            id,
            VersionedBitmap {
                version,
                bitmap: Rc::clone(&bitmap),
            },
        );
        Some(bitmap)
    }

    /// Draw `ids` in order onto a canvas covering `window`; later shapes win
    fn compose(
        &mut self,
        tree: &ShapeTree,
        ids: &[ShapeId],
        window: Rect,
        registry: &StyleRegistry,
    ) -> MonoBitmap {
        let mut builder = BitmapBuilder::new(window.width(), window.height());
        for id in ids {
            let (Some(bound), Some(bitmap)) = (tree.bound(*id), self.get_bitmap(tree, *id, registry)) else {
                continue;
            };
            builder.fill(bound.top() - window.top(), bound.left() - window.left(), &bitmap);
        }
        builder.build()
    }

    /// Plain-text rendering of the given shapes over their combined bound.
    /// Rows keep their trailing spaces; empty input gives an empty string.
    pub fn export_text(&mut self, tree: &ShapeTree, ids: &[ShapeId], registry: &StyleRegistry) -> String {
        let Some(window) = ids
            .iter()
            .filter_map(|id| tree.bound(*id))
            .reduce(|acc, b| acc.union(&b))
        else {
            return String::new();
        };
        self.compose(tree, ids, window, registry).to_string()
    }
}
