//! Point and area queries over the shape tree
//!
//! Zones give a coarse candidate list; every query then checks candidates
//! against the live tree, so a stale zone entry can only cost time.

use crate::zone::{SearchConfig, ZoneAddressCache, ZoneOwners};
use mono_bitmap::{is_transparent, BitmapManager};
use shape_model::{Direction, Point, Rect, ShapeId, ShapeKind, ShapeTree, StyleRegistry};

pub struct ShapeSearcher {
    config: SearchConfig,
    addresses: ZoneAddressCache,
    owners: ZoneOwners,
}

impl ShapeSearcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            addresses: ZoneAddressCache::new(),
            owners: ZoneOwners::new(),
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Index a leaf shape under the zones its glyphs cover. Groups and
    /// unknown ids are ignored.
    pub fn register(
        &mut self,
        tree: &ShapeTree,
        id: ShapeId,
        bitmaps: &mut BitmapManager,
        registry: &StyleRegistry,
    ) {
        let Some(shape) = tree.get(id) else {
            return;
        };
        if shape.is_group() {
            return;
        }
        let (Some(bound), Some(bitmap)) = (tree.bound(id), bitmaps.get_bitmap(tree, id, registry))
        else {
            return;
        };
        let zones = self.addresses.zones(
            id,
            shape.version(),
            bound.position,
            &bitmap,
            self.config.zone_shift,
        );
        self.owners.register(id, zones);
    }

    /// Drop zone entries touching `rect`
    pub fn clear(&mut self, rect: &Rect) {
        self.owners.clear(rect, self.config.zone_shift);
    }

    pub fn clear_all(&mut self) {
        self.owners.clear_all();
        self.addresses.clear();
    }

    /// Number of shapes with a cached zone set
    pub fn cached_zone_sets(&self) -> usize {
        self.addresses.len()
    }

    /// Re-index every leaf under the root. Cached zone sets and bitmaps of
    /// shapes gone from the tree are dropped.
    pub fn rebuild(
        &mut self,
        tree: &ShapeTree,
        bitmaps: &mut BitmapManager,
        registry: &StyleRegistry,
    ) {
        self.owners.clear_all();
        self.addresses.retain_live(tree);
        bitmaps.retain_live(tree);
        let leaves = tree.leaves_in_draw_order(tree.root_id());
        for id in &leaves {
            self.register(tree, *id, bitmaps, registry);
        }
        tracing::debug!(shapes = leaves.len(), "zone index rebuilt");
    }

    /// Shapes with a visible glyph at `point`, in draw order
    pub fn get_shapes(
        &self,
        point: Point,
        tree: &ShapeTree,
        bitmaps: &mut BitmapManager,
        registry: &StyleRegistry,
    ) -> Vec<ShapeId> {
        self.owners
            .owners_at(point, self.config.zone_shift)
            .iter()
            .copied()
            .filter(|id| {
                let Some(shape) = tree.get(*id) else {
                    return false;
                };
                if shape.is_group() {
                    return false;
                }
                let (Some(bound), Some(bitmap)) =
                    (tree.bound(*id), bitmaps.get_bitmap(tree, *id, registry))
                else {
                    return false;
                };
                let local = point - bound.position;
                !is_transparent(bitmap.visual(local.top, local.left))
            })
            .collect()
    }

    /// Shapes overlapping `rect`. Lines count only when one of their edges
    /// crosses it.
    pub fn get_all_shapes_in_zone(&self, rect: &Rect, tree: &ShapeTree) -> Vec<ShapeId> {
        self.owners
            .owners_in(rect, self.config.zone_shift)
            .into_iter()
            .filter(|id| match tree.get(*id).map(|s| s.kind()) {
                Some(ShapeKind::Line(line)) => line.is_overlapped(rect),
                Some(ShapeKind::Rectangle(r)) => r.bound().is_overlapped(rect),
                Some(ShapeKind::Text(t)) => t.bound().is_overlapped(rect),
                Some(ShapeKind::Group(_)) | None => false,
            })
            .collect()
    }

    /// Orientation of the box edge under `point`: `Vertical` on a left or
    /// right edge, `Horizontal` on a top or bottom one
    pub fn get_edge_direction(&self, point: Point, tree: &ShapeTree) -> Option<Direction> {
        self.owners
            .owners_at(point, self.config.zone_shift)
            .iter()
            .filter_map(|id| tree.get(*id))
            .filter(|shape| shape.can_have_connectors())
            .filter_map(|shape| shape.kind().leaf_bound())
            .find(|bound| bound.contains(point) && is_on_edge(bound, point))
            .map(|bound| {
                if point.left == bound.left() || point.left == bound.right() {
                    Direction::Vertical
                } else {
                    Direction::Horizontal
                }
            })
    }
}

impl Default for ShapeSearcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

fn is_on_edge(bound: &Rect, point: Point) -> bool {
    point.left == bound.left()
        || point.left == bound.right()
        || point.top == bound.top()
        || point.top == bound.bottom()
}
