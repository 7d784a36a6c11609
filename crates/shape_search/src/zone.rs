//! Coarse zone grid over board space
//!
//! A zone is a square of `1 << shift` cells. Board coordinates map to zone
//! indexes with an arithmetic shift, so negative coordinates land in negative
//! zones.

use mono_bitmap::MonoBitmap;
use serde::{Deserialize, Serialize};
use shape_model::{Point, Rect, ShapeId, ShapeTree};
use std::collections::{HashMap, HashSet};

pub const DEFAULT_ZONE_SHIFT: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Zone side is `1 << zone_shift` cells
    pub zone_shift: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            zone_shift: DEFAULT_ZONE_SHIFT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneAddress {
    pub row: i32,
    pub column: i32,
}

impl ZoneAddress {
    pub fn of(point: Point, shift: u32) -> Self {
        Self {
            row: zone_index(point.top, shift),
            column: zone_index(point.left, shift),
        }
    }
}

pub fn zone_index(value: i32, shift: u32) -> i32 {
    value >> shift.min(31)
}

/// Every zone address touched by a rect
fn zones_in(rect: &Rect, shift: u32) -> impl Iterator<Item = ZoneAddress> {
    let top = zone_index(rect.top(), shift);
    let bottom = zone_index(rect.bottom(), shift);
    let left = zone_index(rect.left(), shift);
    let right = zone_index(rect.right(), shift);
    (top..=bottom).flat_map(move |row| (left..=right).map(move |column| ZoneAddress { row, column }))
}

// ============================================================================
// Per-shape zone sets
// ============================================================================

#[derive(Debug, Clone)]
struct VersionedZones {
    version: u64,
    zones: HashSet<ZoneAddress>,
}

/// Zone sets of shapes, recomputed only when a shape's version moves
#[derive(Debug, Default)]
pub struct ZoneAddressCache {
    entries: HashMap<ShapeId, VersionedZones>,
}

impl ZoneAddressCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zones holding a non-transparent cell of `bitmap` drawn at `position`
    pub fn zones(
        &mut self,
        id: ShapeId,
        version: u64,
        position: Point,
        bitmap: &MonoBitmap,
        shift: u32,
    ) -> &HashSet<ZoneAddress> {
        let entry = self.entries.entry(id).or_insert_with(|| VersionedZones {
            version: u64::MAX,
            zones: HashSet::new(),
        });
        if entry.version != version {
            entry.version = version;
            entry.zones = bitmap
                .occupied_cells()
                .map(|(row, column)| {
                    ZoneAddress::of(Point::new(position.left + column, position.top + row), shift)
                })
                .collect();
        }
        &entry.zones
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop zone sets of shapes no longer in the tree
    pub fn retain_live(&mut self, tree: &ShapeTree) {
        self.entries.retain(|id, _| tree.contains(*id));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ============================================================================
// Zone → owners
// ============================================================================

/// Shape ids per zone, in registration (draw) order
#[derive(Debug, Default)]
pub struct ZoneOwners {
    owners: HashMap<ZoneAddress, Vec<ShapeId>>,
}

impl ZoneOwners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<'a>(&mut self, id: ShapeId, zones: impl IntoIterator<Item = &'a ZoneAddress>) {
        for zone in zones {
            let list = self.owners.entry(*zone).or_default();
            if !list.contains(&id) {
                list.push(id);
            }
        }
    }

    /// Forget the owners of every zone the rect touches
    pub fn clear(&mut self, rect: &Rect, shift: u32) {
        for zone in zones_in(rect, shift) {
            self.owners.remove(&zone);
        }
    }

    pub fn clear_all(&mut self) {
        self.owners.clear();
    }

    pub fn owners_at(&self, point: Point, shift: u32) -> &[ShapeId] {
        self.owners
            .get(&ZoneAddress::of(point, shift))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Owners of every zone the rect touches, first-seen order, no repeats
    pub fn owners_in(&self, rect: &Rect, shift: u32) -> Vec<ShapeId> {
        let mut seen = HashSet::new();
        zones_in(rect, shift)
            .filter_map(|zone| self.owners.get(&zone))
            .flatten()
            .filter(|id| seen.insert(**id))
            .copied()
            .collect()
    }
}
