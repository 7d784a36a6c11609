//! Snapshot-based undo/redo
//!
//! Every settled manager version is serialized and stacked. Undo and redo
//! swap the whole document for a stored snapshot instead of inverting
//! individual commands.

use crate::{Result, SerializableLineConnector, ShapeConnector, ShapeManager};
use serde::{Deserialize, Serialize};
use shape_model::{SerializableGroup, ShapeTree, StyleRegistry};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Quiet period after a version change before it is recorded
    pub debounce_millis: u64,
    /// Oldest snapshots are dropped beyond this many
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            debounce_millis: 300,
            max_entries: 100,
        }
    }
}

impl HistoryConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_millis)
    }
}

/// One recorded document state
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub root: SerializableGroup,
    pub connectors: Vec<SerializableLineConnector>,
}

impl HistoryEntry {
    pub fn capture(manager: &ShapeManager) -> Self {
        Self {
            root: manager.tree().root_to_serializable(),
            connectors: manager.connectors().to_serializable(),
        }
    }

    fn restore(&self, manager: &mut ShapeManager, registry: &StyleRegistry) -> Result<()> {
        let tree = ShapeTree::from_serializable(&self.root, registry)?;
        let connectors = ShapeConnector::from_serializable(&self.connectors)?;
        manager.replace_root(tree, connectors);
        Ok(())
    }
}

/// Undo/redo stacks fed by manager version changes.
///
/// The bottom of the undo stack is the state the history started from and is
/// never popped. Versions produced by restoring a snapshot are not recorded
/// again.
pub struct HistoryManager {
    config: HistoryConfig,
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    pending: Option<(u64, Instant)>,
    skipped_version: Option<u64>,
    is_editing: bool,
}

impl HistoryManager {
    /// Start recording from the manager's current state
    pub fn new(config: HistoryConfig, manager: &ShapeManager) -> Self {
        Self {
            config,
            undo_stack: vec![HistoryEntry::capture(manager)],
            redo_stack: Vec::new(),
            pending: None,
            skipped_version: None,
            is_editing: false,
        }
    }

    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Note a new manager version. It is recorded by a later [`flush`] once
    /// no newer version has arrived for the debounce period.
    ///
    /// [`flush`]: HistoryManager::flush
    pub fn register_version(&mut self, version: u64, now: Instant) {
        if self.is_editing || self.skipped_version == Some(version) {
            return;
        }
        self.pending = Some((version, now));
    }

    /// Record the pending version if it has settled. Returns whether a new
    /// entry was pushed.
    pub fn flush(&mut self, manager: &ShapeManager, now: Instant) -> bool {
        let Some((version, registered_at)) = self.pending else {
            return false;
        };
        if now.saturating_duration_since(registered_at) < self.config.debounce() {
            return false;
        }
        self.pending = None;
        if manager.version() != version {
            return false;
        }
        self.push_state(manager)
    }

    /// Record the manager's current state unless it equals the top entry.
    /// Any redo history is discarded.
    pub fn push_state(&mut self, manager: &ShapeManager) -> bool {
        let entry = HistoryEntry::capture(manager);
        if self.undo_stack.last() == Some(&entry) {
            return false;
        }
        self.undo_stack.push(entry);
        self.redo_stack.clear();
        while self.undo_stack.len() > self.config.max_entries.max(1) {
            self.undo_stack.remove(0);
        }
        tracing::debug!(
            version = manager.version(),
            entries = self.undo_stack.len(),
            "history pushed"
        );
        true
    }

    /// Step back one entry. Returns `Ok(false)` when only the initial state
    /// is left.
    pub fn undo(&mut self, manager: &mut ShapeManager, registry: &StyleRegistry) -> Result<bool> {
        if !self.can_undo() {
            return Ok(false);
        }
        let Some(current) = self.undo_stack.pop() else {
            return Ok(false);
        };
        self.redo_stack.push(current);
        if let Some(previous) = self.undo_stack.last() {
            previous.restore(manager, registry)?;
        }
        self.after_restore(manager);
        tracing::debug!(
            version = manager.version(),
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "history undo"
        );
        Ok(true)
    }

    pub fn redo(&mut self, manager: &mut ShapeManager, registry: &StyleRegistry) -> Result<bool> {
        let Some(next) = self.redo_stack.pop() else {
            return Ok(false);
        };
        next.restore(manager, registry)?;
        self.undo_stack.push(next);
        self.after_restore(manager);
        tracing::debug!(
            version = manager.version(),
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "history redo"
        );
        Ok(true)
    }

    fn after_restore(&mut self, manager: &ShapeManager) {
        self.skipped_version = Some(manager.version());
        self.pending = None;
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// While editing text in place, version changes are not recorded
    pub fn set_editing(&mut self, is_editing: bool) {
        self.is_editing = is_editing;
        if is_editing {
            self.pending = None;
        }
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    /// Forget everything and restart from the manager's current state
    pub fn clear(&mut self, manager: &ShapeManager) {
        self.undo_stack = vec![HistoryEntry::capture(manager)];
        self.redo_stack.clear();
        self.pending = None;
        self.skipped_version = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AddShape, ChangeBound};
    use shape_model::{Rect, Rectangle, Shape, ShapeKind};

    fn rectangle(registry: &StyleRegistry, bound: Rect) -> Shape {
        Shape::new(ShapeKind::Rectangle(Rectangle::new(
            bound,
            registry.default_rectangle_extra(),
        )))
    }

    #[test]
    fn test_flush_waits_for_debounce() {
        let registry = StyleRegistry::predefined();
        let mut manager = ShapeManager::new();
        let mut history = HistoryManager::new(HistoryConfig::default(), &manager);
        let start = Instant::now();

        manager.execute(&AddShape::new(rectangle(&registry, Rect::by_ltwh(0, 0, 3, 3))));
        history.register_version(manager.version(), start);

        assert!(!history.flush(&manager, start + Duration::from_millis(100)));
        assert!(history.flush(&manager, start + Duration::from_millis(300)));
        assert!(history.can_undo());
    }

    #[test]
    fn test_stale_pending_version_is_dropped() {
        let registry = StyleRegistry::predefined();
        let mut manager = ShapeManager::new();
        let mut history = HistoryManager::new(HistoryConfig::default(), &manager);
        let start = Instant::now();

        manager.execute(&AddShape::new(rectangle(&registry, Rect::by_ltwh(0, 0, 3, 3))));
        history.register_version(manager.version(), start);
        manager.execute(&AddShape::new(rectangle(&registry, Rect::by_ltwh(5, 5, 3, 3))));

        assert!(!history.flush(&manager, start + Duration::from_secs(1)));
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_undo_redo_restores_bound() {
        let registry = StyleRegistry::predefined();
        let mut manager = ShapeManager::new();
        let shape = rectangle(&registry, Rect::by_ltwh(0, 0, 3, 3));
        let id = shape.id();
        manager.execute(&AddShape::new(shape));
        let mut history = HistoryManager::new(HistoryConfig::default(), &manager);

        manager.execute(&ChangeBound::new(id, Rect::by_ltwh(4, 4, 6, 2)));
        assert!(history.push_state(&manager));

        assert!(history.undo(&mut manager, &registry).unwrap());
        assert_eq!(manager.tree().bound(id), Some(Rect::by_ltwh(0, 0, 3, 3)));
        assert!(!history.can_undo());
        assert!(!history.undo(&mut manager, &registry).unwrap());

        assert!(history.redo(&mut manager, &registry).unwrap());
        assert_eq!(manager.tree().bound(id), Some(Rect::by_ltwh(4, 4, 6, 2)));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_restored_version_is_not_recorded() {
        let registry = StyleRegistry::predefined();
        let mut manager = ShapeManager::new();
        let mut history = HistoryManager::new(HistoryConfig::default(), &manager);
        let start = Instant::now();

        manager.execute(&AddShape::new(rectangle(&registry, Rect::by_ltwh(0, 0, 3, 3))));
        history.push_state(&manager);
        history.undo(&mut manager, &registry).unwrap();

        history.register_version(manager.version(), start);
        assert!(!history.flush(&manager, start + Duration::from_secs(1)));
        assert!(history.can_redo());
    }

    #[test]
    fn test_identical_state_not_pushed() {
        let manager = ShapeManager::new();
        let mut history = HistoryManager::new(HistoryConfig::default(), &manager);
        assert!(!history.push_state(&manager));
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_max_entries_drops_oldest() {
        let registry = StyleRegistry::predefined();
        let mut manager = ShapeManager::new();
        let config = HistoryConfig {
            debounce_millis: 0,
            max_entries: 3,
        };
        let mut history = HistoryManager::new(config, &manager);
        for i in 0..5 {
            manager.execute(&AddShape::new(rectangle(&registry, Rect::by_ltwh(i * 4, 0, 3, 3))));
            history.push_state(&manager);
        }
        assert_eq!(history.undo_len(), 3);
    }

    #[test]
    fn test_editing_suppresses_recording() {
        let registry = StyleRegistry::predefined();
        let mut manager = ShapeManager::new();
        let mut history = HistoryManager::new(HistoryConfig::default(), &manager);
        let start = Instant::now();

        history.set_editing(true);
        manager.execute(&AddShape::new(rectangle(&registry, Rect::by_ltwh(0, 0, 3, 3))));
        history.register_version(manager.version(), start);
        assert!(!history.flush(&manager, start + Duration::from_secs(1)));

        history.set_editing(false);
        history.register_version(manager.version(), start);
        assert!(history.flush(&manager, start + Duration::from_secs(1)));
    }
}
