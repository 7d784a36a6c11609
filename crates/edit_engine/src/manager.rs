//! Owner of the live shape tree and connector table

use crate::{Command, ShapeConnector};
use shape_model::{AddPosition, Shape, ShapeId, ShapeTree};
use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};

/// Holds the document and runs every edit against it.
///
/// `version` moves forward once per effective command or root replacement.
/// Observers either poll it or subscribe to receive each new value.
pub struct ShapeManager {
    tree: ShapeTree,
    connectors: ShapeConnector,
    version: u64,
    subscribers: Vec<Sender<u64>>,
}

impl ShapeManager {
    pub fn new() -> Self {
        Self::with_tree(ShapeTree::new(), ShapeConnector::new())
    }

    pub fn with_tree(tree: ShapeTree, connectors: ShapeConnector) -> Self {
        Self {
            tree,
            connectors,
            version: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn tree(&self) -> &ShapeTree {
        &self.tree
    }

    pub fn connectors(&self) -> &ShapeConnector {
        &self.connectors
    }

    pub fn root_id(&self) -> ShapeId {
        self.tree.root_id()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.tree.get(id)
    }

    /// Receive every version this manager moves to from now on
    pub fn subscribe(&mut self) -> Receiver<u64> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Run a command. Returns whether it changed anything.
    pub fn execute(&mut self, command: &dyn Command) -> bool {
        let Some(parent) = command.affected_parent(self) else {
            tracing::trace!(command = command.display_name(), "command not applicable");
            return false;
        };
        let ancestors = self.tree.ancestors(parent);
        let before = self.tree.version(parent);

        command.execute(self, parent);

        let after = self.tree.version(parent);
        if after.is_some() && before == after {
            return false;
        }
        for ancestor in ancestors {
            self.tree.bump_version(ancestor);
        }
        self.advance_version();
        tracing::debug!(
            command = command.display_name(),
            parent = %parent,
            version = self.version,
            "command executed"
        );
        true
    }

    /// Swap the whole document, e.g. when restoring history or opening a file
    pub fn replace_root(&mut self, tree: ShapeTree, connectors: ShapeConnector) {
        self.tree.replace_contents(tree);
        self.connectors = connectors;
        self.advance_version();
        tracing::debug!(
            root = %self.tree.root_id(),
            shapes = self.tree.len(),
            version = self.version,
            "root replaced"
        );
    }

    fn advance_version(&mut self) {
        self.version += 1;
        let version = self.version;
        self.subscribers.retain(|s| s.send(version).is_ok());
    }

    // ========================================================================
    // Command helpers
    // ========================================================================

    pub(crate) fn tree_mut(&mut self) -> &mut ShapeTree {
        &mut self.tree
    }

    pub(crate) fn connectors_mut(&mut self) -> &mut ShapeConnector {
        &mut self.connectors
    }

    /// Group holding `id`, if `id` is a live non-root shape
    pub(crate) fn parent_of(&self, id: ShapeId) -> Option<ShapeId> {
        self.tree.parent_id(id)
    }

    /// Mutate one shape; its parent is bumped when `f` reports a change
    pub(crate) fn update_shape(
        &mut self,
        id: ShapeId,
        parent: ShapeId,
        f: impl FnOnce(&mut Shape) -> bool,
    ) -> bool {
        let changed = self.tree.get_mut(id).is_some_and(f);
        if changed {
            self.tree.bump_version(parent);
        }
        changed
    }

    /// Bump every group above `id` that the executing command will not bump
    /// itself, so edits spilling into other groups still propagate
    pub(crate) fn touch_outside(&mut self, id: ShapeId, parent: ShapeId) {
        let covered: HashSet<ShapeId> = std::iter::once(parent)
            .chain(self.tree.ancestors(parent))
            .collect();
        for ancestor in self.tree.ancestors(id) {
            if !covered.contains(&ancestor) {
                self.tree.bump_version(ancestor);
            }
        }
    }

    /// Remove a shape, then tidy its parent chain
    pub(crate) fn remove_with_cascade(&mut self, id: ShapeId) {
        let Some(group) = self.tree.parent_id(id) else {
            return;
        };
        self.remove_subtree(id);
        self.tidy_groups_from(group);
    }

    /// Walk up from `group`: an empty group is removed and a group with a
    /// single child is dissolved into its own parent. Stops at the first
    /// group holding two or more shapes; the root is never touched.
    pub(crate) fn tidy_groups_from(&mut self, group: ShapeId) {
        let root = self.tree.root_id();
        let mut group = group;
        while group != root {
            let Some(grandparent) = self.tree.parent_id(group) else {
                break;
            };
            match self.tree.children(group).len() {
                0 => self.remove_subtree(group),
                1 => self.dissolve(group, grandparent),
                _ => break,
            }
            group = grandparent;
        }
    }

    /// Move a group's children into `parent` in place of the group, then
    /// drop the empty group
    pub(crate) fn dissolve(&mut self, group: ShapeId, parent: ShapeId) {
        let children: Vec<ShapeId> = self.tree.children(group).to_vec();
        for child in children.into_iter().rev() {
            if let Err(e) = self.tree.move_to(child, parent, AddPosition::After(group)) {
                tracing::warn!(shape = %child, "failed to move out of group: {}", e);
            }
        }
        self.remove_subtree(group);
    }

    fn remove_subtree(&mut self, id: ShapeId) {
        match self.tree.remove(id) {
            Ok(removed) => {
                for removed_id in removed {
                    self.connectors.remove_shape(removed_id);
                }
            }
            Err(e) => tracing::warn!(shape = %id, "failed to remove shape: {}", e),
        }
    }
}

impl Default for ShapeManager {
    fn default() -> Self {
        Self::new()
    }
}
