//! Command protocol for shape edits

use crate::ShapeManager;
use shape_model::ShapeId;
use std::fmt;

/// A single edit applied through [`ShapeManager::execute`].
///
/// A command first names the group that directly holds the shapes it
/// touches. `None` means the command does not apply (unknown shape, bad
/// selection) and nothing runs. Otherwise `execute` mutates the manager and
/// bumps that group's version if and only if something actually changed.
pub trait Command: fmt::Debug {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId>;

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId);

    fn display_name(&self) -> &str;
}
