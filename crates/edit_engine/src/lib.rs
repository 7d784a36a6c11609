//! Edit Engine - Commands, shape manager, connectors, and undo/redo
//!
//! All document mutation goes through [`ShapeManager::execute`]. Commands
//! resolve the group they touch, mutate it, and bump its version only when
//! something really changed; the manager then propagates the bump to every
//! ancestor and advances its own version. History snapshots the document on
//! settled versions.

mod command;
mod connector;
mod error;
mod general_commands;
mod history;
mod line_commands;
mod manager;
mod shape_commands;
mod text_commands;
mod two_way_map;

pub use command::*;
pub use connector::*;
pub use error::*;
pub use general_commands::*;
pub use history::*;
pub use line_commands::*;
pub use manager::*;
pub use shape_commands::*;
pub use text_commands::*;
pub use two_way_map::*;
