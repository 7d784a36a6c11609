//! Shape Model - Shapes, geometry, and line routing for the character board
//!
//! Shapes live in a `ShapeTree`: an id → shape table where groups hold ordered
//! child ids and children point back at their parent. Every shape carries a
//! version that increases once per effective mutation; derived data (line
//! joint points, wrapped text) is recomputed as part of that mutation.

mod error;
mod extra;
mod geometry;
mod line;
mod line_router;
mod quick_list;
mod registry;
mod serialization;
mod shape;
mod shape_id;
mod shape_tree;
mod style;
mod text;

pub use error::*;
pub use extra::*;
pub use geometry::*;
pub use line::*;
pub use line_router::*;
pub use quick_list::*;
pub use registry::*;
pub use serialization::*;
pub use shape::*;
pub use shape_id::*;
pub use shape_tree::*;
pub use style::*;
pub use text::*;
