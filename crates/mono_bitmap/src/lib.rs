//! Mono Bitmap - Character-grid rasterization of shapes
//!
//! Each shape kind has a pure factory turning geometry and style into a
//! [`MonoBitmap`] sized to the shape's bound. [`BitmapManager`] caches the
//! results by shape version and composes groups.

mod bitmap;
mod line_factory;
mod manager;
mod point_char;
mod rectangle_factory;
mod text_factory;

pub use bitmap::*;
pub use line_factory::*;
pub use manager::*;
pub use point_char::*;
pub use rectangle_factory::*;
pub use text_factory::*;
