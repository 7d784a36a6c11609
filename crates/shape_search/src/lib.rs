//! Spatial queries for the board
//!
//! This crate provides:
//! - A zone index mapping coarse board squares to the shapes drawn there
//! - Point, area and box-edge queries filtered against live bitmaps
//! - Scale, anchor and edge handles for selected shapes, with pixel hit-testing

mod interaction;
mod searcher;
mod zone;

pub use interaction::*;
pub use searcher::*;
pub use zone::*;
