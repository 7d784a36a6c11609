//! Error types for shape model operations

use crate::ShapeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShapeModelError {
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),

    #[error("Not a group: {0}")]
    NotAGroup(ShapeId),

    #[error("Tree structure error: {0}")]
    TreeStructureError(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShapeModelError>;
