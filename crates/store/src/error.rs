//! Error types for storage operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Shape model error: {0}")]
    ShapeModel(#[from] shape_model::ShapeModelError),

    #[error("Edit error: {0}")]
    Edit(#[from] edit_engine::EditError),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
