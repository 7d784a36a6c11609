//! Error types for the editing layer
//!
//! Commands themselves never fail; these cover restoring persisted state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Shape model error: {0}")]
    ShapeModel(#[from] shape_model::ShapeModelError),

    #[error("Invalid connector: {0}")]
    InvalidConnector(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EditError>;
