//! Document serialization

use crate::{MonoFile, Result, StoreError, MONO_FILE_VERSION};
use shape_model::SerializableGroup;

pub fn serialize(file: &MonoFile) -> Result<String> {
    let json = serde_json::to_string(file)?;
    Ok(json)
}

/// Parse a document. A bare root group is read as a version 0 file; files
/// newer than [`MONO_FILE_VERSION`] are rejected.
pub fn deserialize(json: &str) -> Result<MonoFile> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let is_wrapped = value.get("root").is_some() && value.get("version").is_some();
    let file = if is_wrapped {
        serde_json::from_value::<MonoFile>(value)?
    } else if value.get("ss").is_some() {
        let root: SerializableGroup = serde_json::from_value(value)?;
        MonoFile::from_legacy_root(root)
    } else {
        return Err(StoreError::InvalidFormat("missing root group".to_string()));
    };

    if file.version > MONO_FILE_VERSION {
        return Err(StoreError::UnsupportedVersion(file.version));
    }
    Ok(file)
}

/// Caller-facing loader: any failure is logged and reported as `None`
pub fn load_document(json: &str) -> Option<MonoFile> {
    match deserialize(json) {
        Ok(file) => {
            tracing::debug!(
                version = file.version,
                shapes = file.root.shapes.len(),
                connectors = file.connectors.len(),
                "document loaded"
            );
            Some(file)
        }
        Err(e) => {
            tracing::warn!("Failed to load document: {}", e);
            None
        }
    }
}
