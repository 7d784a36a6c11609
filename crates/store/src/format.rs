//! Document file format
//!
//! Version history:
//! - 0: a bare serialized root group, no wrapper
//! - 1: `root`, `extra { name, offset }`, `version`, `modified_timestamp_millis`
//! - 2: adds `connectors`

use crate::Result;
use chrono::{DateTime, Utc};
use edit_engine::{SerializableLineConnector, ShapeConnector, ShapeManager};
use serde::{Deserialize, Serialize};
use shape_model::{Point, SerializableGroup, ShapeTree, StyleRegistry};

/// Newest file version this crate reads and the one it writes
pub const MONO_FILE_VERSION: u32 = 2;

/// Document-level metadata that is not part of the shape tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentExtra {
    pub name: String,
    /// Board scroll position when the document was saved
    pub offset: Point,
}

impl DocumentExtra {
    pub fn new(name: impl Into<String>, offset: Point) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonoFile {
    pub root: SerializableGroup,
    #[serde(default)]
    pub connectors: Vec<SerializableLineConnector>,
    #[serde(default)]
    pub extra: DocumentExtra,
    pub version: u32,
    #[serde(default)]
    pub modified_timestamp_millis: i64,
}

impl MonoFile {
    /// A current-version file stamped with the present time
    pub fn new(
        root: SerializableGroup,
        connectors: Vec<SerializableLineConnector>,
        extra: DocumentExtra,
    ) -> Self {
        Self::with_timestamp(root, connectors, extra, Utc::now().timestamp_millis())
    }

    pub fn with_timestamp(
        root: SerializableGroup,
        connectors: Vec<SerializableLineConnector>,
        extra: DocumentExtra,
        modified_timestamp_millis: i64,
    ) -> Self {
        Self {
            root,
            connectors,
            extra,
            version: MONO_FILE_VERSION,
            modified_timestamp_millis,
        }
    }

    /// Snapshot a manager's document
    pub fn from_manager(manager: &ShapeManager, extra: DocumentExtra) -> Self {
        Self::new(
            manager.tree().root_to_serializable(),
            manager.connectors().to_serializable(),
            extra,
        )
    }

    /// Wrap a version 0 document, which stored only its root group
    pub fn from_legacy_root(root: SerializableGroup) -> Self {
        Self {
            root,
            connectors: Vec::new(),
            extra: DocumentExtra::default(),
            version: 0,
            modified_timestamp_millis: 0,
        }
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.modified_timestamp_millis)
    }

    /// Rebuild the live tree and connector table
    pub fn restore(&self, registry: &StyleRegistry) -> Result<(ShapeTree, ShapeConnector)> {
        let tree = ShapeTree::from_serializable(&self.root, registry)?;
        let connectors = ShapeConnector::from_serializable(&self.connectors)?;
        Ok((tree, connectors))
    }

    /// Replace the manager's document with this file's content
    pub fn apply_to(&self, manager: &mut ShapeManager, registry: &StyleRegistry) -> Result<()> {
        let (tree, connectors) = self.restore(registry)?;
        manager.replace_root(tree, connectors);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;
    use shape_model::{LineAnchor, PointF};

    #[test]
    fn test_new_file_is_current_version() {
        let file = MonoFile::from_manager(&ShapeManager::new(), DocumentExtra::default());
        assert_eq!(file.version, MONO_FILE_VERSION);
        assert!(file.modified_at().is_some());
    }

    #[test]
    fn test_modified_at_from_millis() {
        let file = MonoFile::with_timestamp(
            ShapeTree::new().root_to_serializable(),
            Vec::new(),
            DocumentExtra::new("Test", Point::new(30, 50)),
            1_000,
        );
        let at = file.modified_at().unwrap();
        assert_eq!(at.timestamp_millis(), 1_000);
    }

    #[test]
    fn test_apply_replaces_document() {
        let registry = StyleRegistry::predefined();
        let source = ShapeManager::new();
        let file = MonoFile::from_manager(&source, DocumentExtra::default());

        let mut target = ShapeManager::new();
        file.apply_to(&mut target, &registry).unwrap();
        assert_eq!(target.root_id(), source.root_id());
        assert_eq!(target.version(), 1);
    }

    #[test]
    fn test_restore_rejects_bad_connector_id() {
        let root = ShapeTree::new().root_to_serializable();
        let connector = SerializableLineConnector {
            line_id: "not-a-shape".to_string(),
            anchor: LineAnchor::Start,
            target_id: root.id.clone().unwrap_or_default(),
            ratio: PointF::ZERO,
            offset: Point::ZERO,
        };
        let file = MonoFile::with_timestamp(root, vec![connector], DocumentExtra::default(), 0);

        let err = file.restore(&StyleRegistry::predefined()).unwrap_err();
        assert!(matches!(err, StoreError::Edit(_)));

        let mut manager = ShapeManager::new();
        let version = manager.version();
        assert!(file.apply_to(&mut manager, &StyleRegistry::predefined()).is_err());
        assert_eq!(manager.version(), version);
    }
}
