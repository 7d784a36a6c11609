//! Persisted shape forms
//!
//! Keys are kept short since documents are stored as JSON strings: geometry
//! is written as `|`-separated strings (`"l|t|w|h"`, `"H|l|t"`), shapes are
//! tagged by a single letter.

use crate::{
    AddPosition, DirectedPoint, Group, Line, LineExtra, Rect, Rectangle, RectangleExtra, Result,
    Shape, ShapeId, ShapeKind, ShapeTree, StyleRegistry, Text, TextExtra,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SerializableShape {
    #[serde(rename = "R")]
    Rectangle(SerializableRectangle),
    #[serde(rename = "T")]
    Text(SerializableText),
    #[serde(rename = "L")]
    Line(SerializableLine),
    #[serde(rename = "G")]
    Group(SerializableGroup),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableRectangle {
    #[serde(rename = "i", default)]
    pub id: Option<String>,
    #[serde(rename = "idtemp", default)]
    pub is_id_temporary: bool,
    #[serde(rename = "v", default)]
    pub version: u64,
    #[serde(rename = "b", with = "string_format")]
    pub bound: Rect,
    #[serde(rename = "e")]
    pub extra: SerializableRectExtra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableText {
    #[serde(rename = "i", default)]
    pub id: Option<String>,
    #[serde(rename = "idtemp", default)]
    pub is_id_temporary: bool,
    #[serde(rename = "v", default)]
    pub version: u64,
    #[serde(rename = "b", with = "string_format")]
    pub bound: Rect,
    #[serde(rename = "t")]
    pub text: String,
    #[serde(rename = "e")]
    pub extra: SerializableTextExtra,
    #[serde(rename = "te", default = "default_true")]
    pub is_text_editable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLine {
    #[serde(rename = "i", default)]
    pub id: Option<String>,
    #[serde(rename = "idtemp", default)]
    pub is_id_temporary: bool,
    #[serde(rename = "v", default)]
    pub version: u64,
    #[serde(rename = "ps", with = "string_format")]
    pub start: DirectedPoint,
    #[serde(rename = "pe", with = "string_format")]
    pub end: DirectedPoint,
    #[serde(rename = "jps", with = "point_list")]
    pub joint_points: Vec<crate::Point>,
    #[serde(rename = "e")]
    pub extra: SerializableLineExtra,
    #[serde(rename = "em", default)]
    pub was_moving_edge: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableGroup {
    #[serde(rename = "i", default)]
    pub id: Option<String>,
    #[serde(rename = "idtemp", default)]
    pub is_id_temporary: bool,
    #[serde(rename = "v", default)]
    pub version: u64,
    #[serde(rename = "ss", default)]
    pub shapes: Vec<SerializableShape>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableRectExtra {
    #[serde(rename = "fe")]
    pub is_fill_enabled: bool,
    #[serde(rename = "fu")]
    pub user_selected_fill_style_id: String,
    #[serde(rename = "be")]
    pub is_border_enabled: bool,
    #[serde(rename = "bu")]
    pub user_selected_border_style_id: String,
    #[serde(rename = "du")]
    pub dash_pattern: String,
    #[serde(rename = "rc", default)]
    pub corner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableTextExtra {
    #[serde(rename = "be")]
    pub bound_extra: SerializableRectExtra,
    #[serde(rename = "tha")]
    pub text_horizontal_align: u8,
    #[serde(rename = "tva")]
    pub text_vertical_align: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLineExtra {
    #[serde(rename = "se", default = "default_true")]
    pub is_stroke_enabled: bool,
    #[serde(rename = "su")]
    pub user_selected_stroke_style_id: String,
    #[serde(rename = "ase", default)]
    pub is_start_anchor_enabled: bool,
    #[serde(rename = "asu")]
    pub user_selected_start_anchor_id: String,
    #[serde(rename = "aee", default)]
    pub is_end_anchor_enabled: bool,
    #[serde(rename = "aeu")]
    pub user_selected_end_anchor_id: String,
    #[serde(rename = "du")]
    pub dash_pattern: String,
    #[serde(rename = "rc", default)]
    pub is_rounded_corner: bool,
}

fn default_true() -> bool {
    true
}

/// Id to use when restoring: temporary or missing ids get a fresh one
fn actual_id(id: &Option<String>, is_id_temporary: bool) -> ShapeId {
    if is_id_temporary {
        return ShapeId::new();
    }
    id.as_deref()
        .and_then(ShapeId::from_string)
        .unwrap_or_default()
}

impl SerializableShape {
    pub fn id(&self) -> Option<&str> {
        match self {
            SerializableShape::Rectangle(s) => s.id.as_deref(),
            SerializableShape::Text(s) => s.id.as_deref(),
            SerializableShape::Line(s) => s.id.as_deref(),
            SerializableShape::Group(s) => s.id.as_deref(),
        }
    }
}

// ============================================================================
// Tree conversion
// ============================================================================

impl ShapeTree {
    /// Serialize a shape and its subtree; `None` for unknown ids
    pub fn to_serializable(&self, id: ShapeId) -> Option<SerializableShape> {
        let shape = self.get(id)?;
        let serialized = match shape.kind() {
            ShapeKind::Rectangle(r) => SerializableShape::Rectangle(SerializableRectangle {
                id: Some(id.to_string()),
                is_id_temporary: false,
                version: shape.version(),
                bound: r.bound(),
                extra: r.extra().to_serializable(),
            }),
            ShapeKind::Text(t) => SerializableShape::Text(SerializableText {
                id: Some(id.to_string()),
                is_id_temporary: false,
                version: shape.version(),
                bound: t.bound(),
                text: t.text().to_string(),
                extra: t.extra().to_serializable(),
                is_text_editable: t.is_text_editable(),
            }),
            ShapeKind::Line(l) => SerializableShape::Line(SerializableLine {
                id: Some(id.to_string()),
                is_id_temporary: false,
                version: shape.version(),
                start: l.start(),
                end: l.end(),
                joint_points: l.joint_points().to_vec(),
                extra: l.extra().to_serializable(),
                was_moving_edge: l.was_moving_edge(),
            }),
            ShapeKind::Group(_) => SerializableShape::Group(self.group_to_serializable(id)?),
        };
        Some(serialized)
    }

    /// Serialize the whole tree as its root group
    pub fn root_to_serializable(&self) -> SerializableGroup {
        self.group_to_serializable(self.root_id())
            .unwrap_or_else(|| SerializableGroup {
                id: Some(self.root_id().to_string()),
                is_id_temporary: false,
                version: 0,
                shapes: Vec::new(),
            })
    }

    fn group_to_serializable(&self, id: ShapeId) -> Option<SerializableGroup> {
        let shape = self.get(id)?;
        shape.as_group()?;
        Some(SerializableGroup {
            id: Some(id.to_string()),
            is_id_temporary: false,
            version: shape.version(),
            shapes: self
                .children(id)
                .iter()
                .filter_map(|child| self.to_serializable(*child))
                .collect(),
        })
    }

    /// Rebuild a tree from a serialized root group
    pub fn from_serializable(root: &SerializableGroup, registry: &StyleRegistry) -> Result<Self> {
        let mut tree = ShapeTree::with_root_id(actual_id(&root.id, root.is_id_temporary));
        let root_id = tree.root_id();
        for child in &root.shapes {
            tree.insert_serializable(child, root_id, AddPosition::Last, registry)?;
        }
        if let Some(shape) = tree.get_mut(root_id) {
            shape.set_version(root.version);
        }
        Ok(tree)
    }

    /// Restore a serialized shape (and its subtree) under `parent`
    pub fn insert_serializable(
        &mut self,
        serialized: &SerializableShape,
        parent: ShapeId,
        position: AddPosition<ShapeId>,
        registry: &StyleRegistry,
    ) -> Result<ShapeId> {
        let (mut shape, children) = match serialized {
            SerializableShape::Rectangle(s) => {
                let rectangle = Rectangle::new(
                    s.bound,
                    RectangleExtra::from_serializable(&s.extra, registry),
                );
                let mut shape = Shape::with_id(
                    actual_id(&s.id, s.is_id_temporary),
                    ShapeKind::Rectangle(rectangle),
                );
                shape.set_version(s.version);
                (shape, None)
            }
            SerializableShape::Text(s) => {
                let mut text = Text::new(
                    s.bound,
                    TextExtra::from_serializable(&s.extra, registry),
                    s.is_text_editable,
                );
                text.set_text(&s.text);
                let mut shape =
                    Shape::with_id(actual_id(&s.id, s.is_id_temporary), ShapeKind::Text(text));
                shape.set_version(s.version);
                (shape, None)
            }
            SerializableShape::Line(s) => {
                let line = Line::restore(
                    s.start,
                    s.end,
                    s.joint_points.clone(),
                    s.was_moving_edge,
                    LineExtra::from_serializable(&s.extra, registry),
                );
                let mut shape =
                    Shape::with_id(actual_id(&s.id, s.is_id_temporary), ShapeKind::Line(line));
                shape.set_version(s.version);
                (shape, None)
            }
            SerializableShape::Group(s) => {
                let mut shape = Shape::with_id(
                    actual_id(&s.id, s.is_id_temporary),
                    ShapeKind::Group(Group::new()),
                );
                shape.set_version(s.version);
                (shape, Some(&s.shapes))
            }
        };

        // A colliding id (e.g. pasting a copy next to its source) gets a new one.
        if self.contains(shape.id()) {
            shape = Shape::with_id(ShapeId::new(), shape.kind().clone());
        }
        let version = shape.version();
        let id = self.insert(shape, parent, position)?;
        for child in children.into_iter().flatten() {
            self.insert_serializable(child, id, AddPosition::Last, registry)?;
        }
        // Inserting children bumped the group; keep the persisted version.
        if let Some(shape) = self.get_mut(id) {
            shape.set_version(version);
        }
        Ok(id)
    }
}

// ============================================================================
// Field formats
// ============================================================================

/// Any `Display` + `FromStr` value as a JSON string
pub mod string_format {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

pub mod point_list {
    use crate::Point;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error> {
        let strings: Vec<String> = points.iter().map(Point::to_string).collect();
        strings.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
        let strings = Vec::<String>::deserialize(deserializer)?;
        strings
            .iter()
            .map(|s| s.parse().map_err(de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectedPoint, Point};

    fn sample_tree(registry: &StyleRegistry) -> ShapeTree {
        let mut tree = ShapeTree::new();
        let root = tree.root_id();
        tree.add(
            ShapeKind::Rectangle(Rectangle::new(
                Rect::by_ltwh(1, 2, 5, 4),
                registry.default_rectangle_extra(),
            )),
            root,
            AddPosition::Last,
        )
        .unwrap();
        let group = tree.add(ShapeKind::Group(Group::new()), root, AddPosition::Last).unwrap();
        let mut text = Text::new(Rect::by_ltwh(0, 0, 7, 5), registry.default_text_extra(), true);
        text.set_text("hello");
        tree.add(ShapeKind::Text(text), group, AddPosition::Last).unwrap();
        tree.add(
            ShapeKind::Line(Line::new(
                DirectedPoint::horizontal(0, 0),
                DirectedPoint::vertical(4, 6),
                registry.default_line_extra(),
            )),
            group,
            AddPosition::Last,
        )
        .unwrap();
        tree
    }

    #[test]
    fn test_wire_format() {
        let registry = StyleRegistry::predefined();
        let tree = sample_tree(&registry);
        let json = serde_json::to_value(tree.root_to_serializable()).unwrap();

        let first = &json["ss"][0];
        assert_eq!(first["type"], "R");
        assert_eq!(first["b"], "1|2|5|4");
        assert_eq!(json["ss"][1]["type"], "G");
        let line = &json["ss"][1]["ss"][1];
        assert_eq!(line["ps"], "H|0|0");
        assert_eq!(line["pe"], "V|4|6");
        assert_eq!(line["jps"][0], "0|0");
    }

    #[test]
    fn test_tree_round_trip() {
        let registry = StyleRegistry::predefined();
        let tree = sample_tree(&registry);
        let serialized = tree.root_to_serializable();
        let json = serde_json::to_string(&serialized).unwrap();

        let parsed: SerializableGroup = serde_json::from_str(&json).unwrap();
        let restored = ShapeTree::from_serializable(&parsed, &registry).unwrap();
        assert_eq!(restored.root_id(), tree.root_id());
        assert_eq!(restored.root_to_serializable(), serialized);
        assert_eq!(restored.len(), tree.len());
    }

    #[test]
    fn test_missing_or_temporary_id_gets_new_one() {
        let registry = StyleRegistry::predefined();
        let json = r#"{"ss":[
            {"type":"R","b":"0|0|3|3","e":{"fe":false,"fu":"F1","be":true,"bu":"S1","du":"1|0|0"}},
            {"type":"R","i":"not-a-uuid","idtemp":true,"b":"0|0|3|3","e":{"fe":false,"fu":"F1","be":true,"bu":"S1","du":"1|0|0"}}
        ]}"#;
        let parsed: SerializableGroup = serde_json::from_str(json).unwrap();
        let tree = ShapeTree::from_serializable(&parsed, &registry).unwrap();
        let children = tree.children(tree.root_id());
        assert_eq!(children.len(), 2);
        assert_ne!(children[0], children[1]);
    }

    #[test]
    fn test_edge_edited_line_keeps_points() {
        let registry = StyleRegistry::predefined();
        let json = r#"{"type":"L","ps":"H|0|0","pe":"H|8|0","jps":["0|0","0|3","8|3","8|0"],
            "e":{"su":"S1","asu":"A1","aeu":"A1","du":"1|0|0"},"em":true}"#;
        let parsed: SerializableShape = serde_json::from_str(json).unwrap();
        let mut tree = ShapeTree::new();
        let root = tree.root_id();
        let id = tree
            .insert_serializable(&parsed, root, AddPosition::Last, &registry)
            .unwrap();
        let line = tree.get(id).and_then(Shape::as_line).unwrap();
        assert_eq!(line.joint_points().len(), 4);
        assert_eq!(line.joint_points()[1], Point::new(0, 3));
        assert!(line.extra().is_stroke_enabled);
        assert!(!line.extra().is_start_anchor_enabled);
    }

    #[test]
    fn test_bad_geometry_is_an_error() {
        let json = r#"{"type":"R","b":"0|0|x","e":{"fe":false,"fu":"F1","be":true,"bu":"S1","du":""}}"#;
        assert!(serde_json::from_str::<SerializableShape>(json).is_err());
    }
}
