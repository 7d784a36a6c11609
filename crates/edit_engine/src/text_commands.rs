//! Text shape content and editing state

use crate::{Command, ShapeManager};
use shape_model::{ShapeId, ShapeKind};

fn text_parent(manager: &ShapeManager, id: ShapeId) -> Option<ShapeId> {
    manager.get(id)?.as_text()?;
    manager.parent_of(id)
}

#[derive(Debug, Clone)]
pub struct ChangeText {
    pub shape_id: ShapeId,
    pub text: String,
}

impl ChangeText {
    pub fn new(shape_id: ShapeId, text: impl Into<String>) -> Self {
        Self {
            shape_id,
            text: text.into(),
        }
    }
}

impl Command for ChangeText {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        text_parent(manager, self.shape_id)
    }

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId) {
        let text = self.text.as_str();
        manager.update_shape(self.shape_id, parent, |shape| {
            shape.update(|kind| match kind {
                ShapeKind::Text(t) => t.set_text(text),
                _ => false,
            })
        });
    }

    fn display_name(&self) -> &str {
        "Change Text"
    }
}

/// Turn a label-only text shape into an editable one
#[derive(Debug, Clone)]
pub struct MakeTextEditable {
    pub shape_id: ShapeId,
}

impl MakeTextEditable {
    pub fn new(shape_id: ShapeId) -> Self {
        Self { shape_id }
    }
}

impl Command for MakeTextEditable {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        text_parent(manager, self.shape_id)
    }

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId) {
        manager.update_shape(self.shape_id, parent, |shape| {
            shape.update(|kind| match kind {
                ShapeKind::Text(t) => t.make_text_editable(),
                _ => false,
            })
        });
    }

    fn display_name(&self) -> &str {
        "Make Text Editable"
    }
}

/// Enter or leave in-place editing. The text glyphs are hidden while editing.
#[derive(Debug, Clone)]
pub struct UpdateTextEditingMode {
    pub shape_id: ShapeId,
    pub is_editing: bool,
}

impl UpdateTextEditingMode {
    pub fn new(shape_id: ShapeId, is_editing: bool) -> Self {
        Self {
            shape_id,
            is_editing,
        }
    }
}

impl Command for UpdateTextEditingMode {
    fn affected_parent(&self, manager: &ShapeManager) -> Option<ShapeId> {
        text_parent(manager, self.shape_id)
    }

    fn execute(&self, manager: &mut ShapeManager, parent: ShapeId) {
        let is_editing = self.is_editing;
        manager.update_shape(self.shape_id, parent, |shape| {
            shape.update(|kind| match kind {
                ShapeKind::Text(t) => t.set_text_editing(is_editing),
                _ => false,
            })
        });
    }

    fn display_name(&self) -> &str {
        "Update Text Editing Mode"
    }
}
