//! Line connectors: line anchors glued to a box's edge
//!
//! A connector stores where along the target's side the anchor sits as a
//! ratio, plus the residual offset the ratio cannot express (an anchor one
//! cell outside the box). When the box changes, the anchor is re-derived from
//! the new bound.

use crate::{EditError, Identifier, Result, TwoWayQuickMap};
use serde::{Deserialize, Serialize};
use shape_model::{string_format, DirectedPoint, Direction, LineAnchor, Point, PointF, Rect, ShapeId};

/// Maximum distance in cells from the box edge at which an anchor still
/// connects
pub const MAX_CONNECT_DISTANCE: i32 = 1;

/// Side of a box an anchor is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Around {
    Left,
    Top,
    Right,
    Bottom,
}

/// Identity of a connector: one per line end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorKey {
    pub line_id: ShapeId,
    pub anchor: LineAnchor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineConnector {
    pub line_id: ShapeId,
    pub anchor: LineAnchor,
    pub ratio: PointF,
    pub offset: Point,
}

impl Identifier for LineConnector {
    type Id = ConnectorKey;

    fn identifier(&self) -> ConnectorKey {
        ConnectorKey {
            line_id: self.line_id,
            anchor: self.anchor,
        }
    }
}

impl LineConnector {
    /// Anchor position for the target's new bound, keeping `direction`
    pub fn point_in_new_bound(&self, direction: Direction, bound: &Rect) -> DirectedPoint {
        let left = bound.left() as f64
            + (bound.width() - 1) as f64 * self.ratio.left
            + self.offset.left as f64;
        let top = bound.top() as f64
            + (bound.height() - 1) as f64 * self.ratio.top
            + self.offset.top as f64;
        DirectedPoint::new(direction, round_half_up(left), round_half_up(top))
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

// ============================================================================
// Attachment geometry
// ============================================================================

fn is_around(value: i32, lower: i32, upper: i32) -> bool {
    (lower - MAX_CONNECT_DISTANCE..=upper + MAX_CONNECT_DISTANCE).contains(&value)
}

/// Side of `bound` the anchor is close enough to attach to. Near a corner the
/// anchor's direction picks between the two sides.
pub fn get_around(anchor: &DirectedPoint, bound: &Rect) -> Option<Around> {
    let (left, top) = (anchor.left(), anchor.top());
    let near_left = is_around(left, bound.left(), bound.left())
        && is_around(top, bound.top(), bound.bottom());
    let near_right = is_around(left, bound.right(), bound.right())
        && is_around(top, bound.top(), bound.bottom());
    let near_top = is_around(top, bound.top(), bound.top())
        && is_around(left, bound.left(), bound.right());
    let near_bottom = is_around(top, bound.bottom(), bound.bottom())
        && is_around(left, bound.left(), bound.right());
    let is_horizontal = anchor.direction == Direction::Horizontal;

    if near_left {
        return Some(if near_top && !is_horizontal {
            Around::Top
        } else if near_bottom && !is_horizontal {
            Around::Bottom
        } else {
            Around::Left
        });
    }
    if near_top {
        return Some(if near_right && is_horizontal {
            Around::Right
        } else {
            Around::Top
        });
    }
    if near_right {
        return Some(if near_bottom && !is_horizontal {
            Around::Bottom
        } else {
            Around::Right
        });
    }
    near_bottom.then_some(Around::Bottom)
}

pub fn calculate_ratio(around: Around, anchor: &DirectedPoint, bound: &Rect) -> PointF {
    let span = |size: i32| (size - 1).max(1) as f64;
    let left_ratio = ((anchor.left() - bound.left()) as f64 / span(bound.width())).clamp(0.0, 1.0);
    let top_ratio = ((anchor.top() - bound.top()) as f64 / span(bound.height())).clamp(0.0, 1.0);
    match around {
        Around::Left => PointF::new(0.0, top_ratio),
        Around::Top => PointF::new(left_ratio, 0.0),
        Around::Right => PointF::new(1.0, top_ratio),
        Around::Bottom => PointF::new(left_ratio, 1.0),
    }
}

pub fn calculate_offset(around: Around, anchor: &DirectedPoint, bound: &Rect) -> Point {
    let (left, top) = (anchor.left(), anchor.top());
    match around {
        Around::Left => Point::new(
            left - bound.left(),
            offset_to_range(top, bound.top(), bound.bottom()),
        ),
        Around::Top => Point::new(
            offset_to_range(left, bound.left(), bound.right()),
            top - bound.top(),
        ),
        Around::Right => Point::new(
            left - bound.right(),
            offset_to_range(top, bound.top(), bound.bottom()),
        ),
        Around::Bottom => Point::new(
            offset_to_range(left, bound.left(), bound.right()),
            top - bound.bottom(),
        ),
    }
}

fn offset_to_range(value: i32, lower: i32, upper: i32) -> i32 {
    if value < lower {
        value - lower
    } else if value > upper {
        value - upper
    } else {
        0
    }
}

// ============================================================================
// Connector table
// ============================================================================

/// All connectors of a document, indexed by line end and by target
#[derive(Debug, Clone, Default)]
pub struct ShapeConnector {
    connectors: TwoWayQuickMap<LineConnector, ShapeId>,
}

impl ShapeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Attach a line end to a box. If the anchor is too far from the box the
    /// line end is left unconnected. Returns whether a connector was stored.
    pub fn add_connector(
        &mut self,
        line_id: ShapeId,
        anchor: LineAnchor,
        anchor_point: DirectedPoint,
        target_id: ShapeId,
        target_bound: &Rect,
    ) -> bool {
        let Some(around) = get_around(&anchor_point, target_bound) else {
            self.remove_connector(line_id, anchor);
            return false;
        };
        let connector = LineConnector {
            line_id,
            anchor,
            ratio: calculate_ratio(around, &anchor_point, target_bound),
            offset: calculate_offset(around, &anchor_point, target_bound),
        };
        tracing::debug!(line = %line_id, ?anchor, target = %target_id, ?around, "connector added");
        self.connectors.insert(connector, target_id);
        true
    }

    pub fn remove_connector(&mut self, line_id: ShapeId, anchor: LineAnchor) -> bool {
        let removed = self
            .connectors
            .remove_key(&ConnectorKey { line_id, anchor })
            .is_some();
        if removed {
            tracing::debug!(line = %line_id, ?anchor, "connector removed");
        }
        removed
    }

    pub fn has_connector(&self, line_id: ShapeId, anchor: LineAnchor) -> bool {
        self.connectors.get(&ConnectorKey { line_id, anchor }).is_some()
    }

    pub fn target_of(&self, line_id: ShapeId, anchor: LineAnchor) -> Option<ShapeId> {
        self.connectors.get(&ConnectorKey { line_id, anchor }).copied()
    }

    /// Connectors attached to `target`, oldest first
    pub fn get_connectors(&self, target: ShapeId) -> Vec<&LineConnector> {
        self.connectors.get_keys(&target)
    }

    /// Forget a removed shape, whether it was a target or a line
    pub fn remove_shape(&mut self, id: ShapeId) {
        self.connectors.remove_value(&id);
        self.remove_connector(id, LineAnchor::Start);
        self.remove_connector(id, LineAnchor::End);
    }

    /// Persisted form, ordered by line id then anchor
    pub fn to_serializable(&self) -> Vec<SerializableLineConnector> {
        let mut list: Vec<SerializableLineConnector> = self
            .connectors
            .iter()
            .map(|(connector, target)| SerializableLineConnector {
                line_id: connector.line_id.to_string(),
                anchor: connector.anchor,
                target_id: target.to_string(),
                ratio: connector.ratio,
                offset: connector.offset,
            })
            .collect();
        list.sort_by(|a, b| {
            (a.line_id.as_str(), anchor_code::code(a.anchor))
                .cmp(&(b.line_id.as_str(), anchor_code::code(b.anchor)))
        });
        list
    }

    pub fn from_serializable(list: &[SerializableLineConnector]) -> Result<Self> {
        let mut connector = Self::new();
        for item in list {
            let line_id = ShapeId::from_string(&item.line_id)
                .ok_or_else(|| EditError::InvalidConnector(format!("line id {}", item.line_id)))?;
            let target_id = ShapeId::from_string(&item.target_id).ok_or_else(|| {
                EditError::InvalidConnector(format!("target id {}", item.target_id))
            })?;
            connector.connectors.insert(
                LineConnector {
                    line_id,
                    anchor: item.anchor,
                    ratio: item.ratio,
                    offset: item.offset,
                },
                target_id,
            );
        }
        Ok(connector)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLineConnector {
    #[serde(rename = "i")]
    pub line_id: String,
    #[serde(rename = "a", with = "anchor_code")]
    pub anchor: LineAnchor,
    #[serde(rename = "t")]
    pub target_id: String,
    #[serde(rename = "r", with = "string_format")]
    pub ratio: PointF,
    #[serde(rename = "o", with = "string_format")]
    pub offset: Point,
}

/// Anchors persist as 1 (start) and 2 (end)
mod anchor_code {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use shape_model::LineAnchor;

    pub fn code(anchor: LineAnchor) -> u8 {
        match anchor {
            LineAnchor::Start => 1,
            LineAnchor::End => 2,
        }
    }

    pub fn serialize<S: Serializer>(anchor: &LineAnchor, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(code(*anchor))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LineAnchor, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(LineAnchor::Start),
            2 => Ok(LineAnchor::End),
            other => Err(de::Error::custom(format!("unrecognized anchor {}", other))),
        }
    }
}
