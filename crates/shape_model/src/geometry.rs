//! Integer board geometry
//!
//! All coordinates are board cells. `Rect` is inclusive on both ends: a rect at
//! left 2 with width 3 covers columns 2, 3 and 4, so `right()` is 4.

use crate::{Result, ShapeModelError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

// ============================================================================
// Point / Size
// ============================================================================

/// A board cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub left: i32,
    pub top: i32,
}

impl Point {
    pub const ZERO: Point = Point { left: 0, top: 0 };

    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    /// Copy with a new left
    pub fn with_left(self, left: i32) -> Self {
        Self { left, ..self }
    }

    /// Copy with a new top
    pub fn with_top(self, top: i32) -> Self {
        Self { top, ..self }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.left + rhs.left, self.top + rhs.top)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.left - rhs.left, self.top - rhs.top)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.left, self.top)
    }
}

impl FromStr for Point {
    type Err = ShapeModelError;

    fn from_str(s: &str) -> Result<Self> {
        let values = parse_ints(s, 2)?;
        Ok(Point::new(values[0], values[1]))
    }
}

/// Width and height in cells, never negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }
}

// ============================================================================
// Float types (connector ratios, handle positions)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub left: f64,
    pub top: f64,
}

impl PointF {
    pub const ZERO: PointF = PointF { left: 0.0, top: 0.0 };

    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

impl fmt::Display for PointF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.left, self.top)
    }
}

impl FromStr for PointF {
    type Err = ShapeModelError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('|').collect();
        if parts.len() != 2 {
            return Err(ShapeModelError::InvalidFormat(format!("PointF: {}", s)));
        }
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| ShapeModelError::InvalidFormat(format!("PointF: {}", s)))
        };
        Ok(PointF::new(parse(parts[0])?, parse(parts[1])?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

impl SizeF {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rectangle of board cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        position: Point::ZERO,
        size: Size::ZERO,
    };

    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    pub fn by_ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(Point::new(left, top), Size::new(width, height))
    }

    /// Create from two corners in any order
    pub fn by_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let (l, r) = if left <= right { (left, right) } else { (right, left) };
        let (t, b) = if top <= bottom { (top, bottom) } else { (bottom, top) };
        Self::by_ltwh(l, t, r - l + 1, b - t + 1)
    }

    /// Smallest rect containing every point; `None` for an empty input
    pub fn bounding<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Rect> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut l, mut t, mut r, mut b) = (first.left, first.top, first.left, first.top);
        for p in iter {
            l = l.min(p.left);
            t = t.min(p.top);
            r = r.max(p.left);
            b = b.max(p.top);
        }
        Some(Rect::by_ltrb(l, t, r, b))
    }

    pub fn left(&self) -> i32 {
        self.position.left
    }

    pub fn top(&self) -> i32 {
        self.position.top
    }

    pub fn right(&self) -> i32 {
        self.position.left + self.size.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.position.top + self.size.height - 1
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.left >= self.left()
            && point.left <= self.right()
            && point.top >= self.top()
            && point.top <= self.bottom()
    }

    pub fn is_overlapped(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn overlapped_rect(&self, other: &Rect) -> Option<Rect> {
        if !self.is_overlapped(other) {
            return None;
        }
        Some(Rect::by_ltrb(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        ))
    }

    /// Smallest rect covering both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::by_ltrb(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Whether the point is one of the four corners
    pub fn is_vertex(&self, point: Point) -> bool {
        (point.left == self.left() || point.left == self.right())
            && (point.top == self.top() || point.top == self.bottom())
    }

    pub fn translate(&self, offset: Point) -> Rect {
        Rect::new(self.position + offset, self.size)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.left(),
            self.top(),
            self.width(),
            self.height()
        )
    }
}

impl FromStr for Rect {
    type Err = ShapeModelError;

    fn from_str(s: &str) -> Result<Self> {
        let v = parse_ints(s, 4)?;
        Ok(Rect::by_ltwh(v[0], v[1], v[2], v[3]))
    }
}

// ============================================================================
// Directed point
// ============================================================================

/// The axis a line anchor departs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    fn marker(self) -> &'static str {
        match self {
            Direction::Horizontal => "H",
            Direction::Vertical => "V",
        }
    }
}

/// A point plus the orientation a line leaves it along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectedPoint {
    pub direction: Direction,
    pub point: Point,
}

impl DirectedPoint {
    pub fn new(direction: Direction, left: i32, top: i32) -> Self {
        Self {
            direction,
            point: Point::new(left, top),
        }
    }

    pub fn horizontal(left: i32, top: i32) -> Self {
        Self::new(Direction::Horizontal, left, top)
    }

    pub fn vertical(left: i32, top: i32) -> Self {
        Self::new(Direction::Vertical, left, top)
    }

    pub fn left(&self) -> i32 {
        self.point.left
    }

    pub fn top(&self) -> i32 {
        self.point.top
    }

    pub fn translate(&self, offset: Point) -> Self {
        Self {
            direction: self.direction,
            point: self.point + offset,
        }
    }
}

impl fmt::Display for DirectedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.direction.marker(), self.point)
    }
}

impl FromStr for DirectedPoint {
    type Err = ShapeModelError;

    fn from_str(s: &str) -> Result<Self> {
        let (marker, rest) = s
            .split_once('|')
            .ok_or_else(|| ShapeModelError::InvalidFormat(format!("DirectedPoint: {}", s)))?;
        let direction = match marker {
            "H" => Direction::Horizontal,
            "V" => Direction::Vertical,
            _ => {
                return Err(ShapeModelError::InvalidFormat(format!(
                    "DirectedPoint: {}",
                    s
                )))
            }
        };
        Ok(DirectedPoint {
            direction,
            point: rest.parse()?,
        })
    }
}

fn parse_ints(s: &str, count: usize) -> Result<Vec<i32>> {
    let values = s
        .split('|')
        .map(|v| v.trim().parse::<i32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| ShapeModelError::InvalidFormat(s.to_string()))?;
    if values.len() != count {
        return Err(ShapeModelError::InvalidFormat(s.to_string()));
    }
    Ok(values)
}
