//! Character grid
//!
//! Each cell has a visual char and a direction char. The visual char is what
//! gets painted; the direction char remembers which stroke glyph the cell
//! belongs to even when a dash gap blanks the visual.

use shape_model::{Rect, Size, HALF_TRANSPARENT_CHAR, TRANSPARENT_CHAR};
use std::fmt;

pub fn is_transparent(c: char) -> bool {
    c == TRANSPARENT_CHAR
}

pub fn is_half_transparent(c: char) -> bool {
    c == HALF_TRANSPARENT_CHAR
}

/// An immutable grid produced by [`BitmapBuilder`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonoBitmap {
    width: usize,
    height: usize,
    visual: Vec<char>,
    direction: Vec<char>,
}

impl MonoBitmap {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Visual char at a cell; transparent outside the grid
    pub fn visual(&self, row: i32, column: i32) -> char {
        self.index(row, column)
            .map(|i| self.visual[i])
            .unwrap_or(TRANSPARENT_CHAR)
    }

    pub fn direction(&self, row: i32, column: i32) -> char {
        self.index(row, column)
            .map(|i| self.direction[i])
            .unwrap_or(TRANSPARENT_CHAR)
    }

    /// Whether anything, visible or not, occupies the cell
    pub fn is_occupied(&self, row: i32, column: i32) -> bool {
        !is_transparent(self.visual(row, column))
    }

    /// Occupied cells as (row, column)
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.visual
            .iter()
            .enumerate()
            .filter(|(_, c)| !is_transparent(**c))
            .map(move |(i, _)| ((i / self.width) as i32, (i % self.width) as i32))
    }

    /// Visual rows as printable text; (half-)transparent cells become spaces
    pub fn rows(&self) -> Vec<String> {
        if self.width == 0 {
            return Vec::new();
        }
        self.visual
            .chunks(self.width)
            .map(|row| row.iter().map(|c| printable(*c)).collect())
            .collect()
    }

    fn index(&self, row: i32, column: i32) -> Option<usize> {
        if row < 0 || column < 0 {
            return None;
        }
        let (row, column) = (row as usize, column as usize);
        (row < self.height && column < self.width).then_some(row * self.width + column)
    }
}

impl fmt::Display for MonoBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rows().join("\n"))
    }
}

fn printable(c: char) -> char {
    if is_transparent(c) || is_half_transparent(c) {
        ' '
    } else {
        c
    }
}

/// Mutable grid used by the factories
#[derive(Debug, Clone)]
pub struct BitmapBuilder {
    width: usize,
    height: usize,
    visual: Vec<char>,
    direction: Vec<char>,
}

impl BitmapBuilder {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0) as usize;
        let height = height.max(0) as usize;
        Self {
            width,
            height,
            visual: vec![TRANSPARENT_CHAR; width * height],
            direction: vec![TRANSPARENT_CHAR; width * height],
        }
    }

    pub fn bound(&self) -> Rect {
        Rect::by_ltwh(0, 0, self.width as i32, self.height as i32)
    }

    /// Write one cell. Out-of-range writes are dropped; a transparent
    /// direction leaves the existing direction alone.
    pub fn put(&mut self, row: i32, column: i32, visual: char, direction: char) {
        let Some(i) = self.index(row, column) else {
            return;
        };
        self.visual[i] = visual;
        if !is_transparent(direction) {
            self.direction[i] = direction;
        }
    }

    pub fn fill_all(&mut self, c: char) {
        self.visual.fill(c);
        self.direction.fill(c);
    }

    /// Copy another bitmap with its top-left at (row, column). Transparent
    /// source cells are skipped and a half-transparent cell only lands on a
    /// transparent one.
    pub fn fill(&mut self, row: i32, column: i32, bitmap: &MonoBitmap) {
        if bitmap.is_empty() {
            return;
        }
        let source_bound = Rect::by_ltwh(column, row, bitmap.width as i32, bitmap.height as i32);
        let Some(overlap) = self.bound().overlapped_rect(&source_bound) else {
            return;
        };
        for r in overlap.top()..=overlap.bottom() {
            for c in overlap.left()..=overlap.right() {
                let Some(dest) = self.index(r, c) else {
                    continue;
                };
                let visual = bitmap.visual(r - row, c - column);
                if is_applicable(self.visual[dest], visual) {
                    self.visual[dest] = visual;
                }
                let direction = bitmap.direction(r - row, c - column);
                if is_applicable(self.direction[dest], direction) {
                    self.direction[dest] = direction;
                }
            }
        }
    }

    pub fn build(self) -> MonoBitmap {
        MonoBitmap {
            width: self.width,
            height: self.height,
            visual: self.visual,
            direction: self.direction,
        }
    }

    fn index(&self, row: i32, column: i32) -> Option<usize> {
        if row < 0 || column < 0 {
            return None;
        }
        let (row, column) = (row as usize, column as usize);
        (row < self.height && column < self.width).then_some(row * self.width + column)
    }
}

fn is_applicable(old: char, new: char) -> bool {
    if is_transparent(new) {
        return false;
    }
    !is_half_transparent(new) || is_transparent(old)
}
