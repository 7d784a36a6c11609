//! Glyph placements produced by the factories before they hit a builder

/// A char to draw at a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointChar {
    pub left: i32,
    pub top: i32,
    pub char: char,
}

impl PointChar {
    pub fn new(left: i32, top: i32, char: char) -> Self {
        Self { left, top, char }
    }

    pub fn point(left: i32, top: i32, char: char) -> Vec<PointChar> {
        vec![Self::new(left, top, char)]
    }

    /// Cells strictly between the two columns, walked from `begin` to `end`
    pub fn horizontal_line(begin_exclusive: i32, end_exclusive: i32, top: i32, char: char) -> Vec<PointChar> {
        between(begin_exclusive, end_exclusive)
            .into_iter()
            .map(|left| Self::new(left, top, char))
            .collect()
    }

    /// Cells strictly between the two rows, walked from `begin` to `end`
    pub fn vertical_line(left: i32, begin_exclusive: i32, end_exclusive: i32, char: char) -> Vec<PointChar> {
        between(begin_exclusive, end_exclusive)
            .into_iter()
            .map(|top| Self::new(left, top, char))
            .collect()
    }
}

fn between(begin_exclusive: i32, end_exclusive: i32) -> Vec<i32> {
    if (begin_exclusive - end_exclusive).abs() <= 1 {
        return Vec::new();
    }
    if begin_exclusive < end_exclusive {
        (begin_exclusive + 1..end_exclusive).collect()
    } else {
        (end_exclusive + 1..begin_exclusive).rev().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_exclude_endpoints() {
        let lefts: Vec<i32> = PointChar::horizontal_line(0, 4, 0, '-').iter().map(|p| p.left).collect();
        assert_eq!(lefts, vec![1, 2, 3]);

        let tops: Vec<i32> = PointChar::vertical_line(0, 4, 0, '|').iter().map(|p| p.top).collect();
        assert_eq!(tops, vec![3, 2, 1]);

        assert!(PointChar::horizontal_line(2, 3, 0, '-').is_empty());
    }
}
