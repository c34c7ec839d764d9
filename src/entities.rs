/// Shared data types: pure data, no behavior logic.

// ── Display attributes ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Attr {
    #[default]
    Normal,
    Dim,
    Bold,
}

// ── Frames ────────────────────────────────────────────────────────────────────

/// An immutable named glyph block.
///
/// Height is the number of lines, width the longest line in characters.
/// Spaces inside a frame are transparent when drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    name: String,
    lines: Vec<Vec<char>>,
    height: i32,
    width: i32,
}

impl Frame {
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        let lines: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();
        let height = lines.len() as i32;
        let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as i32;
        Frame {
            name: name.into(),
            lines,
            height,
            width,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[Vec<char>] {
        &self.lines
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    /// A frame with no visible extent.
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }
}

// ── Player input ──────────────────────────────────────────────────────────────

/// One tick's worth of player input.
///
/// Deltas are -1, 0 or 1. An absent input is the default (all zero / false).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Control {
    pub rows: i32,
    pub columns: i32,
    pub fire: bool,
}

// ── Positions ─────────────────────────────────────────────────────────────────

/// A single screen cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub row: i32,
    pub column: i32,
}

impl Point {
    pub fn new(row: i32, column: i32) -> Self {
        Point { row, column }
    }
}
