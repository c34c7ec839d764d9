/// The shared screen buffer every behavior draws into.
///
/// Behaviors never talk to the terminal directly. They write glyphs into a
/// `Canvas`; the process boundary flushes the buffer once per tick. Writes
/// are last-writer-wins, there is no z-order.

use crate::entities::{Attr, Frame};

const BORDER_SIDE: char = '|';
const BORDER_EDGE: char = '-';
const BORDER_CORNER: char = '+';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub attr: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            symbol: ' ',
            attr: Attr::Normal,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Canvas {
    height: i32,
    width: i32,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(height: u16, width: u16) -> Self {
        let (height, width) = (height as i32, width as i32);
        Canvas {
            height,
            width,
            cells: vec![Cell::default(); (height * width) as usize],
        }
    }

    /// (rows, columns)
    pub fn dimensions(&self) -> (i32, i32) {
        (self.height, self.width)
    }

    fn index(&self, row: i32, column: i32) -> Option<usize> {
        if row < 0 || column < 0 || row >= self.height || column >= self.width {
            return None;
        }
        Some((row * self.width + column) as usize)
    }

    pub fn cell(&self, row: i32, column: i32) -> Option<Cell> {
        self.index(row, column).map(|i| self.cells[i])
    }

    /// Write one glyph. Out-of-bounds writes are dropped.
    pub fn put(&mut self, row: i32, column: i32, symbol: char, attr: Attr) {
        if let Some(i) = self.index(row, column) {
            self.cells[i] = Cell { symbol, attr };
        }
    }

    /// Draw a frame with its top-left corner at (`row`, `column`).
    ///
    /// Spaces are transparent, glyphs outside the canvas are clipped and the
    /// bottom-right cell is never written. With `negative` set the same glyph
    /// positions are blanked instead, which erases a previous draw.
    pub fn draw_frame(&mut self, row: i32, column: i32, frame: &Frame, negative: bool) {
        for (dy, line) in frame.lines().iter().enumerate() {
            let r = row + dy as i32;
            if r < 0 {
                continue;
            }
            if r >= self.height {
                break;
            }
            for (dx, &symbol) in line.iter().enumerate() {
                let c = column + dx as i32;
                if c < 0 {
                    continue;
                }
                if c >= self.width {
                    break;
                }
                if symbol == ' ' {
                    continue;
                }
                if r == self.height - 1 && c == self.width - 1 {
                    continue;
                }
                let symbol = if negative { ' ' } else { symbol };
                self.put(r, c, symbol, Attr::Normal);
            }
        }
    }

    /// Single-line variant of `draw_frame` for labels.
    pub fn draw_text(&mut self, row: i32, column: i32, text: &str, negative: bool) {
        self.draw_frame(row, column, &Frame::new("text", text), negative);
    }

    pub fn draw_border(&mut self) {
        let (bottom, right) = (self.height - 1, self.width - 1);
        for c in 0..self.width {
            self.put(0, c, BORDER_EDGE, Attr::Normal);
            self.put(bottom, c, BORDER_EDGE, Attr::Normal);
        }
        for r in 0..self.height {
            self.put(r, 0, BORDER_SIDE, Attr::Normal);
            self.put(r, right, BORDER_SIDE, Attr::Normal);
        }
        for (r, c) in [(0, 0), (0, right), (bottom, 0), (bottom, right)] {
            self.put(r, c, BORDER_CORNER, Attr::Normal);
        }
    }

    /// One row as plain text, attributes dropped.
    pub fn row_text(&self, row: i32) -> String {
        (0..self.width)
            .filter_map(|c| self.cell(row, c))
            .map(|cell| cell.symbol)
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_are_transparent() {
        let mut canvas = Canvas::new(5, 5);
        canvas.put(1, 2, '#', Attr::Bold);
        canvas.draw_frame(1, 1, &Frame::new("f", "a b"), false);
        assert_eq!(canvas.row_text(1), " a#b ");
        assert_eq!(canvas.cell(1, 2).map(|c| c.attr), Some(Attr::Bold));
    }

    #[test]
    fn negative_erases_only_frame_glyphs() {
        let mut canvas = Canvas::new(3, 6);
        let frame = Frame::new("f", "xy");
        canvas.put(1, 0, '*', Attr::Normal);
        canvas.draw_frame(1, 1, &frame, false);
        canvas.draw_frame(1, 1, &frame, true);
        assert_eq!(canvas.row_text(1), "*     ");
    }

    #[test]
    fn clips_out_of_bounds_and_skips_bottom_right() {
        let mut canvas = Canvas::new(2, 3);
        canvas.draw_frame(-1, -1, &Frame::new("f", "abcd\nefgh\nijkl"), false);
        assert_eq!(canvas.row_text(0), "fgh");
        assert_eq!(canvas.row_text(1), "jk ");
    }

    #[test]
    fn border_frames_the_canvas() {
        let mut canvas = Canvas::new(3, 4);
        canvas.draw_border();
        assert_eq!(canvas.row_text(0), "+--+");
        assert_eq!(canvas.row_text(1), "|  |");
        assert_eq!(canvas.row_text(2), "+--+");
    }
}
