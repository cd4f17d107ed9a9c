//! Layout data types
//!
//! Layout works in page space with the origin at the top-left corner and y
//! growing downwards. The renderer flips to PDF space when drawing.

use crate::options::FontFace;
use crate::types::Record;

/// Axis-aligned rectangle in page space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Page-level grid parameters derived from paper and card geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub columns: usize,
    pub rows_per_page: usize,
    pub cards_per_page: usize,
}

impl GridSpec {
    /// Grid cell for the `index`-th card on a page, filled row-major
    pub fn position(&self, index: usize) -> GridPosition {
        GridPosition::new(index / self.columns, index % self.columns)
    }

    /// Number of pages needed for `record_count` cards
    pub fn page_count(&self, record_count: usize) -> usize {
        record_count.div_ceil(self.cards_per_page)
    }
}

/// The records assigned to one output page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout<'a> {
    pub index: usize,
    pub records: &'a [Record],
}

/// Font and size for a single measure or draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontFace,
    pub size: f32,
}

impl TextStyle {
    pub fn new(font: FontFace, size: f32) -> Self {
        Self { font, size }
    }
}

/// Chosen font size for a text field and the height it occupies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSolution {
    pub font_size: u32,
    pub measured_height: f32,
}

/// One positioned run of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub style: TextStyle,
    pub x: f32,
    /// Top of the line box
    pub top: f32,
    pub baseline: f32,
}

/// Everything needed to draw one card
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub rect: Rect,
    pub price_fit: FitSolution,
    pub name_fit: FitSolution,
    /// Integer part of the price including the decimal comma
    pub price_integer: Option<TextRun>,
    pub price_cents: Option<TextRun>,
    pub name_lines: Vec<TextRun>,
}

impl CardLayout {
    /// All text runs in drawing order
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.price_integer
            .iter()
            .chain(self.price_cents.iter())
            .chain(self.name_lines.iter())
    }
}
