//! Card layout engine
//!
//! Grid and pagination, font-size fitting and per-card text placement.

mod card;
mod fit;
mod grid;
mod measure;
mod types;

pub use card::{layout_card, split_price};
pub use fit::{LINE_HEIGHT_RATIO, fit_field, fit_text};
pub use grid::{cell_rect, compute_grid, paginate};
pub use measure::TextMeasure;
pub use types::*;
