//! Grid layout calculation
//!
//! Cards are placed row-major from the top-left page margin. Column and row
//! counts depend only on paper and card geometry, never on the record count.

use crate::options::CardGeometry;
use crate::types::Record;

use super::{GridPosition, GridSpec, PageLayout, Rect};

// =============================================================================
// Grid Creation
// =============================================================================

/// Compute how many cards fit on a page.
///
/// `columns = floor((page_w − 2·margin + gap_x) / (card_w + gap_x))`, rows
/// likewise with heights and `gap_y`. A card that does not fit yields zero.
pub fn compute_grid(page_width: f32, page_height: f32, geometry: &CardGeometry) -> GridSpec {
    let columns = fit_count(page_width, geometry.page_margin, geometry.width, geometry.gap_x);
    let rows_per_page =
        fit_count(page_height, geometry.page_margin, geometry.height, geometry.gap_y);

    GridSpec {
        columns,
        rows_per_page,
        cards_per_page: columns * rows_per_page,
    }
}

fn fit_count(extent: f32, margin: f32, size: f32, gap: f32) -> usize {
    let count = ((extent - 2.0 * margin + gap) / (size + gap)).floor();
    // Negative and NaN saturate to 0
    count as usize
}

// =============================================================================
// Pagination
// =============================================================================

/// Split records into consecutive pages of `cards_per_page`, keeping order.
pub fn paginate<'a>(records: &'a [Record], grid: &GridSpec) -> Vec<PageLayout<'a>> {
    if grid.cards_per_page == 0 {
        return Vec::new();
    }

    records
        .chunks(grid.cards_per_page)
        .enumerate()
        .map(|(index, records)| PageLayout { index, records })
        .collect()
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Bounds of the card at `pos`, in top-left page space.
pub fn cell_rect(geometry: &CardGeometry, pos: GridPosition) -> Rect {
    let x = geometry.page_margin + pos.col as f32 * (geometry.width + geometry.gap_x);
    let y = geometry.page_margin + pos.row as f32 * (geometry.height + geometry.gap_y);
    Rect::new(x, y, geometry.width, geometry.height)
}

// =============================================================================
// Tests
// =============================================================================
