//! Crop marks between cards
//!
//! Dashed guides run through the middle of every internal gap, spanning the
//! margin-to-margin extent of the page plus a small overhang on each end.

use crate::constants::{CROP_MARK_DASH, CROP_MARK_GRAY, CROP_MARK_OVERHANG, CROP_MARK_WIDTH};
use crate::layout::GridSpec;
use crate::options::CardGeometry;

/// A straight line segment in top-left page space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Vertical lines for each internal column boundary, then horizontal lines
/// for each internal row boundary.
pub fn crop_mark_segments(
    grid: &GridSpec,
    geometry: &CardGeometry,
    page_width: f32,
    page_height: f32,
) -> Vec<Segment> {
    let margin = geometry.page_margin;
    let mut segments = Vec::new();

    for col in 1..grid.columns {
        let x = margin + col as f32 * (geometry.width + geometry.gap_x) - geometry.gap_x / 2.0;
        segments.push(Segment {
            x1: x,
            y1: margin - CROP_MARK_OVERHANG,
            x2: x,
            y2: page_height - margin + CROP_MARK_OVERHANG,
        });
    }

    for row in 1..grid.rows_per_page {
        let y = margin + row as f32 * (geometry.height + geometry.gap_y) - geometry.gap_y / 2.0;
        segments.push(Segment {
            x1: margin - CROP_MARK_OVERHANG,
            y1: y,
            x2: page_width - margin + CROP_MARK_OVERHANG,
            y2: y,
        });
    }

    segments
}

/// Content stream operations drawing the crop marks
pub fn generate_crop_marks(
    grid: &GridSpec,
    geometry: &CardGeometry,
    page_width: f32,
    page_height: f32,
) -> String {
    let segments = crop_mark_segments(grid, geometry, page_width, page_height);
    if segments.is_empty() {
        return String::new();
    }

    let mut ops = String::new();
    ops.push_str("q\n");
    ops.push_str(&format!("{} w\n", CROP_MARK_WIDTH));
    ops.push_str(&format!("{g} {g} {g} RG\n", g = CROP_MARK_GRAY));
    ops.push_str(&format!("[{d} {d}] 0 d\n", d = CROP_MARK_DASH));

    // Flip y: layout space grows downwards, PDF space upwards
    for s in segments {
        ops.push_str(&format!(
            "{} {} m {} {} l S\n",
            s.x1,
            page_height - s.y1,
            s.x2,
            page_height - s.y2
        ));
    }

    ops.push_str("Q\n");
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_grid;

    #[test]
    fn test_letter_crop_marks() {
        let geometry = CardGeometry::default();
        let grid = compute_grid(612.0, 792.0, &geometry);
        let segments = crop_mark_segments(&grid, &geometry, 612.0, 792.0);

        // One internal column boundary, six internal row boundaries
        assert_eq!(segments.len(), (grid.columns - 1) + (grid.rows_per_page - 1));

        let vertical = segments[0];
        assert_eq!(vertical.x1, 15.0 + 300.0 - 10.0);
        assert_eq!(vertical.x1, vertical.x2);
        assert_eq!(vertical.y1, 10.0);
        assert_eq!(vertical.y2, 792.0 - 15.0 + 5.0);

        let horizontal = segments[1];
        assert_eq!(horizontal.y1, 15.0 + 110.0 - 7.5);
        assert_eq!(horizontal.x1, 10.0);
        assert_eq!(horizontal.x2, 612.0 - 15.0 + 5.0);
    }

    #[test]
    fn test_single_card_grid_has_no_marks() {
        let grid = GridSpec {
            columns: 1,
            rows_per_page: 1,
            cards_per_page: 1,
        };
        let ops = generate_crop_marks(&grid, &CardGeometry::default(), 612.0, 792.0);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_crop_marks_are_dashed_gray() {
        let geometry = CardGeometry::default();
        let grid = compute_grid(612.0, 792.0, &geometry);
        let ops = generate_crop_marks(&grid, &geometry, 612.0, 792.0);
        assert!(ops.starts_with("q\n"));
        assert!(ops.contains("0.6 0.6 0.6 RG"));
        assert!(ops.contains("[5 5] 0 d"));
        assert_eq!(ops.matches(" l S").count(), 7);
        assert!(ops.ends_with("Q\n"));
    }
}
