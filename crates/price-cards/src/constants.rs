//! Shared constants for card rendering

// =============================================================================
// Crop Marks
// =============================================================================

/// Line width for crop marks (points)
pub const CROP_MARK_WIDTH: f32 = 0.5;

/// How far crop marks run past the page margin (points)
pub const CROP_MARK_OVERHANG: f32 = 5.0;

/// Dash and gap length for crop marks (points)
pub const CROP_MARK_DASH: f32 = 5.0;

/// Crop mark gray level (#999)
pub const CROP_MARK_GRAY: f32 = 0.6;

// =============================================================================
// Placeholder
// =============================================================================

/// Outline width of the rectangle drawn when the background is missing
pub const PLACEHOLDER_LINE_WIDTH: f32 = 1.0;

// =============================================================================
// Output
// =============================================================================

/// PDF version written by the renderer
pub const PDF_VERSION: &str = "1.7";

/// File name prefix for generated documents
pub const OUTPUT_FILE_PREFIX: &str = "indicador-precios";
