//! Font-size search for a single text field

use super::{FitSolution, TextMeasure, TextStyle};
use crate::options::{FieldStyle, FontFace};

/// Allowed line height as a multiple of the font size
pub const LINE_HEIGHT_RATIO: f32 = 1.2;

/// Find the largest integer font size at which `text`, wrapped to
/// `width_budget`, stays within `max_lines` lines.
///
/// Sizes are tried from `max_font_size` downwards one point at a time.
/// When nothing in range fits, the minimum size is returned with whatever
/// height it produces; overflow is not an error.
pub fn fit_text(
    text: &str,
    font: FontFace,
    max_font_size: u32,
    min_font_size: u32,
    max_lines: u32,
    width_budget: f32,
    measure: &dyn TextMeasure,
) -> FitSolution {
    for size in (min_font_size..=max_font_size).rev() {
        let style = TextStyle::new(font, size as f32);
        let height = measure.height_of(text, style, width_budget);
        if height <= size as f32 * LINE_HEIGHT_RATIO * max_lines as f32 {
            return FitSolution {
                font_size: size,
                measured_height: height,
            };
        }
    }

    let style = TextStyle::new(font, min_font_size as f32);
    log::debug!(
        "{:?} does not fit in {} lines; falling back to {}pt",
        text,
        max_lines,
        min_font_size
    );
    FitSolution {
        font_size: min_font_size,
        measured_height: measure.height_of(text, style, width_budget),
    }
}

/// [`fit_text`] with the bounds taken from a field style
pub fn fit_field(
    text: &str,
    style: &FieldStyle,
    width_budget: f32,
    measure: &dyn TextMeasure,
) -> FitSolution {
    fit_text(
        text,
        style.font,
        style.max_size,
        style.min_size,
        style.max_lines,
        width_budget,
        measure,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::tests::MonoMeasure;

    #[test]
    fn test_short_text_gets_max_size() {
        let fit = fit_text("ARROZ", FontFace::Helvetica, 14, 6, 2, 260.0, &MonoMeasure);
        assert_eq!(fit.font_size, 14);
        assert_eq!(fit.measured_height, 14.0);
    }

    #[test]
    fn test_shrinks_until_within_line_budget() {
        // 20 chars in a 60pt budget with one line allowed:
        // width = 20 × 0.5 × size <= 60 → size <= 6
        let text = "ABCDEFGHIJKLMNOPQRST";
        let fit = fit_text(text, FontFace::Helvetica, 14, 4, 1, 60.0, &MonoMeasure);
        assert_eq!(fit.font_size, 6);
        assert_eq!(fit.measured_height, 6.0);
    }

    #[test]
    fn test_two_lines_allowed() {
        // Two words of 10 chars, each on its own line once
        // 10 × 0.5 × size <= 60, i.e. size <= 12
        let text = "ABCDEFGHIJ KLMNOPQRST";
        let fit = fit_text(text, FontFace::Helvetica, 14, 4, 2, 60.0, &MonoMeasure);
        assert_eq!(fit.font_size, 12);
        assert_eq!(fit.measured_height, 24.0);
    }

    #[test]
    fn test_falls_back_to_minimum() {
        let text = "WORD ".repeat(200);
        let fit = fit_text(&text, FontFace::Helvetica, 10, 6, 2, 100.0, &MonoMeasure);
        assert_eq!(fit.font_size, 6);
        assert!(fit.measured_height > 6.0 * LINE_HEIGHT_RATIO * 2.0);
    }

    #[test]
    fn test_fit_field_uses_style_bounds() {
        let style = FieldStyle {
            font: FontFace::HelveticaBold,
            max_size: 20,
            min_size: 8,
            max_lines: 1,
        };
        let fit = fit_field("BS 10,00", &style, 260.0, &MonoMeasure);
        assert_eq!(fit.font_size, 20);
    }
}
