//! Text measurement seam between layout and the rendering backend

use super::TextStyle;

/// Measures text for a given font and size.
///
/// Every call carries its own [`TextStyle`]; implementations must not keep
/// a "current font" between calls.
pub trait TextMeasure {
    /// Advance width of a single line of text
    fn text_width(&self, text: &str, style: TextStyle) -> f32;

    /// Distance between consecutive baselines
    fn line_height(&self, style: TextStyle) -> f32;

    /// Distance from the top of a line box to its baseline
    fn ascent(&self, style: TextStyle) -> f32;

    /// Greedy word wrap to `max_width`. Words wider than the budget are
    /// broken between characters.
    fn wrap_lines(&self, text: &str, style: TextStyle, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();

        for paragraph in text.lines() {
            let mut current = String::new();

            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", current, word)
                };
                if self.text_width(&candidate, style) <= max_width {
                    current = candidate;
                    continue;
                }

                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }

                if self.text_width(word, style) <= max_width {
                    current = word.to_string();
                    continue;
                }

                for ch in word.chars() {
                    let mut next = current.clone();
                    next.push(ch);
                    if !current.is_empty() && self.text_width(&next, style) > max_width {
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    } else {
                        current = next;
                    }
                }
            }

            if !current.is_empty() {
                lines.push(current);
            }
        }

        lines
    }

    /// Height of `text` once wrapped to `max_width`
    fn height_of(&self, text: &str, style: TextStyle, max_width: f32) -> f32 {
        self.wrap_lines(text, style, max_width).len() as f32 * self.line_height(style)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::options::FontFace;

    /// Every character is `0.5 × size` wide, lines are `size` tall
    pub(crate) struct MonoMeasure;

    impl TextMeasure for MonoMeasure {
        fn text_width(&self, text: &str, style: TextStyle) -> f32 {
            text.chars().count() as f32 * style.size * 0.5
        }

        fn line_height(&self, style: TextStyle) -> f32 {
            style.size
        }

        fn ascent(&self, style: TextStyle) -> f32 {
            style.size * 0.75
        }
    }

    fn style(size: f32) -> TextStyle {
        TextStyle::new(FontFace::Helvetica, size)
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        let lines = MonoMeasure.wrap_lines("ARROZ 500GR", style(10.0), 100.0);
        assert_eq!(lines, vec!["ARROZ 500GR"]);
    }

    #[test]
    fn test_wrap_breaks_between_words() {
        // 5 chars per line at size 10 and width 25
        let lines = MonoMeasure.wrap_lines("ABC DE FGHI", style(10.0), 25.0);
        assert_eq!(lines, vec!["ABC", "DE", "FGHI"]);
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let lines = MonoMeasure.wrap_lines("ABCDEFGHIJKL", style(10.0), 25.0);
        assert_eq!(lines, vec!["ABCDE", "FGHIJ", "KL"]);
    }

    #[test]
    fn test_height_of_empty_text() {
        assert_eq!(MonoMeasure.height_of("", style(10.0), 50.0), 0.0);
        assert_eq!(MonoMeasure.height_of("   ", style(10.0), 50.0), 0.0);
    }

    #[test]
    fn test_height_counts_lines() {
        assert_eq!(MonoMeasure.height_of("ABC DE FGHI", style(10.0), 25.0), 30.0);
    }
}
