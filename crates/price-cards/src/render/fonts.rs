//! Standard Type1 font metrics and text encoding
//!
//! Cards use the built-in Helvetica faces, so glyph widths come from the
//! Adobe AFM tables rather than an embedded font file.

use crate::layout::{TextMeasure, TextStyle};
use crate::options::FontFace;
use lopdf::{Dictionary, Object};

/// Advance widths (1/1000 em) for WinAnsi 0x20..=0x7E, Helvetica
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance widths (1/1000 em) for WinAnsi 0x20..=0x7E, Helvetica-Bold
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for glyphs outside the tables
const DEFAULT_WIDTH: u16 = 556;

/// Ascender shared by both Helvetica faces (1/1000 em)
const HELVETICA_ASCENT: f32 = 718.0;

/// Measures text with the built-in Helvetica metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontMetrics;

impl StandardFontMetrics {
    fn glyph_width(font: FontFace, ch: char) -> u16 {
        let table = match font {
            FontFace::Helvetica => &HELVETICA_WIDTHS,
            FontFace::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };

        match ch {
            ' '..='~' => table[ch as usize - 0x20],
            '\u{a0}' => table[0],
            '°' => 400,
            'ª' => 370,
            'º' => 365,
            _ => match base_letter(ch) {
                Some(base) => table[base as usize - 0x20],
                None => DEFAULT_WIDTH,
            },
        }
    }

    /// Line box height relative to the font size, from the AFM bounding box
    fn line_height_ratio(font: FontFace) -> f32 {
        match font {
            FontFace::Helvetica => 1.156,
            FontFace::HelveticaBold => 1.19,
        }
    }
}

impl TextMeasure for StandardFontMetrics {
    fn text_width(&self, text: &str, style: TextStyle) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| Self::glyph_width(style.font, ch) as u32)
            .sum();
        units as f32 / 1000.0 * style.size
    }

    fn line_height(&self, style: TextStyle) -> f32 {
        Self::line_height_ratio(style.font) * style.size
    }

    fn ascent(&self, style: TextStyle) -> f32 {
        HELVETICA_ASCENT / 1000.0 * style.size
    }
}

/// Accented Latin-1 letters share the width of their base letter
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

/// Encode text for a WinAnsi simple font. Characters outside Latin-1
/// become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch as u32 {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Escape a byte string for use inside a PDF literal string `( … )`
pub fn pdf_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('(');
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7E => out.push(b as char),
            _ => out.push_str(&format!("\\{:03o}", b)),
        }
    }
    out.push(')');
    out
}

/// Type1 font dictionary for a built-in face
pub fn font_dictionary(font: FontFace) -> Dictionary {
    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(font.base_font().as_bytes().to_vec()));
    font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    font_dict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_widths() {
        let style = TextStyle::new(FontFace::Helvetica, 10.0);
        // A = 667, space = 278
        assert!((StandardFontMetrics.text_width("A A", style) - 16.12).abs() < 1e-4);
        assert_eq!(StandardFontMetrics.text_width("", style), 0.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = TextStyle::new(FontFace::Helvetica, 12.0);
        let bold = TextStyle::new(FontFace::HelveticaBold, 12.0);
        let text = "HARINA PAN 1KG";
        assert!(
            StandardFontMetrics.text_width(text, bold)
                > StandardFontMetrics.text_width(text, regular)
        );
    }

    #[test]
    fn test_accented_letters_use_base_width() {
        let style = TextStyle::new(FontFace::Helvetica, 10.0);
        assert_eq!(
            StandardFontMetrics.text_width("AÑO", style),
            StandardFontMetrics.text_width("ANO", style)
        );
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("AÑO"), vec![b'A', 0xD1, b'O']);
        assert_eq!(encode_win_ansi("€"), vec![b'?']);
    }

    #[test]
    fn test_pdf_literal_escapes() {
        assert_eq!(pdf_literal(b"A (B)"), "(A \\(B\\))");
        assert_eq!(pdf_literal(b"C\\D"), "(C\\\\D)");
        assert_eq!(pdf_literal(&[0xD1]), "(\\321)");
    }
}
