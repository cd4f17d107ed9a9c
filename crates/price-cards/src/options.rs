use crate::layout::compute_grid;
use crate::types::{PriceCardError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaperSize {
    #[default]
    Letter,
    Legal,
    A4,
    A5,
    Custom {
        width_pt: f32,
        height_pt: f32,
    },
}

impl PaperSize {
    /// Portrait dimensions in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
            PaperSize::A4 => (595.28, 841.89),
            PaperSize::A5 => (419.53, 595.28),
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => (width_pt, height_pt),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

/// Built-in PDF fonts available to the card renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

impl FontFace {
    /// PostScript name used as the PDF `BaseFont`
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside page content streams
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
        }
    }
}

/// Physical card geometry in points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardGeometry {
    pub width: f32,
    pub height: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    pub page_margin: f32,
    pub top_padding: f32,
    /// Inner horizontal padding on each side of the text area
    pub padding_x: f32,
}

impl Default for CardGeometry {
    fn default() -> Self {
        Self {
            width: 280.0,
            height: 95.0,
            gap_x: 20.0,
            gap_y: 15.0,
            page_margin: 15.0,
            top_padding: 12.0,
            padding_x: 10.0,
        }
    }
}

impl CardGeometry {
    /// Width available for text inside a card
    pub fn text_width(&self) -> f32 {
        self.width - 2.0 * self.padding_x
    }
}

/// Font and fit bounds for one text field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldStyle {
    pub font: FontFace,
    pub max_size: u32,
    pub min_size: u32,
    pub max_lines: u32,
}

/// Where the price block starts inside a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VerticalAnchor {
    /// Price starts `top_padding` below the card's top edge
    #[default]
    TopPadding,
    /// Price and name are centred together inside the card
    Centered,
}

/// RGB colour with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Complete configuration for one render run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardOptions {
    pub paper: PaperSize,
    pub geometry: CardGeometry,

    // Text fitting
    pub price_style: FieldStyle,
    pub name_style: FieldStyle,
    /// Point-size difference between the price's integer part and its cents
    pub cents_delta: u32,
    pub cents_min_size: u32,

    // Vertical placement
    pub anchor: VerticalAnchor,
    /// Gap between price block and name, may be negative
    pub name_spacing: f32,

    pub currency_label: String,
    pub text_color: Color,

    /// Treat unparseable prices and a missing background as fatal
    pub strict: bool,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::Letter,
            geometry: CardGeometry::default(),
            price_style: FieldStyle {
                font: FontFace::HelveticaBold,
                max_size: 30,
                min_size: 12,
                max_lines: 1,
            },
            name_style: FieldStyle {
                font: FontFace::Helvetica,
                max_size: 14,
                min_size: 6,
                max_lines: 2,
            },
            cents_delta: 10,
            cents_min_size: 8,
            anchor: VerticalAnchor::TopPadding,
            name_spacing: -2.0,
            currency_label: "BS".to_string(),
            text_color: Color::BLACK,
            strict: false,
        }
    }
}

impl CardOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: CardOptions = serde_json::from_slice(&bytes)
            .map_err(|e| PriceCardError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PriceCardError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let g = &self.geometry;
        if g.width <= 0.0 || g.height <= 0.0 {
            return Err(PriceCardError::Config(
                "Card width and height must be positive".to_string(),
            ));
        }
        if g.gap_x < 0.0 || g.gap_y < 0.0 || g.page_margin < 0.0 {
            return Err(PriceCardError::Config(
                "Gaps and page margin must not be negative".to_string(),
            ));
        }
        if g.text_width() <= 0.0 {
            return Err(PriceCardError::Config(
                "Horizontal padding leaves no room for text".to_string(),
            ));
        }

        for (field, style) in [("price", &self.price_style), ("name", &self.name_style)] {
            if style.min_size == 0 || style.min_size > style.max_size {
                return Err(PriceCardError::Config(format!(
                    "{} font sizes must satisfy 0 < min <= max (got {}..{})",
                    field, style.min_size, style.max_size
                )));
            }
            if style.max_lines == 0 {
                return Err(PriceCardError::Config(format!(
                    "{} must allow at least one line",
                    field
                )));
            }
        }

        if self.cents_min_size == 0 {
            return Err(PriceCardError::Config(
                "Cents font size must be positive".to_string(),
            ));
        }

        let (page_w, page_h) = self.paper.dimensions_pt();
        let grid = compute_grid(page_w, page_h, g);
        if grid.cards_per_page == 0 {
            return Err(PriceCardError::Config(format!(
                "A {}x{} card does not fit on {} paper",
                g.width,
                g.height,
                self.paper.name()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        assert!(CardOptions::default().validate().is_ok());
    }

    #[test]
    fn test_oversized_card_rejected() {
        let mut options = CardOptions::default();
        options.geometry.width = 700.0;
        match options.validate() {
            Err(PriceCardError::Config(msg)) => assert!(msg.contains("does not fit")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_size_bounds_rejected() {
        let mut options = CardOptions::default();
        options.name_style.min_size = 20;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_paper_dimensions() {
        assert_eq!(PaperSize::Letter.dimensions_pt(), (612.0, 792.0));
        let custom = PaperSize::Custom {
            width_pt: 300.0,
            height_pt: 400.0,
        };
        assert_eq!(custom.dimensions_pt(), (300.0, 400.0));
    }
}
