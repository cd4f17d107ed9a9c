//! Per-card text placement
//!
//! The price sits on top, its cents drawn smaller and top-aligned right after
//! the integer part. The product name follows below, centred line by line.

use super::fit::fit_field;
use super::{CardLayout, FitSolution, Rect, TextMeasure, TextRun, TextStyle};
use crate::options::{CardOptions, VerticalAnchor};
use crate::types::Record;

/// Maximum number of characters kept after the decimal comma
const MAX_CENTS_CHARS: usize = 2;

/// Split a formatted price at its decimal comma.
///
/// The integer part keeps the comma; the fractional part is truncated to two
/// characters. Without a comma the whole string is the integer part.
pub fn split_price(price: &str) -> (String, String) {
    match price.rfind(',') {
        Some(idx) => {
            let integer = price[..=idx].to_string();
            let cents = price[idx + 1..].chars().take(MAX_CENTS_CHARS).collect();
            (integer, cents)
        }
        None => (price.to_string(), String::new()),
    }
}

/// Compute font sizes and positions for one card.
pub fn layout_card(
    record: &Record,
    rect: Rect,
    options: &CardOptions,
    measure: &dyn TextMeasure,
) -> CardLayout {
    let geometry = &options.geometry;
    let text_x = rect.x + geometry.padding_x;
    let text_width = geometry.text_width();

    let price_fit = fit_field(&record.price, &options.price_style, text_width, measure);
    let name_fit = fit_field(&record.product_name, &options.name_style, text_width, measure);

    let block_height = price_fit.measured_height + options.name_spacing + name_fit.measured_height;
    let price_top = match options.anchor {
        VerticalAnchor::TopPadding => rect.y + geometry.top_padding,
        VerticalAnchor::Centered => rect.y + (rect.height - block_height) / 2.0,
    };

    let (price_integer, price_cents) =
        layout_price(&record.price, price_fit, price_top, text_x, text_width, options, measure);

    let name_top = price_top + price_fit.measured_height + options.name_spacing;
    let name_style = TextStyle::new(options.name_style.font, name_fit.font_size as f32);
    let line_height = measure.line_height(name_style);
    let name_lines = measure
        .wrap_lines(&record.product_name, name_style, text_width)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width = measure.text_width(&text, name_style);
            let top = name_top + i as f32 * line_height;
            TextRun {
                x: text_x + (text_width - width) / 2.0,
                top,
                baseline: top + measure.ascent(name_style),
                style: name_style,
                text,
            }
        })
        .collect();

    CardLayout {
        rect,
        price_fit,
        name_fit,
        price_integer,
        price_cents,
        name_lines,
    }
}

fn layout_price(
    price: &str,
    fit: FitSolution,
    top: f32,
    text_x: f32,
    text_width: f32,
    options: &CardOptions,
    measure: &dyn TextMeasure,
) -> (Option<TextRun>, Option<TextRun>) {
    if price.is_empty() {
        return (None, None);
    }

    let (integer, cents) = split_price(price);
    let font = options.price_style.font;
    let integer_style = TextStyle::new(font, fit.font_size as f32);
    let cents_size = fit
        .font_size
        .saturating_sub(options.cents_delta)
        .max(options.cents_min_size)
        .min(fit.font_size);
    let cents_style = TextStyle::new(font, cents_size as f32);

    let integer_width = measure.text_width(&integer, integer_style);
    let cents_width = if cents.is_empty() {
        0.0
    } else {
        measure.text_width(&cents, cents_style)
    };
    let x = text_x + (text_width - integer_width - cents_width) / 2.0;

    let integer_run = TextRun {
        x,
        top,
        baseline: top + measure.ascent(integer_style),
        style: integer_style,
        text: integer,
    };

    let cents_run = (!cents.is_empty()).then(|| TextRun {
        x: x + integer_width,
        top,
        baseline: top + measure.ascent(cents_style),
        style: cents_style,
        text: cents,
    });

    (Some(integer_run), cents_run)
}
