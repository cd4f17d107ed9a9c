//! Text normalization for product names and prices
//!
//! Every function here is pure: the same input always yields the same
//! output, which keeps rendered fixtures reproducible.

use crate::types::{PriceCardError, Record, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Quantity followed by a unit, e.g. `500GR`, `1.5 kg`, `1.500,50 KG`
static RE_QUANTITY_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:[.,]\d+)*)\s*(GR|KG|LT|ML)\b").unwrap());

/// `digits.digits,digits`: dot as thousands separator, comma as decimal
static RE_DOT_THOUSANDS_COMMA_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+,\d+$").unwrap());

/// Build a display-ready record from one raw row.
///
/// An unparseable price degrades to an empty price; use [`try_normalize`]
/// to treat it as an error instead.
pub fn normalize(raw_name: &str, raw_price: &str, currency_label: &str) -> Record {
    Record {
        product_name: normalize_units_in_name(raw_name.trim()),
        price: display_price(&format_price(raw_price), currency_label),
    }
}

/// Like [`normalize`] but fails with `UnparseablePrice`.
pub fn try_normalize(raw_name: &str, raw_price: &str, currency_label: &str) -> Result<Record> {
    let record = normalize(raw_name, raw_price, currency_label);
    if record.price.is_empty() {
        return Err(PriceCardError::UnparseablePrice {
            product: record.product_name,
            raw: raw_price.to_string(),
        });
    }
    Ok(record)
}

/// Rewrite quantity+unit tokens into a compact canonical form and uppercase
/// the whole name.
pub fn normalize_units_in_name(name: &str) -> String {
    let cleaned = RE_QUANTITY_UNIT.replace_all(name, |caps: &Captures<'_>| {
        match parse_quantity(&caps[1]) {
            Some(value) => format!("{}{}", format_quantity(value), caps[2].to_uppercase()),
            None => caps[0].to_string(),
        }
    });
    cleaned.to_uppercase()
}

fn parse_quantity(raw: &str) -> Option<f64> {
    let canonical = if RE_DOT_THOUSANDS_COMMA_DECIMAL.is_match(raw) {
        raw.replace('.', "").replace(',', ".")
    } else {
        strip_thousands_dots(raw).replace(',', ".")
    };
    canonical.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        let fixed = format!("{:.2}", value);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Remove every dot that is followed by exactly three digits and then a
/// separator or the end of the string.
fn strip_thousands_dots(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == '.' && is_thousands_group(&chars[i + 1..]) {
            continue;
        }
        out.push(c);
    }

    out
}

fn is_thousands_group(rest: &[char]) -> bool {
    rest.len() >= 3
        && rest[..3].iter().all(|c| c.is_ascii_digit())
        && matches!(rest.get(3), None | Some('.') | Some(','))
}

/// Format a raw price as `1.307,96`; returns an empty string when the value
/// cannot be parsed.
pub fn format_price(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    let canonical = strip_thousands_dots(&filtered).replace(',', ".");

    match canonical.parse::<f64>() {
        Ok(value) if value.is_finite() => format_price_value(value),
        _ => String::new(),
    }
}

/// Format a numeric price with two decimals, dot thousands separators and a
/// decimal comma.
pub fn format_price_value(value: f64) -> String {
    // -0.0 prints as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    let fixed = format!("{:.2}", value);
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part),
    };
    format!("{}{},{}", sign, group_thousands(digits), dec_part)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

fn display_price(formatted: &str, currency_label: &str) -> String {
    if formatted.is_empty() {
        String::new()
    } else if currency_label.is_empty() {
        formatted.to_string()
    } else {
        format!("{} {}", currency_label, formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_already_clean() {
        assert_eq!(normalize_units_in_name("500GR"), "500GR");
    }

    #[test]
    fn test_units_whole_decimal() {
        assert_eq!(normalize_units_in_name("500.00GR"), "500GR");
    }

    #[test]
    fn test_units_dot_thousands_comma_decimal() {
        assert_eq!(normalize_units_in_name("1.500,50 KG"), "1500.5KG");
    }

    #[test]
    fn test_units_lowercase_and_space() {
        assert_eq!(normalize_units_in_name("leche 1,5 lt"), "LECHE 1.5LT");
        assert_eq!(normalize_units_in_name("Jugo 250 ml"), "JUGO 250ML");
    }

    #[test]
    fn test_units_thousands_dot_only() {
        assert_eq!(normalize_units_in_name("AZUCAR 1.000GR"), "AZUCAR 1000GR");
    }

    #[test]
    fn test_units_rounding() {
        assert_eq!(normalize_units_in_name("QUESO 0.3333KG"), "QUESO 0.33KG");
    }

    #[test]
    fn test_unit_must_end_word() {
        assert_eq!(normalize_units_in_name("500 GRAMOS"), "500 GRAMOS");
    }

    #[test]
    fn test_unparseable_quantity_left_unchanged() {
        // Two decimal commas cannot be parsed
        assert_eq!(normalize_units_in_name("x 1,2,3 kg"), "X 1,2,3 KG");
    }

    #[test]
    fn test_name_without_units() {
        assert_eq!(normalize_units_in_name("Harina Pan"), "HARINA PAN");
    }

    #[test]
    fn test_format_price_examples() {
        assert_eq!(format_price("1307.96"), "1.307,96");
        assert_eq!(format_price("abc"), "");
        assert_eq!(format_price("1000"), "1.000,00");
        assert_eq!(format_price_value(1000.0), "1.000,00");
    }

    #[test]
    fn test_format_price_locale_variants() {
        assert_eq!(format_price("1.234.567,8"), "1.234.567,80");
        assert_eq!(format_price("25,5"), "25,50");
        assert_eq!(format_price("Bs 12"), "12,00");
        assert_eq!(format_price("-1500"), "-1.500,00");
        assert_eq!(format_price(""), "");
    }

    #[test]
    fn test_format_price_negative_zero() {
        assert_eq!(format_price("-0"), "0,00");
        assert_eq!(format_price("-0,00"), "0,00");
        assert_eq!(format_price_value(-0.0), "0,00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1.234");
        assert_eq!(group_thousands("1234567"), "1.234.567");
    }

    #[test]
    fn test_normalize_record() {
        let record = normalize(" arroz 500gr ", "25.5", "BS");
        assert_eq!(record.product_name, "ARROZ 500GR");
        assert_eq!(record.price, "BS 25,50");
    }

    #[test]
    fn test_normalize_blank_price() {
        let record = normalize("ARROZ", "n/a", "BS");
        assert_eq!(record.price, "");
        assert!(matches!(
            try_normalize("ARROZ", "n/a", "BS"),
            Err(PriceCardError::UnparseablePrice { .. })
        ));
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let a = normalize("Harina 1kg", "10", "BS");
        let b = normalize("Harina 1kg", "10", "BS");
        assert_eq!(a, b);
    }
}
