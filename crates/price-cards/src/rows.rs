//! Spreadsheet rows and column resolution

use crate::normalize::{normalize, try_normalize};
use crate::options::CardOptions;
use crate::types::{PriceCardError, RawRow, Record, Result};
use calamine::{Reader, open_workbook_auto};
use std::path::Path;

const PRODUCT_HEADER: &str = "producto";
const PRICE_HEADER: &str = "precio";
const WORKBOOK_EXTENSIONS: [&str; 3] = ["xlsx", "xlsm", "xls"];

/// Load rows from a CSV file or an Excel workbook, chosen by extension.
///
/// The first line (or the first sheet row) holds the headers.
pub async fn load_rows(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let path = path.as_ref().to_owned();

    let rows = if is_workbook(&path) {
        let workbook_path = path.clone();
        tokio::task::spawn_blocking(move || parse_workbook(&workbook_path)).await??
    } else {
        let contents = tokio::fs::read_to_string(&path).await?;
        tokio::task::spawn_blocking(move || parse_rows(&contents)).await??
    };
    log::info!("Loaded {} rows from {}", rows.len(), path.display());

    Ok(rows)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
}

/// Read the first sheet of a workbook. Empty cells become empty strings and
/// fully blank rows are skipped.
pub fn parse_workbook(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Vec::new()),
    };

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(row) => row.iter().map(|cell| cell.to_string().trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for row in sheet_rows {
        let cells: Vec<String> = row.iter().map(|cell| cell.to_string().trim().to_string()).collect();
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let cells = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), cells.get(i).cloned().unwrap_or_default()))
            .collect();
        rows.push(RawRow::new(cells));
    }

    Ok(rows)
}

/// Parse CSV text into rows. Missing cells become empty strings and fully
/// blank lines are skipped.
pub fn parse_rows(contents: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let cells = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(RawRow::new(cells));
    }

    Ok(rows)
}

/// Find the product and price column indices.
///
/// Headers are matched case-insensitively by substring. When either is
/// missing and there are exactly two columns, they are taken positionally.
pub fn resolve_columns(headers: &[String]) -> Result<(usize, usize)> {
    let find = |token: &str| {
        headers
            .iter()
            .position(|h| h.to_lowercase().contains(token))
    };

    match (find(PRODUCT_HEADER), find(PRICE_HEADER)) {
        (Some(product), Some(price)) => Ok((product, price)),
        _ if headers.len() == 2 => Ok((0, 1)),
        _ => Err(PriceCardError::InvalidHeaders(headers.to_vec())),
    }
}

/// Normalize every row into a record.
///
/// Unparseable prices leave the price blank and are logged, or fail the
/// whole run when `options.strict` is set.
pub fn records_from_rows(rows: &[RawRow], options: &CardOptions) -> Result<Vec<Record>> {
    let first = rows.first().ok_or(PriceCardError::EmptyInput)?;
    let (product_idx, price_idx) = resolve_columns(&first.headers())?;

    let mut records = Vec::with_capacity(rows.len());
    for (row_num, row) in rows.iter().enumerate() {
        let (raw_name, raw_price) = (row.cell(product_idx), row.cell(price_idx));

        let record = if options.strict {
            try_normalize(raw_name, raw_price, &options.currency_label)?
        } else {
            let record = normalize(raw_name, raw_price, &options.currency_label);
            if record.price.is_empty() {
                log::warn!(
                    "Row {}: unparseable price {:?} for {:?}; rendering it blank",
                    row_num + 1,
                    raw_price,
                    record.product_name
                );
            }
            record
        };
        records.push(record);
    }

    Ok(records)
}
