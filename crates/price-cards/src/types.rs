use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceCardError {
    #[error("No data rows in input")]
    EmptyInput,
    #[error("Cannot resolve product/price columns from headers {0:?}")]
    InvalidHeaders(Vec<String>),
    #[error("Unparseable price {raw:?} for product {product:?}")]
    UnparseablePrice { product: String, raw: String },
    #[error("Failed to load background asset: {0}")]
    AssetLoadFailure(String),
    #[error("PDF write error: {0}")]
    BackendWriteFailure(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PriceCardError>;

/// A normalized product/price pair, ready for layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub product_name: String,
    pub price: String,
}

/// One spreadsheet row as ordered `(header, cell)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    pub fn headers(&self) -> Vec<String> {
        self.cells.iter().map(|(h, _)| h.clone()).collect()
    }

    /// Cell value by column index; missing cells read as empty.
    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(|(_, v)| v.as_str()).unwrap_or("")
    }
}

/// Counters collected while rendering a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub pages: usize,
    pub cards: usize,
    /// Records whose price could not be parsed and render blank
    pub price_warnings: usize,
    /// Cards drawn with the placeholder instead of the background
    pub asset_warnings: usize,
}

impl RenderReport {
    pub fn has_warnings(&self) -> bool {
        self.price_warnings > 0 || self.asset_warnings > 0
    }

    /// Number of cards affected by at least one warning.
    ///
    /// A missing background affects every card, so it dominates the count.
    pub fn cards_with_warnings(&self) -> usize {
        if self.asset_warnings > 0 {
            self.cards
        } else {
            self.price_warnings
        }
    }
}
