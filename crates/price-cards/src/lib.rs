pub mod constants;
pub mod layout;
pub mod normalize;
mod options;
mod pdf;
pub mod render;
mod rows;
pub mod session;
mod types;

pub use layout::{FitSolution, GridSpec, PageLayout, compute_grid, fit_text, paginate};
pub use normalize::{format_price, format_price_value, normalize, normalize_units_in_name};
pub use options::*;
pub use pdf::{generate_price_pdf, write_pdf};
pub use render::{RenderOutput, render_pages, render_records};
pub use rows::{load_rows, parse_rows, parse_workbook, records_from_rows, resolve_columns};
pub use types::*;
