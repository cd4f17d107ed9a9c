//! PDF rendering of price cards
//!
//! Each render builds its own `lopdf::Document`; nothing is shared between
//! documents, so separate renders may run on separate threads.

mod background;
mod fonts;
mod marks;
mod page;

pub use background::BackgroundImage;
pub use fonts::{StandardFontMetrics, encode_win_ansi};
pub use marks::{Segment, crop_mark_segments, generate_crop_marks};

use crate::constants::PDF_VERSION;
use crate::layout::{GridSpec, PageLayout, TextMeasure, compute_grid, paginate};
use crate::options::{CardOptions, FontFace};
use crate::types::{PriceCardError, Record, RenderReport, Result};
use fonts::font_dictionary;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use page::{BACKGROUND_NAME, render_page_content};

/// A finished document and what happened while drawing it
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub bytes: Vec<u8>,
    pub report: RenderReport,
}

/// Paginate `records` for the configured paper and render them.
pub fn render_records(
    records: &[Record],
    options: &CardOptions,
    background: Option<&[u8]>,
) -> Result<RenderOutput> {
    options.validate()?;
    if records.is_empty() {
        return Err(PriceCardError::EmptyInput);
    }

    let (page_width, page_height) = options.paper.dimensions_pt();
    let grid = compute_grid(page_width, page_height, &options.geometry);
    let pages = paginate(records, &grid);
    render_pages(&pages, &grid, options, background)
}

/// Render already paginated records, one PDF page per [`PageLayout`].
///
/// Fails with `EmptyInput` when there are no pages and with `Config` when
/// a page holds more records than the grid has cells.
///
/// A missing or undecodable background is replaced by outlined placeholder
/// rectangles unless `options.strict` is set.
pub fn render_pages(
    pages: &[PageLayout<'_>],
    grid: &GridSpec,
    options: &CardOptions,
    background: Option<&[u8]>,
) -> Result<RenderOutput> {
    options.validate()?;
    if pages.is_empty() {
        return Err(PriceCardError::EmptyInput);
    }
    if let Some(page) = pages.iter().find(|p| p.records.len() > grid.cards_per_page) {
        return Err(PriceCardError::Config(format!(
            "Page {} holds {} cards but the grid fits {}",
            page.index + 1,
            page.records.len(),
            grid.cards_per_page
        )));
    }

    let measure = StandardFontMetrics;
    let page_size = options.paper.dimensions_pt();
    let mut report = RenderReport::default();

    let mut output = Document::with_version(PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    let resources = build_resources(&mut output, background, options.strict)?;
    let has_background = resources.background.is_some();

    let mut page_refs = Vec::new();
    for page in pages {
        let content = render_page_content(
            page,
            grid,
            options,
            page_size,
            has_background,
            &measure as &dyn TextMeasure,
        );

        report.pages += 1;
        report.cards += content.cards;
        report.price_warnings += page.records.iter().filter(|r| r.price.is_empty()).count();
        if !has_background {
            report.asset_warnings += content.cards;
        }

        let page_id = add_page(
            &mut output,
            content.content,
            page_size,
            pages_tree_id,
            &resources,
        );
        page_refs.push(Object::Reference(page_id));
    }

    finalize_document(&mut output, pages_tree_id, page_refs);

    let mut bytes = Vec::new();
    output
        .save_to(&mut bytes)
        .map_err(|e| PriceCardError::BackendWriteFailure(e.to_string()))?;

    log::info!(
        "Rendered {} cards on {} pages ({} bytes)",
        report.cards,
        report.pages,
        bytes.len()
    );

    Ok(RenderOutput { bytes, report })
}

/// Objects shared by every page of a document
struct SharedResources {
    fonts: Dictionary,
    background: Option<ObjectId>,
}

fn build_resources(
    output: &mut Document,
    background: Option<&[u8]>,
    strict: bool,
) -> Result<SharedResources> {
    let mut fonts = Dictionary::new();
    for font in [FontFace::Helvetica, FontFace::HelveticaBold] {
        let font_id = output.add_object(font_dictionary(font));
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }

    let decoded = match background {
        Some(bytes) => BackgroundImage::decode(bytes),
        None => Err(PriceCardError::AssetLoadFailure(
            "no background provided".to_string(),
        )),
    };

    let background = match decoded {
        Ok(image) => Some(image.embed(output)?),
        Err(e) if strict => return Err(e),
        Err(e) => {
            log::warn!("{}; drawing placeholder rectangles instead", e);
            None
        }
    };

    Ok(SharedResources { fonts, background })
}

fn add_page(
    output: &mut Document,
    content: String,
    page_size: (f32, f32),
    parent_pages_id: ObjectId,
    shared: &SharedResources,
) -> ObjectId {
    let (width, height) = page_size;

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(shared.fonts.clone()));
    if let Some(background_id) = shared.background {
        let mut xobjects = Dictionary::new();
        xobjects.set(BACKGROUND_NAME, Object::Reference(background_id));
        resources.set("XObject", Object::Dictionary(xobjects));
    }

    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width),
            Object::Real(height),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

/// Create pages tree and catalog, finalize document structure
fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
