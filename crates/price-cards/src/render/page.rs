//! Content stream generation for one page of cards

use super::fonts::{encode_win_ansi, pdf_literal};
use super::marks::generate_crop_marks;
use crate::constants::PLACEHOLDER_LINE_WIDTH;
use crate::layout::{
    CardLayout, GridSpec, PageLayout, Rect, TextMeasure, TextRun, cell_rect, layout_card,
};
use crate::options::{CardOptions, Color};

/// XObject resource name of the card background
pub(crate) const BACKGROUND_NAME: &str = "Bg";

/// Content stream for one page plus the number of cards drawn on it
pub(crate) struct PageContent {
    pub content: String,
    pub cards: usize,
}

/// Draw every card of `page`, then overlay the crop marks.
pub(crate) fn render_page_content(
    page: &PageLayout<'_>,
    grid: &GridSpec,
    options: &CardOptions,
    page_size: (f32, f32),
    has_background: bool,
    measure: &dyn TextMeasure,
) -> PageContent {
    let (page_width, page_height) = page_size;
    let mut content_ops = Vec::new();

    for (i, record) in page.records.iter().enumerate() {
        let rect = cell_rect(&options.geometry, grid.position(i));

        if has_background {
            content_ops.push(draw_background(&rect, page_height));
        } else {
            content_ops.push(draw_placeholder(&rect, page_height));
        }

        let layout = layout_card(record, rect, options, measure);
        log::debug!(
            "page {} card {}: price {}pt, name {}pt",
            page.index + 1,
            i + 1,
            layout.price_fit.font_size,
            layout.name_fit.font_size
        );
        content_ops.push(draw_card_text(&layout, options.text_color, page_height));
    }

    content_ops.push(generate_crop_marks(
        grid,
        &options.geometry,
        page_width,
        page_height,
    ));

    PageContent {
        content: content_ops.join(""),
        cards: page.records.len(),
    }
}

/// Place the background image scaled to the card rectangle
fn draw_background(rect: &Rect, page_height: f32) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        rect.width,
        rect.height,
        rect.x,
        page_height - rect.bottom(),
        BACKGROUND_NAME
    )
}

/// Red outline standing in for a missing background
fn draw_placeholder(rect: &Rect, page_height: f32) -> String {
    let Color { r, g, b } = Color::RED;
    format!(
        "q {} w {} {} {} RG {} {} {} {} re S Q\n",
        PLACEHOLDER_LINE_WIDTH,
        r,
        g,
        b,
        rect.x,
        page_height - rect.bottom(),
        rect.width,
        rect.height
    )
}

fn draw_card_text(layout: &CardLayout, color: Color, page_height: f32) -> String {
    let mut ops = String::new();
    ops.push_str("q\n");
    ops.push_str(&format!("{} {} {} rg\n", color.r, color.g, color.b));
    for run in layout.runs() {
        ops.push_str(&draw_text_run(run, page_height));
    }
    ops.push_str("Q\n");
    ops
}

/// Each run selects its own font and size
fn draw_text_run(run: &TextRun, page_height: f32) -> String {
    format!(
        "BT /{} {} Tf {} {} Td {} Tj ET\n",
        run.style.font.resource_name(),
        run.style.size,
        run.x,
        page_height - run.baseline,
        pdf_literal(&encode_win_ansi(&run.text))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_grid;
    use crate::render::StandardFontMetrics;
    use crate::types::Record;

    fn records() -> Vec<Record> {
        vec![
            Record {
                product_name: "ARROZ 500GR".to_string(),
                price: "BS 25,50".to_string(),
            },
            Record {
                product_name: "HARINA 1KG".to_string(),
                price: "BS 10,00".to_string(),
            },
        ]
    }

    #[test]
    fn test_page_content_with_background() {
        let options = CardOptions::default();
        let grid = compute_grid(612.0, 792.0, &options.geometry);
        let records = records();
        let page = PageLayout {
            index: 0,
            records: &records,
        };

        let content =
            render_page_content(&page, &grid, &options, (612.0, 792.0), true, &StandardFontMetrics);

        assert_eq!(content.cards, 2);
        assert_eq!(content.content.matches("/Bg Do").count(), 2);
        assert!(content.content.contains("(ARROZ 500GR) Tj"));
        assert!(content.content.contains("(HARINA 1KG) Tj"));
        assert!(content.content.contains("(BS 25,) Tj"));
        assert!(content.content.contains("(50) Tj"));
        assert!(content.content.contains("[5 5] 0 d"));
    }

    #[test]
    fn test_page_content_placeholder() {
        let options = CardOptions::default();
        let grid = compute_grid(612.0, 792.0, &options.geometry);
        let records = records();
        let page = PageLayout {
            index: 0,
            records: &records,
        };

        let content =
            render_page_content(&page, &grid, &options, (612.0, 792.0), false, &StandardFontMetrics);

        assert!(!content.content.contains("Do"));
        assert_eq!(content.content.matches(" re S").count(), 2);
        assert!(content.content.contains("1 0 0 RG"));
    }

    #[test]
    fn test_background_is_flipped_to_pdf_space() {
        let rect = Rect::new(15.0, 15.0, 280.0, 95.0);
        assert_eq!(
            draw_background(&rect, 792.0),
            "q 280 0 0 95 15 682 cm /Bg Do Q\n"
        );
    }
}
