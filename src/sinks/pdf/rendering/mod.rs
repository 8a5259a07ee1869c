//! Page rendering.
//!
//! Placement and drawing are kept apart. [`layout_page`] decides where every
//! line of a page goes, in PDF user space (millimetres, origin at the bottom
//! left), according to the configured [`RenderStrategy`]. [`render_part`] then
//! creates the document, embeds the font, and draws the placed lines page by
//! page, advancing the caller's progress bar as it goes.

mod baseline;
mod cells;

use crate::sinks::pdf::config::{Layout, RenderStrategy, PDF};
use crate::sinks::pdf::fonts::LoadedFont;
use anyhow::{anyhow, Result};
use indicatif::ProgressBar;
use printpdf::{Mm, PdfDocument, PdfDocumentReference};

const LAYER_NAME: &str = "Code";

/// A line of text and the position of the start of its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
}

/// Place the lines of one page.
pub fn layout_page(lines: &[String], layout: &Layout, strategy: RenderStrategy) -> Vec<PositionedLine> {
    match strategy {
        RenderStrategy::Cells => cells::place(lines, layout),
        RenderStrategy::Baseline => baseline::place(lines, layout),
    }
}

/// Render a run of pages into a new document.
pub fn render_part(
    config: &PDF,
    font: &LoadedFont,
    pages: &[Vec<String>],
    first_page_number: usize,
    total_pages: usize,
    progress: &ProgressBar,
) -> Result<PdfDocumentReference> {
    let layout = &config.layout;
    let width = Mm(layout.page_width_mm);
    let height = Mm(layout.page_height_mm);

    let (doc, first_page, first_layer) =
        PdfDocument::new(config.title.as_str(), width, height, LAYER_NAME);
    let doc = doc.with_creator(format!("code2pdf v{}", env!("CARGO_PKG_VERSION")));
    let font_ref = doc
        .add_external_font(font.data.as_slice())
        .map_err(|e| anyhow!("Failed to embed font {}: {e}", font.path.display()))?;

    for (i, lines) in pages.iter().enumerate() {
        let page_number = first_page_number + i;
        progress.set_message(format!("page {page_number} of {total_pages}"));

        let (page, layer) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let layer = doc.get_page(page).get_layer(layer);

        for (n, line) in layout_page(lines, layout, config.strategy)
            .into_iter()
            .enumerate()
        {
            log::trace!("page {page_number} line {}: {}", n + 1, line.text);
            layer.use_text(
                line.text,
                layout.font_size_pt,
                Mm(line.x_mm),
                Mm(line.y_mm),
                &font_ref,
            );
        }
        progress.inc(1);
    }

    Ok(doc)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strategies_place_every_line_in_order() {
        let layout = Layout::default();
        let lines: Vec<String> = (0..7).map(|i| format!("line {i}")).collect();
        for strategy in [RenderStrategy::Cells, RenderStrategy::Baseline] {
            let placed = layout_page(&lines, &layout, strategy);
            let texts: Vec<String> = placed.iter().map(|p| p.text.clone()).collect();
            assert_eq!(texts, lines);
            // reading order runs down the page
            assert!(placed.windows(2).all(|w| w[0].y_mm > w[1].y_mm));
            assert!(placed
                .iter()
                .all(|p| p.y_mm > 0.0 && p.y_mm < layout.page_height_mm));
        }
    }
}
