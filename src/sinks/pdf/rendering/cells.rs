//! Row-based placement: every line owns a fixed-height row starting at the
//! top-left margin, with its text inset by the cell padding and vertically
//! centred in the row.

use crate::sinks::pdf::config::Layout;
use crate::sinks::pdf::rendering::PositionedLine;

/// Baseline offset inside a row, as a fraction of the font size.
const BASELINE_FRACTION: f32 = 0.3;

pub fn place(lines: &[String], layout: &Layout) -> Vec<PositionedLine> {
    let x_mm = layout.margin_left_mm + layout.cell_padding_mm;
    let centre = 0.5 * layout.line_gap_mm + BASELINE_FRACTION * layout.font_size_mm();

    lines
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let row_top = layout.margin_top_mm + i as f32 * layout.line_gap_mm;
            PositionedLine {
                text: text.clone(),
                x_mm,
                y_mm: layout.page_height_mm - (row_top + centre),
            }
        })
        .collect()
}
