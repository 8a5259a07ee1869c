//! Fixed-baseline placement: lines sit on baselines a constant step apart,
//! with the block anchored to the bottom margin. The last line of a page rests
//! on the margin and earlier lines stack upward, so reading order still runs
//! top to bottom.

use crate::sinks::pdf::config::Layout;
use crate::sinks::pdf::rendering::PositionedLine;

pub fn place(lines: &[String], layout: &Layout) -> Vec<PositionedLine> {
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .map(|(i, text)| PositionedLine {
            text: text.clone(),
            x_mm: layout.margin_left_mm,
            y_mm: layout.margin_bottom_mm + (last - i) as f32 * layout.baseline_gap_mm,
        })
        .collect()
}
