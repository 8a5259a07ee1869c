use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// How lines are placed on a page.
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug, Default, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RenderStrategy {
    /// Fixed-height rows from the top-left margin, text centred in each row
    #[default]
    Cells,
    /// Fixed baselines a short step apart, block anchored to the bottom margin
    Baseline,
}

/// What happens when the document grows past [`Layout::max_pages`].
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug, Default, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Keep the first and last [`Layout::batch_pages`] pages, drop the middle
    #[default]
    Truncate,
    /// Keep everything, but write it as numbered parts of `max_pages` pages
    Split,
}

impl fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStrategy::Cells => write!(f, "cells"),
            RenderStrategy::Baseline => write!(f, "baseline"),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Truncate => write!(f, "truncate"),
            OverflowPolicy::Split => write!(f, "split"),
        }
    }
}

/// Page geometry and pagination constants.
///
/// All lengths are millimetres measured from the top-left corner of the page
/// unless noted otherwise; font sizes are points. These are fixed for a run and
/// passed down explicitly to everything that needs them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Width available to a line of text, before any cell padding
    pub wrap_width_mm: f32,
    pub font_size_pt: f32,
    /// Physical lines per page
    pub page_lines: usize,
    /// Pages kept on each side of the cut when truncating
    pub batch_pages: usize,
    /// Page count above which the overflow policy kicks in
    pub max_pages: usize,
    /// Row height for the cells strategy
    pub line_gap_mm: f32,
    pub margin_left_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    /// Horizontal inset of text inside a cell
    pub cell_padding_mm: f32,
    /// Baseline step for the baseline strategy
    pub baseline_gap_mm: f32,
    /// Spaces a tab expands to
    pub tab_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            wrap_width_mm: 190.0,
            font_size_pt: 9.0,
            page_lines: 50,
            batch_pages: 30,
            max_pages: 60,
            line_gap_mm: 5.3,
            margin_left_mm: 10.0,
            margin_top_mm: 10.0,
            margin_bottom_mm: 10.0,
            cell_padding_mm: 1.0,
            baseline_gap_mm: 3.0,
            tab_width: 4,
        }
    }
}

impl Layout {
    /// Lines kept on each side of the cut when truncating.
    pub fn batch_lines(&self) -> usize {
        self.batch_pages * self.page_lines
    }

    pub fn font_size_mm(&self) -> f32 {
        self.font_size_pt * MM_PER_PT
    }

    /// The width text is wrapped to; cells lose their padding on both sides.
    pub fn text_width_mm(&self, strategy: RenderStrategy) -> f32 {
        match strategy {
            RenderStrategy::Cells => self.wrap_width_mm - 2.0 * self.cell_padding_mm,
            RenderStrategy::Baseline => self.wrap_width_mm,
        }
    }
}

/// PDF output configuration, resolved from the command line and config file.
#[derive(Debug, Clone)]
pub struct PDF {
    /// Path to a TrueType font covering every character in the source
    pub font: PathBuf,
    /// Output PDF file path
    pub outfile: PathBuf,
    /// Document title, the project name
    pub title: String,
    pub strategy: RenderStrategy,
    pub overflow: OverflowPolicy,
    pub layout: Layout,
}

/// Statistics from rendering, used for user feedback.
#[derive(Debug)]
pub struct RenderStats {
    /// Number of pages written across all files
    pub page_count: usize,
    /// Every PDF that was written, in order
    pub outfiles: Vec<PathBuf>,
    /// Total bytes written
    pub bytes_written: u64,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_layout_keeps_the_classic_constants() {
        let layout = Layout::default();
        assert_eq!(layout.page_lines, 50);
        assert_eq!(layout.batch_lines(), 1500);
        assert_eq!(layout.max_pages, 2 * layout.batch_pages);
        assert!((layout.text_width_mm(RenderStrategy::Cells) - 188.0).abs() < 1e-4);
        assert!((layout.text_width_mm(RenderStrategy::Baseline) - 190.0).abs() < 1e-4);
    }

    #[test]
    fn fifty_rows_fit_on_an_a4_page() {
        let layout = Layout::default();
        let bottom = layout.margin_top_mm + layout.line_gap_mm * layout.page_lines as f32;
        assert!(bottom < layout.page_height_mm - layout.margin_bottom_mm);
    }

    #[test]
    fn policies_serialize_in_kebab_case() {
        #[derive(Serialize)]
        struct Wrapper {
            strategy: RenderStrategy,
            overflow: OverflowPolicy,
        }
        let s = toml::to_string(&Wrapper {
            strategy: RenderStrategy::Baseline,
            overflow: OverflowPolicy::Split,
        })
        .expect("can serialize to TOML");
        assert!(s.contains("strategy = \"baseline\""));
        assert!(s.contains("overflow = \"split\""));
    }
}
