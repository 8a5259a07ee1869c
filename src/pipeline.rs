//! Collect → wrap → paginate, up to the point where a font is needed to draw.

use crate::config::Settings;
use crate::errors::Error;
use crate::line_analysis::LineStats;
use crate::sinks::{page_count, LineWrapper, Pagination, TextMeasure};
use anyhow::{Context, Result};

/// The document content of a run, ready to be rendered.
#[derive(Debug)]
pub struct Prepared {
    /// Code files read
    pub files: usize,
    /// Files skipped because they couldn't be read
    pub skipped: usize,
    pub line_stats: LineStats,
    /// Pages the full document would have had before any truncation
    pub untruncated_pages: usize,
    pub pagination: Pagination,
}

/// Gather the source lines under `settings.input`, wrap them with `measure`,
/// and bucket them into pages.
///
/// Fails with [`Error::EmptyResult`] when there is nothing to print.
pub fn prepare<M: TextMeasure + ?Sized>(settings: &Settings, measure: &M) -> Result<Prepared> {
    let collection = settings
        .collector()?
        .collect()
        .with_context(|| format!("Failed to collect code from {}", settings.input.display()))?;
    if collection.lines.is_empty() {
        return Err(Error::EmptyResult(settings.input.clone()).into());
    }

    let pdf = &settings.pdf;
    let wrapper = LineWrapper::new(measure, &pdf.layout, pdf.strategy);
    let (lines, line_stats) = wrapper.wrap_all(&collection.lines);
    let untruncated_pages = page_count(lines.len(), pdf.layout.page_lines);

    let pagination = Pagination::new(lines, &pdf.layout, pdf.overflow);

    Ok(Prepared {
        files: collection.files,
        skipped: collection.skipped,
        line_stats,
        untruncated_pages,
        pagination,
    })
}
