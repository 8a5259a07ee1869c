//! Page bucketing and the overflow rule.
//!
//! Physical lines are poured into pages of [`Layout::page_lines`] lines each.
//! When that would produce more than [`Layout::max_pages`] pages the
//! [`OverflowPolicy`] decides what happens: either everything but a head and a
//! tail sample is dropped, or the pages are grouped into several output parts.
//! Neither policy ever reorders lines.

use crate::sinks::pdf::config::{Layout, OverflowPolicy};

/// Pages needed for `lines` lines at `page_lines` per page.
pub fn page_count(lines: usize, page_lines: usize) -> usize {
    lines.div_ceil(page_lines)
}

/// Keep the first and last `batch` lines, dropping everything strictly
/// between them.
///
/// The two spans are clamped so they never overlap: when the input is shorter
/// than two batches nothing is dropped and nothing is duplicated. Returns the
/// number of lines removed.
pub fn truncate_middle<T>(lines: &mut Vec<T>, batch: usize) -> usize {
    let len = lines.len();
    let head_end = batch.min(len);
    let tail_start = len.saturating_sub(batch).max(head_end);
    lines.drain(head_end..tail_start);
    tail_start - head_end
}

/// The bucketed document, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pages: Vec<Vec<String>>,
    /// Lines removed by truncation, 0 when nothing was cut
    pub dropped_lines: usize,
    /// Pages per output part; `None` for a single document
    pub part_pages: Option<usize>,
}

impl Pagination {
    /// Bucket `lines` into pages, applying `policy` if there are too many.
    pub fn new(mut lines: Vec<String>, layout: &Layout, policy: OverflowPolicy) -> Pagination {
        let total_pages = page_count(lines.len(), layout.page_lines);
        let overflowing = total_pages > layout.max_pages;

        let mut dropped_lines = 0;
        let mut part_pages = None;
        if overflowing {
            match policy {
                OverflowPolicy::Truncate => {
                    dropped_lines = truncate_middle(&mut lines, layout.batch_lines());
                    log::info!(
                        "{total_pages} pages exceeds {}, kept first and last {} pages ({dropped_lines} lines dropped)",
                        layout.max_pages,
                        layout.batch_pages
                    );
                }
                OverflowPolicy::Split => {
                    part_pages = Some(layout.max_pages);
                    log::info!(
                        "{total_pages} pages exceeds {}, splitting into parts of {} pages",
                        layout.max_pages,
                        layout.max_pages
                    );
                }
            }
        }

        let pages = lines
            .chunks(layout.page_lines)
            .map(<[String]>::to_vec)
            .collect();

        Pagination {
            pages,
            dropped_lines,
            part_pages,
        }
    }

    pub fn pages(&self) -> &[Vec<String>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// The pages grouped by output file: one group unless splitting.
    pub fn parts(&self) -> Vec<&[Vec<String>]> {
        match self.part_pages {
            Some(n) => self.pages.chunks(n).collect(),
            None => vec![self.pages.as_slice()],
        }
    }
}
