//! PDF output.
//!
//! Ties wrapping, pagination, and rendering together for one run. Under the
//! truncate policy (or whenever the document is small enough) a single file is
//! written to `outfile`. Under the split policy an oversized document is written
//! as `<stem>_page<N>.pdf` parts next to `outfile`; a failure part-way leaves
//! the earlier parts on disk.
//!
//! Each document is rendered completely in memory before the file is created,
//! so a rendering failure never leaves a truncated PDF behind.

mod config;
mod fonts;
mod pagination;
mod rendering;
mod wrapping;

pub use config::*;
pub use fonts::*;
pub use pagination::*;
pub use wrapping::*;
#[cfg(test)]
pub(crate) use wrapping::test::FixedAdvance;

use crate::errors::Error;
use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Path of the `part`th (1-indexed) output file when splitting.
pub fn part_path(outfile: &Path, part: usize) -> PathBuf {
    let stem = outfile
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    outfile.with_file_name(format!("{stem}_page{part}.pdf"))
}

impl PDF {
    pub fn render(
        &self,
        pagination: &Pagination,
        font: &LoadedFont,
        progress: &ProgressBar,
    ) -> Result<RenderStats> {
        let total_pages = pagination.page_count();
        let parts = pagination.parts();
        let split = parts.len() > 1;

        let mut stats = RenderStats {
            page_count: 0,
            outfiles: Vec::with_capacity(parts.len()),
            bytes_written: 0,
        };

        for (i, pages) in parts.into_iter().enumerate() {
            let outfile = if split {
                part_path(&self.outfile, i + 1)
            } else {
                self.outfile.clone()
            };

            let doc = rendering::render_part(
                self,
                font,
                pages,
                stats.page_count + 1,
                total_pages,
                progress,
            )
            .with_context(|| format!("Failed to render {}", outfile.display()))?;
            let bytes = doc
                .save_to_bytes()
                .map_err(|e| anyhow!("Failed to serialize {}: {e}", outfile.display()))?;

            write_or_clean_up(&outfile, &bytes)?;
            log::info!("Wrote {} ({} pages)", outfile.display(), pages.len());

            stats.page_count += pages.len();
            stats.bytes_written += bytes.len() as u64;
            stats.outfiles.push(outfile);
        }

        progress.finish_with_message("Pages rendered");
        Ok(stats)
    }
}

/// Write `bytes` to `path`, removing whatever was written if that fails.
fn write_or_clean_up(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Err(e) = std::fs::write(path, bytes) {
        let _ = std::fs::remove_file(path);
        return Err(Error::io(path, e))
            .with_context(|| format!("Failed to write {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parts_are_numbered_next_to_the_output() {
        assert_eq!(
            part_path(Path::new("out/project_20240101.pdf"), 1),
            PathBuf::from("out/project_20240101_page1.pdf")
        );
        assert_eq!(
            part_path(Path::new("book.pdf"), 12),
            PathBuf::from("book_page12.pdf")
        );
    }

    #[test]
    fn failed_writes_report_io_errors() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("missing").join("out.pdf");
        let err = write_or_clean_up(&path, b"%PDF").expect_err("parent doesn't exist");
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Io { .. })));
        assert!(!path.exists());
    }
}
