use crate::errors::Error;
use crate::file_ordering::Order;
use crate::source::SourceLine;
use anyhow::{Context, Result};
use derive_builder::Builder;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Extensions (without the dot) of the files whose lines get printed.
pub const CODE_EXTENSIONS: &[&str] = &[
    "java",
    "py",
    "ts",
    "js",
    "html",
    "css",
    "xml",
    "sql",
    "sh",
    "properties",
    "yml",
    "yaml",
    "json",
    "go",
    "php",
    "cpp",
    "c",
    "h",
    "hpp",
    "cs",
    "rb",
    "pl",
    "lua",
    "swift",
    "kt",
    "scala",
    "groovy",
    "gradle",
];

/// Walks a directory and gathers the non-blank lines of its code files.
#[derive(Builder, Debug, Clone)]
#[builder(setter(into))]
pub struct Collector {
    root: PathBuf,
    #[builder(default)]
    order: Order,
    /// Extensions allowed on top of [`CODE_EXTENSIONS`], with or without a dot
    #[builder(default)]
    extra_extensions: Vec<String>,
    /// Globs matched against the path relative to `root`
    #[builder(default)]
    exclude: Vec<String>,
    /// Skip unreadable files and walk errors instead of aborting
    #[builder(default)]
    skip_errors: bool,
    /// Honour `.gitignore`, `.ignore`, and hidden-file rules
    #[builder(default)]
    respect_gitignore: bool,
}

/// Everything the walk produced.
#[derive(Debug, Default)]
pub struct Collection {
    /// Non-blank lines, in visitation order
    pub lines: Vec<SourceLine>,
    /// Code files whose lines were collected
    pub files: usize,
    /// Files and entries skipped because of errors
    pub skipped: usize,
}

impl Collector {
    /// Whether `path` has one of the allowed extensions. Matching is exact, so
    /// `Main.JAVA` is not a code file.
    pub fn is_code_file(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        CODE_EXTENSIONS.contains(&ext)
            || self
                .extra_extensions
                .iter()
                .any(|extra| extra.trim_start_matches('.') == ext)
    }

    fn exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in self.exclude.iter() {
            let glob = Glob::new(pattern)
                .map_err(|e| Error::InvalidInput(format!("bad exclude glob `{pattern}`: {e}")))?;
            builder.add(glob);
        }
        builder
            .build()
            .with_context(|| "Failed to compile exclude globs")
    }

    /// Walk the root and collect lines.
    ///
    /// Files that fail to read abort the whole walk unless `skip_errors` is
    /// set, in which case they are logged and counted.
    pub fn collect(&self) -> Result<Collection> {
        let excluded = self.exclude_set()?;

        let mut walk = WalkBuilder::new(&self.root);
        walk.standard_filters(self.respect_gitignore)
            .require_git(false)
            .follow_links(false);
        let order = self.order;
        walk.sort_by_file_path(move |a, b| order.compare(a, b));

        let mut collection = Collection::default();
        for entry in walk.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if self.skip_errors => {
                    log::warn!("Skipping unwalkable entry: {e}");
                    collection.skipped += 1;
                    continue;
                }
                Err(e) => {
                    let e = std::io::Error::new(std::io::ErrorKind::Other, e);
                    return Err(Error::io(&self.root, e))
                        .with_context(|| format!("Failed to walk {}", self.root.display()));
                }
            };

            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                continue;
            }
            let path = entry.path();
            if !self.is_code_file(path) {
                continue;
            }
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            if excluded.is_match(relative) {
                log::debug!("Excluded {}", relative.display());
                continue;
            }

            let contents = match read_source(path) {
                Ok(contents) => contents,
                Err(e) if self.skip_errors => {
                    log::warn!("Skipping {}: {e:#}", path.display());
                    collection.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let lines = SourceLine::from_contents(&contents, path);
            log::debug!("{}: {} lines", path.display(), lines.len());
            collection.lines.extend(lines);
            collection.files += 1;
        }

        Ok(collection)
    }
}

/// Read a file as text. Bytes that aren't UTF-8 are replaced rather than
/// failing the read.
fn read_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    match String::from_utf8(bytes) {
        Ok(contents) => Ok(contents),
        Err(e) => {
            log::warn!(
                "{} isn't valid UTF-8, invalid bytes will be replaced",
                path.display()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
