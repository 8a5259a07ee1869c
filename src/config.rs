//! Run configuration.
//!
//! Settings come from two places: an optional TOML file (`--config`) and the
//! command line. Every field of the file is optional; flags given on the
//! command line win over the file, and list-valued settings (extra extensions,
//! exclude globs) are the union of both.
//!
//! ```toml
//! font = "fonts/SimSun.ttf"
//! strategy = "baseline"
//! overflow = "split"
//! order = "files-first"
//! extensions = ["rs", "toml"]
//! exclude = ["vendor/**", "**/*.min.js"]
//! skip_errors = true
//! respect_gitignore = true
//! ```

use crate::cli::Cli;
use crate::errors::Error;
use crate::file_ordering::Order;
use crate::sinks::{Layout, OverflowPolicy, RenderStrategy, DEFAULT_FONT_PATH, PDF};
use crate::source::{Collector, CollectorBuilder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of a config file.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    pub font: Option<PathBuf>,
    pub strategy: Option<RenderStrategy>,
    pub overflow: Option<OverflowPolicy>,
    pub order: Option<Order>,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub skip_errors: bool,
    pub respect_gitignore: bool,
}

impl Configuration {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&contents)
            .map_err(|e| Error::InvalidInput(format!("{}: {e}", path.display())))
            .with_context(|| "Failed to parse TOML")
    }
}

/// Everything a run needs, fully resolved.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub project_name: String,
    pub pdf: PDF,
    pub order: Order,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub skip_errors: bool,
    pub respect_gitignore: bool,
}

impl Settings {
    /// Validate the input directory and merge the command line over `file`.
    pub fn resolve(cli: &Cli, file: Configuration) -> Result<Settings> {
        let input = cli.input.clone();
        if !input.is_dir() {
            return Err(Error::InvalidInput(format!(
                "source directory `{}` doesn't exist or isn't a directory",
                input.display()
            ))
            .into());
        }

        let project_name = project_name(&input)?;
        let outfile = cli
            .output
            .clone()
            .unwrap_or_else(|| default_output(&project_name));

        let font = cli
            .font
            .clone()
            .or(file.font)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_PATH));

        let mut extensions = file.extensions;
        extensions.extend(cli.extensions.iter().cloned());
        let mut exclude = file.exclude;
        exclude.extend(cli.exclude.iter().cloned());

        Ok(Settings {
            input,
            pdf: PDF {
                font,
                outfile,
                title: project_name.clone(),
                strategy: cli.strategy.or(file.strategy).unwrap_or_default(),
                overflow: cli.overflow.or(file.overflow).unwrap_or_default(),
                layout: Layout::default(),
            },
            project_name,
            order: cli.order.or(file.order).unwrap_or_default(),
            extensions,
            exclude,
            skip_errors: cli.skip_errors || file.skip_errors,
            respect_gitignore: cli.respect_gitignore || file.respect_gitignore,
        })
    }

    pub fn collector(&self) -> Result<Collector> {
        CollectorBuilder::default()
            .root(self.input.clone())
            .order(self.order)
            .extra_extensions(self.extensions.clone())
            .exclude(self.exclude.clone())
            .skip_errors(self.skip_errors)
            .respect_gitignore(self.respect_gitignore)
            .build()
            .with_context(|| "Failed to configure the file collector")
    }
}

/// The name of the project in `input`: its last path component, or for paths
/// like `.` and `..` the name of the directory they resolve to.
pub fn project_name(input: &Path) -> Result<String> {
    if let Some(name) = input.file_name() {
        return Ok(name.to_string_lossy().to_string());
    }
    let canonical = std::fs::canonicalize(input).map_err(|e| Error::io(input, e))?;
    Ok(canonical
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "code".to_string()))
}

/// `<name>_<YYYYMMDD>.pdf`, dated today.
pub fn default_output(project_name: &str) -> PathBuf {
    let date = chrono::Local::now().format("%Y%m%d");
    PathBuf::from(format!("{project_name}_{date}.pdf"))
}
