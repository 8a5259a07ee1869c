//! The order files are visited in, which is the order their lines are printed.
//!
//! Two orderings are available, both applied to the entries of each directory
//! as the walk descends:
//! - `Lexical`: entries sorted by name, files and directories interleaved
//! - `FilesFirst`: the files at each level before its subdirectories

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug, Default, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    #[default]
    Lexical,
    FilesFirst,
}

impl Order {
    /// Compare two sibling entries.
    pub fn compare(&self, a: &Path, b: &Path) -> Ordering {
        match self {
            Order::Lexical => a.file_name().cmp(&b.file_name()),
            Order::FilesFirst => files_first(a, b),
        }
    }
}

/// Files before directories, each group by name.
pub fn files_first(a: &Path, b: &Path) -> Ordering {
    match (a.is_file(), b.is_file()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.file_name().cmp(&b.file_name()),
    }
}
