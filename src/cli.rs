use crate::file_ordering::Order;
use crate::sinks::{OverflowPolicy, RenderStrategy};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Prints the code files of a directory into a paginated PDF
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Source directory to scan
    #[clap(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// Output PDF path [default: <name>_<YYYYMMDD>.pdf]
    #[clap(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// TOML file with default settings
    #[clap(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// TrueType font covering the source text [default: fonts/SimSun.ttf]
    #[clap(long, value_name = "FILE", env = "CODE2PDF_FONT")]
    pub font: Option<PathBuf>,

    /// How lines are placed on the page
    #[clap(long, value_enum)]
    pub strategy: Option<RenderStrategy>,

    /// What to do with documents over 60 pages
    #[clap(long, value_enum)]
    pub overflow: Option<OverflowPolicy>,

    /// Order files are printed in
    #[clap(long, value_enum)]
    pub order: Option<Order>,

    /// Extra file extension to include (repeatable)
    #[clap(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Glob of files to leave out, relative to the input (repeatable)
    #[clap(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Skip unreadable files instead of aborting
    #[clap(long)]
    pub skip_errors: bool,

    /// Honour .gitignore and hidden-file rules
    #[clap(long = "gitignore")]
    pub respect_gitignore: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[clap(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["code2pdf"]).is_err());
        assert!(Cli::try_parse_from(["code2pdf", "-o", "out.pdf"]).is_err());
    }

    #[test]
    fn parses_the_short_flags() {
        let cli = Cli::try_parse_from(["code2pdf", "-i", "src", "-o", "out.pdf", "-vv"])
            .expect("can parse arguments");
        assert_eq!(cli.input, PathBuf::from("src"));
        assert_eq!(cli.output, Some(PathBuf::from("out.pdf")));
        assert_eq!(cli.verbose, 2);
        assert!(cli.strategy.is_none());
    }

    #[test]
    fn parses_repeated_and_enum_flags() {
        let cli = Cli::try_parse_from([
            "code2pdf",
            "-i",
            ".",
            "--ext",
            "rs",
            "--ext",
            "toml",
            "--exclude",
            "target/**",
            "--strategy",
            "baseline",
            "--overflow",
            "split",
            "--order",
            "files-first",
        ])
        .expect("can parse arguments");
        assert_eq!(cli.extensions, vec!["rs", "toml"]);
        assert_eq!(cli.exclude, vec!["target/**"]);
        assert_eq!(cli.strategy, Some(RenderStrategy::Baseline));
        assert_eq!(cli.overflow, Some(OverflowPolicy::Split));
        assert_eq!(cli.order, Some(Order::FilesFirst));
    }
}
