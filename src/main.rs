use anyhow::{Context, Result};
use cli::Cli;
use config::{Configuration, Settings};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use sinks::LoadedFont;
use std::process::ExitCode;

mod character_width;
mod cli;
mod config;
mod errors;
mod file_ordering;
mod line_analysis;
mod pipeline;
mod sinks;
mod source;

fn main() -> ExitCode {
    use clap::Parser;
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also land here
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(&cli);

    if let Err(e) = try_main(&cli) {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn try_main(cli: &Cli) -> Result<()> {
    let quiet = cli.quiet;
    let say = |message: String| {
        if !quiet {
            println!("{message}");
        }
    };

    let file_config = match &cli.config {
        Some(path) => Configuration::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Configuration::default(),
    };
    let settings = Settings::resolve(cli, file_config)?;
    say(settings.project_name.clone());

    let pdf = &settings.pdf;
    let font = LoadedFont::load(&pdf.font)?;
    let text_width = pdf.layout.text_width_mm(pdf.strategy);
    log::info!(
        "About {} characters fit on a line",
        character_width::calculate_max_chars_per_line(text_width, &font, pdf.layout.font_size_pt)
    );

    let prepared = pipeline::prepare(&settings, &font)?;
    let stats = &prepared.line_stats;
    if prepared.skipped > 0 {
        say(format!(
            "Read {} files ({} skipped)",
            prepared.files, prepared.skipped
        ));
    } else {
        say(format!("Read {} files", prepared.files));
    }
    say(format!(
        "{} lines of code, {} pages",
        stats.physical_lines, prepared.untruncated_pages
    ));
    if stats.lines_that_wrap > 0 {
        say(format!(
            "{} lines ({:.1}%) wrapped, the longest is {} characters at {}:{}",
            stats.lines_that_wrap,
            stats.wrap_percentage(),
            stats.longest_line_length,
            stats.longest_line_file.display(),
            stats.longest_line_number
        ));
    }

    let pagination = &prepared.pagination;
    if pagination.dropped_lines > 0 {
        say(format!(
            "Over {} pages: keeping the first and last {} pages ({} lines), {} lines omitted",
            pdf.layout.max_pages,
            pdf.layout.batch_pages,
            pagination.line_count(),
            pagination.dropped_lines
        ));
    }
    if let Some(part_pages) = pagination.part_pages {
        say(format!(
            "Over {} pages: writing {} files of up to {part_pages} pages",
            pdf.layout.max_pages,
            pagination.parts().len()
        ));
    }

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(pagination.page_count() as u64)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("can parse progress style")
            .progress_chars("#>-"),
    );

    let render_stats = pdf
        .render(pagination, &font, &progress)
        .with_context(|| "Failed to render PDF")?;

    let size = byte_unit::Byte::from_u64(render_stats.bytes_written)
        .get_appropriate_unit(byte_unit::UnitType::Binary);
    say(String::new());
    for outfile in render_stats.outfiles.iter() {
        say(format!("  PDF saved to: {}", outfile.display()));
    }
    say(format!("  Pages:        {}", render_stats.page_count));
    say(format!("  Size:         {size}"));

    Ok(())
}
