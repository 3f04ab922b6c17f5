use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use csv_format_support::chem::SmilesSyntax;
use csv_format_support::dialect::DelimiterPreference;
use csv_format_support::pipeline::{self, OutputFormat, ProcessOptions};
use csv_format_support::record::RunStatus;

use crate::cli::config::Config;

/// Normalize a delimited molecule file into the canonical loader format.
#[allow(clippy::too_many_arguments)]
pub fn run(
    input: PathBuf,
    output_dir: PathBuf,
    header: Option<bool>,
    generate_uuid: Option<bool>,
    prefer_tab: Option<bool>,
    format: OutputFormat,
    config: Option<PathBuf>,
) -> Result<()> {
    let file_config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    // CLI flags override config file values; both fall back to defaults.
    let options = ProcessOptions {
        header: header.or(file_config.process.header).unwrap_or(true),
        generate_uuid: generate_uuid
            .or(file_config.process.generate_uuid)
            .unwrap_or(true),
        delimiter_preference: if prefer_tab
            .or(file_config.process.prefer_tab)
            .unwrap_or(false)
        {
            DelimiterPreference::Tab
        } else {
            DelimiterPreference::Comma
        },
        output_format: format,
    };

    info!("csv-format-support");
    info!("==================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output_dir.display());
    info!("header={}", options.header);
    info!("generate_uuid={}", options.generate_uuid);

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let report = pipeline::run(&input, &output_dir, &options, &SmilesSyntax)
        .context("Processing failed")?;

    match report.status {
        RunStatus::Completed => {
            print_summary(&report);
            Ok(())
        }
        RunStatus::Aborted(reason) => {
            eprintln!("Run aborted: {}", reason);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "colorized_output")]
fn print_summary(report: &pipeline::RunReport) {
    use console::style;

    println!("{}", style("Run completed").green().bold());
    println!("  Records processed: {}", report.processed);
    println!("  Records accepted:  {}", style(report.accepted).green());
    if report.skipped.is_empty() {
        println!("  Records skipped:   0");
    } else {
        println!(
            "  Records skipped:   {}",
            style(report.skipped.len()).yellow()
        );
    }
    if let Some(path) = &report.output_path {
        println!("  Loader file:       {}", path.display());
    }
    if let Some(path) = &report.annotation_path {
        println!("  Annotations:       {}", path.display());
    }
}

#[cfg(not(feature = "colorized_output"))]
fn print_summary(report: &pipeline::RunReport) {
    println!("Run completed");
    println!("  Records processed: {}", report.processed);
    println!("  Records accepted:  {}", report.accepted);
    println!("  Records skipped:   {}", report.skipped.len());
    if let Some(path) = &report.output_path {
        println!("  Loader file:       {}", path.display());
    }
    if let Some(path) = &report.annotation_path {
        println!("  Annotations:       {}", path.display());
    }
}
