//! # sheetdeck-cli
//!
//! Command-line interface: turn a workbook into an interactive HTML report.

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use sheetdeck_report::{convert, Report, ReportFormat, ReportOptions, SystemClock, DEFAULT_THEME};
use sheetdeck_sheet::ReadOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// sheetdeck - Spreadsheet workbooks as interactive HTML reports
#[derive(Parser)]
#[command(name = "sheetdeck")]
#[command(author, version, about = "Convert spreadsheet workbooks into interactive HTML reports", long_about = None)]
struct Cli {
    /// Workbook to read (xlsx, xlsm, xlsb, xls, ods)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// HTML report to write
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Report format (markup, records)
    #[arg(short = 'f', long = "format", default_value = "markup")]
    format: FormatArg,

    /// Theme color for headers, tabs and buttons
    #[arg(long, value_name = "COLOR", default_value = DEFAULT_THEME)]
    theme: String,

    /// Write cell text into the page without HTML escaping
    #[arg(long)]
    raw_cells: bool,

    /// Leave out sheets without any header or data
    #[arg(long)]
    skip_empty_sheets: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output representation of the report.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum FormatArg {
    /// One HTML file with every table inline (default)
    #[default]
    Markup,
    /// HTML shell plus a `<title>_data.js` companion file
    Records,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markup => ReportFormat::Markup,
            FormatArg::Records => ReportFormat::Records,
        }
    }
}

impl Cli {
    fn report_options(&self) -> ReportOptions {
        ReportOptions::default()
            .with_format(self.format.into())
            .with_theme(self.theme.clone())
            .with_escape_cells(!self.raw_cells)
            .with_read_options(
                ReadOptions::default().with_skip_empty_sheets(self.skip_empty_sheets),
            )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let (Some(input), Some(output)) = (cli.input.as_deref(), cli.output.as_deref()) else {
        println!("{}", Cli::command().render_usage());
        return ExitCode::SUCCESS;
    };

    match run(input, output, &cli.report_options()) {
        Ok(report) => {
            println!(
                "[{}] {} {}",
                report.timestamp,
                "Report generated:".green().bold(),
                describe_files(&report)
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Convert one workbook.
fn run(input: &Path, output: &Path, options: &ReportOptions) -> Result<Report> {
    if output.is_dir() {
        bail!("Output path '{}' is a directory", output.display());
    }
    debug!(
        input = %input.display(),
        output = %output.display(),
        format = ?options.format,
        escape_cells = options.escape_cells,
        "converting workbook"
    );
    let report = convert(input, output, options, &SystemClock)?;
    info!(title = %report.title, files = report.files.len(), "conversion finished");
    Ok(report)
}

fn describe_files(report: &Report) -> String {
    report
        .paths()
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
