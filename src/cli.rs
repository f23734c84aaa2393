//! Command-line interface components.

use crate::config::{LauncherConfig, OutputFormat};
use crate::error::Result;
use crate::models::RunStats;
use clap::Parser;
use colored::*;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "places-launcher")]
#[command(about = "Convert a Google Takeout saved-places export into a page of Apple Maps links")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Takeout JSON export (e.g. "Saved Places.json")
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (defaults to saved_places.<format>)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format; inferred from the OUTPUT extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Page title for HTML output
    #[arg(long)]
    pub title: Option<String>,

    /// Prefix for generated names of places without one
    #[arg(long, value_name = "PREFIX")]
    pub fallback_prefix: Option<String>,

    /// Decimal places for coordinates (minimum 5)
    #[arg(long)]
    pub precision: Option<usize>,

    /// Extract and report without writing any output
    #[arg(long)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Format from `--format`, else the output extension, else HTML
    pub fn resolved_format(&self) -> OutputFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or_default()
    }

    /// Output path, defaulting to `saved_places.<ext>` in the working directory
    pub fn resolved_output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.resolved_format().default_output_path())
    }

    /// Build and validate the run configuration
    pub fn to_config(&self) -> Result<LauncherConfig> {
        let mut config = LauncherConfig::default().with_format(self.resolved_format());

        if let Some(title) = &self.title {
            config = config.with_title(title.clone());
        }
        if let Some(prefix) = &self.fallback_prefix {
            config = config.with_fallback_prefix(prefix.clone());
        }
        if let Some(precision) = self.precision {
            config = config.with_precision(precision);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Print the end-of-run report to stdout
pub fn print_summary(stats: &RunStats) {
    let extraction = &stats.extraction;

    match &stats.output_path {
        Some(path) => println!(
            "{} {} entries to {}",
            "Wrote".bright_green().bold(),
            extraction.places_emitted.to_string().bright_white().bold(),
            path.display().to_string().bright_cyan()
        ),
        None => println!(
            "{} {} entries would be written (dry run)",
            "Found".bright_green().bold(),
            extraction.places_emitted.to_string().bright_white().bold()
        ),
    }

    let dropped = extraction.dropped_total();
    if dropped > 0 {
        println!(
            "  {} {} of {} records without usable coordinates",
            "Skipped".bright_yellow(),
            dropped.to_string().bright_white().bold(),
            extraction.total_records
        );
        for (reason, count) in &extraction.dropped {
            println!("    {} {}", format!("{:>5}", count).bright_black(), reason);
        }
    }

    println!(
        "  {} {:.2}s",
        "Completed in".bright_black(),
        stats.processing_time.as_secs_f64()
    );
}
