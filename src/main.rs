use anyhow::Context;
use clap::Parser;
use places_launcher::cli::{Args, print_summary};
use places_launcher::models::RunStats;
use places_launcher::processor::PlacesProcessor;
use std::process;
use tracing::debug;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    match run(&args) {
        Ok(stats) => {
            print_summary(&stats);
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<RunStats> {
    let config = args.to_config().context("Invalid options")?;
    let output_path = args.resolved_output_path();

    let processor = PlacesProcessor::new(args.input.clone(), output_path.clone())
        .with_config(config);

    if args.dry_run {
        processor
            .dry_run()
            .with_context(|| format!("Failed to convert {}", args.input.display()))
    } else {
        processor.process().with_context(|| {
            format!(
                "Failed to convert {} to {}",
                args.input.display(),
                output_path.display()
            )
        })
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("places_launcher={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}
