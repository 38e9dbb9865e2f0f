//! searchable-pdf CLI
//!
//! Adds an invisible, selectable text layer to scanned PDFs.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;

use searchable_pdf::config::{default_output_path, Config};
use searchable_pdf::logging;
use searchable_pdf::ocr::TextractDetector;
use searchable_pdf::pipeline::{
    ConversionReport, Pipeline, PipelineOptions, ProgressBarObserver, ProgressObserver,
};

#[derive(Parser)]
#[command(name = "searchable-pdf")]
#[command(version)]
#[command(about = "Make scanned PDFs searchable with an invisible text layer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect text on every page and write a searchable copy
    Convert {
        /// Input PDF file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file (default: <stem>_searchable.<ext> next to the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// AWS credentials profile (default: $AWS_PROFILE, then "default")
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,

        /// AWS region (default: $AWS_REGION, then "us-east-1")
        #[arg(long, value_name = "NAME")]
        region: Option<String>,

        /// Extra detection attempts per page after a transient failure
        #[arg(long, default_value = "0")]
        retries: u32,

        /// Print the detected text of each page
        #[arg(long)]
        print_text: bool,

        /// Write a JSON report of per-page outcomes
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,

        /// Increase log verbosity (-v debug, -vv trace)
        #[arg(short, long, action = ArgAction::Count)]
        verbose: u8,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            profile,
            region,
            retries,
            print_text,
            report,
            quiet,
            verbose,
        } => {
            logging::init(verbose);
            let config = Config::from_env().with_overrides(profile, region);
            let options = PipelineOptions {
                detection_retries: retries,
                retry_backoff: Duration::from_millis(500),
                collect_text: print_text,
                ..Default::default()
            };
            cmd_convert(&input, output.as_deref(), report.as_deref(), &config, options, quiet).await
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    report_path: Option<&Path>,
    config: &Config,
    options: PipelineOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    let detector = TextractDetector::new(&config.aws).await;
    let observer: Arc<dyn ProgressObserver> = if quiet {
        Arc::new(ProgressBarObserver::hidden())
    } else {
        Arc::new(ProgressBarObserver::new())
    };

    let pipeline = Pipeline::new(Arc::new(detector), options).with_observer(observer);
    let report = pipeline
        .convert(input, &output)
        .await
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    if pipeline.options().collect_text {
        print_text(&report);
    }

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    println!("{} {}", "Saved to".green(), output.display());
    if !report.is_complete() {
        let skipped: Vec<String> = report
            .skipped()
            .map(|page| (page.index + 1).to_string())
            .collect();
        println!(
            "{} {} of {} pages have no text layer (pages {})",
            "Warning:".yellow(),
            skipped.len(),
            report.page_count(),
            skipped.join(", ")
        );
    }

    Ok(())
}

fn print_text(report: &ConversionReport) {
    for page in &report.pages {
        println!("{}", format!("--- page {} ---", page.index + 1).dimmed());
        match &page.text {
            Some(text) => println!("{}", text),
            None => println!("{}", "(skipped)".dimmed()),
        }
    }
}
