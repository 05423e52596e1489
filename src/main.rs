//! Social Charts - renders the engagement charts from CSV into SVG files
//! and a host HTML page.

use anyhow::{bail, Context, Result};
use clap::Parser;
use social_charts::data::Validation;
use social_charts::logging;
use social_charts::output::{OutputFormat, OutputWriter};
use social_charts::{AppConfig, ChartKind, Pipeline};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "social-charts", version, about = "Render social media engagement charts")]
struct Cli {
    /// Directory holding the input CSV files
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory for the rendered files
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Fail on malformed numbers or dates instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Also write the box plot quantiles as JSON
    #[arg(long)]
    summary: bool,

    /// Open the host page when done
    #[arg(long)]
    open: bool,

    /// Render only these charts (repeatable)
    #[arg(long, value_enum)]
    only: Vec<ChartKind>,
}

fn main() -> Result<()> {
    logging::init_logging()?;
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.out_dir {
        config.out_dir = dir;
    }
    if cli.strict {
        config.validation = Validation::Strict;
    }

    let kinds = ChartKind::select(&cli.only);

    info!(data_dir = %config.data_dir.display(), charts = kinds.len(), "rendering");
    let pipeline = Pipeline::new(&config)?;
    let results = pipeline.run_all(&kinds);

    let report = OutputWriter::new(&config.out_dir, cli.format, cli.summary)
        .write(&results)
        .context("writing outputs")?;

    if cli.open {
        open::that(&report.page)
            .with_context(|| format!("opening {}", report.page.display()))?;
    }

    if !report.failed.is_empty() {
        let failed: Vec<String> = report.failed.iter().map(|k| k.to_string()).collect();
        bail!("{} chart(s) failed: {}", failed.len(), failed.join(", "));
    }
    if !report.png_failed.is_empty() {
        let failed: Vec<String> = report.png_failed.iter().map(|k| k.to_string()).collect();
        bail!("PNG export failed for: {}", failed.join(", "));
    }
    Ok(())
}
