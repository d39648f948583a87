//! Stroop effect analysis
//!
//! Loads the reaction-time CSV, prints descriptive statistics and
//! histograms, checks normality and runs the paired t-test.
//!
//! Usage:
//! ```
//! cargo run -- --file data/stroopdata.csv
//! cargo run -- --json > report.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use stroop_analysis::analysis::HistogramOptions;
use stroop_analysis::{
    load_config, setup_logging, AppConfig, DataLoader, StroopAnalysis, DEFAULT_DATA_PATH,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Analyze Stroop effect reaction times")]
struct Args {
    /// Input CSV with Congruent and Incongruent columns
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    file: PathBuf,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of histogram bins
    #[arg(short, long)]
    bins: Option<usize>,

    /// Confidence level for the mean difference interval
    #[arg(long)]
    confidence: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Skip histograms
    #[arg(long)]
    no_plots: bool,

    /// Write the dataset with the difference column to this CSV
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(bins) = args.bins {
        config.plot.bins = bins;
    }
    if let Some(confidence) = args.confidence {
        config.analysis.confidence_level = confidence;
    }
    config.validate()?;

    setup_logging(&config.logging.level);

    let dataset = DataLoader::load_csv(&args.file)?;
    info!("Loaded {} subjects from {}", dataset.len(), args.file.display());

    if let Some(path) = &args.export {
        DataLoader::save_csv(&dataset, path)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        info!("Exported dataset to {}", path.display());
    }

    let report = StroopAnalysis::new(config.analysis.clone()).run(&dataset)?;

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("{}", "=".repeat(60).blue());
    println!("{}", "Stroop Effect Analysis".bold().blue());
    println!("{}", "=".repeat(60).blue());
    println!(
        "\n{} {} subjects from {}\n",
        "Loaded:".green(),
        dataset.len(),
        args.file.display()
    );

    if !args.no_plots {
        println!("{}", "Histograms".bold());
        let options = HistogramOptions::from(&config.plot);
        println!("{}", report.render_histograms(&dataset, &options)?);
    }

    println!("{}", report.render_tables());

    println!("{}", "Interpretation:".bold());
    let alpha = 1.0 - config.analysis.confidence_level;
    if report.t_test.is_significant(alpha) {
        println!(
            "  {} Incongruent words slow color naming by {:.2}s on average.",
            "✓".green(),
            report.t_test.mean_difference
        );
    } else {
        println!(
            "  {} No significant difference between conditions at alpha = {:.2}.",
            "?".yellow(),
            alpha
        );
    }

    Ok(())
}
