//! Corr Pairs - Main entry point
//!
//! CLI tool that ranks the most (anti-)correlated stock pairs in a price
//! CSV and renders mean-centered comparison charts for them.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corr_pairs::{
    extract_top_pairs, load_json, render::ChartConfig, render_comparisons,
    reorder_by_median_correlation, CorrMatrix, PriceTable, TopPair,
};

#[derive(Parser)]
#[command(name = "corr_pairs")]
#[command(about = "Stock correlation pair ranking and comparison charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the top correlated and anti-correlated symbol pairs
    TopPairs {
        /// Input price CSV (date index column + one column per symbol)
        #[arg(short, long, default_value = "data/prices.csv")]
        input: String,

        /// Number of top pairs per side
        #[arg(short, long, default_value = "2")]
        num_top_corrs: usize,

        /// Trim correlations outside the [p, 100-p] percentile range
        #[arg(short, long, default_value = "1.0")]
        outlier_percentile: f64,
    },

    /// Rank pairs and render the mean-centered comparison chart grid
    Analyze {
        /// Input price CSV (date index column + one column per symbol)
        #[arg(short, long, default_value = "data/prices.csv")]
        input: String,

        /// Optional JSON config, echoed into the log
        #[arg(short, long)]
        config: Option<String>,

        /// Number of top pairs per side
        #[arg(short, long, default_value = "2")]
        num_top_corrs: usize,

        /// Trim correlations outside the [p, 100-p] percentile range
        #[arg(long, default_value = "1.0")]
        outlier_percentile: f64,

        /// Number of pair rows to plot
        #[arg(long, default_value = "2")]
        num_to_plot: usize,

        /// Plot prices from this date onward (YYYY-MM-DD)
        #[arg(short, long, default_value = "1970-01-01")]
        start: NaiveDate,

        /// Output PNG path
        #[arg(long, default_value = "comparison.png")]
        output: String,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("corr_pairs=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::TopPairs {
            input,
            num_top_corrs,
            outlier_percentile,
        } => {
            rank_pairs(&input, num_top_corrs, outlier_percentile)?;
        }
        Commands::Analyze {
            input,
            config,
            num_top_corrs,
            outlier_percentile,
            num_to_plot,
            start,
            output,
            height,
            width,
        } => {
            analyze(
                &input,
                config.as_deref(),
                num_top_corrs,
                outlier_percentile,
                num_to_plot,
                start,
                &output,
                height,
                width,
            )?;
        }
    }

    Ok(())
}

fn rank_pairs(input: &str, num_top_corrs: usize, outlier_percentile: f64) -> Result<Vec<TopPair>> {
    let table = PriceTable::from_csv(input)?;
    let corr = CorrMatrix::from_prices(&table);
    let sorted = reorder_by_median_correlation(&corr);
    let pairs = extract_top_pairs(&sorted, num_top_corrs, outlier_percentile);

    print_pair_table(&pairs);
    Ok(pairs)
}

#[allow(clippy::too_many_arguments)]
fn analyze(
    input: &str,
    config: Option<&str>,
    num_top_corrs: usize,
    outlier_percentile: f64,
    num_to_plot: usize,
    start: NaiveDate,
    output: &str,
    height: Option<u32>,
    width: Option<u32>,
) -> Result<()> {
    if let Some(path) = config {
        let value = load_json(path)?;
        tracing::info!("Loaded config {}: {}", path, value);
    }

    let table = PriceTable::from_csv(input)?;
    let corr = CorrMatrix::from_prices(&table);
    let sorted = reorder_by_median_correlation(&corr);
    let pairs = extract_top_pairs(&sorted, num_top_corrs, outlier_percentile);

    print_pair_table(&pairs);

    let chart = ChartConfig::with_size(height, width);
    render_comparisons(&table, &pairs, num_to_plot, start, &chart, output)?;

    Ok(())
}

fn print_pair_table(pairs: &[TopPair]) {
    println!("\nTop correlated pairs (ascending by correlation):");
    println!("{:>3}  {:<8} {:<8} {:>10}", "", "stock_1", "stock_2", "corr");
    for (i, p) in pairs.iter().enumerate() {
        println!(
            "{:>3}  {:<8} {:<8} {:>10.6}",
            i, p.symbol_1, p.symbol_2, p.corr
        );
    }
}
