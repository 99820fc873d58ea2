//! PairLab CLI — run pairs backtests and export artifacts.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config over a CSV price file
//!   (or synthetic data) and export artifacts
//! - `synth` — generate a synthetic cointegrated price CSV for experiments

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pairlab_core::data::read_wide_csv;
use pairlab_runner::synthetic::cointegrated_pairs;
use pairlab_runner::{export_run, run_single_backtest, RunConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "pairlab", about = "PairLab CLI — pairs-trading backtest engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest from a TOML config file.
    Run {
        /// Path to a TOML run config.
        #[arg(long)]
        config: PathBuf,

        /// Wide CSV price file: date column plus one column per symbol.
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Use seeded synthetic data instead of a price file.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Synthetic mode: number of pairs.
        #[arg(long, default_value_t = 2)]
        pairs: usize,

        /// Synthetic mode: number of daily steps.
        #[arg(long, default_value_t = 504)]
        days: usize,

        /// Synthetic mode: RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output: PathBuf,
    },
    /// Generate a synthetic cointegrated price CSV.
    Synth {
        #[arg(long, default_value_t = 2)]
        pairs: usize,

        #[arg(long, default_value_t = 504)]
        days: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output CSV path.
        #[arg(long, default_value = "prices.csv")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Run {
            config,
            prices,
            synthetic,
            pairs,
            days,
            seed,
            output,
        } => cmd_run(config, prices, synthetic, pairs, days, seed, output),
        Commands::Synth {
            pairs,
            days,
            seed,
            out,
        } => cmd_synth(pairs, days, seed, out),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    config_path: PathBuf,
    prices_path: Option<PathBuf>,
    synthetic: bool,
    pairs: usize,
    days: usize,
    seed: u64,
    output: PathBuf,
) -> Result<()> {
    let config = RunConfig::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    let prices = match (prices_path, synthetic) {
        (Some(path), false) => {
            read_wide_csv(&path).with_context(|| format!("loading prices {}", path.display()))?
        }
        (None, true) => cointegrated_pairs(pairs, days, seed).0,
        (Some(_), true) => bail!("--prices and --synthetic are mutually exclusive"),
        (None, false) => bail!("either --prices or --synthetic is required"),
    };

    let result = run_single_backtest(&config, prices)?;
    let paths = export_run(&output, &result)?;
    info!(run_id = %result.run_id, "artifacts written");

    let overall = &result.report.overall;
    println!("run id:            {}", result.run_id);
    println!("final value:       {:.2}", overall.final_value);
    println!("total return:      {:.4}", overall.total_return);
    println!("annual return:     {:.4}", overall.annual_return);
    println!("annual volatility: {:.4}", overall.annual_volatility);
    println!("sharpe ratio:      {:.4}", overall.sharpe_ratio);
    println!("max drawdown:      {:.4}", overall.max_drawdown);
    println!("win rate:          {:.4}", overall.win_rate);
    println!("closed trades:     {}", overall.trade_count);
    if result.halted {
        println!(
            "halted:            {}",
            result.halt_detail.as_deref().unwrap_or("risk limit breach")
        );
    }
    if result.failed_steps > 0 {
        println!("failed steps:      {}", result.failed_steps);
    }
    println!("report:            {}", paths.report_json.display());
    Ok(())
}

fn cmd_synth(pairs: usize, days: usize, seed: u64, out: PathBuf) -> Result<()> {
    let (table, pair_list) = cointegrated_pairs(pairs, days, seed);

    let mut file = std::fs::File::create(&out)
        .with_context(|| format!("creating {}", out.display()))?;
    write!(file, "date")?;
    for symbol in table.symbols() {
        write!(file, ",{symbol}")?;
    }
    writeln!(file)?;
    for (step, date) in table.index().iter().enumerate() {
        write!(file, "{date}")?;
        for symbol in table.symbols() {
            write!(file, ",{:.4}", table.price(symbol, step).unwrap_or(f64::NAN))?;
        }
        writeln!(file)?;
    }

    println!("wrote {} days x {} symbols to {}", days, table.symbols().len(), out.display());
    println!(
        "pairs: {}",
        pair_list
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}
