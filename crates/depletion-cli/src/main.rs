//! `depletion` CLI — predict when a stock runs out from a JSON plan.
//!
//! ## Usage
//!
//! ```sh
//! # Predict the depletion date (plan on stdin, today from the local clock)
//! cat plan.json | depletion predict
//!
//! # Pin the reference date and override the plan's stock
//! depletion predict -i plan.json --today 2026-03-01 --stock 750
//!
//! # Same, as JSON
//! depletion predict -i plan.json --json
//!
//! # Print every consumption up to a horizon
//! depletion forecast -i plan.json --horizon 2026-06-30 --limit 20
//!
//! # Debug logging on stderr
//! depletion -v predict -i plan.json
//! ```
//!
//! A plan looks like:
//!
//! ```json
//! {"stock": 500, "uses": [{"amount": 10, "periodicity": "daily", "start_date": "2026-03-01"}]}
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use depletion_engine::{Clock, FixedClock, Forecast, ForecastOptions, Outcome, Plan, SystemClock};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "depletion",
    version,
    about = "Predict the date a stock runs out under recurring daily and weekly uses"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the date the stock runs out
    Predict {
        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Print every consumption until the stock runs out
    Forecast {
        #[command(flatten)]
        plan: PlanArgs,
        /// Last date to simulate, inclusive (YYYY-MM-DD)
        #[arg(long)]
        horizon: Option<NaiveDate>,
        /// Show at most this many consumptions
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Args)]
struct PlanArgs {
    /// Plan file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Starting stock, replacing the plan's own
    #[arg(long, allow_negative_numbers = true)]
    stock: Option<i64>,
    /// Reference date (YYYY-MM-DD); defaults to the local date
    #[arg(long, env = "DEPLETION_TODAY")]
    today: Option<NaiveDate>,
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // try_init: a subscriber may already be installed when run under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Commands::Predict { plan: args } => {
            let (plan, clock) = load_plan(&args)?;
            let depletion_date = plan.predict_end_date(&clock);

            let rendered = if args.json {
                let value = serde_json::json!({
                    "today": clock.today(),
                    "stock": plan.stock,
                    "depletion_date": depletion_date,
                });
                serde_json::to_string_pretty(&value)?
            } else {
                match depletion_date {
                    Some(date) => date.to_string(),
                    None => "never depleted".to_string(),
                }
            };
            write_output(args.output.as_deref(), &rendered)?;
        }
        Commands::Forecast {
            plan: args,
            horizon,
            limit,
        } => {
            let (plan, clock) = load_plan(&args)?;
            let options = ForecastOptions {
                horizon,
                max_entries: limit,
            };
            let forecast = plan.forecast(&clock, options);

            let rendered = if args.json {
                serde_json::to_string_pretty(&forecast)?
            } else {
                render_forecast(&forecast)
            };
            write_output(args.output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

/// Read and validate the plan, apply `--stock`, and fix the reference date.
fn load_plan(args: &PlanArgs) -> Result<(Plan, FixedClock)> {
    let json = read_input(args.input.as_deref())?;
    let mut plan = Plan::from_json(&json).context("Failed to parse plan")?;
    if let Some(stock) = args.stock {
        plan.stock = stock;
    }

    let today = args.today.unwrap_or_else(|| SystemClock.today());
    tracing::debug!(%today, stock = plan.stock, uses = plan.uses.len(), "loaded plan");

    Ok((plan, FixedClock(today)))
}

/// One line per consumption, then a summary line.
fn render_forecast(forecast: &Forecast) -> String {
    let mut lines: Vec<String> = forecast
        .ledger
        .iter()
        .map(|c| {
            format!(
                "{}  {:<6}  -{:<6}  remaining {}",
                c.date, c.periodicity, c.amount, c.remaining
            )
        })
        .collect();

    if forecast.truncated {
        let hidden = forecast.occurrences_consumed - forecast.ledger.len();
        lines.push(format!("... {} more", hidden));
    }

    lines.push(match forecast.outcome {
        Outcome::Depleted { date } => format!("depleted on {}", date),
        Outcome::NeverDepleted => format!("never depleted ({} left)", forecast.remaining),
        Outcome::HorizonReached { horizon } => {
            format!("not depleted by {} ({} left)", horizon, forecast.remaining)
        }
    });

    lines.join("\n")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
