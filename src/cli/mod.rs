//! Command-line front end: import a CSV, aggregate, print or export.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};

use crate::analytics::{
    BreakdownService, ForecastService, Granularity, PeriodAggregator,
};
use crate::config::{Config, ConfigManager};
use crate::domain::DateRange;
use crate::errors::TallyError;
use crate::{ingest, report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "tally_core_cli",
    about = "Aggregates sales and expense CSVs into period reports"
)]
pub struct Cli {
    /// Path to the transactions CSV file.
    pub input: PathBuf,

    /// Bucket resolution: daily, weekly, monthly, quarterly, half-yearly,
    /// yearly, or custom. Defaults to the configured granularity.
    #[arg(short, long, value_parser = parse_granularity)]
    pub granularity: Option<Granularity>,

    /// Custom range start (YYYY-MM-DD); implies custom granularity.
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Custom range end (YYYY-MM-DD); implies custom granularity.
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Reference date standing in for "today" (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub reference: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Project this many future periods and print trend insights.
    #[arg(long)]
    pub forecast: Option<usize>,

    /// How many products to list in the breakdown section.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Write the aggregated buckets to this CSV path.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

fn parse_granularity(raw: &str) -> Result<Granularity, String> {
    raw.parse::<Granularity>().map_err(|err| err.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| err.to_string())
}

pub fn run() -> Result<(), TallyError> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<(), TallyError> {
    let config = load_config();
    let imported = ingest::import_transactions(&cli.input)?;
    if imported.skipped > 0 {
        eprintln!(
            "warning: skipped {} malformed row(s) out of {}",
            imported.skipped,
            imported.imported + imported.skipped
        );
    }

    let custom = match (cli.from, cli.to) {
        (Some(from), Some(to)) => Some(DateRange::new(from, to)?),
        (None, None) => None,
        _ => {
            return Err(TallyError::InvalidInput(
                "custom ranges need both --from and --to".into(),
            ))
        }
    };
    let granularity = cli
        .granularity
        .or(custom.map(|_| Granularity::Custom))
        .unwrap_or(config.default_granularity);
    let reference = cli
        .reference
        .unwrap_or_else(|| Local::now().date_naive());

    let series =
        PeriodAggregator::aggregate(&imported.transactions, granularity, reference, custom);

    let options = report::ReportOptions {
        color: !cli.no_color,
        currency_prefix: config.currency_prefix.clone(),
    };
    match cli.format {
        OutputFormat::Table => {
            println!("{} profit analysis", granularity.label());
            print!("{}", report::render_table(&series, &options));
            let categories = BreakdownService::sales_by_category(&imported.transactions);
            let products = BreakdownService::top_products(&imported.transactions, cli.top);
            let breakdown = report::render_breakdown(&categories, &products, &options);
            if !breakdown.is_empty() {
                print!("\n{breakdown}");
            }
            if let Some(periods) = cli.forecast {
                let forecast = ForecastService::project(&series, periods);
                let insights =
                    ForecastService::insights(&series, &forecast, products.first());
                print!("\n{}", report::render_forecast(&forecast, &insights, &options));
            }
        }
        OutputFormat::Json => {
            println!("{}", report::render_json(&series)?);
        }
    }

    if let Some(path) = cli.export.as_deref() {
        ingest::export_buckets(path, &series)?;
        tracing::info!(path = %path.display(), "bucket series exported");
    }
    Ok(())
}

/// Config problems fall back to defaults; reporting should not die on a
/// corrupt preferences file.
fn load_config() -> Config {
    match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "using default config");
            Config::default()
        }
    }
}
