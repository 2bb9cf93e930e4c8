//! Text-table and JSON rendering of an aggregation run.

use colored::Colorize;
use serde::Serialize;

use crate::analytics::{
    Bucket, BucketSeries, CategorySlice, ForecastReport, ProductSlice, SeriesTotals,
};
use crate::currency::format_grouped;
use crate::errors::TallyError;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub color: bool,
    pub currency_prefix: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            color: true,
            currency_prefix: "₹".into(),
        }
    }
}

/// Aligned table of the bucket series with a totals row. Empty series
/// render as a placeholder line so callers can print unconditionally.
pub fn render_table(series: &BucketSeries, options: &ReportOptions) -> String {
    if series.is_empty() {
        return "No data for the selected period.\n".to_string();
    }
    let prefix = options.currency_prefix.as_str();
    let rows: Vec<[String; 4]> = series
        .buckets
        .iter()
        .map(|bucket| bucket_row(bucket, prefix))
        .collect();
    let totals = series.totals();
    let totals_row = [
        "Total".to_string(),
        format_grouped(totals.revenue, prefix),
        format_grouped(totals.expense, prefix),
        format_grouped(totals.profit, prefix),
    ];
    let header = ["Period", "Revenue", "Expense", "Profit"];

    let mut widths = [
        header[0].len(),
        header[1].len(),
        header[2].len(),
        header[3].len(),
    ];
    for row in rows.iter().chain(std::iter::once(&totals_row)) {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(str::to_string), &widths, None, false);
    push_separator(&mut out, &widths);
    for (bucket, row) in series.buckets.iter().zip(rows) {
        push_row(&mut out, &row, &widths, Some(bucket.profit), options.color);
    }
    push_separator(&mut out, &widths);
    push_row(&mut out, &totals_row, &widths, Some(totals.profit), options.color);
    out
}

fn bucket_row(bucket: &Bucket, prefix: &str) -> [String; 4] {
    [
        bucket.label.clone(),
        format_grouped(bucket.revenue, prefix),
        format_grouped(bucket.expense, prefix),
        format_grouped(bucket.profit, prefix),
    ]
}

fn push_row(
    out: &mut String,
    row: &[String; 4],
    widths: &[usize; 4],
    profit: Option<f64>,
    color: bool,
) {
    let label = pad_right(&row[0], widths[0]);
    let revenue = pad_left(&row[1], widths[1]);
    let expense = pad_left(&row[2], widths[2]);
    let mut profit_cell = pad_left(&row[3], widths[3]);
    if color {
        if let Some(value) = profit {
            profit_cell = if value < 0.0 {
                profit_cell.red().to_string()
            } else {
                profit_cell.green().to_string()
            };
        }
    }
    out.push_str(&format!("{label}  {revenue}  {expense}  {profit_cell}\n"));
}

fn push_separator(out: &mut String, widths: &[usize; 4]) {
    let total: usize = widths.iter().sum::<usize>() + 6;
    out.push_str(&"-".repeat(total));
    out.push('\n');
}

fn pad_right(cell: &str, width: usize) -> String {
    format!("{cell}{}", " ".repeat(width.saturating_sub(cell.chars().count())))
}

fn pad_left(cell: &str, width: usize) -> String {
    format!("{}{cell}", " ".repeat(width.saturating_sub(cell.chars().count())))
}

/// Category and product sections appended below the main table.
pub fn render_breakdown(
    categories: &[CategorySlice],
    products: &[ProductSlice],
    options: &ReportOptions,
) -> String {
    let prefix = options.currency_prefix.as_str();
    let mut out = String::new();
    if !categories.is_empty() {
        out.push_str("Sales by category:\n");
        for slice in categories {
            out.push_str(&format!(
                "  {}  {} ({:.1}%)\n",
                slice.category,
                format_grouped(slice.amount, prefix),
                slice.share_pct
            ));
        }
    }
    if !products.is_empty() {
        out.push_str("Top products:\n");
        for slice in products {
            out.push_str(&format!(
                "  {}  {} ({} units)\n",
                slice.product,
                format_grouped(slice.revenue, prefix),
                slice.quantity
            ));
        }
    }
    out
}

/// Forecast section: projected values per series plus insight lines.
pub fn render_forecast(
    forecast: &ForecastReport,
    insights: &[String],
    options: &ReportOptions,
) -> String {
    let prefix = options.currency_prefix.as_str();
    let mut out = String::new();
    out.push_str(&format!("Forecast (next {} periods):\n", forecast.periods));
    for (name, projection) in [
        ("Revenue", &forecast.revenue),
        ("Expense", &forecast.expense),
        ("Profit", &forecast.profit),
    ] {
        let values: Vec<String> = projection
            .values
            .iter()
            .map(|value| format_grouped(*value, prefix))
            .collect();
        out.push_str(&format!("  {name}: {}\n", values.join(", ")));
    }
    for insight in insights {
        out.push_str(&format!("  * {insight}\n"));
    }
    out
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    granularity: String,
    buckets: &'a [Bucket],
    totals: SeriesTotals,
}

/// Machine-readable rendering of the same data as the table.
pub fn render_json(series: &BucketSeries) -> Result<String, TallyError> {
    let document = JsonReport {
        granularity: series.granularity.label().to_string(),
        buckets: &series.buckets,
        totals: series.totals(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
