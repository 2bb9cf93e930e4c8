//! Least-squares trend projection over a bucketed series.

use serde::{Deserialize, Serialize};

use crate::currency::format_inr;

use super::aggregate::BucketSeries;
use super::breakdown::ProductSlice;

/// Projected future values for one series plus the fitted per-period slope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesProjection {
    pub values: Vec<f64>,
    pub slope: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastReport {
    pub periods: usize,
    pub revenue: SeriesProjection,
    pub expense: SeriesProjection,
    pub profit: SeriesProjection,
}

pub struct ForecastService;

impl ForecastService {
    /// Fits a line through each of the revenue/expense/profit series and
    /// projects `periods` buckets past the end, clamping at zero.
    pub fn project(series: &BucketSeries, periods: usize) -> ForecastReport {
        let revenue: Vec<f64> = series.buckets.iter().map(|b| b.revenue).collect();
        let expense: Vec<f64> = series.buckets.iter().map(|b| b.expense).collect();
        let profit: Vec<f64> = series.buckets.iter().map(|b| b.profit).collect();
        ForecastReport {
            periods,
            revenue: project_series(&revenue, periods),
            expense: project_series(&expense, periods),
            profit: project_series(&profit, periods),
        }
    }

    /// Plain-language observations for the report footer.
    pub fn insights(
        series: &BucketSeries,
        forecast: &ForecastReport,
        top_product: Option<&ProductSlice>,
    ) -> Vec<String> {
        let mut insights = Vec::new();
        let slope = forecast.revenue.slope;
        if slope >= 0.0 {
            insights.push(format!(
                "Sales trend: growing at {} per period",
                format_inr(slope)
            ));
        } else {
            insights.push(format!(
                "Sales trend: declining at {} per period",
                format_inr(slope.abs())
            ));
        }
        let totals = series.totals();
        if totals.revenue > 0.0 && totals.profit > 0.0 {
            insights.push(format!(
                "Net profit margin: {:.1}%",
                totals.profit / totals.revenue * 100.0
            ));
        }
        if let Some(top) = top_product {
            insights.push(format!(
                "Top product: {} ({} revenue)",
                top.product,
                format_inr(top.revenue)
            ));
        }
        insights
    }
}

/// A series with fewer than two non-zero observations has no usable trend;
/// it projects flat at the last observed value.
fn project_series(values: &[f64], periods: usize) -> SeriesProjection {
    let observed = values.iter().filter(|v| **v != 0.0).count();
    if observed < 2 {
        let last = values.last().copied().unwrap_or(0.0);
        return SeriesProjection {
            values: vec![last; periods],
            slope: 0.0,
        };
    }
    let (slope, intercept) = fit_line(values);
    let start = values.len();
    let projected = (0..periods)
        .map(|step| (slope * (start + step) as f64 + intercept).max(0.0))
        .collect();
    SeriesProjection {
        values: projected,
        slope,
    }
}

/// Ordinary least squares of value against bucket index.
fn fit_line(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean_x = (values.len() - 1) as f64 / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;
    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (index, value) in values.iter().enumerate() {
        let dx = index as f64 - mean_x;
        covariance += dx * (value - mean_y);
        variance += dx * dx;
    }
    if variance == 0.0 {
        return (0.0, mean_y);
    }
    let slope = covariance / variance;
    (slope, mean_y - slope * mean_x)
}
