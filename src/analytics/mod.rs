//! Period aggregation, breakdowns, and trend forecasting over transactions.

pub mod aggregate;
pub mod breakdown;
pub mod forecast;
pub mod granularity;

pub use aggregate::{Bucket, BucketSeries, BucketShape, PeriodAggregator, SeriesTotals};
pub use breakdown::{BreakdownService, CategorySlice, ProductSlice};
pub use forecast::{ForecastReport, ForecastService, SeriesProjection};
pub use granularity::Granularity;
