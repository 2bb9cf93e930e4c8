use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, Transaction, TransactionKind};

use super::granularity::Granularity;

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One aggregated time slice of financial totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub revenue: f64,
    pub expense: f64,
    pub profit: f64,
}

impl Bucket {
    fn zeroed(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            revenue: 0.0,
            expense: 0.0,
            profit: 0.0,
        }
    }

    fn absorb(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionKind::Sale => self.revenue += txn.amount,
            TransactionKind::Expense => self.expense += txn.amount,
        }
        self.profit += txn.signed_profit();
    }

    pub fn is_empty(&self) -> bool {
        self.revenue == 0.0 && self.expense == 0.0 && self.profit == 0.0
    }
}

/// Whether the bucket count is a calendar constant or derived from data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BucketShape {
    Fixed(usize),
    DataDriven,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesTotals {
    pub revenue: f64,
    pub expense: f64,
    pub profit: f64,
}

/// Chronologically ordered buckets for one aggregation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BucketSeries {
    pub granularity: Granularity,
    pub shape: BucketShape,
    pub buckets: Vec<Bucket>,
}

impl BucketSeries {
    fn fixed(granularity: Granularity, buckets: Vec<Bucket>) -> Self {
        Self {
            granularity,
            shape: BucketShape::Fixed(buckets.len()),
            buckets,
        }
    }

    fn data_driven(granularity: Granularity, buckets: Vec<Bucket>) -> Self {
        Self {
            granularity,
            shape: BucketShape::DataDriven,
            buckets,
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_revenue(&self) -> f64 {
        self.buckets.iter().map(|b| b.revenue).sum()
    }

    pub fn total_expense(&self) -> f64 {
        self.buckets.iter().map(|b| b.expense).sum()
    }

    pub fn total_profit(&self) -> f64 {
        self.buckets.iter().map(|b| b.profit).sum()
    }

    pub fn totals(&self) -> SeriesTotals {
        SeriesTotals {
            revenue: self.total_revenue(),
            expense: self.total_expense(),
            profit: self.total_profit(),
        }
    }
}

/// Pure rollup of a transaction list into ordered period buckets.
///
/// `reference` stands in for "today" so the calendar-anchored granularities
/// stay deterministic; callers pass the wall-clock date at the edge.
pub struct PeriodAggregator;

impl PeriodAggregator {
    pub fn aggregate(
        transactions: &[Transaction],
        granularity: Granularity,
        reference: NaiveDate,
        custom: Option<DateRange>,
    ) -> BucketSeries {
        match granularity {
            Granularity::Daily => daily(transactions, reference),
            Granularity::Weekly => weekly(transactions, reference),
            Granularity::Monthly => monthly(transactions, reference),
            Granularity::Quarterly => quarterly(transactions, reference),
            Granularity::HalfYearly => half_yearly(transactions, reference),
            Granularity::Yearly => yearly(transactions, reference),
            Granularity::Custom => custom_monthly(transactions, custom),
        }
    }
}

/// Seven buckets covering the reference day and the six preceding days.
fn daily(transactions: &[Transaction], reference: NaiveDate) -> BucketSeries {
    let start = reference - Duration::days(6);
    let mut buckets: Vec<Bucket> = (0..7)
        .map(|offset| {
            let day = start + Duration::days(offset);
            Bucket::zeroed(day.format("%a").to_string())
        })
        .collect();
    for txn in transactions {
        let offset = (txn.date() - start).num_days();
        if (0..7).contains(&offset) {
            buckets[offset as usize].absorb(txn);
        }
    }
    BucketSeries::fixed(Granularity::Daily, buckets)
}

/// Four day-of-month slices of the reference month. Week 4 runs through the
/// last day of the month, so days 29-31 are never dropped.
fn weekly(transactions: &[Transaction], reference: NaiveDate) -> BucketSeries {
    let mut buckets: Vec<Bucket> = (1..=4)
        .map(|week| Bucket::zeroed(format!("Week {week}")))
        .collect();
    for txn in transactions {
        let date = txn.date();
        if date.year() != reference.year() || date.month() != reference.month() {
            continue;
        }
        let index = ((date.day() - 1) / 7).min(3) as usize;
        buckets[index].absorb(txn);
    }
    BucketSeries::fixed(Granularity::Weekly, buckets)
}

fn monthly(transactions: &[Transaction], reference: NaiveDate) -> BucketSeries {
    let mut buckets: Vec<Bucket> = MONTH_ABBREVS.iter().copied().map(Bucket::zeroed).collect();
    for txn in transactions {
        let date = txn.date();
        if date.year() == reference.year() {
            buckets[date.month0() as usize].absorb(txn);
        }
    }
    BucketSeries::fixed(Granularity::Monthly, buckets)
}

fn quarterly(transactions: &[Transaction], reference: NaiveDate) -> BucketSeries {
    let mut buckets: Vec<Bucket> = (1..=4)
        .map(|quarter| Bucket::zeroed(format!("Q{quarter}")))
        .collect();
    for txn in transactions {
        let date = txn.date();
        if date.year() == reference.year() {
            buckets[(date.month0() / 3) as usize].absorb(txn);
        }
    }
    BucketSeries::fixed(Granularity::Quarterly, buckets)
}

fn half_yearly(transactions: &[Transaction], reference: NaiveDate) -> BucketSeries {
    let mut buckets = vec![
        Bucket::zeroed("H1 (Jan-Jun)"),
        Bucket::zeroed("H2 (Jul-Dec)"),
    ];
    for txn in transactions {
        let date = txn.date();
        if date.year() == reference.year() {
            buckets[(date.month0() / 6) as usize].absorb(txn);
        }
    }
    BucketSeries::fixed(Granularity::HalfYearly, buckets)
}

/// One bucket per distinct year observed; reference year when no data.
fn yearly(transactions: &[Transaction], reference: NaiveDate) -> BucketSeries {
    let mut by_year: BTreeMap<i32, Bucket> = BTreeMap::new();
    for txn in transactions {
        let year = txn.date().year();
        by_year
            .entry(year)
            .or_insert_with(|| Bucket::zeroed(year.to_string()))
            .absorb(txn);
    }
    if by_year.is_empty() {
        by_year.insert(reference.year(), Bucket::zeroed(reference.year().to_string()));
    }
    BucketSeries::data_driven(Granularity::Yearly, by_year.into_values().collect())
}

/// Transactions inside the range grouped by `YYYY-MM`; only months with
/// data are emitted. A missing or inverted range yields no buckets.
fn custom_monthly(transactions: &[Transaction], custom: Option<DateRange>) -> BucketSeries {
    let range = match custom {
        Some(range) if range.is_ordered() => range,
        _ => return BucketSeries::data_driven(Granularity::Custom, Vec::new()),
    };
    let mut by_month: BTreeMap<String, Bucket> = BTreeMap::new();
    for txn in transactions {
        let date = txn.date();
        if !range.contains(date) {
            continue;
        }
        let key = format!("{:04}-{:02}", date.year(), date.month());
        by_month
            .entry(key.clone())
            .or_insert_with(|| Bucket::zeroed(key))
            .absorb(txn);
    }
    BucketSeries::data_driven(Granularity::Custom, by_month.into_values().collect())
}
