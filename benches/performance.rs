use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tally_core::analytics::{Granularity, PeriodAggregator};
use tally_core::domain::{Transaction, TransactionKind};

fn build_sample_transactions(count: usize) -> Vec<Transaction> {
    let start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 365) as i64);
            let kind = if idx % 4 == 0 {
                TransactionKind::Expense
            } else {
                TransactionKind::Sale
            };
            let mut txn = Transaction::on_date(date, kind, 50.0 + (idx % 100) as f64);
            if idx % 3 == 0 {
                txn.profit = Some(10.0 + (idx % 20) as f64);
            }
            txn
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let transactions = build_sample_transactions(black_box(10_000));
    let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    c.bench_function("aggregate_monthly_10k", |b| {
        b.iter(|| {
            let series = PeriodAggregator::aggregate(
                &transactions,
                Granularity::Monthly,
                reference,
                None,
            );
            black_box(series);
        })
    });

    c.bench_function("aggregate_daily_10k", |b| {
        b.iter(|| {
            let series =
                PeriodAggregator::aggregate(&transactions, Granularity::Daily, reference, None);
            black_box(series);
        })
    });

    c.bench_function("aggregate_yearly_10k", |b| {
        b.iter(|| {
            let series =
                PeriodAggregator::aggregate(&transactions, Granularity::Yearly, reference, None);
            black_box(series);
        })
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
