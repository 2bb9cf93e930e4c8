use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::analytics::BucketSeries;
use crate::domain::{Transaction, TransactionKind};
use crate::errors::TallyError;

/// Outcome of a CSV import: the rows that parsed plus skip accounting.
#[derive(Debug)]
pub struct ImportReport {
    pub transactions: Vec<Transaction>,
    pub imported: usize,
    pub skipped: usize,
}

/// Column positions resolved from the header row. Exports from the various
/// POS backends disagree on header names, so each field accepts aliases.
struct ColumnMap {
    date: usize,
    amount: Option<usize>,
    kind: Option<usize>,
    category: Option<usize>,
    product: Option<usize>,
    quantity: Option<usize>,
    unit_price: Option<usize>,
    profit: Option<usize>,
    notes: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, TallyError> {
        let mut date = None;
        let mut amount = None;
        let mut kind = None;
        let mut category = None;
        let mut product = None;
        let mut quantity = None;
        let mut unit_price = None;
        let mut profit = None;
        let mut notes = None;
        for (index, raw) in headers.iter().enumerate() {
            let slot = match raw.trim().to_ascii_lowercase().as_str() {
                "date" | "timestamp" => &mut date,
                "amount" | "total_revenue" | "sales" | "revenue" => &mut amount,
                "type" => &mut kind,
                "category" => &mut category,
                "product" | "item" | "name" => &mut product,
                "quantity" | "qty" => &mut quantity,
                "sale_price" | "price" => &mut unit_price,
                "profit" | "total_profit" => &mut profit,
                "description" | "desc" | "notes" => &mut notes,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(index);
            }
        }
        let date = date.ok_or_else(|| TallyError::Import("missing date column".into()))?;
        if amount.is_none() && (unit_price.is_none() || quantity.is_none()) {
            return Err(TallyError::Import(
                "missing amount column (need amount/revenue, or sale_price + quantity)".into(),
            ));
        }
        Ok(Self {
            date,
            amount,
            kind,
            category,
            product,
            quantity,
            unit_price,
            profit,
            notes,
        })
    }
}

/// Imports transactions from a CSV file. Rows that fail to parse are
/// skipped and logged, never fatal; only a missing required column fails
/// the whole import.
pub fn import_transactions(path: &Path) -> Result<ImportReport, TallyError> {
    let file = File::open(path)?;
    import_transactions_from_reader(file)
}

pub fn import_transactions_from_reader<R: Read>(reader: R) -> Result<ImportReport, TallyError> {
    let mut csv_reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let columns = ColumnMap::resolve(csv_reader.headers()?)?;

    let mut transactions = Vec::new();
    let mut skipped = 0usize;
    for (row_index, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(row = row_index + 1, %err, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };
        match parse_row(&columns, &record) {
            Some(txn) => transactions.push(txn),
            None => {
                tracing::warn!(row = row_index + 1, "skipping malformed CSV row");
                skipped += 1;
            }
        }
    }
    let imported = transactions.len();
    tracing::info!(imported, skipped, "CSV import finished");
    Ok(ImportReport {
        transactions,
        imported,
        skipped,
    })
}

fn parse_row(columns: &ColumnMap, record: &StringRecord) -> Option<Transaction> {
    let timestamp = parse_timestamp(field(record, Some(columns.date))?)?;
    let kind = match columns.kind {
        Some(index) => TransactionKind::from_label(record.get(index)?)?,
        // Exports without a type column are sales ledgers.
        None => TransactionKind::Sale,
    };
    let quantity = field(record, columns.quantity).and_then(|raw| raw.parse::<u32>().ok());
    let amount = match field(record, columns.amount).and_then(|raw| raw.parse::<f64>().ok()) {
        Some(amount) => amount,
        None => {
            let price = field(record, columns.unit_price)?.parse::<f64>().ok()?;
            price * f64::from(quantity.unwrap_or(1))
        }
    };
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }

    let mut txn = Transaction::new(timestamp, kind, amount);
    txn.quantity = quantity;
    txn.profit = field(record, columns.profit).and_then(|raw| raw.parse::<f64>().ok());
    txn.category = field(record, columns.category).map(str::to_string);
    txn.product = field(record, columns.product).map(str::to_string);
    txn.notes = field(record, columns.notes).map(str::to_string);
    Some(txn)
}

fn field<'r>(record: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
    let raw = record.get(index?)?.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(stamp);
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(stamp);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Writes transactions back out in the canonical header layout.
pub fn export_transactions<W: Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<(), TallyError> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record([
        "date", "type", "amount", "profit", "category", "product", "quantity", "notes",
    ])?;
    for txn in transactions {
        csv_writer.write_record([
            txn.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            txn.kind.as_str().to_string(),
            format!("{:.2}", txn.amount),
            txn.profit.map(|p| format!("{p:.2}")).unwrap_or_default(),
            txn.category.clone().unwrap_or_default(),
            txn.product.clone().unwrap_or_default(),
            txn.quantity.map(|q| q.to_string()).unwrap_or_default(),
            txn.notes.clone().unwrap_or_default(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes an aggregated series as rows of label/revenue/expense/profit.
pub fn export_buckets(path: &Path, series: &BucketSeries) -> Result<(), TallyError> {
    let file = File::create(path)?;
    let mut csv_writer = WriterBuilder::new().from_writer(file);
    csv_writer.write_record(["period", "revenue", "expense", "profit"])?;
    for bucket in &series.buckets {
        csv_writer.write_record([
            bucket.label.clone(),
            format!("{:.2}", bucket.revenue),
            format!("{:.2}", bucket.expense),
            format!("{:.2}", bucket.profit),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(data: &str) -> ImportReport {
        import_transactions_from_reader(data.as_bytes()).expect("import succeeds")
    }

    #[test]
    fn imports_canonical_columns() {
        let report = import(
            "date,type,amount,category\n\
             2024-03-05 10:30:00,Sale,100.50,Beverages\n\
             2024-03-06,Expense,40,Rent\n",
        );
        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped, 0);
        let first = &report.transactions[0];
        assert_eq!(first.kind, TransactionKind::Sale);
        assert_eq!(first.amount, 100.50);
        assert_eq!(first.category.as_deref(), Some("Beverages"));
        assert_eq!(
            report.transactions[1].date(),
            NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
        );
    }

    #[test]
    fn maps_header_aliases_case_insensitively() {
        let report = import(
            "Timestamp,Type,Total_Revenue,Item,Qty\n\
             2024-01-02T09:00:00,sales,250,Tea,3\n",
        );
        assert_eq!(report.imported, 1);
        let txn = &report.transactions[0];
        assert_eq!(txn.amount, 250.0);
        assert_eq!(txn.product.as_deref(), Some("Tea"));
        assert_eq!(txn.quantity, Some(3));
    }

    #[test]
    fn derives_amount_from_price_and_quantity() {
        let report = import(
            "date,type,sale_price,quantity\n\
             2024-01-02,Sale,25.5,4\n",
        );
        assert_eq!(report.transactions[0].amount, 102.0);
    }

    #[test]
    fn missing_type_column_defaults_to_sale() {
        let report = import("date,amount\n2024-01-02,10\n");
        assert_eq!(report.transactions[0].kind, TransactionKind::Sale);
    }

    #[test]
    fn skips_malformed_rows_and_counts_them() {
        let report = import(
            "date,type,amount\n\
             not-a-date,Sale,10\n\
             2024-01-02,Sale,abc\n\
             2024-01-03,transfer,10\n\
             2024-01-04,Sale,-5\n\
             2024-01-05,Sale,75\n",
        );
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 4);
        assert_eq!(report.transactions[0].amount, 75.0);
    }

    #[test]
    fn explicit_profit_column_is_kept() {
        let report = import(
            "date,type,amount,profit\n\
             2024-01-02,Sale,100,35.5\n",
        );
        assert_eq!(report.transactions[0].profit, Some(35.5));
        assert_eq!(report.transactions[0].signed_profit(), 35.5);
    }

    #[test]
    fn description_column_lands_in_notes() {
        let report = import(
            "date,type,amount,description\n\
             2024-01-02,Expense,3000,Electricity & water bill\n",
        );
        assert_eq!(
            report.transactions[0].notes.as_deref(),
            Some("Electricity & water bill")
        );
    }

    #[test]
    fn missing_required_columns_fail_the_import() {
        let err = import_transactions_from_reader("type,amount\nSale,10\n".as_bytes())
            .expect_err("no date column");
        assert!(format!("{err}").contains("date"));
        let err = import_transactions_from_reader("date,type\n2024-01-01,Sale\n".as_bytes())
            .expect_err("no amount column");
        assert!(format!("{err}").contains("amount"));
    }

    #[test]
    fn transactions_round_trip_through_export() {
        let source = "date,type,amount,profit,category,product,quantity\n\
                      2024-03-05 10:30:00,Sale,100.00,35.00,Beverages,Tea,2\n";
        let report = import(source);
        let mut out = Vec::new();
        export_transactions(&mut out, &report.transactions).expect("export succeeds");
        let round = import_transactions_from_reader(out.as_slice()).expect("reimport succeeds");
        assert_eq!(round.imported, 1);
        let (a, b) = (&report.transactions[0], &round.transactions[0]);
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.amount, b.amount);
        assert_eq!(a.profit, b.profit);
        assert_eq!(a.category, b.category);
    }
}
