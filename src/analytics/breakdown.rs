use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionKind};

/// Revenue attributed to one sales category, with its share of all
/// categorised revenue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub amount: f64,
    pub share_pct: f64,
}

/// Revenue and units moved for one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSlice {
    pub product: String,
    pub revenue: f64,
    pub quantity: u64,
}

pub struct BreakdownService;

impl BreakdownService {
    /// Sales revenue per category, descending by amount. Uncategorised
    /// sales and expenses are not attributed to any slice.
    pub fn sales_by_category(transactions: &[Transaction]) -> Vec<CategorySlice> {
        let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
        for txn in transactions {
            if txn.kind != TransactionKind::Sale {
                continue;
            }
            if let Some(category) = txn.category.as_deref() {
                *by_category.entry(category).or_insert(0.0) += txn.amount;
            }
        }
        let total: f64 = by_category.values().sum();
        let mut slices: Vec<CategorySlice> = by_category
            .into_iter()
            .map(|(category, amount)| CategorySlice {
                category: category.to_string(),
                amount,
                share_pct: if total > 0.0 {
                    amount / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        slices.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        slices
    }

    /// Top products by sales revenue, truncated to `limit`. A sale row
    /// without an explicit quantity counts as one unit.
    pub fn top_products(transactions: &[Transaction], limit: usize) -> Vec<ProductSlice> {
        let mut by_product: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
        for txn in transactions {
            if txn.kind != TransactionKind::Sale {
                continue;
            }
            if let Some(product) = txn.product.as_deref() {
                let entry = by_product.entry(product).or_insert((0.0, 0));
                entry.0 += txn.amount;
                entry.1 += u64::from(txn.quantity.unwrap_or(1));
            }
        }
        let mut slices: Vec<ProductSlice> = by_product
            .into_iter()
            .map(|(product, (revenue, quantity))| ProductSlice {
                product: product.to_string(),
                revenue,
                quantity,
            })
            .collect();
        slices.sort_by(|a, b| {
            b.revenue
                .partial_cmp(&a.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.product.cmp(&b.product))
        });
        slices.truncate(limit);
        slices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sale(day: u32, amount: f64) -> Transaction {
        Transaction::on_date(
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            TransactionKind::Sale,
            amount,
        )
    }

    #[test]
    fn categories_sorted_descending_with_shares() {
        let txns = vec![
            sale(1, 30.0).with_category("Snacks"),
            sale(2, 70.0).with_category("Beverages"),
            sale(3, 50.0),
            Transaction::on_date(
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                TransactionKind::Expense,
                99.0,
            )
            .with_category("Rent"),
        ];
        let slices = BreakdownService::sales_by_category(&txns);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].category, "Beverages");
        assert_eq!(slices[0].amount, 70.0);
        assert_eq!(slices[0].share_pct, 70.0);
        assert_eq!(slices[1].share_pct, 30.0);
    }

    #[test]
    fn top_products_respects_limit_and_default_quantity() {
        let txns = vec![
            sale(1, 100.0).with_product("Tea", 10),
            sale(2, 300.0).with_product("Coffee", 20),
            sale(3, 200.0).with_product("Coffee", 15),
            sale(4, 50.0).with_product("Sugar", 5),
            sale(5, 25.0), // no product
        ];
        let slices = BreakdownService::top_products(&txns, 2);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].product, "Coffee");
        assert_eq!(slices[0].revenue, 500.0);
        assert_eq!(slices[0].quantity, 35);
        assert_eq!(slices[1].product, "Tea");

        let mut unpriced = sale(6, 10.0);
        unpriced.product = Some("Loose".into());
        let slices = BreakdownService::top_products(&[unpriced], 5);
        assert_eq!(slices[0].quantity, 1);
    }

    #[test]
    fn empty_input_yields_empty_breakdowns() {
        assert!(BreakdownService::sales_by_category(&[]).is_empty());
        assert!(BreakdownService::top_products(&[], 5).is_empty());
    }
}
