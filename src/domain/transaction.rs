use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Sale,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "Sale",
            TransactionKind::Expense => "Expense",
        }
    }

    /// Matches the loose type labels found in exported CSVs ("sale",
    /// "Sales", "EXPENSE", ...). Unrecognized labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_ascii_lowercase();
        if lower.contains("sale") {
            Some(TransactionKind::Sale)
        } else if lower.contains("expense") {
            Some(TransactionKind::Expense)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub timestamp: NaiveDateTime,
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(timestamp: NaiveDateTime, kind: TransactionKind, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            kind,
            amount,
            profit: None,
            category: None,
            product: None,
            quantity: None,
            notes: None,
        }
    }

    /// Convenience constructor for records carrying only a calendar date.
    pub fn on_date(date: NaiveDate, kind: TransactionKind, amount: f64) -> Self {
        Self::new(date.and_time(NaiveTime::MIN), kind, amount)
    }

    pub fn with_profit(mut self, profit: f64) -> Self {
        self.profit = Some(profit);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<String>, quantity: u32) -> Self {
        self.product = Some(product.into());
        self.quantity = Some(quantity);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Calendar date of the transaction; time of day is bucketing-irrelevant.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Explicit profit when recorded, otherwise the amount signed by kind.
    pub fn signed_profit(&self) -> f64 {
        self.profit.unwrap_or(match self.kind {
            TransactionKind::Sale => self.amount,
            TransactionKind::Expense => -self.amount,
        })
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{}]", self.id, self.kind.as_str())
    }
}
