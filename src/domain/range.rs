use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::TallyError;

/// Inclusive calendar-date range used by custom-period reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TallyError> {
        if end < start {
            return Err(TallyError::InvalidInput(
                "range end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}
