use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TallyError;

/// Time-bucket resolution selected for a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
    Custom,
}

impl Granularity {
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Daily => "Daily",
            Granularity::Weekly => "Weekly",
            Granularity::Monthly => "Monthly",
            Granularity::Quarterly => "Quarterly",
            Granularity::HalfYearly => "HalfYearly",
            Granularity::Yearly => "Yearly",
            Granularity::Custom => "Custom",
        }
    }

    pub fn all() -> &'static [Granularity] {
        &[
            Granularity::Daily,
            Granularity::Weekly,
            Granularity::Monthly,
            Granularity::Quarterly,
            Granularity::HalfYearly,
            Granularity::Yearly,
            Granularity::Custom,
        ]
    }

    /// Yearly and Custom derive their bucket set from observed data; the
    /// rest cover a fixed calendar window.
    pub fn is_data_driven(&self) -> bool {
        matches!(self, Granularity::Yearly | Granularity::Custom)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Granularity {
    type Err = TallyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "daily" | "day" => Ok(Granularity::Daily),
            "weekly" | "week" => Ok(Granularity::Weekly),
            "monthly" | "month" => Ok(Granularity::Monthly),
            "quarterly" | "quarter" => Ok(Granularity::Quarterly),
            "halfyearly" | "half" => Ok(Granularity::HalfYearly),
            "yearly" | "year" => Ok(Granularity::Yearly),
            "custom" => Ok(Granularity::Custom),
            _ => Err(TallyError::InvalidInput(format!(
                "unknown granularity: {raw}"
            ))),
        }
    }
}
