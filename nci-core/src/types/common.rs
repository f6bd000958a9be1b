//! Common identifier and bucketing types

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Plaintext tenant identifier (never leaves the contributing tenant's rows)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anonymized buyer identifier (hex SHA-256 digest)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalBuyerId(pub String);

impl fmt::Display for GlobalBuyerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anonymized tenant identifier used on cross-tenant rows (hex SHA-256 digest)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnonymousTenantId(pub String);

impl fmt::Display for AnonymousTenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar month bucket
///
/// Observations drop the exact day for privacy; only the month survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: i32,
    /// 1-based calendar month
    pub month: u32,
}

impl MonthBucket {
    /// Bucket a timestamp to its calendar month
    pub fn from_date(date: DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First instant of the bucketed month
    pub fn first_day(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(self.year, self.month, 1, 0, 0, 0)
            .single()
            .expect("first day of a valid month is a valid UTC timestamp")
    }

    /// 1-based calendar quarter
    pub fn quarter(&self) -> u32 {
        (self.month - 1) / 3 + 1
    }

    /// The same month one year earlier
    pub fn previous_year(&self) -> Self {
        Self {
            year: self.year - 1,
            month: self.month,
        }
    }

    /// The bucket `n` calendar months earlier
    pub fn months_back(&self, n: u32) -> Self {
        let total = self.year * 12 + self.month as i32 - 1 - n as i32;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Ordinal transaction size band
///
/// Invoice amounts are discretized before storage so no exact amount crosses
/// the tenant boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSizeBand {
    Micro,
    Small,
    Medium,
    Large,
}

impl TransactionSizeBand {
    /// Discretize an invoice amount into its band
    pub fn from_amount(amount: Decimal) -> Self {
        if amount < Decimal::from(10_000u32) {
            Self::Micro
        } else if amount < Decimal::from(100_000u32) {
            Self::Small
        } else if amount < Decimal::from(1_000_000u32) {
            Self::Medium
        } else {
            Self::Large
        }
    }

    /// String representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Parse from string with validation
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "micro" => Ok(Self::Micro),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(CoreError::Validation(format!(
                "Invalid transaction size band: '{}'. Expected one of: micro, small, medium, large",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionSizeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bucket_drops_day() {
        let date = Utc.with_ymd_and_hms(2025, 7, 23, 14, 30, 0).unwrap();
        let bucket = MonthBucket::from_date(date);
        assert_eq!(bucket, MonthBucket { year: 2025, month: 7 });
        assert_eq!(
            bucket.first_day(),
            Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_months_back_wraps_years() {
        let bucket = MonthBucket { year: 2025, month: 2 };
        assert_eq!(bucket.months_back(0), bucket);
        assert_eq!(bucket.months_back(1), MonthBucket { year: 2025, month: 1 });
        assert_eq!(bucket.months_back(2), MonthBucket { year: 2024, month: 12 });
        assert_eq!(bucket.months_back(14), MonthBucket { year: 2023, month: 12 });
    }

    #[test]
    fn test_quarters() {
        assert_eq!(MonthBucket { year: 2025, month: 1 }.quarter(), 1);
        assert_eq!(MonthBucket { year: 2025, month: 3 }.quarter(), 1);
        assert_eq!(MonthBucket { year: 2025, month: 4 }.quarter(), 2);
        assert_eq!(MonthBucket { year: 2025, month: 12 }.quarter(), 4);
    }

    #[test]
    fn test_size_bands_are_ordinal() {
        assert_eq!(
            TransactionSizeBand::from_amount(Decimal::from(9_999u32)),
            TransactionSizeBand::Micro
        );
        assert_eq!(
            TransactionSizeBand::from_amount(Decimal::from(10_000u32)),
            TransactionSizeBand::Small
        );
        assert_eq!(
            TransactionSizeBand::from_amount(Decimal::from(999_999u32)),
            TransactionSizeBand::Medium
        );
        assert_eq!(
            TransactionSizeBand::from_amount(Decimal::from(5_000_000u32)),
            TransactionSizeBand::Large
        );
        assert!(TransactionSizeBand::Micro < TransactionSizeBand::Large);
    }
}
