//! Buyer profile types: aggregate metrics, trend, trust tiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::GlobalBuyerId;
use crate::error::{CoreError, CoreResult};

/// Direction of a buyer's recent payment behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
    /// No aggregated data yet (query-path default only)
    Unknown,
}

impl TrendDirection {
    /// String representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
            Self::Unknown => "unknown",
        }
    }

    /// Parse from string with validation
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "improving" => Ok(Self::Improving),
            "stable" => Ok(Self::Stable),
            "declining" => Ok(Self::Declining),
            "unknown" => Ok(Self::Unknown),
            other => Err(CoreError::Validation(format!(
                "Invalid trend direction: '{}'. Expected one of: improving, stable, declining, unknown",
                other
            ))),
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discrete trust tier banded from the credit trust score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrustTier {
    Diamond,
    Platinum,
    Gold,
    Silver,
    Bronze,
    Risk,
}

impl TrustTier {
    /// All tiers, highest first
    pub const ALL: [TrustTier; 6] = [
        Self::Diamond,
        Self::Platinum,
        Self::Gold,
        Self::Silver,
        Self::Bronze,
        Self::Risk,
    ];

    /// Band a credit trust score into its tier
    ///
    /// Strict threshold bands, exact at boundaries: a score of 90.0 is
    /// Diamond, 89.99 is Platinum.
    pub fn from_score(credit_trust_score: f64) -> Self {
        if credit_trust_score >= 90.0 {
            Self::Diamond
        } else if credit_trust_score >= 80.0 {
            Self::Platinum
        } else if credit_trust_score >= 70.0 {
            Self::Gold
        } else if credit_trust_score >= 60.0 {
            Self::Silver
        } else if credit_trust_score >= 50.0 {
            Self::Bronze
        } else {
            Self::Risk
        }
    }

    /// String representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diamond => "Diamond",
            Self::Platinum => "Platinum",
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
            Self::Risk => "Risk",
        }
    }

    /// Parse from string with validation
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "Diamond" => Ok(Self::Diamond),
            "Platinum" => Ok(Self::Platinum),
            "Gold" => Ok(Self::Gold),
            "Silver" => Ok(Self::Silver),
            "Bronze" => Ok(Self::Bronze),
            "Risk" => Ok(Self::Risk),
            other => Err(CoreError::Validation(format!(
                "Invalid trust tier: '{}'. Expected one of: Diamond, Platinum, Gold, Silver, Bronze, Risk",
                other
            ))),
        }
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptive aggregate metrics for a buyer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    /// Mean days-to-pay across all observations
    pub avg_days_to_pay: f64,
    /// Percentage of observations settled on time
    pub on_time_payment_rate: f64,
    /// Percentage of observations with a dispute
    pub dispute_rate: f64,
    /// Percentage of observations settled partially
    pub partial_payment_rate: f64,
    /// Observation count
    pub total_transactions: u32,
}

/// Community buyer profile, recomputed wholesale by each aggregation run
///
/// Invariant: `trust_tier` is always `TrustTier::from_score(credit_trust_score)`;
/// the two fields are never persisted divergent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyerProfile {
    /// Anonymized buyer identifier
    pub global_buyer_id: GlobalBuyerId,
    /// Industry code from the buyer's observations
    pub industry_code: String,
    /// Region from the buyer's observations
    pub region: String,
    /// Revenue class from the buyer's observations
    pub revenue_class: String,
    /// Community score, 0-100
    pub community_score: f64,
    /// Observation count backing this profile
    pub data_points: u32,
    /// Data confidence, 0-100
    pub confidence: f64,
    /// Descriptive aggregates
    pub aggregate_metrics: AggregateMetrics,
    /// Recent payment behavior direction
    pub trend_direction: TrendDirection,
    /// Distinct tenants that observed this buyer
    pub verified_by_count: u32,
    /// Cross-tenant payment consistency, 0-100
    pub consistency_score: f64,
    /// Credit trust score, 0-100
    pub credit_trust_score: f64,
    /// Tier banded from the credit trust score
    pub trust_tier: TrustTier,
    /// Deterministically derived badges
    pub trust_badges: Vec<String>,
    /// When the last aggregation run wrote this profile
    pub last_data_update: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_bands_exact_at_boundaries() {
        assert_eq!(TrustTier::from_score(100.0), TrustTier::Diamond);
        assert_eq!(TrustTier::from_score(90.0), TrustTier::Diamond);
        assert_eq!(TrustTier::from_score(89.99), TrustTier::Platinum);
        assert_eq!(TrustTier::from_score(80.0), TrustTier::Platinum);
        assert_eq!(TrustTier::from_score(79.99), TrustTier::Gold);
        assert_eq!(TrustTier::from_score(70.0), TrustTier::Gold);
        assert_eq!(TrustTier::from_score(60.0), TrustTier::Silver);
        assert_eq!(TrustTier::from_score(50.0), TrustTier::Bronze);
        assert_eq!(TrustTier::from_score(49.99), TrustTier::Risk);
        assert_eq!(TrustTier::from_score(0.0), TrustTier::Risk);
    }

    #[test]
    fn test_tier_is_monotonic_in_score() {
        let rank = |t: TrustTier| TrustTier::ALL.iter().position(|x| *x == t).unwrap();
        let mut prev = rank(TrustTier::from_score(0.0));
        for i in 1..=1000 {
            let score = i as f64 / 10.0;
            let r = rank(TrustTier::from_score(score));
            assert!(r <= prev, "tier regressed at score {}", score);
            prev = r;
        }
    }

    #[test]
    fn test_tier_round_trip() {
        for tier in TrustTier::ALL {
            assert_eq!(TrustTier::parse(tier.as_str()).unwrap(), tier);
        }
        assert!(TrustTier::parse("Wood").is_err());
    }
}
