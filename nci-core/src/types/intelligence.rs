//! Network intelligence records produced by pattern detection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ContributionTier, GlobalBuyerId};
use crate::error::{CoreError, CoreResult};

/// Which detector produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    SelectiveDelay,
    IndustryDeterioration,
    GeographicStress,
    SeasonalAnomaly,
}

impl PatternKind {
    /// String representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelectiveDelay => "selective_delay",
            Self::IndustryDeterioration => "industry_deterioration",
            Self::GeographicStress => "geographic_stress",
            Self::SeasonalAnomaly => "seasonal_anomaly",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Finding severity, ordered lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// String representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Parse from string with validation
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(CoreError::Validation(format!(
                "Invalid severity: '{}'. Expected one of: low, medium, high, critical",
                other
            ))),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One stored pattern finding with an expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelligenceRecord {
    /// Record identifier
    pub id: String,
    /// Detector that produced the finding
    pub kind: PatternKind,
    /// Finding severity
    pub severity: Severity,
    /// Short human-readable pattern description
    pub title: String,
    /// Recommended action
    pub recommendation: String,
    /// Industry the finding applies to, if industry-scoped
    pub industry_code: Option<String>,
    /// Region the finding applies to, if region-scoped
    pub region: Option<String>,
    /// Buyer the finding applies to, if buyer-scoped
    pub buyer_id: Option<GlobalBuyerId>,
    /// Supporting numbers
    pub evidence: serde_json::Value,
    /// Buyers covered by the finding
    pub affected_buyers: u32,
    /// Detection timestamp
    pub detected_at: DateTime<Utc>,
    /// Expiry timestamp
    pub valid_until: DateTime<Utc>,
    /// Tiers allowed to read this record
    pub visible_to_tiers: Vec<ContributionTier>,
}

impl IntelligenceRecord {
    /// Record has not yet expired
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.valid_until > now
    }

    /// Record is readable by the given tier
    pub fn is_visible_to(&self, tier: ContributionTier) -> bool {
        self.visible_to_tiers.contains(&tier)
    }

    /// Record matches an optional industry filter
    ///
    /// Records without an industry scope match every filter.
    pub fn matches_industry(&self, industry: Option<&str>) -> bool {
        match (industry, self.industry_code.as_deref()) {
            (Some(filter), Some(scoped)) => filter == scoped,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record() -> IntelligenceRecord {
        let now = Utc::now();
        IntelligenceRecord {
            id: "intel_1".to_string(),
            kind: PatternKind::IndustryDeterioration,
            severity: Severity::High,
            title: "Industry-wide payment delays increasing".to_string(),
            recommendation: "Tighten credit terms for this sector".to_string(),
            industry_code: Some("textiles".to_string()),
            region: None,
            buyer_id: None,
            evidence: serde_json::json!({}),
            affected_buyers: 12,
            detected_at: now,
            valid_until: now + Duration::days(30),
            visible_to_tiers: vec![ContributionTier::Standard, ContributionTier::Premium],
        }
    }

    #[test]
    fn test_expiry() {
        let r = record();
        assert!(r.is_active(Utc::now()));
        assert!(!r.is_active(Utc::now() + Duration::days(31)));
    }

    #[test]
    fn test_tier_visibility() {
        let r = record();
        assert!(!r.is_visible_to(ContributionTier::Basic));
        assert!(r.is_visible_to(ContributionTier::Standard));
        assert!(r.is_visible_to(ContributionTier::Premium));
    }

    #[test]
    fn test_industry_filter() {
        let r = record();
        assert!(r.matches_industry(None));
        assert!(r.matches_industry(Some("textiles")));
        assert!(!r.matches_industry(Some("steel")));

        let mut unscoped = record();
        unscoped.industry_code = None;
        assert!(unscoped.matches_industry(Some("steel")));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }
}
