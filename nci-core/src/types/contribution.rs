//! Tenant contribution records and tier benefits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::TenantId;
use crate::error::{CoreError, CoreResult};

/// Per-tenant privacy controls for network sharing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
    /// Share per-invoice payment observations
    pub share_payment_history: bool,
    /// Allow industry-level aggregation of this tenant's data
    pub share_industry_data: bool,
    /// Allow region-level aggregation of this tenant's data
    pub share_regional_data: bool,
    /// Allow cross-tenant benchmarking views
    pub allow_cross_tenant_benchmarking: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            share_payment_history: true,
            share_industry_data: true,
            share_regional_data: true,
            allow_cross_tenant_benchmarking: true,
        }
    }
}

/// Access benefits granted by a contribution tier
///
/// A fixed lookup keyed by tier; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBenefits {
    /// May read community scores
    pub community_score_access: bool,
    /// May read network intelligence records
    pub intelligence_access: bool,
    /// May use cross-tenant benchmarking views
    pub benchmarking_access: bool,
}

/// Tenant subscription tier controlling network read/write access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionTier {
    Basic,
    Standard,
    Premium,
}

impl ContributionTier {
    /// Benefits granted by this tier
    pub fn benefits(&self) -> TierBenefits {
        match self {
            Self::Basic => TierBenefits {
                community_score_access: false,
                intelligence_access: false,
                benchmarking_access: false,
            },
            Self::Standard => TierBenefits {
                community_score_access: true,
                intelligence_access: true,
                benchmarking_access: false,
            },
            Self::Premium => TierBenefits {
                community_score_access: true,
                intelligence_access: true,
                benchmarking_access: true,
            },
        }
    }

    /// String representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }

    /// Parse from string with validation
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "basic" => Ok(Self::Basic),
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            other => Err(CoreError::Validation(format!(
                "Invalid contribution tier: '{}'. Expected one of: basic, standard, premium",
                other
            ))),
        }
    }
}

impl fmt::Display for ContributionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row per tenant tracking network participation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantContribution {
    /// Tenant identifier (plaintext; this row never crosses the tenant boundary)
    pub tenant_id: TenantId,
    /// Subscription tier
    pub contribution_tier: ContributionTier,
    /// Tenant has opted in to network sharing
    pub opt_in_to_network_sharing: bool,
    /// Privacy controls
    pub privacy_settings: PrivacySettings,
    /// Registration is active
    pub is_active: bool,
    /// Observations contributed
    pub transactions_shared: u64,
    /// Distinct buyers this tenant has contributed observations for
    pub buyers_shared: u64,
    /// Community score lookups performed
    pub network_scores_accessed: u64,
    /// Last score lookup
    pub last_access_date: Option<DateTime<Utc>>,
    /// Registration timestamp
    pub registered_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl TenantContribution {
    /// Create a new opted-in registration with default privacy settings
    pub fn new(tenant_id: TenantId, tier: ContributionTier) -> Self {
        let now = Utc::now();
        Self {
            tenant_id,
            contribution_tier: tier,
            opt_in_to_network_sharing: true,
            privacy_settings: PrivacySettings::default(),
            is_active: true,
            transactions_shared: 0,
            buyers_shared: 0,
            network_scores_accessed: 0,
            last_access_date: None,
            registered_at: now,
            updated_at: now,
        }
    }

    /// Benefits granted by the current tier
    pub fn benefits(&self) -> TierBenefits {
        self.contribution_tier.benefits()
    }

    /// Whether observations from this tenant may enter the network
    pub fn can_contribute(&self) -> bool {
        self.is_active
            && self.opt_in_to_network_sharing
            && self.privacy_settings.share_payment_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benefits_are_fixed_per_tier() {
        assert!(!ContributionTier::Basic.benefits().community_score_access);
        assert!(ContributionTier::Standard.benefits().community_score_access);
        assert!(!ContributionTier::Standard.benefits().benchmarking_access);
        assert!(ContributionTier::Premium.benefits().benchmarking_access);
    }

    #[test]
    fn test_contribution_gate() {
        let mut c = TenantContribution::new(
            TenantId("t1".to_string()),
            ContributionTier::Standard,
        );
        assert!(c.can_contribute());

        c.opt_in_to_network_sharing = false;
        assert!(!c.can_contribute());

        c.opt_in_to_network_sharing = true;
        c.privacy_settings.share_payment_history = false;
        assert!(!c.can_contribute());

        c.privacy_settings.share_payment_history = true;
        c.is_active = false;
        assert!(!c.can_contribute());
    }

    #[test]
    fn test_tier_round_trip() {
        for tier in [
            ContributionTier::Basic,
            ContributionTier::Standard,
            ContributionTier::Premium,
        ] {
            assert_eq!(ContributionTier::parse(tier.as_str()).unwrap(), tier);
        }
        assert!(ContributionTier::parse("platinum").is_err());
    }
}
