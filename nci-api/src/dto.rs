//! Data Transfer Objects for API requests and responses

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nci_core::types::{AggregateMetrics, IntelligenceRecord, PaymentEvent, TenantContribution};
use nci_store::{CommunityScore, ScoreLookup};

// ============ Contribution DTOs ============

/// Contribute a payment observation
#[derive(Debug, Deserialize)]
pub struct ContributeRequest {
    /// Contributing tenant
    pub tenant_id: String,
    /// Plaintext buyer identifier (tax ID / PAN); hashed before storage
    pub buyer_identifier: String,
    pub days_to_pay: i32,
    pub invoice_amount: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub paid_on_time: bool,
    pub had_dispute: bool,
    #[serde(default)]
    pub was_partial_payment: bool,
    pub industry_code: String,
    pub region: String,
    pub revenue_class: String,
}

impl ContributeRequest {
    /// The payment event carried by this request
    pub fn into_event(self) -> (String, String, PaymentEvent) {
        let event = PaymentEvent {
            days_to_pay: self.days_to_pay,
            invoice_amount: self.invoice_amount,
            transaction_date: self.transaction_date,
            paid_on_time: self.paid_on_time,
            had_dispute: self.had_dispute,
            was_partial_payment: self.was_partial_payment,
            industry_code: self.industry_code,
            region: self.region,
            revenue_class: self.revenue_class,
        };
        (self.tenant_id, self.buyer_identifier, event)
    }
}

/// Contribution acknowledgement
///
/// Always accepted: gate misses are intentionally indistinguishable from
/// stored contributions.
#[derive(Debug, Serialize)]
pub struct ContributeResponse {
    pub accepted: bool,
}

// ============ Registration DTOs ============

/// Register a tenant for network participation
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub tenant_id: String,
    /// Contribution tier (basic, standard, premium); defaults to standard
    pub tier: Option<String>,
}

/// Registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub tenant_id: String,
    pub tier: String,
    pub opt_in_to_network_sharing: bool,
    pub community_score_access: bool,
    pub registered_at: DateTime<Utc>,
}

impl From<TenantContribution> for RegisterResponse {
    fn from(contribution: TenantContribution) -> Self {
        let benefits = contribution.benefits();
        Self {
            tenant_id: contribution.tenant_id.0,
            tier: contribution.contribution_tier.as_str().to_string(),
            opt_in_to_network_sharing: contribution.opt_in_to_network_sharing,
            community_score_access: benefits.community_score_access,
            registered_at: contribution.registered_at,
        }
    }
}

// ============ Score DTOs ============

/// Community score lookup response
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub access_granted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_metrics: Option<AggregateMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<String>>,
}

impl ScoreResponse {
    fn granted(score: CommunityScore) -> Self {
        Self {
            access_granted: true,
            upgrade_required: None,
            community_score: Some(score.community_score),
            trust_tier: Some(score.trust_tier.as_str().to_string()),
            data_points: Some(score.data_points),
            confidence: Some(score.confidence),
            aggregate_metrics: score.aggregate_metrics,
            trend_direction: Some(score.trend_direction.as_str().to_string()),
            badges: Some(score.badges),
        }
    }

    fn denied(upgrade_required: bool) -> Self {
        Self {
            access_granted: false,
            upgrade_required: Some(upgrade_required),
            community_score: None,
            trust_tier: None,
            data_points: None,
            confidence: None,
            aggregate_metrics: None,
            trend_direction: None,
            badges: None,
        }
    }
}

impl From<ScoreLookup> for ScoreResponse {
    fn from(lookup: ScoreLookup) -> Self {
        match lookup {
            ScoreLookup::Granted(score) => Self::granted(score),
            ScoreLookup::Denied { upgrade_required } => Self::denied(upgrade_required),
        }
    }
}

// ============ Intelligence DTOs ============

/// Intelligence record response
#[derive(Debug, Serialize)]
pub struct IntelligenceResponse {
    pub id: String,
    pub kind: String,
    pub severity: String,
    pub title: String,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub evidence: serde_json::Value,
    pub affected_buyers: u32,
    pub detected_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

impl From<IntelligenceRecord> for IntelligenceResponse {
    fn from(record: IntelligenceRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind.as_str().to_string(),
            severity: record.severity.as_str().to_string(),
            title: record.title,
            recommendation: record.recommendation,
            industry_code: record.industry_code,
            region: record.region,
            evidence: record.evidence,
            affected_buyers: record.affected_buyers,
            detected_at: record.detected_at,
            valid_until: record.valid_until,
        }
    }
}
