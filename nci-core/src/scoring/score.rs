//! Community score, confidence and credit trust score

use crate::constants::*;
use crate::types::{AggregateMetrics, TrendDirection};

/// Clamp a score to the [0, 100] scale
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Community score (0-100)
///
/// Starts neutral and moves with on-time rate, settlement speed, dispute and
/// partial-payment rates, plus a small data-volume bonus.
pub fn community_score(metrics: &AggregateMetrics) -> f64 {
    let mut score = SCORE_BASELINE;

    // On-time payment rate (0-40 points)
    score += metrics.on_time_payment_rate / 100.0 * SCORE_ON_TIME_WEIGHT;

    // Average days to pay (0-30 points)
    let days_score = (SCORE_DAYS_CEILING - metrics.avg_days_to_pay).max(0.0);
    score += days_score / SCORE_DAYS_CEILING * SCORE_DAYS_WEIGHT;

    // Dispute rate (up to 15 points penalty)
    score -= metrics.dispute_rate / 100.0 * SCORE_DISPUTE_PENALTY;

    // Partial payment rate (up to 10 points penalty)
    score -= metrics.partial_payment_rate / 100.0 * SCORE_PARTIAL_PENALTY;

    // Data volume bonus (0-5 points)
    score += (metrics.total_transactions as f64 / SCORE_VOLUME_DIVISOR)
        .min(SCORE_VOLUME_BONUS_CAP);

    clamp_score(score)
}

/// Confidence (0-100) from data volume and tenant spread
pub fn confidence(total_transactions: u32, unique_tenants: u32) -> f64 {
    let transaction_confidence =
        (total_transactions as f64 * CONFIDENCE_PER_TRANSACTION).min(CONFIDENCE_COMPONENT_CAP);
    let tenant_confidence =
        (unique_tenants as f64 * CONFIDENCE_PER_TENANT).min(CONFIDENCE_COMPONENT_CAP);
    (transaction_confidence + tenant_confidence).min(100.0)
}

/// Credit trust score (0-100)
///
/// Weighted blend of the community score with verification, consistency,
/// trend and confidence adjustments.
pub fn credit_trust_score(
    community_score: f64,
    verified_by_count: u32,
    consistency_score: f64,
    trend: TrendDirection,
    confidence: f64,
) -> f64 {
    let mut score = community_score * TRUST_COMMUNITY_WEIGHT;

    let verification_bonus =
        (verified_by_count as f64 * TRUST_PER_TENANT_BONUS).min(TRUST_TENANT_BONUS_CAP);
    score += verification_bonus;

    score += consistency_score * TRUST_CONSISTENCY_WEIGHT;

    match trend {
        TrendDirection::Improving => score += TRUST_TREND_ADJUSTMENT,
        TrendDirection::Declining => score -= TRUST_TREND_ADJUSTMENT,
        TrendDirection::Stable | TrendDirection::Unknown => {}
    }

    score += confidence * TRUST_CONFIDENCE_WEIGHT;

    clamp_score(score)
}
