//! Trust badge derivation

use crate::constants::{
    BADGE_CONSISTENCY_MIN, BADGE_ON_TIME_RATE_MIN, BADGE_TRUST_SCORE_MIN, BADGE_VERIFIED_BY_MIN,
};
use crate::types::{BuyerProfile, TrendDirection};

/// Derive trust badges from a computed profile
///
/// A pure function of the profile fields, order-preserving: verification,
/// payment record, trust, trend, consistency. No randomness.
pub fn trust_badges(profile: &BuyerProfile) -> Vec<String> {
    let mut badges = Vec::new();

    if profile.verified_by_count >= BADGE_VERIFIED_BY_MIN {
        badges.push(format!(
            "Verified by {}+ businesses",
            profile.verified_by_count
        ));
    }

    if profile.aggregate_metrics.on_time_payment_rate >= BADGE_ON_TIME_RATE_MIN {
        badges.push("Excellent payment record".to_string());
    }

    if profile.credit_trust_score >= BADGE_TRUST_SCORE_MIN {
        badges.push("Top 10% credit trust".to_string());
    }

    if profile.trend_direction == TrendDirection::Improving {
        badges.push("Improving performance".to_string());
    }

    if profile.consistency_score >= BADGE_CONSISTENCY_MIN {
        badges.push("Highly consistent payer".to_string());
    }

    badges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AggregateMetrics, GlobalBuyerId, TrustTier};
    use chrono::Utc;

    fn profile() -> BuyerProfile {
        BuyerProfile {
            global_buyer_id: GlobalBuyerId("buyer".to_string()),
            industry_code: "textiles".to_string(),
            region: "MH".to_string(),
            revenue_class: "sme".to_string(),
            community_score: 90.0,
            data_points: 120,
            confidence: 100.0,
            aggregate_metrics: AggregateMetrics {
                avg_days_to_pay: 12.0,
                on_time_payment_rate: 96.0,
                dispute_rate: 0.5,
                partial_payment_rate: 1.0,
                total_transactions: 120,
            },
            trend_direction: TrendDirection::Improving,
            verified_by_count: 60,
            consistency_score: 95.0,
            credit_trust_score: 92.0,
            trust_tier: TrustTier::Diamond,
            trust_badges: Vec::new(),
            last_data_update: Utc::now(),
        }
    }

    #[test]
    fn test_all_badges_in_derivation_order() {
        let badges = trust_badges(&profile());
        assert_eq!(
            badges,
            vec![
                "Verified by 60+ businesses",
                "Excellent payment record",
                "Top 10% credit trust",
                "Improving performance",
                "Highly consistent payer",
            ]
        );
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let mut p = profile();
        p.verified_by_count = 50;
        p.aggregate_metrics.on_time_payment_rate = 95.0;
        p.credit_trust_score = 90.0;
        p.consistency_score = 90.0;
        assert_eq!(trust_badges(&p).len(), 5);
    }

    #[test]
    fn test_no_badges_below_thresholds() {
        let mut p = profile();
        p.verified_by_count = 49;
        p.aggregate_metrics.on_time_payment_rate = 94.9;
        p.credit_trust_score = 89.9;
        p.trend_direction = TrendDirection::Stable;
        p.consistency_score = 89.9;
        assert!(trust_badges(&p).is_empty());
    }

    #[test]
    fn test_badges_are_deterministic() {
        let p = profile();
        assert_eq!(trust_badges(&p), trust_badges(&p));
    }
}
