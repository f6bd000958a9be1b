//! Cross-tenant payment consistency scoring

use std::collections::HashMap;

use crate::constants::{
    CONSISTENCY_DEFAULT_FEW_OBS, CONSISTENCY_DEFAULT_SINGLE_TENANT, CONSISTENCY_MIN_OBSERVATIONS,
    CONSISTENCY_STDDEV_WEIGHT,
};
use crate::scoring::{mean, population_stddev};
use crate::types::{AnonymousTenantId, PaymentObservation};

/// Consistency score (0-100)
///
/// Groups observations by contributing tenant and scores how uniformly the
/// buyer treats its counterparties: low spread across per-tenant mean
/// days-to-pay means high consistency. Defaults to 50 with fewer than 10
/// observations and 75 with fewer than 2 distinct tenants.
pub fn consistency_score(observations: &[PaymentObservation]) -> f64 {
    if observations.len() < CONSISTENCY_MIN_OBSERVATIONS {
        return CONSISTENCY_DEFAULT_FEW_OBS;
    }

    let mut tenant_days: HashMap<&AnonymousTenantId, Vec<f64>> = HashMap::new();
    for obs in observations {
        tenant_days
            .entry(&obs.anonymous_tenant_id)
            .or_default()
            .push(obs.days_to_pay as f64);
    }

    if tenant_days.len() < 2 {
        return CONSISTENCY_DEFAULT_SINGLE_TENANT;
    }

    let tenant_means: Vec<f64> = tenant_days.values().map(|days| mean(days)).collect();
    let spread = population_stddev(&tenant_means);

    (100.0 - spread * CONSISTENCY_STDDEV_WEIGHT).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::testutil::obs;

    #[test]
    fn test_few_observations_default() {
        let observations: Vec<_> = (0..9).map(|_| obs("t1", 20, true, false, false)).collect();
        assert_eq!(consistency_score(&observations), 50.0);
    }

    #[test]
    fn test_single_tenant_default() {
        let observations: Vec<_> = (0..12).map(|_| obs("t1", 20, true, false, false)).collect();
        assert_eq!(consistency_score(&observations), 75.0);
    }

    #[test]
    fn test_uniform_behavior_scores_high() {
        let mut observations = Vec::new();
        for tenant in ["t1", "t2", "t3"] {
            for _ in 0..4 {
                observations.push(obs(tenant, 20, true, false, false));
            }
        }
        // All tenant means equal: stddev 0, score 100
        assert_eq!(consistency_score(&observations), 100.0);
    }

    #[test]
    fn test_selective_behavior_scores_low() {
        let mut observations = Vec::new();
        for _ in 0..5 {
            observations.push(obs("t1", 5, true, false, false));
        }
        for _ in 0..5 {
            observations.push(obs("t2", 95, false, false, false));
        }
        // Tenant means 5 and 95: population stddev 45, score 100-90=10
        let score = consistency_score(&observations);
        assert!((score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_floor_at_zero() {
        let mut observations = Vec::new();
        for _ in 0..5 {
            observations.push(obs("t1", 0, true, false, false));
        }
        for _ in 0..5 {
            observations.push(obs("t2", 200, false, false, false));
        }
        assert_eq!(consistency_score(&observations), 0.0);
    }
}
