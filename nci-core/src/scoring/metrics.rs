//! Aggregate metric folds and shared statistics helpers

use std::collections::HashSet;

use crate::types::{AggregateMetrics, PaymentObservation};

/// Arithmetic mean; zero for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; zero for an empty slice
///
/// Population (divide by N), not sample: both the consistency score and the
/// selective-delay detector use population semantics.
pub fn population_stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|v| (v - avg).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Fold a buyer's observations into descriptive aggregates
///
/// Returns `None` for an empty slice; a buyer with no observations has no
/// metrics, not zeroed ones.
pub fn aggregate_metrics(observations: &[PaymentObservation]) -> Option<AggregateMetrics> {
    if observations.is_empty() {
        return None;
    }
    let total = observations.len();
    let avg_days_to_pay = mean(
        &observations
            .iter()
            .map(|o| o.days_to_pay as f64)
            .collect::<Vec<_>>(),
    );
    let on_time = observations.iter().filter(|o| o.paid_on_time).count();
    let disputes = observations.iter().filter(|o| o.had_dispute).count();
    let partials = observations.iter().filter(|o| o.was_partial_payment).count();

    Some(AggregateMetrics {
        avg_days_to_pay,
        on_time_payment_rate: on_time as f64 / total as f64 * 100.0,
        dispute_rate: disputes as f64 / total as f64 * 100.0,
        partial_payment_rate: partials as f64 / total as f64 * 100.0,
        total_transactions: total as u32,
    })
}

/// Count distinct contributing tenants in an observation slice
pub fn distinct_tenants(observations: &[PaymentObservation]) -> u32 {
    observations
        .iter()
        .map(|o| &o.anonymous_tenant_id)
        .collect::<HashSet<_>>()
        .len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::testutil::obs;

    #[test]
    fn test_population_stddev() {
        assert_eq!(population_stddev(&[]), 0.0);
        assert_eq!(population_stddev(&[5.0, 5.0, 5.0]), 0.0);
        // Population stddev of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let vals = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_stddev(&vals) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_metrics_empty() {
        assert!(aggregate_metrics(&[]).is_none());
    }

    #[test]
    fn test_aggregate_metrics_fold() {
        let observations = vec![
            obs("t1", 10, true, false, false),
            obs("t1", 20, true, false, true),
            obs("t2", 30, false, true, false),
            obs("t2", 40, false, false, false),
        ];
        let m = aggregate_metrics(&observations).unwrap();
        assert_eq!(m.total_transactions, 4);
        assert!((m.avg_days_to_pay - 25.0).abs() < 1e-12);
        assert!((m.on_time_payment_rate - 50.0).abs() < 1e-12);
        assert!((m.dispute_rate - 25.0).abs() < 1e-12);
        assert!((m.partial_payment_rate - 25.0).abs() < 1e-12);
        assert_eq!(distinct_tenants(&observations), 2);
    }
}
