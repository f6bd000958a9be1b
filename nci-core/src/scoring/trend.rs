//! Trend detection over a buyer's recent observations

use crate::constants::{TREND_CHANGE_THRESHOLD_PCT, TREND_MIN_WINDOW, TREND_WINDOW};
use crate::scoring::mean;
use crate::types::{PaymentObservation, TrendDirection};

/// Classify the payment trend from observations ordered date-descending
///
/// Compares mean days-to-pay of the 10 most recent observations against the
/// next 10 older ones. Decreasing days-to-pay is improvement. With fewer than
/// 3 observations in either window the trend is stable.
pub fn trend_direction(observations_desc: &[PaymentObservation]) -> TrendDirection {
    let recent: Vec<f64> = observations_desc
        .iter()
        .take(TREND_WINDOW)
        .map(|o| o.days_to_pay as f64)
        .collect();
    let older: Vec<f64> = observations_desc
        .iter()
        .skip(TREND_WINDOW)
        .take(TREND_WINDOW)
        .map(|o| o.days_to_pay as f64)
        .collect();

    if recent.len() < TREND_MIN_WINDOW || older.len() < TREND_MIN_WINDOW {
        return TrendDirection::Stable;
    }

    let recent_avg = mean(&recent);
    let older_avg = mean(&older);

    // Positive change means settlement got faster
    let change = (older_avg - recent_avg) / older_avg * 100.0;

    if change > TREND_CHANGE_THRESHOLD_PCT {
        TrendDirection::Improving
    } else if change < -TREND_CHANGE_THRESHOLD_PCT {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::testutil::obs;

    fn days_seq(days: &[i32]) -> Vec<PaymentObservation> {
        days.iter().map(|d| obs("t1", *d, true, false, false)).collect()
    }

    #[test]
    fn test_too_few_observations_is_stable() {
        assert_eq!(trend_direction(&days_seq(&[10, 20])), TrendDirection::Stable);
        // 10 recent but only 2 older
        let days: Vec<i32> = std::iter::repeat(10).take(12).collect();
        assert_eq!(trend_direction(&days_seq(&days)), TrendDirection::Stable);
    }

    #[test]
    fn test_faster_settlement_is_improving() {
        // Recent window averages 18, older window averages 30: +40% change
        let mut days = vec![18; 10];
        days.extend(vec![30; 10]);
        assert_eq!(trend_direction(&days_seq(&days)), TrendDirection::Improving);
    }

    #[test]
    fn test_slower_settlement_is_declining() {
        let mut days = vec![40; 10];
        days.extend(vec![30; 10]);
        assert_eq!(trend_direction(&days_seq(&days)), TrendDirection::Declining);
    }

    #[test]
    fn test_small_change_is_stable() {
        // 28 vs 30 is under the 10% threshold
        let mut days = vec![28; 10];
        days.extend(vec![30; 10]);
        assert_eq!(trend_direction(&days_seq(&days)), TrendDirection::Stable);
    }

    #[test]
    fn test_threshold_is_strict() {
        // Exactly 10% change stays stable
        let mut days = vec![27; 10];
        days.extend(vec![30; 10]);
        assert_eq!(trend_direction(&days_seq(&days)), TrendDirection::Stable);
    }
}
