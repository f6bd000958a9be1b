//! Network Constants
//!
//! Centralized constants for the network credit intelligence layer.
//! Scoring weights, band thresholds and detector windows live here so the
//! scoring engine, services and tests agree on a single source of truth.

// ============================================================================
// Community score weights
// ============================================================================

/// Neutral starting score before any signal is applied
pub const SCORE_BASELINE: f64 = 50.0;

/// Maximum points awarded for a perfect on-time payment rate
pub const SCORE_ON_TIME_WEIGHT: f64 = 40.0;

/// Maximum points awarded for fast average settlement
pub const SCORE_DAYS_WEIGHT: f64 = 30.0;

/// Days-to-pay at or beyond which the settlement bonus reaches zero
pub const SCORE_DAYS_CEILING: f64 = 30.0;

/// Maximum penalty for a 100% dispute rate
pub const SCORE_DISPUTE_PENALTY: f64 = 15.0;

/// Maximum penalty for a 100% partial-payment rate
pub const SCORE_PARTIAL_PENALTY: f64 = 10.0;

/// Maximum data-volume bonus
pub const SCORE_VOLUME_BONUS_CAP: f64 = 5.0;

/// Transactions per bonus point for the data-volume bonus
pub const SCORE_VOLUME_DIVISOR: f64 = 20.0;

// ============================================================================
// Confidence
// ============================================================================

/// Confidence points per observed transaction (capped at half the scale)
pub const CONFIDENCE_PER_TRANSACTION: f64 = 2.0;

/// Confidence points per distinct contributing tenant (capped at half the scale)
pub const CONFIDENCE_PER_TENANT: f64 = 5.0;

/// Cap on each confidence component
pub const CONFIDENCE_COMPONENT_CAP: f64 = 50.0;

// ============================================================================
// Trend
// ============================================================================

/// Observations in each trend comparison window
pub const TREND_WINDOW: usize = 10;

/// Minimum observations per window before a trend is called
pub const TREND_MIN_WINDOW: usize = 3;

/// Relative change (percent) beyond which the trend is not stable
pub const TREND_CHANGE_THRESHOLD_PCT: f64 = 10.0;

// ============================================================================
// Consistency
// ============================================================================

/// Below this many observations the consistency score defaults
pub const CONSISTENCY_MIN_OBSERVATIONS: usize = 10;

/// Default consistency score with too few observations
pub const CONSISTENCY_DEFAULT_FEW_OBS: f64 = 50.0;

/// Default consistency score with fewer than two distinct tenants
pub const CONSISTENCY_DEFAULT_SINGLE_TENANT: f64 = 75.0;

/// Consistency penalty per point of cross-tenant stddev
pub const CONSISTENCY_STDDEV_WEIGHT: f64 = 2.0;

// ============================================================================
// Credit trust score
// ============================================================================

/// Weight of the community score in the credit trust score
pub const TRUST_COMMUNITY_WEIGHT: f64 = 0.6;

/// Verification bonus per distinct tenant
pub const TRUST_PER_TENANT_BONUS: f64 = 2.0;

/// Cap on the verification bonus
pub const TRUST_TENANT_BONUS_CAP: f64 = 20.0;

/// Weight of the consistency score in the credit trust score
pub const TRUST_CONSISTENCY_WEIGHT: f64 = 0.1;

/// Adjustment applied for an improving / declining trend
pub const TRUST_TREND_ADJUSTMENT: f64 = 5.0;

/// Weight of the confidence value in the credit trust score
pub const TRUST_CONFIDENCE_WEIGHT: f64 = 0.05;

// ============================================================================
// Badges
// ============================================================================

/// Distinct tenants required for the verification badge
pub const BADGE_VERIFIED_BY_MIN: u32 = 50;

/// On-time rate (percent) required for the payment-record badge
pub const BADGE_ON_TIME_RATE_MIN: f64 = 95.0;

/// Credit trust score required for the top-trust badge
pub const BADGE_TRUST_SCORE_MIN: f64 = 90.0;

/// Consistency score required for the consistent-payer badge
pub const BADGE_CONSISTENCY_MIN: f64 = 90.0;

// ============================================================================
// Pattern detection
// ============================================================================

/// Lookback window for the selective-delay detector (days)
pub const SELECTIVE_DELAY_LOOKBACK_DAYS: i64 = 90;

/// Minimum distinct tenants before a buyer's variability is judged
pub const SELECTIVE_DELAY_MIN_TENANTS: u32 = 3;

/// Days-to-pay stddev above which payment behavior counts as selective
pub const SELECTIVE_DELAY_STDDEV_THRESHOLD: f64 = 15.0;

/// Cap on selective-delay findings per scan
pub const SELECTIVE_DELAY_MAX_FINDINGS: usize = 20;

/// Recent comparison window for industry/region detectors (days)
pub const DETECTOR_RECENT_WINDOW_DAYS: i64 = 30;

/// Age of the baseline window for industry/region detectors (days)
pub const DETECTOR_BASELINE_OFFSET_DAYS: i64 = 60;

/// Length of the baseline window for industry/region detectors (days)
pub const DETECTOR_BASELINE_WINDOW_DAYS: i64 = 30;

/// Relative days-to-pay increase (percent) that flags an industry
pub const INDUSTRY_DELAY_INCREASE_PCT: f64 = 35.0;

/// On-time rate drop (percentage points) that flags a region
pub const REGION_ON_TIME_DROP_PTS: f64 = 20.0;

/// Year-over-year volume decline (percent) that flags a seasonal anomaly
pub const SEASONAL_VOLUME_DROP_PCT: f64 = 50.0;

/// Days an intelligence record stays valid
pub const INTELLIGENCE_VALIDITY_DAYS: i64 = 30;

// ============================================================================
// Query defaults
// ============================================================================

/// Neutral community score returned when a buyer has no network data
pub const NEUTRAL_COMMUNITY_SCORE: f64 = 50.0;

/// Progress log cadence during aggregation (buyers)
pub const AGGREGATION_PROGRESS_EVERY: u64 = 100;
