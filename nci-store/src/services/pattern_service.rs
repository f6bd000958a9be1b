//! Risk pattern detection and intelligence queries

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{info, warn};

use nci_core::constants::*;
use nci_core::types::{
    ContributionTier, GlobalBuyerId, IntelligenceRecord, MonthBucket, PatternKind, Severity,
    TenantId,
};

use crate::error::StoreResult;
use crate::repos::WindowScope;
use crate::store::NetworkStore;

/// A detector finding before persistence
struct FindingDraft {
    kind: PatternKind,
    severity: Severity,
    title: String,
    recommendation: String,
    industry_code: Option<String>,
    region: Option<String>,
    buyer_id: Option<GlobalBuyerId>,
    evidence: serde_json::Value,
    affected_buyers: u32,
}

/// Scheduled risk scans over the observation log
pub struct PatternService {
    store: NetworkStore,
    sequence: std::sync::atomic::AtomicU64,
}

impl PatternService {
    pub fn new(store: NetworkStore) -> Self {
        Self {
            store,
            sequence: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Run every detector and persist the findings
    ///
    /// Detectors are independent: one failing is logged and never blocks the
    /// others.
    pub async fn detect_emerging_risks(&self) -> StoreResult<Vec<IntelligenceRecord>> {
        info!("Detecting emerging risk patterns");
        let now = Utc::now();

        let mut drafts = Vec::new();
        let detectors: [(&str, StoreResult<Vec<FindingDraft>>); 4] = [
            ("selective_delay", self.detect_selective_delays(now).await),
            (
                "industry_deterioration",
                self.detect_industry_deterioration(now).await,
            ),
            ("geographic_stress", self.detect_geographic_stress(now).await),
            ("seasonal_anomaly", self.detect_seasonal_anomalies(now).await),
        ];
        for (name, outcome) in detectors {
            match outcome {
                Ok(found) => drafts.extend(found),
                Err(e) => warn!(detector = name, error = %e, "Detector failed"),
            }
        }

        let mut stored = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let record = self.build_record(draft, now);
            match self.store.intelligence.append(record.clone()).await {
                Ok(()) => stored.push(record),
                Err(e) => warn!(record_id = %record.id, error = %e, "Failed to store finding"),
            }
        }

        info!(count = stored.len(), "Emerging risk detection complete");
        Ok(stored)
    }

    /// Active intelligence records visible to a tenant
    ///
    /// Unregistered tenants see nothing; registered tenants see records whose
    /// visibility includes their tier, severity-descending.
    pub async fn get_network_intelligence(
        &self,
        tenant_id: &TenantId,
        industry: Option<&str>,
    ) -> StoreResult<Vec<IntelligenceRecord>> {
        let Some(contribution) = self.store.contributions.find(tenant_id).await? else {
            return Ok(Vec::new());
        };

        let active = self
            .store
            .intelligence
            .find_active(Utc::now(), industry)
            .await?;
        Ok(active
            .into_iter()
            .filter(|r| r.is_visible_to(contribution.contribution_tier))
            .collect())
    }

    /// Buyers paying some counterparties on time while delaying others
    async fn detect_selective_delays(
        &self,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<FindingDraft>> {
        let since = now - Duration::days(SELECTIVE_DELAY_LOOKBACK_DAYS);
        let mut stats = self.store.observations.buyer_stats_since(since).await?;

        stats.retain(|s| {
            s.tenant_count >= SELECTIVE_DELAY_MIN_TENANTS
                && s.days_to_pay_stddev > SELECTIVE_DELAY_STDDEV_THRESHOLD
        });
        stats.sort_by(|a, b| b.days_to_pay_stddev.total_cmp(&a.days_to_pay_stddev));
        stats.truncate(SELECTIVE_DELAY_MAX_FINDINGS);

        Ok(stats
            .into_iter()
            .map(|s| FindingDraft {
                kind: PatternKind::SelectiveDelay,
                severity: Severity::High,
                title: "Buyer pays some vendors on time but delays others significantly"
                    .to_string(),
                recommendation: "Flag as strategic late payer - negotiate stricter terms"
                    .to_string(),
                industry_code: None,
                region: None,
                buyer_id: Some(s.buyer_id),
                evidence: json!({
                    "tenant_count": s.tenant_count,
                    "avg_on_time_rate": s.avg_on_time_rate,
                    "payment_variability": s.days_to_pay_stddev,
                }),
                affected_buyers: 1,
            })
            .collect())
    }

    /// Industry-wide settlement slowdowns against a 60-90 day old baseline
    async fn detect_industry_deterioration(
        &self,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<FindingDraft>> {
        let mut drafts = Vec::new();

        for industry in self.store.observations.distinct_industries().await? {
            let recent = self
                .store
                .observations
                .window_metrics(
                    WindowScope::Industry(industry.clone()),
                    now - Duration::days(DETECTOR_RECENT_WINDOW_DAYS),
                    now,
                )
                .await?;
            let baseline = self
                .store
                .observations
                .window_metrics(
                    WindowScope::Industry(industry.clone()),
                    now - Duration::days(
                        DETECTOR_BASELINE_OFFSET_DAYS + DETECTOR_BASELINE_WINDOW_DAYS,
                    ),
                    now - Duration::days(DETECTOR_BASELINE_OFFSET_DAYS),
                )
                .await?;

            let (Some(recent), Some(baseline)) = (recent, baseline) else {
                continue;
            };

            let delay_increase = (recent.avg_days_to_pay - baseline.avg_days_to_pay)
                / baseline.avg_days_to_pay
                * 100.0;

            if delay_increase > INDUSTRY_DELAY_INCREASE_PCT {
                drafts.push(FindingDraft {
                    kind: PatternKind::IndustryDeterioration,
                    severity: Severity::High,
                    title: "Industry-wide payment delays increasing".to_string(),
                    recommendation: "Tighten credit terms for this sector".to_string(),
                    industry_code: Some(industry),
                    region: None,
                    buyer_id: None,
                    evidence: json!({
                        "delay_increase_pct": delay_increase,
                        "recent_avg_days": recent.avg_days_to_pay,
                        "baseline_avg_days": baseline.avg_days_to_pay,
                        "affected_buyers": recent.buyer_count,
                    }),
                    affected_buyers: recent.buyer_count as u32,
                });
            }
        }

        Ok(drafts)
    }

    /// Regional on-time-rate collapses against a 60-90 day old baseline
    async fn detect_geographic_stress(
        &self,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<FindingDraft>> {
        let mut drafts = Vec::new();

        for region in self.store.observations.distinct_regions().await? {
            let recent = self
                .store
                .observations
                .window_metrics(
                    WindowScope::Region(region.clone()),
                    now - Duration::days(DETECTOR_RECENT_WINDOW_DAYS),
                    now,
                )
                .await?;
            let baseline = self
                .store
                .observations
                .window_metrics(
                    WindowScope::Region(region.clone()),
                    now - Duration::days(
                        DETECTOR_BASELINE_OFFSET_DAYS + DETECTOR_BASELINE_WINDOW_DAYS,
                    ),
                    now - Duration::days(DETECTOR_BASELINE_OFFSET_DAYS),
                )
                .await?;

            let (Some(recent), Some(baseline)) = (recent, baseline) else {
                continue;
            };

            let on_time_drop = baseline.on_time_payment_rate - recent.on_time_payment_rate;

            if on_time_drop > REGION_ON_TIME_DROP_PTS {
                drafts.push(FindingDraft {
                    kind: PatternKind::GeographicStress,
                    severity: Severity::Medium,
                    title: "Regional payment stress detected".to_string(),
                    recommendation: "Monitor regional economic indicators".to_string(),
                    industry_code: None,
                    region: Some(region),
                    buyer_id: None,
                    evidence: json!({
                        "on_time_rate_drop_pts": on_time_drop,
                        "recent_rate": recent.on_time_payment_rate,
                        "baseline_rate": baseline.on_time_payment_rate,
                        "affected_buyers": recent.buyer_count,
                    }),
                    affected_buyers: recent.buyer_count as u32,
                });
            }
        }

        Ok(drafts)
    }

    /// Year-over-year volume collapse for the current calendar month
    async fn detect_seasonal_anomalies(
        &self,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<FindingDraft>> {
        let current_month = MonthBucket::from_date(now);
        let current = self.store.observations.month_volume(current_month).await?;
        let last_year = self
            .store
            .observations
            .month_volume(current_month.previous_year())
            .await?;

        if last_year == 0 {
            return Ok(Vec::new());
        }

        let volume_change =
            (current as f64 - last_year as f64) / last_year as f64 * 100.0;

        if volume_change < -SEASONAL_VOLUME_DROP_PCT {
            return Ok(vec![FindingDraft {
                kind: PatternKind::SeasonalAnomaly,
                severity: Severity::Medium,
                title: "Unusual drop in business activity".to_string(),
                recommendation: "Economic slowdown indicator - review credit exposure"
                    .to_string(),
                industry_code: None,
                region: None,
                buyer_id: None,
                evidence: json!({
                    "volume_change_pct": volume_change,
                    "current_volume": current,
                    "last_year_volume": last_year,
                }),
                affected_buyers: 0,
            }]);
        }

        Ok(Vec::new())
    }

    fn build_record(&self, draft: FindingDraft, now: DateTime<Utc>) -> IntelligenceRecord {
        IntelligenceRecord {
            id: self.generate_id(now),
            kind: draft.kind,
            severity: draft.severity,
            title: draft.title,
            recommendation: draft.recommendation,
            industry_code: draft.industry_code,
            region: draft.region,
            buyer_id: draft.buyer_id,
            evidence: draft.evidence,
            affected_buyers: draft.affected_buyers,
            detected_at: now,
            valid_until: now + Duration::days(INTELLIGENCE_VALIDITY_DAYS),
            visible_to_tiers: vec![ContributionTier::Standard, ContributionTier::Premium],
        }
    }

    fn generate_id(&self, now: DateTime<Utc>) -> String {
        let seq = self
            .sequence
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        format!("intel_{:016x}_{:08x}", now.timestamp_micros(), seq)
    }
}
