//! Scheduled background jobs
//!
//! One spawned ticker per job. A failed run is logged and the loop keeps
//! ticking; overlap protection is the single ticker itself, so each job
//! never races its own previous run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::time::{interval, Duration};
use tracing::{error, info};

use nci_store::{AggregationService, NetworkStore, PatternService};

/// Background job configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Seconds between aggregation runs
    pub aggregation_interval_secs: u64,
    /// Seconds between pattern detection runs
    pub detection_interval_secs: u64,
    /// Drop expired intelligence records on each detection run
    pub purge_expired: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            aggregation_interval_secs: 86_400,
            detection_interval_secs: 86_400,
            purge_expired: true,
        }
    }
}

/// Runs the daily aggregation and detection jobs on tokio tickers
pub struct Scheduler {
    store: NetworkStore,
    aggregation: AggregationService,
    patterns: PatternService,
    config: SchedulerConfig,
    running: AtomicBool,
}

impl Scheduler {
    pub fn new(store: NetworkStore, config: SchedulerConfig) -> Self {
        Self {
            aggregation: AggregationService::new(store.clone()),
            patterns: PatternService::new(store.clone()),
            store,
            config,
            running: AtomicBool::new(false),
        }
    }

    /// Start both job loops
    ///
    /// The first tick of each job fires immediately, then on the configured
    /// interval.
    pub fn start(self: Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            return; // Already running
        }

        let scheduler = self.clone();
        tokio::spawn(async move {
            let mut ticker =
                interval(Duration::from_secs(scheduler.config.aggregation_interval_secs));
            while scheduler.running.load(Ordering::SeqCst) {
                ticker.tick().await;
                scheduler.run_aggregation_once().await;
            }
        });

        let scheduler = self.clone();
        tokio::spawn(async move {
            let mut ticker =
                interval(Duration::from_secs(scheduler.config.detection_interval_secs));
            while scheduler.running.load(Ordering::SeqCst) {
                ticker.tick().await;
                scheduler.run_detection_once().await;
            }
        });

        info!(
            aggregation_interval_secs = self.config.aggregation_interval_secs,
            detection_interval_secs = self.config.detection_interval_secs,
            "Started scheduled jobs"
        );
    }

    /// Stop both job loops after their current tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        info!("Stopped scheduled jobs");
    }

    /// One aggregation run; failures are logged, never propagated
    pub async fn run_aggregation_once(&self) {
        if let Err(e) = self.aggregation.aggregate_network_data().await {
            error!(error = %e, "Scheduled aggregation run failed");
        }
    }

    /// One detection run (with expiry purge); failures are logged, never
    /// propagated
    pub async fn run_detection_once(&self) {
        if self.config.purge_expired {
            match self.store.intelligence.purge_expired(Utc::now()).await {
                Ok(removed) if removed > 0 => {
                    info!(removed, "Purged expired intelligence records");
                }
                Ok(_) => {}
                Err(e) => error!(error = %e, "Intelligence purge failed"),
            }
        }

        if let Err(e) = self.patterns.detect_emerging_risks().await {
            error!(error = %e, "Scheduled detection run failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use nci_core::anonymize::{anonymize_buyer, anonymize_tenant};
    use nci_core::types::{
        ContributionTier, GlobalBuyerId, IntelligenceRecord, PatternKind, PaymentEvent,
        PaymentObservation, Severity, TenantId,
    };
    use rust_decimal::Decimal;

    async fn seeded_store() -> NetworkStore {
        let store = NetworkStore::in_memory();
        let buyer = anonymize_buyer("BUYER-1");
        let tenant = anonymize_tenant(&TenantId("t1".to_string()));
        for _ in 0..12 {
            let event = PaymentEvent {
                days_to_pay: 10,
                invoice_amount: Decimal::from(45_000u32),
                transaction_date: Utc::now(),
                paid_on_time: true,
                had_dispute: false,
                was_partial_payment: false,
                industry_code: "textiles".to_string(),
                region: "MH".to_string(),
                revenue_class: "sme".to_string(),
            };
            store
                .observations
                .append(PaymentObservation::from_event(
                    buyer.clone(),
                    tenant.clone(),
                    &event,
                ))
                .await
                .unwrap();
        }
        store
    }

    #[test]
    fn test_default_config_is_daily() {
        let config = SchedulerConfig::default();
        assert_eq!(config.aggregation_interval_secs, 86_400);
        assert_eq!(config.detection_interval_secs, 86_400);
        assert!(config.purge_expired);
    }

    #[tokio::test]
    async fn test_aggregation_tick_writes_profiles() {
        let store = seeded_store().await;
        let scheduler = Scheduler::new(store.clone(), SchedulerConfig::default());

        scheduler.run_aggregation_once().await;

        let profile = store
            .profiles
            .find(&anonymize_buyer("BUYER-1"))
            .await
            .unwrap();
        assert!(profile.is_some());
    }

    #[tokio::test]
    async fn test_detection_tick_purges_expired_records() {
        let store = NetworkStore::in_memory();
        let now = Utc::now();
        store
            .intelligence
            .append(IntelligenceRecord {
                id: "intel_expired".to_string(),
                kind: PatternKind::SeasonalAnomaly,
                severity: Severity::Medium,
                title: "Unusual drop in business activity".to_string(),
                recommendation: "Review credit exposure".to_string(),
                industry_code: None,
                region: None,
                buyer_id: Some(GlobalBuyerId("b".to_string())),
                evidence: serde_json::json!({}),
                affected_buyers: 0,
                detected_at: now - ChronoDuration::days(45),
                valid_until: now - ChronoDuration::days(15),
                visible_to_tiers: vec![ContributionTier::Standard, ContributionTier::Premium],
            })
            .await
            .unwrap();

        let scheduler = Scheduler::new(store.clone(), SchedulerConfig::default());
        scheduler.run_detection_once().await;

        let recent = store.intelligence.find_recent(10).await.unwrap();
        assert!(recent.is_empty());
    }

    #[tokio::test]
    async fn test_started_scheduler_runs_first_tick() {
        let store = seeded_store().await;
        let scheduler = Arc::new(Scheduler::new(
            store.clone(),
            SchedulerConfig::default(),
        ));
        scheduler.clone().start();

        // First tick fires immediately; give the spawned task a moment
        tokio::time::sleep(Duration::from_millis(100)).await;

        let profile = store
            .profiles
            .find(&anonymize_buyer("BUYER-1"))
            .await
            .unwrap();
        assert!(profile.is_some());

        scheduler.stop();
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let store = NetworkStore::in_memory();
        let scheduler = Arc::new(Scheduler::new(store, SchedulerConfig::default()));
        scheduler.clone().start();
        scheduler.clone().start();
        scheduler.stop();
    }
}
