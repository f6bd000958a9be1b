//! Payment observation repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use nci_core::scoring::{mean, population_stddev};
use nci_core::types::{AnonymousTenantId, GlobalBuyerId, MonthBucket, PaymentObservation};

use crate::error::StoreResult;

/// Scope for windowed aggregate queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowScope {
    Industry(String),
    Region(String),
}

/// Aggregates over a date window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMetrics {
    /// Mean days-to-pay in the window
    pub avg_days_to_pay: f64,
    /// Percentage of observations settled on time
    pub on_time_payment_rate: f64,
    /// Observations in the window
    pub transaction_count: u64,
    /// Distinct buyers in the window
    pub buyer_count: u64,
}

/// Per-buyer behavior statistics over a lookback window
#[derive(Debug, Clone, PartialEq)]
pub struct BuyerWindowStats {
    pub buyer_id: GlobalBuyerId,
    /// Distinct tenants observing the buyer in the window
    pub tenant_count: u32,
    /// Mean on-time rate (0-1) in the window
    pub avg_on_time_rate: f64,
    /// Population stddev of days-to-pay in the window
    pub days_to_pay_stddev: f64,
}

/// Append-only observation storage with aggregate queries
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Append an observation (observations are immutable once written)
    async fn append(&self, observation: PaymentObservation) -> StoreResult<()>;

    /// All observations for a buyer, observation date descending
    async fn find_for_buyer(
        &self,
        buyer: &GlobalBuyerId,
    ) -> StoreResult<Vec<PaymentObservation>>;

    /// Every buyer with at least one observation
    async fn distinct_buyers(&self) -> StoreResult<Vec<GlobalBuyerId>>;

    /// Every industry code seen in observations
    async fn distinct_industries(&self) -> StoreResult<Vec<String>>;

    /// Every region seen in observations
    async fn distinct_regions(&self) -> StoreResult<Vec<String>>;

    /// Whether a tenant has already contributed observations for a buyer
    async fn buyer_seen_from_tenant(
        &self,
        buyer: &GlobalBuyerId,
        tenant: &AnonymousTenantId,
    ) -> StoreResult<bool>;

    /// Per-buyer behavior statistics since a cutoff date
    async fn buyer_stats_since(
        &self,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<BuyerWindowStats>>;

    /// Windowed aggregates for an industry or region; `None` when the window
    /// holds no observations
    async fn window_metrics(
        &self,
        scope: WindowScope,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Option<WindowMetrics>>;

    /// Observation count for a calendar month
    async fn month_volume(&self, month: MonthBucket) -> StoreResult<u64>;

    /// Aggregates for one industry in one calendar month; `None` when the
    /// month holds no observations for that industry
    async fn industry_month_metrics(
        &self,
        industry: &str,
        month: MonthBucket,
    ) -> StoreResult<Option<WindowMetrics>>;

    /// Total observation count
    async fn count(&self) -> StoreResult<u64>;
}

/// In-memory observation repository
#[derive(Default)]
pub struct MemoryObservationRepo {
    rows: RwLock<Vec<PaymentObservation>>,
}

impl MemoryObservationRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObservationRepository for MemoryObservationRepo {
    async fn append(&self, observation: PaymentObservation) -> StoreResult<()> {
        self.rows.write().await.push(observation);
        Ok(())
    }

    async fn find_for_buyer(
        &self,
        buyer: &GlobalBuyerId,
    ) -> StoreResult<Vec<PaymentObservation>> {
        let rows = self.rows.read().await;
        let mut found: Vec<PaymentObservation> = rows
            .iter()
            .filter(|o| &o.global_buyer_id == buyer)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.observation_date
                .cmp(&a.observation_date)
                .then(b.contributed_at.cmp(&a.contributed_at))
        });
        Ok(found)
    }

    async fn distinct_buyers(&self) -> StoreResult<Vec<GlobalBuyerId>> {
        let rows = self.rows.read().await;
        let mut seen = HashSet::new();
        let mut buyers = Vec::new();
        for obs in rows.iter() {
            if seen.insert(obs.global_buyer_id.clone()) {
                buyers.push(obs.global_buyer_id.clone());
            }
        }
        Ok(buyers)
    }

    async fn distinct_industries(&self) -> StoreResult<Vec<String>> {
        let rows = self.rows.read().await;
        let mut seen = HashSet::new();
        let mut industries = Vec::new();
        for obs in rows.iter() {
            if seen.insert(obs.industry_code.clone()) {
                industries.push(obs.industry_code.clone());
            }
        }
        Ok(industries)
    }

    async fn distinct_regions(&self) -> StoreResult<Vec<String>> {
        let rows = self.rows.read().await;
        let mut seen = HashSet::new();
        let mut regions = Vec::new();
        for obs in rows.iter() {
            if seen.insert(obs.region.clone()) {
                regions.push(obs.region.clone());
            }
        }
        Ok(regions)
    }

    async fn buyer_seen_from_tenant(
        &self,
        buyer: &GlobalBuyerId,
        tenant: &AnonymousTenantId,
    ) -> StoreResult<bool> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .any(|o| &o.global_buyer_id == buyer && &o.anonymous_tenant_id == tenant))
    }

    async fn buyer_stats_since(
        &self,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<BuyerWindowStats>> {
        let rows = self.rows.read().await;
        let mut by_buyer: HashMap<&GlobalBuyerId, Vec<&PaymentObservation>> = HashMap::new();
        for obs in rows.iter().filter(|o| o.observation_date > since) {
            by_buyer.entry(&obs.global_buyer_id).or_default().push(obs);
        }

        let mut stats = Vec::with_capacity(by_buyer.len());
        for (buyer_id, group) in by_buyer {
            let tenants: HashSet<&AnonymousTenantId> =
                group.iter().map(|o| &o.anonymous_tenant_id).collect();
            let days: Vec<f64> = group.iter().map(|o| o.days_to_pay as f64).collect();
            let on_time: Vec<f64> = group
                .iter()
                .map(|o| if o.paid_on_time { 1.0 } else { 0.0 })
                .collect();
            stats.push(BuyerWindowStats {
                buyer_id: buyer_id.clone(),
                tenant_count: tenants.len() as u32,
                avg_on_time_rate: mean(&on_time),
                days_to_pay_stddev: population_stddev(&days),
            });
        }
        Ok(stats)
    }

    async fn window_metrics(
        &self,
        scope: WindowScope,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Option<WindowMetrics>> {
        let rows = self.rows.read().await;
        let in_window: Vec<&PaymentObservation> = rows
            .iter()
            .filter(|o| o.observation_date >= start && o.observation_date <= end)
            .filter(|o| match &scope {
                WindowScope::Industry(code) => &o.industry_code == code,
                WindowScope::Region(region) => &o.region == region,
            })
            .collect();

        if in_window.is_empty() {
            return Ok(None);
        }

        let days: Vec<f64> = in_window.iter().map(|o| o.days_to_pay as f64).collect();
        let on_time = in_window.iter().filter(|o| o.paid_on_time).count();
        let buyers: HashSet<&GlobalBuyerId> =
            in_window.iter().map(|o| &o.global_buyer_id).collect();

        Ok(Some(WindowMetrics {
            avg_days_to_pay: mean(&days),
            on_time_payment_rate: on_time as f64 / in_window.len() as f64 * 100.0,
            transaction_count: in_window.len() as u64,
            buyer_count: buyers.len() as u64,
        }))
    }

    async fn month_volume(&self, month: MonthBucket) -> StoreResult<u64> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|o| o.month == month).count() as u64)
    }

    async fn industry_month_metrics(
        &self,
        industry: &str,
        month: MonthBucket,
    ) -> StoreResult<Option<WindowMetrics>> {
        let rows = self.rows.read().await;
        let in_month: Vec<&PaymentObservation> = rows
            .iter()
            .filter(|o| o.month == month && o.industry_code == industry)
            .collect();

        if in_month.is_empty() {
            return Ok(None);
        }

        let days: Vec<f64> = in_month.iter().map(|o| o.days_to_pay as f64).collect();
        let on_time = in_month.iter().filter(|o| o.paid_on_time).count();
        let buyers: HashSet<&GlobalBuyerId> =
            in_month.iter().map(|o| &o.global_buyer_id).collect();

        Ok(Some(WindowMetrics {
            avg_days_to_pay: mean(&days),
            on_time_payment_rate: on_time as f64 / in_month.len() as f64 * 100.0,
            transaction_count: in_month.len() as u64,
            buyer_count: buyers.len() as u64,
        }))
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.rows.read().await.len() as u64)
    }
}
