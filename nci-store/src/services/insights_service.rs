//! Dashboard aggregates: insights, tier distribution, industry trends

use chrono::Utc;
use serde::Serialize;

use nci_core::types::{
    ContributionTier, IntelligenceRecord, MonthBucket, TenantId, TierBenefits, TrustTier,
};

use crate::error::StoreResult;
use crate::store::NetworkStore;

/// Records shown in the insights feed
const RECENT_INTELLIGENCE_LIMIT: usize = 5;

/// Trailing months in an industry trend series
const TREND_MONTHS: u32 = 12;

/// Network-wide headline numbers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NetworkMetrics {
    pub total_buyers: u64,
    /// Credit trust score 80-100
    pub high_trust_buyers: u64,
    /// Credit trust score 0-50
    pub risk_buyers: u64,
    pub total_observations: u64,
}

/// A tenant's own standing in the network
#[derive(Debug, Clone, Serialize)]
pub struct ContributionSummary {
    pub tier: ContributionTier,
    pub transactions_shared: u64,
    pub buyers_shared: u64,
    pub network_scores_accessed: u64,
    pub benefits: TierBenefits,
}

/// Insights dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct NetworkInsights {
    pub network_metrics: NetworkMetrics,
    pub contribution: ContributionSummary,
    pub recent_intelligence: Vec<IntelligenceRecord>,
}

/// Profile counts per trust tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrustTierDistribution {
    pub total: u64,
    pub diamond: u64,
    pub platinum: u64,
    pub gold: u64,
    pub silver: u64,
    pub bronze: u64,
    pub risk: u64,
}

/// One month of an industry trend series
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndustryTrendPoint {
    pub month: MonthBucket,
    pub avg_days_to_pay: f64,
    pub on_time_rate: f64,
    pub transaction_count: u64,
}

/// Twelve trailing months of industry payment behavior
#[derive(Debug, Clone, Serialize)]
pub struct IndustryTrends {
    pub industry: String,
    pub points: Vec<IndustryTrendPoint>,
    pub current_avg_days: f64,
}

/// Read-only dashboard aggregates for registered tenants
pub struct InsightsService {
    store: NetworkStore,
}

impl InsightsService {
    pub fn new(store: NetworkStore) -> Self {
        Self { store }
    }

    /// Dashboard summary; `None` for unregistered tenants
    pub async fn network_insights(
        &self,
        tenant_id: &TenantId,
    ) -> StoreResult<Option<NetworkInsights>> {
        let Some(contribution) = self.store.contributions.find(tenant_id).await? else {
            return Ok(None);
        };

        let network_metrics = NetworkMetrics {
            total_buyers: self.store.profiles.count().await?,
            high_trust_buyers: self
                .store
                .profiles
                .count_trust_score_between(80.0, 100.0)
                .await?,
            risk_buyers: self.store.profiles.count_trust_score_between(0.0, 50.0).await?,
            total_observations: self.store.observations.count().await?,
        };

        let recent_intelligence = self
            .store
            .intelligence
            .find_recent(RECENT_INTELLIGENCE_LIMIT)
            .await?;

        Ok(Some(NetworkInsights {
            network_metrics,
            contribution: ContributionSummary {
                tier: contribution.contribution_tier,
                transactions_shared: contribution.transactions_shared,
                buyers_shared: contribution.buyers_shared,
                network_scores_accessed: contribution.network_scores_accessed,
                benefits: contribution.benefits(),
            },
            recent_intelligence,
        }))
    }

    /// Profile counts per trust tier with optional industry/region filters
    pub async fn trust_score_distribution(
        &self,
        industry: Option<&str>,
        region: Option<&str>,
    ) -> StoreResult<TrustTierDistribution> {
        let counts = self.store.profiles.tier_counts(industry, region).await?;

        let get = |tier: TrustTier| counts.get(&tier).copied().unwrap_or(0);
        let distribution = TrustTierDistribution {
            total: counts.values().sum(),
            diamond: get(TrustTier::Diamond),
            platinum: get(TrustTier::Platinum),
            gold: get(TrustTier::Gold),
            silver: get(TrustTier::Silver),
            bronze: get(TrustTier::Bronze),
            risk: get(TrustTier::Risk),
        };
        Ok(distribution)
    }

    /// Twelve trailing calendar months of payment behavior for an industry
    ///
    /// Months with no observations report zeros rather than gaps.
    pub async fn industry_trends(&self, industry: &str) -> StoreResult<IndustryTrends> {
        let current = MonthBucket::from_date(Utc::now());

        let mut points = Vec::with_capacity(TREND_MONTHS as usize);
        for back in (0..TREND_MONTHS).rev() {
            let month = current.months_back(back);
            let metrics = self
                .store
                .observations
                .industry_month_metrics(industry, month)
                .await?;

            points.push(match metrics {
                Some(m) => IndustryTrendPoint {
                    month,
                    avg_days_to_pay: m.avg_days_to_pay,
                    on_time_rate: m.on_time_payment_rate,
                    transaction_count: m.transaction_count,
                },
                None => IndustryTrendPoint {
                    month,
                    avg_days_to_pay: 0.0,
                    on_time_rate: 0.0,
                    transaction_count: 0,
                },
            });
        }

        let current_avg_days = points.last().map(|p| p.avg_days_to_pay).unwrap_or(0.0);
        Ok(IndustryTrends {
            industry: industry.to_string(),
            points,
            current_avg_days,
        })
    }
}
