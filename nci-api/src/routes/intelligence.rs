//! Intelligence and dashboard endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use nci_core::types::TenantId;
use nci_store::{IndustryTrends, NetworkInsights, TrustTierDistribution};

use crate::dto::IntelligenceResponse;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IntelligenceQuery {
    pub tenant_id: String,
    pub industry: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    pub tenant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DistributionQuery {
    pub industry: Option<String>,
    pub region: Option<String>,
}

/// Active intelligence records visible to the tenant's tier
pub async fn get_intelligence(
    State(state): State<AppState>,
    Query(query): Query<IntelligenceQuery>,
) -> ApiResult<Json<Vec<IntelligenceResponse>>> {
    let records = state
        .patterns
        .get_network_intelligence(&TenantId(query.tenant_id), query.industry.as_deref())
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Network insights dashboard
pub async fn get_insights(
    State(state): State<AppState>,
    Query(query): Query<InsightsQuery>,
) -> ApiResult<Json<NetworkInsights>> {
    let insights = state
        .insights
        .network_insights(&TenantId(query.tenant_id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Tenant not registered for network".to_string()))?;

    Ok(Json(insights))
}

/// Trust tier distribution
pub async fn get_distribution(
    State(state): State<AppState>,
    Query(query): Query<DistributionQuery>,
) -> ApiResult<Json<TrustTierDistribution>> {
    let distribution = state
        .insights
        .trust_score_distribution(query.industry.as_deref(), query.region.as_deref())
        .await?;

    Ok(Json(distribution))
}

/// Industry payment trends
pub async fn get_trends(
    State(state): State<AppState>,
    Path(industry): Path<String>,
) -> ApiResult<Json<IndustryTrends>> {
    let trends = state.insights.industry_trends(&industry).await?;
    Ok(Json(trends))
}
