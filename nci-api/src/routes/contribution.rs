//! Contribution and registration endpoints

use axum::{extract::State, Json};

use nci_core::types::{ContributionTier, TenantId};

use crate::dto::{ContributeRequest, ContributeResponse, RegisterRequest, RegisterResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Contribute a payment observation
///
/// Always acknowledges: a tenant that has not opted in gets the same response
/// as a stored contribution, so the caller's invoicing workflow never blocks
/// on this write.
pub async fn contribute(
    State(state): State<AppState>,
    Json(request): Json<ContributeRequest>,
) -> ApiResult<Json<ContributeResponse>> {
    let (tenant_id, buyer_identifier, event) = request.into_event();

    state
        .contributions
        .contribute_payment_observation(&TenantId(tenant_id), &buyer_identifier, &event)
        .await;

    Ok(Json(ContributeResponse { accepted: true }))
}

/// Register a tenant for network participation
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    let tier = match request.tier.as_deref() {
        Some(raw) => ContributionTier::parse(raw)?,
        None => ContributionTier::Standard,
    };

    let contribution = state
        .contributions
        .register_tenant(TenantId(request.tenant_id), tier)
        .await?;

    Ok(Json(contribution.into()))
}
