//! Community score endpoint

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use nci_core::types::TenantId;

use crate::dto::ScoreResponse;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    /// Requesting tenant
    pub tenant_id: String,
}

/// Look up a buyer's community score
///
/// Access denial and the no-data neutral default are both 200 responses;
/// neither is an error.
pub async fn get_score(
    State(state): State<AppState>,
    Path(buyer_id): Path<String>,
    Query(query): Query<ScoreQuery>,
) -> ApiResult<Json<ScoreResponse>> {
    let lookup = state
        .scores
        .get_community_score(&buyer_id, &TenantId(query.tenant_id))
        .await?;

    Ok(Json(lookup.into()))
}
