/// Profile endpoints
///
/// # Endpoints
///
/// - `GET /v1/profiles/top?limit=N` - Top contributors by (questions + answers)
/// - `GET /v1/profiles/:id` - Profile detail with contribution counts

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use askr_shared::models::profile::{Profile, RankedProfile};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

/// Default number of top contributors returned
const DEFAULT_TOP_LIMIT: i64 = 5;

/// Top-profiles query parameters
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    /// Maximum number of profiles to return (default 5)
    pub limit: Option<i64>,
}

/// Lists the top contributors
///
/// Score is authored questions plus authored answers, each counted
/// independently (a profile with 3 questions and 4 answers scores 7).
pub async fn top_profiles(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> ApiResult<Json<Vec<RankedProfile>>> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT).clamp(1, 100);
    let profiles = Profile::top(&state.db, limit).await?;

    Ok(Json(profiles))
}

/// Fetches one profile with its contribution counts
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<RankedProfile>> {
    let profile = Profile::ranked(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Profile {} not found", id)))?;

    Ok(Json(profile))
}
