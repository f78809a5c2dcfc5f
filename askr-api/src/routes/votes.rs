/// Vote endpoints
///
/// Casting a vote inserts or overwrites the voter's single row on the
/// target and returns the target's recomputed rating. Retracting deletes
/// the row if present. A vote value outside {-1, +1} is a 400.
///
/// # Endpoints
///
/// - `POST /v1/questions/:id/votes` - Cast a vote on a question
/// - `DELETE /v1/questions/:id/votes` - Retract a vote from a question
/// - `POST /v1/answers/:id/votes` - Cast a vote on an answer
/// - `DELETE /v1/answers/:id/votes` - Retract a vote from an answer
///
/// # Example
///
/// ```text
/// POST /v1/questions/550e8400-e29b-41d4-a716-446655440000/votes
/// Content-Type: application/json
///
/// {"voter_id": "...", "value": 1}
/// ```
///
/// Response:
///
/// ```json
/// {"rating": 3}
/// ```

use crate::{app::AppState, error::ApiResult};
use askr_shared::rating::{self, VoteTarget, VoteValue};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cast vote request
#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    /// Acting profile ID (the voter)
    pub voter_id: Uuid,

    /// +1 or -1; anything else is rejected
    pub value: i16,
}

/// Retract vote request
#[derive(Debug, Deserialize)]
pub struct RemoveVoteRequest {
    /// Acting profile ID (the voter)
    pub voter_id: Uuid,
}

/// Vote response: the target's rating after the write
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    /// New cached rating of the target
    pub rating: i32,
}

/// Casts a vote on a question
pub async fn cast_question_vote(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(req): Json<CastVoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let value = VoteValue::try_from(req.value)?;
    let rating = rating::cast_vote(
        &state.db,
        req.voter_id,
        VoteTarget::Question(question_id),
        value,
    )
    .await?;

    Ok(Json(VoteResponse { rating }))
}

/// Retracts a vote from a question
pub async fn remove_question_vote(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(req): Json<RemoveVoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let rating =
        rating::remove_vote(&state.db, req.voter_id, VoteTarget::Question(question_id)).await?;

    Ok(Json(VoteResponse { rating }))
}

/// Casts a vote on an answer
pub async fn cast_answer_vote(
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
    Json(req): Json<CastVoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let value = VoteValue::try_from(req.value)?;
    let rating = rating::cast_vote(
        &state.db,
        req.voter_id,
        VoteTarget::Answer(answer_id),
        value,
    )
    .await?;

    Ok(Json(VoteResponse { rating }))
}

/// Retracts a vote from an answer
pub async fn remove_answer_vote(
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
    Json(req): Json<RemoveVoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let rating =
        rating::remove_vote(&state.db, req.voter_id, VoteTarget::Answer(answer_id)).await?;

    Ok(Json(VoteResponse { rating }))
}
