/// Answer endpoints
///
/// # Endpoints
///
/// - `POST /v1/questions/:id/answers` - Post an answer to a question
/// - `POST /v1/answers/:id/correct` - Mark an answer as accepted

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use askr_shared::models::answer::{Answer, CreateAnswer};
use askr_shared::models::profile::Profile;
use askr_shared::models::question::Question;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create answer request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnswerRequest {
    /// Acting profile ID (the author)
    pub author_id: Uuid,

    /// Answer body text
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,
}

/// Mark-correct request
#[derive(Debug, Deserialize)]
pub struct MarkCorrectRequest {
    /// Acting profile ID
    ///
    /// Ownership checks live in the (out of scope) session layer; this
    /// core only verifies the profile exists.
    pub profile_id: Uuid,
}

/// Posts an answer to a question
pub async fn create_answer(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(req): Json<CreateAnswerRequest>,
) -> ApiResult<Json<Answer>> {
    req.validate()?;

    // Explicit lookup gives a clean 404 instead of a foreign-key error
    Question::find_by_id(&state.db, question_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Question {} not found", question_id)))?;

    let answer = Answer::create(
        &state.db,
        CreateAnswer {
            author_id: req.author_id,
            question_id,
            text: req.text,
        },
    )
    .await?;

    tracing::info!(answer_id = %answer.id, question_id = %question_id, "Answer created");
    Ok(Json(answer))
}

/// Marks an answer as the accepted one
pub async fn mark_correct(
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
    Json(req): Json<MarkCorrectRequest>,
) -> ApiResult<Json<Answer>> {
    Profile::find_by_id(&state.db, req.profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Profile {} not found", req.profile_id)))?;

    let answer = Answer::mark_correct(&state.db, answer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Answer {} not found", answer_id)))?;

    Ok(Json(answer))
}
