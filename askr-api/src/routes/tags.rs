/// Tag endpoints
///
/// # Endpoints
///
/// - `GET /v1/tags/popular?limit=N` - Tags by distinct question count
/// - `GET /v1/tags/:name/questions?page=N` - Tag-filtered question listing

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::questions::{attach_summaries, QuestionSummary, QUESTIONS_PER_PAGE},
};
use askr_shared::models::question::Question;
use askr_shared::models::tag::{PopularTag, Tag};
use askr_shared::pagination::{paginate, Page};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

/// Default number of popular tags returned
const DEFAULT_POPULAR_LIMIT: i64 = 10;

/// Popular-tags query parameters
#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    /// Maximum number of tags to return (default 10)
    pub limit: Option<i64>,
}

/// Tag-listing query parameters
#[derive(Debug, Deserialize)]
pub struct TagListQuery {
    /// Free-form page parameter
    pub page: Option<String>,
}

/// Lists the most popular tags by how many questions carry them
pub async fn popular_tags(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> ApiResult<Json<Vec<PopularTag>>> {
    let limit = query.limit.unwrap_or(DEFAULT_POPULAR_LIMIT).clamp(1, 100);
    let tags = Tag::popular(&state.db, limit).await?;

    Ok(Json(tags))
}

/// Lists questions carrying the named tag, newest-first
///
/// Unknown tag names are a 404; a known tag with no remaining questions
/// returns an empty page.
pub async fn questions_by_tag(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<TagListQuery>,
) -> ApiResult<Json<Page<QuestionSummary>>> {
    Tag::find_by_name(&state.db, &name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Tag '{}' not found", name)))?;

    let questions = Question::list_by_tag(&state.db, &name).await?;
    let page = paginate(questions, query.page.as_deref(), QUESTIONS_PER_PAGE);
    let page = attach_summaries(&state, page).await?;

    Ok(Json(page))
}
