/// Question endpoints
///
/// Listings come back as one page of summaries with navigation metadata.
/// The page parameter is free-form: garbage resolves to page 1 and
/// out-of-range numbers clamp, so a stale link never 404s.
///
/// # Endpoints
///
/// - `GET /v1/questions?order=newest|best&page=N` - Paginated listing
/// - `GET /v1/questions/:id?page=N` - Detail with paginated answers
/// - `POST /v1/questions` - Post a question

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use askr_shared::models::answer::Answer;
use askr_shared::models::question::{CreateQuestion, Question};
use askr_shared::pagination::{paginate, Page};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Questions per listing page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Answers per question-detail page
pub const ANSWERS_PER_PAGE: usize = 5;

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// "newest" (default) or "best"
    pub order: Option<String>,

    /// Free-form page parameter
    pub page: Option<String>,
}

/// Detail query parameters (answer pagination)
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    /// Free-form page parameter for the answer list
    pub page: Option<String>,
}

/// A question as it appears in listings
#[derive(Debug, Clone, Serialize)]
pub struct QuestionSummary {
    /// Question ID
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Body text
    pub text: String,

    /// Authoring profile
    pub author_id: Uuid,

    /// Cached vote rating
    pub rating: i32,

    /// Number of answers
    pub answer_count: i64,

    /// Tag names, sorted
    pub tags: Vec<String>,

    /// When the question was posted
    pub created_at: DateTime<Utc>,
}

/// Question detail response
#[derive(Debug, Serialize)]
pub struct QuestionDetailResponse {
    /// The question with its counts and tags
    pub question: QuestionSummary,

    /// One page of answers, best-first
    pub answers: Page<Answer>,
}

/// Create question request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    /// Acting profile ID (the author)
    pub author_id: Uuid,

    /// Question title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Question body text
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,

    /// Tag names to attach
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Lists questions, newest-first by default or best-first on request
///
/// One bulk query supplies the answer counts and one the tag names for
/// the whole page.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Page<QuestionSummary>>> {
    let questions = match query.order.as_deref() {
        Some("best") => Question::list_best(&state.db).await?,
        _ => Question::list_newest(&state.db).await?,
    };

    let page = paginate(questions, query.page.as_deref(), QUESTIONS_PER_PAGE);
    let page = attach_summaries(&state, page).await?;

    Ok(Json(page))
}

/// Fetches one question with a page of its answers
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DetailQuery>,
) -> ApiResult<Json<QuestionDetailResponse>> {
    let question = Question::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Question {} not found", id)))?;

    let answer_counts = Question::answer_counts(&state.db, &[question.id]).await?;
    let tag_names = Question::tag_names(&state.db, &[question.id]).await?;

    let answers = Answer::list_for_question(&state.db, question.id).await?;
    let answers = paginate(answers, query.page.as_deref(), ANSWERS_PER_PAGE);

    let summary = QuestionSummary {
        id: question.id,
        title: question.title,
        text: question.text,
        author_id: question.author_id,
        rating: question.rating,
        answer_count: answer_counts.get(&id).copied().unwrap_or(0),
        tags: tag_names.get(&id).cloned().unwrap_or_default(),
        created_at: question.created_at,
    };

    Ok(Json(QuestionDetailResponse {
        question: summary,
        answers,
    }))
}

/// Posts a new question with its tags
pub async fn create_question(
    State(state): State<AppState>,
    Json(req): Json<CreateQuestionRequest>,
) -> ApiResult<Json<Question>> {
    req.validate()?;

    let question = Question::create(
        &state.db,
        CreateQuestion {
            author_id: req.author_id,
            title: req.title,
            text: req.text,
            tags: req.tags,
        },
    )
    .await?;

    tracing::info!(question_id = %question.id, author_id = %question.author_id, "Question created");
    Ok(Json(question))
}

/// Decorates a page of questions with answer counts and tag names
///
/// Shared by the plain and tag-filtered listings. Runs exactly two bulk
/// queries regardless of page size.
pub(crate) async fn attach_summaries(
    state: &AppState,
    page: Page<Question>,
) -> Result<Page<QuestionSummary>, ApiError> {
    let ids: Vec<Uuid> = page.items.iter().map(|q| q.id).collect();
    let answer_counts = Question::answer_counts(&state.db, &ids).await?;
    let tag_names = Question::tag_names(&state.db, &ids).await?;

    Ok(page.map(|q| QuestionSummary {
        answer_count: answer_counts.get(&q.id).copied().unwrap_or(0),
        tags: tag_names.get(&q.id).cloned().unwrap_or_default(),
        id: q.id,
        title: q.title,
        text: q.text,
        author_id: q.author_id,
        rating: q.rating,
        created_at: q.created_at,
    }))
}
