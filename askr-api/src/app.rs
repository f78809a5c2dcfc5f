/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use askr_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = askr_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                           # Health check
/// ├── /v1/
/// │   ├── /questions                    # GET list (newest|best), POST create
/// │   ├── /questions/:id                # GET detail with paginated answers
/// │   ├── /questions/:id/answers        # POST answer
/// │   ├── /questions/:id/votes          # POST cast, DELETE retract
/// │   ├── /answers/:id/correct          # POST mark accepted
/// │   ├── /answers/:id/votes            # POST cast, DELETE retract
/// │   ├── /tags/popular                 # GET top tags by question count
/// │   ├── /tags/:name/questions         # GET tag-filtered listing
/// │   ├── /profiles/top                 # GET top contributors
/// │   └── /profiles/:id                 # GET profile with counts
/// ```
///
/// Identity arrives explicitly in request payloads (acting profile id);
/// there is no session or token middleware in this core.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let question_routes = Router::new()
        .route("/", get(routes::questions::list_questions))
        .route("/", post(routes::questions::create_question))
        .route("/:id", get(routes::questions::get_question))
        .route("/:id/answers", post(routes::answers::create_answer))
        .route("/:id/votes", post(routes::votes::cast_question_vote))
        .route("/:id/votes", delete(routes::votes::remove_question_vote));

    let answer_routes = Router::new()
        .route("/:id/correct", post(routes::answers::mark_correct))
        .route("/:id/votes", post(routes::votes::cast_answer_vote))
        .route("/:id/votes", delete(routes::votes::remove_answer_vote));

    let tag_routes = Router::new()
        .route("/popular", get(routes::tags::popular_tags))
        .route("/:name/questions", get(routes::tags::questions_by_tag));

    let profile_routes = Router::new()
        .route("/top", get(routes::profiles::top_profiles))
        .route("/:id", get(routes::profiles::get_profile));

    let v1_routes = Router::new()
        .nest("/questions", question_routes)
        .nest("/answers", answer_routes)
        .nest("/tags", tag_routes)
        .nest("/profiles", profile_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // The presentation layer is a separate origin; this core has no
        // credentials to protect
        .layer(CorsLayer::permissive())
        .with_state(state)
}
