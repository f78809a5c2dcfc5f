/// Common test utilities for integration tests
///
/// These tests need a real PostgreSQL database; set `DATABASE_URL` and run
/// with `cargo test -- --ignored`. Each helper creates rows with unique
/// usernames/titles so suites can share one database without cleanup
/// ordering issues; `TestContext::cleanup` still removes what a test made.

use askr_api::app::{build_router, AppState};
use askr_api::config::{ApiConfig, Config, DatabaseConfig};
use askr_shared::models::answer::{Answer, CreateAnswer};
use askr_shared::models::profile::Profile;
use askr_shared::models::question::{CreateQuestion, Question};
use askr_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    /// Users created through this context, removed on cleanup
    created_users: Vec<Uuid>,
}

impl TestContext {
    /// Creates a new test context against the `DATABASE_URL` database
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is required for integration tests"))?;

        let db = PgPool::connect(&url).await?;

        askr_shared::db::migrations::run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
        };

        let app = build_router(AppState::new(db.clone(), config));

        Ok(Self {
            db,
            app,
            created_users: Vec::new(),
        })
    }

    /// Creates a user plus its profile, returning the profile
    pub async fn create_profile(&mut self, prefix: &str) -> anyhow::Result<Profile> {
        let suffix = Uuid::new_v4().simple().to_string();
        let user = User::create(
            &self.db,
            CreateUser {
                username: format!("{}-{}", prefix, &suffix[..12]),
                email: format!("{}@test.invalid", &suffix[..12]),
                password_hash: "x".to_string(),
            },
        )
        .await?;
        self.created_users.push(user.id);

        let profile = Profile::create(&self.db, user.id, None).await?;
        Ok(profile)
    }

    /// Creates a question authored by the given profile
    pub async fn create_question(
        &self,
        author: &Profile,
        title: &str,
        tags: &[&str],
    ) -> anyhow::Result<Question> {
        let question = Question::create(
            &self.db,
            CreateQuestion {
                author_id: author.id,
                title: title.to_string(),
                text: format!("Body of {}", title),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        )
        .await?;
        Ok(question)
    }

    /// Creates an answer to a question
    pub async fn create_answer(
        &self,
        author: &Profile,
        question: &Question,
        text: &str,
    ) -> anyhow::Result<Answer> {
        let answer = Answer::create(
            &self.db,
            CreateAnswer {
                author_id: author.id,
                question_id: question.id,
                text: text.to_string(),
            },
        )
        .await?;
        Ok(answer)
    }

    /// Deletes every user this context created; cascades take the rest
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        for user_id in &self.created_users {
            User::delete(&self.db, *user_id).await?;
        }
        Ok(())
    }
}
