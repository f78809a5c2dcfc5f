/// Answer model and database operations
///
/// Answers belong to a question and are voted on like questions. The
/// `rating` column is derived state maintained by the rating engine.
/// An answer can be flagged correct (accepted); this core stores the
/// flag but attaches no further semantics to it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE answers (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     text TEXT NOT NULL,
///     author_id UUID NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
///     question_id UUID NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
///     is_correct BOOLEAN NOT NULL DEFAULT FALSE,
///     rating INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Answer model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Answer {
    /// Unique answer ID (UUID v4)
    pub id: Uuid,

    /// Answer body text
    pub text: String,

    /// Authoring profile
    pub author_id: Uuid,

    /// The question this answers
    pub question_id: Uuid,

    /// Whether the question owner accepted this answer
    pub is_correct: bool,

    /// Cached vote rating (sum of answer_votes.value for this answer)
    pub rating: i32,

    /// When the answer was posted (immutable)
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnswer {
    /// Authoring profile ID
    pub author_id: Uuid,

    /// Parent question ID
    pub question_id: Uuid,

    /// Answer body text
    pub text: String,
}

impl Answer {
    /// Creates a new answer
    ///
    /// # Errors
    ///
    /// Returns an error if the author profile or parent question does not
    /// exist (foreign key) or the database operation fails
    pub async fn create(pool: &PgPool, data: CreateAnswer) -> Result<Self, sqlx::Error> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (text, author_id, question_id)
            VALUES ($1, $2, $3)
            RETURNING id, text, author_id, question_id, is_correct, rating, created_at
            "#,
        )
        .bind(data.text)
        .bind(data.author_id)
        .bind(data.question_id)
        .fetch_one(pool)
        .await?;

        Ok(answer)
    }

    /// Finds an answer by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, text, author_id, question_id, is_correct, rating, created_at
            FROM answers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(answer)
    }

    /// Lists answers for a question, best-first
    ///
    /// Order: rating descending, then creation time descending (a newer
    /// answer wins a rating tie), then id descending. The full chain is
    /// deterministic, so pages never shift on re-query.
    pub async fn list_for_question(
        pool: &PgPool,
        question_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let answers = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, text, author_id, question_id, is_correct, rating, created_at
            FROM answers
            WHERE question_id = $1
            ORDER BY rating DESC, created_at DESC, id DESC
            "#,
        )
        .bind(question_id)
        .fetch_all(pool)
        .await?;

        Ok(answers)
    }

    /// Marks an answer as the accepted one for its question
    pub async fn mark_correct(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            UPDATE answers
            SET is_correct = TRUE
            WHERE id = $1
            RETURNING id, text, author_id, question_id, is_correct, rating, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(answer)
    }

    /// Deletes an answer
    ///
    /// Cascades to its votes.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
