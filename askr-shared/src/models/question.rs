/// Question model and database operations
///
/// Questions are the root content entity: authored by a profile, labeled
/// with tags, answered, and voted on. The `rating` column is derived
/// state, always equal to the sum of this question's vote values; it is
/// maintained by the rating engine, never written directly here.
///
/// All listing orders carry `id` as the final sort key so pagination is
/// deterministic across pages even when timestamps or ratings tie.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE questions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     text TEXT NOT NULL,
///     author_id UUID NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
///     rating INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use askr_shared::models::question::{Question, CreateQuestion};
/// use askr_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let question = Question::create(&pool, CreateQuestion {
///     author_id: Uuid::new_v4(),
///     title: "How do I borrow twice?".to_string(),
///     text: "The borrow checker disagrees with me.".to_string(),
///     tags: vec!["rust".to_string(), "borrowing".to_string()],
/// }).await?;
///
/// let newest = Question::list_newest(&pool).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Question model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    /// Unique question ID (UUID v4)
    pub id: Uuid,

    /// Question title
    pub title: String,

    /// Question body text
    pub text: String,

    /// Authoring profile
    pub author_id: Uuid,

    /// Cached vote rating (sum of question_votes.value for this question)
    pub rating: i32,

    /// When the question was posted (immutable)
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestion {
    /// Authoring profile ID
    pub author_id: Uuid,

    /// Question title
    pub title: String,

    /// Question body text
    pub text: String,

    /// Tag names to attach (created on demand, duplicates collapse)
    pub tags: Vec<String>,
}

impl Question {
    /// Creates a question and attaches its tags in one transaction
    ///
    /// Tag names are resolved with an upsert, so previously unseen names
    /// are created on the fly and concurrent posts sharing a new name
    /// cannot conflict.
    ///
    /// # Errors
    ///
    /// Returns an error if the author profile does not exist (foreign key)
    /// or the database operation fails
    pub async fn create(pool: &PgPool, data: CreateQuestion) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (title, text, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, text, author_id, rating, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.text)
        .bind(data.author_id)
        .fetch_one(&mut *tx)
        .await?;

        for name in &data.tags {
            // The no-op DO UPDATE makes the insert always return a row,
            // existing or fresh.
            let (tag_id,): (Uuid,) = sqlx::query_as(
                r#"
                INSERT INTO tags (name)
                VALUES ($1)
                ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                RETURNING id
                "#,
            )
            .bind(name.as_str())
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO question_tags (question_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(question.id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(question)
    }

    /// Finds a question by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, title, text, author_id, rating, created_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(question)
    }

    /// Lists all questions newest-first
    pub async fn list_newest(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, title, text, author_id, rating, created_at
            FROM questions
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(questions)
    }

    /// Lists all questions by cached rating, best-first
    pub async fn list_best(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, title, text, author_id, rating, created_at
            FROM questions
            ORDER BY rating DESC, id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(questions)
    }

    /// Lists questions carrying the named tag, newest-first
    pub async fn list_by_tag(pool: &PgPool, tag_name: &str) -> Result<Vec<Self>, sqlx::Error> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT q.id, q.title, q.text, q.author_id, q.rating, q.created_at
            FROM questions q
            JOIN question_tags qt ON qt.question_id = q.id
            JOIN tags t ON t.id = qt.tag_id
            WHERE t.name = $1
            ORDER BY q.created_at DESC, q.id DESC
            "#,
        )
        .bind(tag_name)
        .fetch_all(pool)
        .await?;

        Ok(questions)
    }

    /// Answer counts for a whole page of questions in one query
    ///
    /// Questions with no answers are absent from the map; callers treat
    /// a missing key as zero. One `GROUP BY` serves the entire page, so
    /// listings never issue a count query per question.
    pub async fn answer_counts(
        pool: &PgPool,
        question_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, i64>, sqlx::Error> {
        if question_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT question_id, COUNT(*)
            FROM answers
            WHERE question_id = ANY($1)
            GROUP BY question_id
            "#,
        )
        .bind(question_ids)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Tag names for a whole page of questions in one query
    pub async fn tag_names(
        pool: &PgPool,
        question_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<String>>, sqlx::Error> {
        if question_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT qt.question_id, t.name
            FROM question_tags qt
            JOIN tags t ON t.id = qt.tag_id
            WHERE qt.question_id = ANY($1)
            ORDER BY t.name ASC
            "#,
        )
        .bind(question_ids)
        .fetch_all(pool)
        .await?;

        let mut map: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (question_id, name) in rows {
            map.entry(question_id).or_default().push(name);
        }

        Ok(map)
    }

    /// Counts all questions
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Deletes a question
    ///
    /// Cascades to its answers, votes, and tag attachments.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
