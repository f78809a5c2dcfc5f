/// Tag model and database operations
///
/// Tags label questions with topics. Names are unique and compared
/// case-sensitively as stored. Tags are created on demand when a question
/// is posted; deleting a tag only detaches it from questions (the join
/// rows cascade, the questions stay).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tags (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(50) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE question_tags (
///     question_id UUID NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
///     tag_id UUID NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
///     PRIMARY KEY (question_id, tag_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Tag model representing a topic label
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// Unique tag ID (UUID v4)
    pub id: Uuid,

    /// Tag name, unique, case-sensitive as stored
    pub name: String,

    /// When the tag was created
    pub created_at: DateTime<Utc>,
}

/// A tag ranked by how many questions reference it
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PopularTag {
    /// Tag ID
    pub id: Uuid,

    /// Tag name
    pub name: String,

    /// Number of distinct questions carrying this tag
    pub question_count: i64,
}

impl Tag {
    /// Finds a tag by name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, name, created_at
            FROM tags
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(tag)
    }

    /// Gets a tag by name, creating it if absent
    ///
    /// Concurrent callers racing on the same new name are resolved by the
    /// unique constraint: the losing insert falls through to the existing
    /// row via `ON CONFLICT DO NOTHING` plus a re-select.
    pub async fn get_or_create(pool: &PgPool, name: &str) -> Result<Self, sqlx::Error> {
        let inserted = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        if let Some(tag) = inserted {
            return Ok(tag);
        }

        // Row already existed
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, name, created_at
            FROM tags
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(tag)
    }

    /// Lists the most popular tags by distinct referencing question count
    ///
    /// Popularity is purely how many questions carry the tag; votes on
    /// those questions do not factor in. Ties break by name ascending.
    pub async fn popular(pool: &PgPool, limit: i64) -> Result<Vec<PopularTag>, sqlx::Error> {
        let tags = sqlx::query_as::<_, PopularTag>(
            r#"
            SELECT t.id,
                   t.name,
                   COUNT(DISTINCT qt.question_id) AS question_count
            FROM tags t
            LEFT JOIN question_tags qt ON qt.tag_id = t.id
            GROUP BY t.id, t.name
            ORDER BY question_count DESC, t.name ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }

    /// Deletes a tag, detaching it from all questions
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
