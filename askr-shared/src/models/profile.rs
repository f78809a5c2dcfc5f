/// Profile model and database operations
///
/// A profile is the author-facing identity wrapping a user account.
/// Exactly one profile exists per user, and all questions, answers, and
/// votes reference a profile rather than the underlying user.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE profiles (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
///     avatar_url VARCHAR(512),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Profile model representing an author identity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    /// Unique profile ID (UUID v4)
    pub id: Uuid,

    /// The user this profile belongs to (1:1)
    pub user_id: Uuid,

    /// Optional avatar image URL
    pub avatar_url: Option<String>,

    /// When the profile was created
    pub created_at: DateTime<Utc>,
}

/// A profile ranked by contribution volume
///
/// `total_posts` is the number of authored questions plus the number of
/// authored answers. The two counts are computed independently; joining
/// both relations into one aggregate would multiply them together and
/// inflate the score whenever a profile has both.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RankedProfile {
    /// Profile ID
    pub id: Uuid,

    /// Username of the owning user
    pub username: String,

    /// Number of questions authored by this profile
    pub question_count: i64,

    /// Number of answers authored by this profile
    pub answer_count: i64,

    /// question_count + answer_count
    pub total_posts: i64,
}

impl Profile {
    /// Creates a profile for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or already has a
    /// profile (unique constraint on `user_id`)
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        avatar_url: Option<String>,
    ) -> Result<Self, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, avatar_url)
            VALUES ($1, $2)
            RETURNING id, user_id, avatar_url, created_at
            "#,
        )
        .bind(user_id)
        .bind(avatar_url)
        .fetch_one(pool)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, avatar_url, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Finds the profile belonging to a user
    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, avatar_url, created_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Updates the avatar URL (None clears it)
    pub async fn set_avatar(
        pool: &PgPool,
        id: Uuid,
        avatar_url: Option<String>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET avatar_url = $2
            WHERE id = $1
            RETURNING id, user_id, avatar_url, created_at
            "#,
        )
        .bind(id)
        .bind(avatar_url)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Lists the top contributors by (questions + answers) authored
    ///
    /// The two counts are taken from independent scalar subqueries and
    /// summed. Ties break by username ascending, then id, so the ranking
    /// is stable.
    pub async fn top(pool: &PgPool, limit: i64) -> Result<Vec<RankedProfile>, sqlx::Error> {
        let profiles = sqlx::query_as::<_, RankedProfile>(
            r#"
            SELECT p.id,
                   u.username,
                   (SELECT COUNT(*) FROM questions q WHERE q.author_id = p.id) AS question_count,
                   (SELECT COUNT(*) FROM answers a WHERE a.author_id = p.id) AS answer_count,
                   (SELECT COUNT(*) FROM questions q WHERE q.author_id = p.id)
                 + (SELECT COUNT(*) FROM answers a WHERE a.author_id = p.id) AS total_posts
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            ORDER BY total_posts DESC, u.username ASC, p.id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(profiles)
    }

    /// Fetches the ranked view of a single profile (counts included)
    pub async fn ranked(pool: &PgPool, id: Uuid) -> Result<Option<RankedProfile>, sqlx::Error> {
        let profile = sqlx::query_as::<_, RankedProfile>(
            r#"
            SELECT p.id,
                   u.username,
                   (SELECT COUNT(*) FROM questions q WHERE q.author_id = p.id) AS question_count,
                   (SELECT COUNT(*) FROM answers a WHERE a.author_id = p.id) AS answer_count,
                   (SELECT COUNT(*) FROM questions q WHERE q.author_id = p.id)
                 + (SELECT COUNT(*) FROM answers a WHERE a.author_id = p.id) AS total_posts
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}
