/// Vote row models
///
/// A vote is one profile's +1 or -1 on a question or an answer. The
/// unique constraint on (voter, target) guarantees at most one row per
/// pair; a repeat vote overwrites the existing row. All writes go through
/// the rating engine ([`crate::rating`]), which keeps the target's cached
/// rating equal to the sum of its vote rows. This module only reads.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE question_votes (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     voter_id UUID NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
///     question_id UUID NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
///     value SMALLINT NOT NULL CHECK (value IN (-1, 1)),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (voter_id, question_id)
/// );
/// -- answer_votes is symmetric, keyed on (voter_id, answer_id)
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A vote on a question
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuestionVote {
    /// Unique vote ID
    pub id: Uuid,

    /// Voting profile
    pub voter_id: Uuid,

    /// Target question
    pub question_id: Uuid,

    /// +1 or -1
    pub value: i16,

    /// When the vote row was first created
    pub created_at: DateTime<Utc>,
}

/// A vote on an answer
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnswerVote {
    /// Unique vote ID
    pub id: Uuid,

    /// Voting profile
    pub voter_id: Uuid,

    /// Target answer
    pub answer_id: Uuid,

    /// +1 or -1
    pub value: i16,

    /// When the vote row was first created
    pub created_at: DateTime<Utc>,
}

impl QuestionVote {
    /// Finds the vote a profile cast on a question, if any
    pub async fn find(
        pool: &PgPool,
        voter_id: Uuid,
        question_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let vote = sqlx::query_as::<_, QuestionVote>(
            r#"
            SELECT id, voter_id, question_id, value, created_at
            FROM question_votes
            WHERE voter_id = $1 AND question_id = $2
            "#,
        )
        .bind(voter_id)
        .bind(question_id)
        .fetch_optional(pool)
        .await?;

        Ok(vote)
    }

    /// Counts vote rows on a question
    pub async fn count_for_question(
        pool: &PgPool,
        question_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM question_votes WHERE question_id = $1")
                .bind(question_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}

impl AnswerVote {
    /// Finds the vote a profile cast on an answer, if any
    pub async fn find(
        pool: &PgPool,
        voter_id: Uuid,
        answer_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let vote = sqlx::query_as::<_, AnswerVote>(
            r#"
            SELECT id, voter_id, answer_id, value, created_at
            FROM answer_votes
            WHERE voter_id = $1 AND answer_id = $2
            "#,
        )
        .bind(voter_id)
        .bind(answer_id)
        .fetch_optional(pool)
        .await?;

        Ok(vote)
    }

    /// Counts vote rows on an answer
    pub async fn count_for_answer(pool: &PgPool, answer_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM answer_votes WHERE answer_id = $1")
                .bind(answer_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
