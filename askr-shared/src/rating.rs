/// Rating engine: vote casting and cached-rating maintenance
///
/// A question's or answer's stored `rating` is always the sum of its
/// individual vote values. This module is the only writer of vote rows
/// and rating columns, and it keeps that invariant transactionally: the
/// vote upsert and the rating recompute commit as one unit.
///
/// # Concurrency
///
/// Each cast/remove locks the target row (`SELECT ... FOR UPDATE`)
/// before touching the vote table, so concurrent votes on the same
/// target are strictly ordered and the final rating equals the true sum
/// after all of them commit. Votes on different targets take different
/// row locks and do not contend.
///
/// The recompute is a full sum over the target's vote rows rather than a
/// delta against the previous value. That keeps the cached rating a pure
/// function of the vote table: re-derivable after manual data edits and
/// indifferent to whether an upsert inserted or overwrote.
///
/// # Example
///
/// ```no_run
/// use askr_shared::rating::{cast_vote, remove_vote, VoteTarget, VoteValue};
/// use askr_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let voter = Uuid::new_v4();
/// let target = VoteTarget::Question(Uuid::new_v4());
///
/// let rating = cast_vote(&pool, voter, target, VoteValue::Up).await?;
/// let rating = remove_vote(&pool, voter, target).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// A legal vote value: +1 or -1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteValue {
    /// Upvote (+1)
    Up,

    /// Downvote (-1)
    Down,
}

impl VoteValue {
    /// The numeric value stored in the vote row
    pub fn as_i16(self) -> i16 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl TryFrom<i16> for VoteValue {
    type Error = VoteError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(VoteError::InvalidVoteValue(other)),
        }
    }
}

/// The polymorphic subject of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTarget {
    /// A question, by ID
    Question(Uuid),

    /// An answer, by ID
    Answer(Uuid),
}

impl VoteTarget {
    /// The target's row ID
    pub fn id(self) -> Uuid {
        match self {
            VoteTarget::Question(id) | VoteTarget::Answer(id) => id,
        }
    }
}

/// Errors from vote operations
#[derive(Debug, Error)]
pub enum VoteError {
    /// The voting profile does not exist
    #[error("voter profile not found")]
    VoterNotFound,

    /// The question or answer being voted on does not exist
    #[error("vote target not found")]
    TargetNotFound,

    /// Vote value outside {-1, +1}
    #[error("invalid vote value {0}, expected -1 or 1")]
    InvalidVoteValue(i16),

    /// Any other storage failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Casts a vote, inserting or overwriting the voter's row on the target
///
/// Returns the target's new cached rating. Re-casting the same value is
/// a no-op on the rating; casting the opposite value overwrites the row
/// and the rating moves by two.
///
/// # Errors
///
/// - [`VoteError::TargetNotFound`] if the question/answer does not exist
/// - [`VoteError::VoterNotFound`] if the profile does not exist
/// - [`VoteError::Database`] for any other storage failure
pub async fn cast_vote(
    pool: &PgPool,
    voter_id: Uuid,
    target: VoteTarget,
    value: VoteValue,
) -> Result<i32, VoteError> {
    match target {
        VoteTarget::Question(id) => cast_question_vote(pool, voter_id, id, value).await,
        VoteTarget::Answer(id) => cast_answer_vote(pool, voter_id, id, value).await,
    }
}

/// Retracts the voter's vote on the target, if any
///
/// Deleting an absent vote is a no-op. Returns the target's rating after
/// the recompute either way.
///
/// # Errors
///
/// - [`VoteError::TargetNotFound`] if the question/answer does not exist
/// - [`VoteError::Database`] for any other storage failure
pub async fn remove_vote(
    pool: &PgPool,
    voter_id: Uuid,
    target: VoteTarget,
) -> Result<i32, VoteError> {
    match target {
        VoteTarget::Question(id) => remove_question_vote(pool, voter_id, id).await,
        VoteTarget::Answer(id) => remove_answer_vote(pool, voter_id, id).await,
    }
}

async fn cast_question_vote(
    pool: &PgPool,
    voter_id: Uuid,
    question_id: Uuid,
    value: VoteValue,
) -> Result<i32, VoteError> {
    let mut tx = pool.begin().await?;

    // Row lock serializes concurrent votes on this question.
    let target: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM questions WHERE id = $1 FOR UPDATE")
            .bind(question_id)
            .fetch_optional(&mut *tx)
            .await?;

    if target.is_none() {
        return Err(VoteError::TargetNotFound);
    }

    sqlx::query(
        r#"
        INSERT INTO question_votes (voter_id, question_id, value)
        VALUES ($1, $2, $3)
        ON CONFLICT (voter_id, question_id) DO UPDATE SET value = EXCLUDED.value
        "#,
    )
    .bind(voter_id)
    .bind(question_id)
    .bind(value.as_i16())
    .execute(&mut *tx)
    .await
    .map_err(map_voter_fk)?;

    let (rating,): (i32,) = sqlx::query_as(
        r#"
        UPDATE questions
        SET rating = COALESCE(
            (SELECT SUM(value) FROM question_votes WHERE question_id = $1), 0
        )::INTEGER
        WHERE id = $1
        RETURNING rating
        "#,
    )
    .bind(question_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(%voter_id, %question_id, value = value.as_i16(), rating, "Question vote cast");
    Ok(rating)
}

async fn cast_answer_vote(
    pool: &PgPool,
    voter_id: Uuid,
    answer_id: Uuid,
    value: VoteValue,
) -> Result<i32, VoteError> {
    let mut tx = pool.begin().await?;

    let target: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM answers WHERE id = $1 FOR UPDATE")
            .bind(answer_id)
            .fetch_optional(&mut *tx)
            .await?;

    if target.is_none() {
        return Err(VoteError::TargetNotFound);
    }

    sqlx::query(
        r#"
        INSERT INTO answer_votes (voter_id, answer_id, value)
        VALUES ($1, $2, $3)
        ON CONFLICT (voter_id, answer_id) DO UPDATE SET value = EXCLUDED.value
        "#,
    )
    .bind(voter_id)
    .bind(answer_id)
    .bind(value.as_i16())
    .execute(&mut *tx)
    .await
    .map_err(map_voter_fk)?;

    let (rating,): (i32,) = sqlx::query_as(
        r#"
        UPDATE answers
        SET rating = COALESCE(
            (SELECT SUM(value) FROM answer_votes WHERE answer_id = $1), 0
        )::INTEGER
        WHERE id = $1
        RETURNING rating
        "#,
    )
    .bind(answer_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(%voter_id, %answer_id, value = value.as_i16(), rating, "Answer vote cast");
    Ok(rating)
}

async fn remove_question_vote(
    pool: &PgPool,
    voter_id: Uuid,
    question_id: Uuid,
) -> Result<i32, VoteError> {
    let mut tx = pool.begin().await?;

    let target: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM questions WHERE id = $1 FOR UPDATE")
            .bind(question_id)
            .fetch_optional(&mut *tx)
            .await?;

    if target.is_none() {
        return Err(VoteError::TargetNotFound);
    }

    sqlx::query("DELETE FROM question_votes WHERE voter_id = $1 AND question_id = $2")
        .bind(voter_id)
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

    let (rating,): (i32,) = sqlx::query_as(
        r#"
        UPDATE questions
        SET rating = COALESCE(
            (SELECT SUM(value) FROM question_votes WHERE question_id = $1), 0
        )::INTEGER
        WHERE id = $1
        RETURNING rating
        "#,
    )
    .bind(question_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(%voter_id, %question_id, rating, "Question vote removed");
    Ok(rating)
}

async fn remove_answer_vote(
    pool: &PgPool,
    voter_id: Uuid,
    answer_id: Uuid,
) -> Result<i32, VoteError> {
    let mut tx = pool.begin().await?;

    let target: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM answers WHERE id = $1 FOR UPDATE")
            .bind(answer_id)
            .fetch_optional(&mut *tx)
            .await?;

    if target.is_none() {
        return Err(VoteError::TargetNotFound);
    }

    sqlx::query("DELETE FROM answer_votes WHERE voter_id = $1 AND answer_id = $2")
        .bind(voter_id)
        .bind(answer_id)
        .execute(&mut *tx)
        .await?;

    let (rating,): (i32,) = sqlx::query_as(
        r#"
        UPDATE answers
        SET rating = COALESCE(
            (SELECT SUM(value) FROM answer_votes WHERE answer_id = $1), 0
        )::INTEGER
        WHERE id = $1
        RETURNING rating
        "#,
    )
    .bind(answer_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(%voter_id, %answer_id, rating, "Answer vote removed");
    Ok(rating)
}

/// Maps a foreign-key violation on the voter column to `VoterNotFound`
///
/// The target row was already locked and known to exist, so the only
/// foreign key that can fire on the vote insert is the voter's.
fn map_voter_fk(err: sqlx::Error) -> VoteError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(constraint) = db_err.constraint() {
            if constraint.contains("voter_id") {
                return VoteError::VoterNotFound;
            }
        }
    }
    VoteError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_value_as_i16() {
        assert_eq!(VoteValue::Up.as_i16(), 1);
        assert_eq!(VoteValue::Down.as_i16(), -1);
    }

    #[test]
    fn test_vote_value_try_from() {
        assert_eq!(VoteValue::try_from(1).unwrap(), VoteValue::Up);
        assert_eq!(VoteValue::try_from(-1).unwrap(), VoteValue::Down);

        assert!(matches!(
            VoteValue::try_from(0),
            Err(VoteError::InvalidVoteValue(0))
        ));
        assert!(matches!(
            VoteValue::try_from(2),
            Err(VoteError::InvalidVoteValue(2))
        ));
        assert!(matches!(
            VoteValue::try_from(-5),
            Err(VoteError::InvalidVoteValue(-5))
        ));
    }

    #[test]
    fn test_vote_target_id() {
        let id = Uuid::new_v4();
        assert_eq!(VoteTarget::Question(id).id(), id);
        assert_eq!(VoteTarget::Answer(id).id(), id);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            VoteError::InvalidVoteValue(3).to_string(),
            "invalid vote value 3, expected -1 or 1"
        );
        assert_eq!(VoteError::TargetNotFound.to_string(), "vote target not found");
        assert_eq!(VoteError::VoterNotFound.to_string(), "voter profile not found");
    }
}
