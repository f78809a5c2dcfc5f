/// Database models for Askr
///
/// This module contains all database models and their CRUD and query
/// operations.
///
/// # Models
///
/// - `user`: User accounts (identity only; authentication is out of scope)
/// - `profile`: Author-facing identity, 1:1 with a user
/// - `tag`: Topic labels, many-to-many with questions
/// - `question`: Questions with a cached vote rating
/// - `answer`: Answers to questions with a cached vote rating
/// - `vote`: Vote rows for questions and answers
///
/// # Example
///
/// ```no_run
/// use askr_shared::models::user::{User, CreateUser};
/// use askr_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     username: "ziontab".to_string(),
///     email: "ziontab@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod answer;
pub mod profile;
pub mod question;
pub mod tag;
pub mod user;
pub mod vote;
