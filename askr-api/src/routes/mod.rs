/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `questions`: Question listings, detail, and creation
/// - `answers`: Answer creation and acceptance
/// - `votes`: Vote casting and retraction
/// - `tags`: Tag popularity and tag-filtered listings
/// - `profiles`: Contributor rankings and profile detail

pub mod answers;
pub mod health;
pub mod profiles;
pub mod questions;
pub mod tags;
pub mod votes;
