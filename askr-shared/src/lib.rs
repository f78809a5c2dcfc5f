//! # Askr Shared Library
//!
//! This crate contains the storage layer and business logic for the Askr
//! question-and-answer site, shared between the API server and tooling.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migration runner
//! - `models`: Database models and query/aggregation operations
//! - `rating`: Vote casting and cached-rating maintenance
//! - `pagination`: Page windowing over ordered result sets

pub mod db;
pub mod models;
pub mod pagination;
pub mod rating;

/// Current version of the Askr shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
