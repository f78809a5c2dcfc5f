//! # Askr API Server Library
//!
//! This library provides the HTTP surface over the Askr Q&A core:
//! question/answer CRUD, vote casting, and the read-side listings.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
