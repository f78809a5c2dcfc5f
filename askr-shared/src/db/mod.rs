/// Database access layer
///
/// - `pool`: PostgreSQL connection pool creation and health checks
/// - `migrations`: Migration runner built on sqlx's migration system

pub mod migrations;
pub mod pool;
