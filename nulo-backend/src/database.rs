use crate::error::{AppError, Result};
use nulo_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;

pub mod application_ops;
pub mod favorite_ops;
pub mod message_ops;
pub mod property_ops;
pub mod tenant_ops;
pub mod token_ops;
pub mod user_ops;

pub async fn setup_database(database_url: &str) -> Result<DatabaseConnection> {
    tracing::info!("🔗 Connecting to database: {}", database_url);

    let db = Database::connect(connect_options(database_url)).await?;

    // Run migrations; already-applied ones are skipped
    tracing::info!("🔄 Running database migrations...");
    Migrator::up(&db, None).await?;
    tracing::info!("✅ Migrations completed successfully");

    Ok(db)
}

fn connect_options(database_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(database_url.to_string());

    if is_in_memory(database_url) {
        // Every pooled connection would open its own empty database
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
    } else {
        opt.max_connections(100)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(8))
            .max_lifetime(Duration::from_secs(8))
            .sqlx_logging(true);
    }

    opt
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite:") && database_url.contains(":memory:")
}

/// Row offset for a 1-based page, capped at what the drivers accept as OFFSET
pub(crate) fn page_offset(page: u64, limit: u64) -> u64 {
    page.saturating_sub(1)
        .saturating_mul(limit)
        .min(i64::MAX as u64)
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// A unique index lost a race the pre-check could not see; report it as the duplicate it is
pub(crate) fn duplicate_as_bad_request(err: DbErr, message: &str) -> AppError {
    if is_unique_violation(&err) {
        AppError::BadRequest(message.to_string())
    } else {
        AppError::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(!is_in_memory("sqlite://nulo.db?mode=rwc"));
        assert!(!is_in_memory("postgres://localhost/nulo"));
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(3, 20), 40);
        assert_eq!(page_offset(0, 20), 0);
        assert_eq!(page_offset(u64::MAX, 100), i64::MAX as u64);
    }

    #[test]
    fn test_only_unique_violations_become_bad_requests() {
        let err = duplicate_as_bad_request(DbErr::Custom("boom".to_string()), "dup");
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}
