use crate::error::{AppError, Result};
use nulo_auth::ALGORITHM;
use std::env;

/// One year; longer lifetimes overflow token timestamps
const MAX_TOKEN_EXPIRE_MINUTES: i64 = 60 * 24 * 365;

/// One year
const MAX_CLEANUP_INTERVAL_HOURS: u64 = 24 * 365;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret_key: String,
    pub jwt_algorithm: String,
    pub access_token_expire_minutes: i64,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub environment: String,
    pub allowed_origins: String,
    pub cleanup_interval_hours: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://nulo.db?mode=rwc".to_string()),

            jwt_secret_key: env::var("JWT_SECRET_KEY")
                .map_err(|_| AppError::ConfigError("JWT_SECRET_KEY must be set".to_string()))?,

            jwt_algorithm: env::var("JWT_ALGORITHM").unwrap_or_else(|_| ALGORITHM.to_string()),

            access_token_expire_minutes: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| {
                    AppError::ConfigError("Invalid ACCESS_TOKEN_EXPIRE_MINUTES".to_string())
                })?,

            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| AppError::ConfigError("Invalid PORT".to_string()))?,

            debug: parse_bool(&env::var("DEBUG").unwrap_or_else(|_| "true".to_string()))
                .ok_or_else(|| AppError::ConfigError("Invalid DEBUG".to_string()))?,

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            cleanup_interval_hours: env::var("CLEANUP_INTERVAL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .map_err(|_| AppError::ConfigError("Invalid CLEANUP_INTERVAL_HOURS".to_string()))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret_key.is_empty() {
            return Err(AppError::ConfigError(
                "JWT_SECRET_KEY must not be empty".to_string(),
            ));
        }
        if self.jwt_algorithm != ALGORITHM {
            return Err(AppError::ConfigError(format!(
                "Unsupported JWT_ALGORITHM {}, only {} is supported",
                self.jwt_algorithm, ALGORITHM
            )));
        }
        if self.access_token_expire_minutes <= 0 {
            return Err(AppError::ConfigError(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be positive".to_string(),
            ));
        }
        if self.access_token_expire_minutes > MAX_TOKEN_EXPIRE_MINUTES {
            return Err(AppError::ConfigError(format!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be at most {}",
                MAX_TOKEN_EXPIRE_MINUTES
            )));
        }
        if self.cleanup_interval_hours == 0 {
            return Err(AppError::ConfigError(
                "CLEANUP_INTERVAL_HOURS must be positive".to_string(),
            ));
        }
        if self.cleanup_interval_hours > MAX_CLEANUP_INTERVAL_HOURS {
            return Err(AppError::ConfigError(format!(
                "CLEANUP_INTERVAL_HOURS must be at most {}",
                MAX_CLEANUP_INTERVAL_HOURS
            )));
        }
        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Comma-separated `ALLOWED_ORIGINS`, trimmed, empty entries dropped
    pub fn cors_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
