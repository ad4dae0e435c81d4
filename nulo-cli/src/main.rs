use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nulo_entity::{user, User};
use nulo_types::HealthResponse;
use sea_orm::{Database, EntityTrait, QueryOrder};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "nulo")]
#[command(about = "Operator tools for the Nulo Africa rental API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered users straight from the database
    Users {
        #[arg(long, env = "DATABASE_URL", default_value = "sqlite://nulo.db?mode=rwc")]
        database_url: String,
    },
    /// Check that a running server is healthy
    Health {
        /// Backend server URL
        #[arg(long, default_value = "http://localhost:8000")]
        server: String,

        /// Timeout for the request in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Output format (json or text)
        #[arg(long, default_value = "text")]
        output: OutputFormat,
    },
}

#[derive(Clone, Debug, PartialEq)]
enum OutputFormat {
    Json,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Users { database_url } => list_users(&database_url).await?,
        Commands::Health {
            server,
            timeout,
            output,
        } => check_health(&server, timeout, output).await?,
    }

    Ok(())
}

async fn list_users(database_url: &str) -> Result<()> {
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", database_url))?;

    let users = User::find()
        .order_by_asc(user::Column::CreatedAt)
        .all(&db)
        .await
        .context("Failed to load users")?;

    if users.is_empty() {
        println!("No users yet. Register one with POST /api/v1/auth/register");
        return Ok(());
    }

    println!("👥 {} registered users", users.len());
    for user in users {
        println!(
            "{:<40} {:<9} {} {}",
            user.email,
            user.user_type,
            user.created_at.format("%Y-%m-%d %H:%M"),
            user.id
        );
    }

    Ok(())
}

async fn check_health(server: &str, timeout: u64, output: OutputFormat) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .build()
        .context("Failed to create HTTP client")?;

    let url = format!("{}/health", server.trim_end_matches('/'));
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(anyhow::anyhow!(
            "Health check failed with status {}: {}",
            status,
            error_text
        ));
    }

    let health: HealthResponse = response
        .json()
        .await
        .context("Failed to parse health response")?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&health)?),
        OutputFormat::Text => {
            println!("✅ {} is {}", server, health.status);
            println!("🌍 Environment: {}", health.environment);
            println!("🏷️  Version: {}", health.version);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_parses_health_flags() {
        let cli = Cli::parse_from(["nulo", "health", "--server", "http://api:8000", "--output", "json"]);
        match cli.command {
            Commands::Health { server, output, .. } => {
                assert_eq!(server, "http://api:8000");
                assert_eq!(output, OutputFormat::Json);
            }
            _ => panic!("expected health command"),
        }
    }
}
