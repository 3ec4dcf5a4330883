use anyhow::Result;
use clap::{Parser, Subcommand};
use recipe_cache_core::{
    DEFAULT_RESULT_COUNT, DEFAULT_SQLITE_POOL_SIZE, DEFAULT_UPSTREAM_BASE_URL,
    DEFAULT_UPSTREAM_MAX_RETRIES, DEFAULT_UPSTREAM_TIMEOUT_SECS, MAX_RESULT_COUNT,
    env_first_non_empty, env_list_with_default, env_parse_with_default,
};
use recipe_cache_storage::StorageBackend;
use recipe_cache_upstream::UpstreamConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod commands;

const API_KEY_VARS: [&str; 2] = ["RECIPE_CACHE_API_KEY", "SPOONACULAR_API_KEY"];
const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

#[derive(Parser)]
#[command(name = "recipe-cache")]
#[command(about = "Caching proxy for the Spoonacular recipe API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Search recipes by title, caching upstream results
    Search {
        title: String,
        #[arg(short, long, default_value_t = DEFAULT_RESULT_COUNT, value_parser = parse_number)]
        number: usize,
    },
    /// Find recipes similar to the first match for a title
    Similar {
        title: String,
        #[arg(short, long, default_value_t = DEFAULT_RESULT_COUNT, value_parser = parse_number)]
        number: usize,
    },
    /// Search recipes by comma-separated ingredients (not cached)
    Ingredients {
        ingredients: String,
        #[arg(short, long, default_value_t = DEFAULT_RESULT_COUNT, value_parser = parse_number)]
        number: usize,
    },
    /// Show storage statistics
    Stats,
    /// Copy the local SQLite cache into PostgreSQL (DATABASE_URL)
    #[cfg(feature = "postgres")]
    Migrate,
}

/// `number` must be at least 1; larger values are capped.
fn parse_number(raw: &str) -> Result<usize, String> {
    let n: usize = raw.trim().parse().map_err(|e| format!("invalid number '{raw}': {e}"))?;
    if n == 0 {
        return Err("number must be at least 1".to_owned());
    }
    Ok(n.min(MAX_RESULT_COUNT))
}

pub(crate) fn get_db_path() -> PathBuf {
    env_first_non_empty(&["RECIPE_CACHE_DB_PATH"]).map_or_else(
        || {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("recipe-cache")
                .join("recipes.db")
        },
        PathBuf::from,
    )
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub(crate) fn open_sqlite() -> Result<StorageBackend> {
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    let pool_size = env_parse_with_default("RECIPE_CACHE_DB_POOL_SIZE", DEFAULT_SQLITE_POOL_SIZE);
    tracing::debug!(path = %db_path.display(), pool_size, "opening SQLite storage");
    Ok(StorageBackend::new_sqlite(&db_path, pool_size)?)
}

/// PostgreSQL when built with the `postgres` feature and `DATABASE_URL` is
/// set, the local SQLite file otherwise.
pub(crate) async fn open_storage() -> Result<StorageBackend> {
    #[cfg(feature = "postgres")]
    if let Some(url) = env_first_non_empty(&["DATABASE_URL"]) {
        tracing::debug!("opening PostgreSQL storage");
        return Ok(StorageBackend::new_postgres(&url).await?);
    }
    open_sqlite()
}

pub(crate) fn upstream_config() -> Result<UpstreamConfig> {
    let api_key = env_first_non_empty(&API_KEY_VARS).ok_or_else(|| {
        anyhow::anyhow!("{} or {} environment variable must be set", API_KEY_VARS[0], API_KEY_VARS[1])
    })?;
    let base_url = env_first_non_empty(&["RECIPE_CACHE_API_URL"])
        .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_owned());
    let timeout_secs =
        env_parse_with_default("RECIPE_CACHE_UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS);
    let max_retries =
        env_parse_with_default("RECIPE_CACHE_UPSTREAM_MAX_RETRIES", DEFAULT_UPSTREAM_MAX_RETRIES);
    Ok(UpstreamConfig::new(api_key)
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(timeout_secs))
        .with_max_retries(max_retries))
}

pub(crate) fn cors_origins() -> Vec<String> {
    env_list_with_default("RECIPE_CACHE_CORS_ORIGINS", &DEFAULT_CORS_ORIGINS)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Search { title, number } => commands::query::run_search(&title, number).await,
        Commands::Similar { title, number } => commands::query::run_similar(&title, number).await,
        Commands::Ingredients { ingredients, number } => {
            commands::query::run_ingredients(&ingredients, number).await
        },
        Commands::Stats => commands::query::run_stats().await,
        #[cfg(feature = "postgres")]
        Commands::Migrate => commands::migrate::run().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_rejects_zero_and_caps() {
        assert!(parse_number("0").is_err());
        assert!(parse_number("abc").is_err());
        assert_eq!(parse_number("7"), Ok(7));
        assert_eq!(parse_number("5000"), Ok(MAX_RESULT_COUNT));
    }
}
