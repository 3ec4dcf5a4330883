//! Shared constants for recipe-cache.

/// Result count used when the caller does not pass `number`.
pub const DEFAULT_RESULT_COUNT: usize = 5;

/// Upper bound on `number` for any query (upstream quota protection).
pub const MAX_RESULT_COUNT: usize = 100;

/// Default Spoonacular API base URL.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.spoonacular.com";

/// Default per-request upstream timeout in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for transient upstream failures.
pub const DEFAULT_UPSTREAM_MAX_RETRIES: usize = 2;

/// Default size of the SQLite connection pool.
pub const DEFAULT_SQLITE_POOL_SIZE: u32 = 8;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Spoonacular CDN image URL template pieces: `{prefix}{id}-{size}.{type}`.
pub const SPOONACULAR_IMAGE_PREFIX: &str = "https://img.spoonacular.com/recipes/";

/// Image size used when deriving an image URL from `imageType`.
pub const SPOONACULAR_IMAGE_SIZE: &str = "556x370";
