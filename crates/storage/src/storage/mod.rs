//! `SQLite` storage implementation
//!
//! All methods are synchronous; `sqlite_async` exposes them through the
//! async store traits via `spawn_blocking`.

mod recipes;
mod similarity;
mod stats;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use recipe_cache_core::{DEFAULT_SQLITE_POOL_SIZE, Recipe, SimilarityEdge};
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use std::path::Path;
use std::time::Duration;

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

pub(crate) const RECIPE_COLUMNS: &str =
    "id, external_id, title, image, instructions, ingredients, cached, created_at";

pub(crate) const EDGE_COLUMNS: &str =
    "id, recipe_id, similar_external_id, title, image, created_at";

/// Map a row selected with `RECIPE_COLUMNS`
pub(crate) fn map_recipe(row: &rusqlite::Row<'_>) -> rusqlite::Result<Recipe> {
    Ok(Recipe {
        id: row.get(0)?,
        external_id: row.get(1)?,
        title: row.get(2)?,
        image: row.get(3)?,
        instructions: row.get(4)?,
        ingredients: row.get(5)?,
        cached: row.get(6)?,
        created_at: row.get(7)?,
    })
}

/// Map a row selected with `EDGE_COLUMNS`
pub(crate) fn map_edge(row: &rusqlite::Row<'_>) -> rusqlite::Result<SimilarityEdge> {
    Ok(SimilarityEdge {
        id: row.get(0)?,
        owner_recipe_id: row.get(1)?,
        similar_external_id: row.get(2)?,
        title: row.get(3)?,
        image: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Unicode lowercase for title matching; SQLite's built-in `LOWER` only folds ASCII.
fn register_fold_case(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
    )
}

/// Per-connection pragmas: FK enforcement for the edge cascade, WAL for concurrent readers
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    register_fold_case(conn)?;
    conn.busy_timeout(Duration::from_secs(30))?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    let _mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(())
}

impl Storage {
    /// Create new storage instance with the default pool size
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or migrations fail.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        Self::with_pool_size(db_path, DEFAULT_SQLITE_POOL_SIZE)
    }

    /// Create new storage instance with an explicit pool size
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or migrations fail.
    pub fn with_pool_size(db_path: &Path, pool_size: u32) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        let conn = pool.get()?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(
            pool_size,
            path = %db_path.display(),
            "Storage initialized with connection pool"
        );

        Ok(Self { pool })
    }
}
