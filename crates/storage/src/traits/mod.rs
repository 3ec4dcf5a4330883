//! Storage backend trait abstraction
//!
//! Async domain traits for storage operations, implemented by the SQLite
//! `Storage`, the PostgreSQL `PgStorage`, and the dispatching `StorageBackend`.

pub mod recipe;
pub mod similarity;
pub mod stats;

pub use recipe::RecipeStore;
pub use similarity::SimilarityStore;
pub use stats::StatsStore;
