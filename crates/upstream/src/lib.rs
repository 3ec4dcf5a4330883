//! Upstream recipe provider client
//!
//! `RecipeProvider` is the seam the reconciler talks to; `SpoonacularClient`
//! is the production implementation over reqwest.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod provider;

pub use client::SpoonacularClient;
pub use config::UpstreamConfig;
pub use error::UpstreamError;
pub use provider::RecipeProvider;
