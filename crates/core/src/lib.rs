//! Core types for recipe-cache
//!
//! Domain types and constants shared across all other crates.

mod constants;
mod env_config;
mod recipe;

pub use constants::*;
pub use env_config::*;
pub use recipe::*;
