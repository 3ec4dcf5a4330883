//! Service layer for recipe-cache
//!
//! Reconciles the local store with the upstream provider. Handlers and CLI
//! commands talk to `RecipeService`; nothing above this crate touches storage
//! or the upstream client directly.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

mod error;
mod recipe_service;
mod upsert;

pub use error::ServiceError;
pub use recipe_service::RecipeService;
