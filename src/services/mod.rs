//! Service layer: trait interfaces for the roster and identity collaborators
//! plus their Postgres-backed implementations.

pub mod identity;
pub mod models;
pub mod roster;

use thiserror::Error;

/// Errors surfaced by the roster/identity collaborators.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
}
