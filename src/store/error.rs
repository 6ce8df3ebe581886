//! Errors raised at the store boundary

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to data store failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("data store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no row in {table} with id {id}")]
    NotFound { table: &'static str, id: Uuid },

    #[error("unexpected response from data store: {0}")]
    Decode(#[from] serde_json::Error),
}
