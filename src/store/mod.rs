//! Remote data store access
//!
//! The store is a PostgREST-style HTTP service holding form definitions,
//! field definitions, submissions and site settings.

mod client;
mod error;
mod traits;

pub use client::RestStore;
pub use error::StoreError;
pub use traits::FormStore;

#[cfg(test)]
pub use traits::MockFormStore;
