//! Trait abstraction for the data store to enable mocking in tests

use super::StoreError;
use crate::state::{FieldDefinition, FormDefinition, SiteSetting, Submission};
use async_trait::async_trait;
use uuid::Uuid;

/// Logical store operations used by the registration modal and the shell
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Read one form by identifier
    async fn fetch_form(&self, form_id: Uuid) -> Result<FormDefinition, StoreError>;

    /// Read all fields for a form, ordered by sort position
    async fn fetch_fields(&self, form_id: Uuid) -> Result<Vec<FieldDefinition>, StoreError>;

    /// Insert one submission record
    async fn insert_submission(&self, submission: Submission) -> Result<(), StoreError>;

    /// Read every site setting row
    async fn fetch_settings(&self) -> Result<Vec<SiteSetting>, StoreError>;
}
