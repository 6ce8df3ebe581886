//! HTTP client for the PostgREST-style data store
//!
//! Every request carries the project's API key both as `apikey` and as a
//! bearer token. Reads select whole rows; the submission insert asks for a
//! minimal response.

use super::{FormStore, StoreError};
use crate::state::{FieldDefinition, FormDefinition, SiteSetting, Submission};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use uuid::Uuid;

const FORMS_TABLE: &str = "forms";
const FIELDS_TABLE: &str = "form_fields";
const SUBMISSIONS_TABLE: &str = "form_submissions";
const SETTINGS_TABLE: &str = "site_settings";

/// Client for the remote data store
#[derive(Debug, Clone)]
pub struct RestStore {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// Create a new store client
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn form_request(&self, form_id: Uuid) -> RequestBuilder {
        self.authorized(self.http.get(self.table_url(FORMS_TABLE)).query(&[
            ("id", format!("eq.{form_id}")),
            ("select", "*".to_string()),
        ]))
    }

    fn fields_request(&self, form_id: Uuid) -> RequestBuilder {
        self.authorized(self.http.get(self.table_url(FIELDS_TABLE)).query(&[
            ("form_id", format!("eq.{form_id}")),
            ("select", "*".to_string()),
            ("order", "sort_order.asc".to_string()),
        ]))
    }

    fn insert_request(&self, submission: &Submission) -> RequestBuilder {
        self.authorized(
            self.http
                .post(self.table_url(SUBMISSIONS_TABLE))
                .header("Prefer", "return=minimal")
                .json(submission),
        )
    }

    fn settings_request(&self) -> RequestBuilder {
        self.authorized(
            self.http
                .get(self.table_url(SETTINGS_TABLE))
                .query(&[("select", "key,value")]),
        )
    }

    /// Send a request and return the body, failing on a non-2xx status
    async fn send(&self, request: RequestBuilder) -> Result<String, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<T>, StoreError> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl FormStore for RestStore {
    async fn fetch_form(&self, form_id: Uuid) -> Result<FormDefinition, StoreError> {
        tracing::debug!(%form_id, "fetching form definition");
        let rows: Vec<FormDefinition> = self.fetch_rows(self.form_request(form_id)).await?;
        rows.into_iter().next().ok_or(StoreError::NotFound {
            table: FORMS_TABLE,
            id: form_id,
        })
    }

    async fn fetch_fields(&self, form_id: Uuid) -> Result<Vec<FieldDefinition>, StoreError> {
        tracing::debug!(%form_id, "fetching form fields");
        let fields: Vec<FieldDefinition> = self.fetch_rows(self.fields_request(form_id)).await?;
        tracing::debug!(%form_id, count = fields.len(), "fetched form fields");
        Ok(fields)
    }

    async fn insert_submission(&self, submission: Submission) -> Result<(), StoreError> {
        tracing::debug!(form_id = %submission.form_id, "inserting submission");
        self.send(self.insert_request(&submission)).await?;
        Ok(())
    }

    async fn fetch_settings(&self) -> Result<Vec<SiteSetting>, StoreError> {
        tracing::debug!("fetching site settings");
        self.fetch_rows(self.settings_request()).await
    }
}
