// src/core/service_client.rs
//! HTTP record collaborator. Used when `api_base_url` is configured; JSON everywhere.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

use super::record_api::RecordApi;
use crate::app_log;
use crate::error::{DashboardError, DashboardResult};
use crate::lfd::{RecordId, RecordKind};
use crate::profile::AccountProfile;
use crate::types::{AnyRecord, Job};

const RECORDS_ENDPOINT: &str = "/records";
const JOBS_ENDPOINT: &str = "/jobs";
const ACCOUNT_ENDPOINT: &str = "/account";
const PLAN_ENDPOINT: &str = "/account/plan";

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Sends `request`. A 404 becomes `missing()`, any other failure is transient.
    async fn send<R>(
        &self,
        request: RequestBuilder,
        url: &str,
        missing: impl FnOnce() -> DashboardError,
    ) -> DashboardResult<R>
    where
        R: DeserializeOwned,
    {
        app_log!(trace, "Calling record service: {}", url);

        let response = request.send().await.map_err(|e| {
            app_log!(warn, "Record service unreachable at {}: {}", url, e);
            DashboardError::TransientIo(format!("request to {} failed: {}", url, e))
        })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<R>().await.map_err(|e| {
                DashboardError::TransientIo(format!("invalid response from {}: {}", url, e))
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(missing());
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        app_log!(error, "Record service error {} from {}: {}", status, url, error_text);
        Err(DashboardError::TransientIo(format!(
            "HTTP {} error: {}",
            status, error_text
        )))
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        missing: impl FnOnce() -> DashboardError,
    ) -> DashboardResult<R> {
        let url = self.url(endpoint);
        self.send(self.client.get(&url), &url, missing).await
    }

    pub async fn post_json<T, R>(
        &self,
        endpoint: &str,
        payload: &T,
        missing: impl FnOnce() -> DashboardError,
    ) -> DashboardResult<R>
    where
        T: serde::Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        self.send(self.client.post(&url).json(payload), &url, missing)
            .await
    }

    pub async fn put_json<T, R>(
        &self,
        endpoint: &str,
        payload: &T,
        missing: impl FnOnce() -> DashboardError,
    ) -> DashboardResult<R>
    where
        T: serde::Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        self.send(self.client.put(&url).json(payload), &url, missing)
            .await
    }
}

pub struct HttpRecordApi {
    client: ServiceClient,
}

impl HttpRecordApi {
    pub fn new(base_url: &str, timeout_seconds: u64) -> anyhow::Result<Self> {
        Ok(Self {
            client: ServiceClient::new(base_url, timeout_seconds)?,
        })
    }

    fn records_endpoint(kind: RecordKind, scope: Option<&RecordId>) -> String {
        match scope {
            Some(scope) => format!("{}/{}?scope={}", RECORDS_ENDPOINT, kind.plural(), scope),
            None => format!("{}/{}", RECORDS_ENDPOINT, kind.plural()),
        }
    }
}

#[rocket::async_trait]
impl RecordApi for HttpRecordApi {
    async fn list_records(
        &self,
        kind: RecordKind,
        scope: Option<&RecordId>,
    ) -> DashboardResult<Vec<AnyRecord>> {
        let endpoint = Self::records_endpoint(kind, scope);
        self.client
            .get(&endpoint, || match scope {
                Some(job_id) => DashboardError::not_found(RecordKind::Job, job_id),
                None => DashboardError::TransientIo(format!("{} listing unavailable", kind)),
            })
            .await
    }

    async fn update_record_status(
        &self,
        kind: RecordKind,
        id: &RecordId,
        status: &str,
    ) -> DashboardResult<AnyRecord> {
        let endpoint = format!("{}/{}/{}/status", RECORDS_ENDPOINT, kind.plural(), id);
        self.client
            .put_json(&endpoint, &json!({ "status": status }), || {
                DashboardError::not_found(kind, id)
            })
            .await
    }

    async fn create_job(&self, job: Job) -> DashboardResult<Job> {
        self.client
            .post_json(JOBS_ENDPOINT, &job, || {
                DashboardError::TransientIo("job service unavailable".to_string())
            })
            .await
    }

    async fn update_job(&self, job: Job) -> DashboardResult<Job> {
        let endpoint = format!("{}/{}", JOBS_ENDPOINT, job.id);
        self.client
            .put_json(&endpoint, &job, || {
                DashboardError::not_found(RecordKind::Job, &job.id)
            })
            .await
    }

    async fn save_account(&self, profile: AccountProfile) -> DashboardResult<AccountProfile> {
        self.client
            .put_json(ACCOUNT_ENDPOINT, &profile, || {
                DashboardError::TransientIo("account service unavailable".to_string())
            })
            .await
    }

    async fn change_plan(&self, plan_id: &str) -> DashboardResult<()> {
        let _: serde_json::Value = self
            .client
            .post_json(PLAN_ENDPOINT, &json!({ "plan_id": plan_id }), || {
                DashboardError::UnknownPlan(plan_id.to_string())
            })
            .await?;
        Ok(())
    }
}
