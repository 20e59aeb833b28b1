// src/core/record_api.rs
//! The record collaborator: where lists are loaded from and where mutations are sent.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::app_log;
use crate::error::{DashboardError, DashboardResult};
use crate::lfd::{Record, RecordId, RecordKind};
use crate::profile::AccountProfile;
use crate::types::{AnyRecord, Job, SeedData};

#[rocket::async_trait]
pub trait RecordApi: Send + Sync {
    /// Records of one kind. Applications are scoped to a job id.
    async fn list_records(
        &self,
        kind: RecordKind,
        scope: Option<&RecordId>,
    ) -> DashboardResult<Vec<AnyRecord>>;

    async fn update_record_status(
        &self,
        kind: RecordKind,
        id: &RecordId,
        status: &str,
    ) -> DashboardResult<AnyRecord>;

    async fn create_job(&self, job: Job) -> DashboardResult<Job>;

    async fn update_job(&self, job: Job) -> DashboardResult<Job>;

    async fn save_account(&self, profile: AccountProfile) -> DashboardResult<AccountProfile>;

    async fn change_plan(&self, plan_id: &str) -> DashboardResult<()>;
}

/// In-memory collaborator over seed data, with a fixed artificial latency and
/// optional injected failures for exercising error paths.
pub struct MockRecordApi {
    data: Mutex<SeedData>,
    latency: Duration,
    failures: Mutex<VecDeque<DashboardError>>,
}

impl MockRecordApi {
    pub fn new(seed: SeedData, latency: Duration) -> Self {
        Self {
            data: Mutex::new(seed),
            latency,
            failures: Mutex::new(VecDeque::new()),
        }
    }

    pub fn builtin() -> Self {
        Self::new(SeedData::builtin(), Duration::ZERO)
    }

    /// The next call fails with `error` instead of touching data.
    pub async fn fail_next(&self, error: DashboardError) {
        self.failures.lock().await.push_back(error);
    }

    /// Drops a record behind the dashboard's back, as another user would.
    pub async fn remove(&self, kind: RecordKind, id: &RecordId) {
        let mut data = self.data.lock().await;
        match kind {
            RecordKind::Application => data.applications.retain(|r| r.id() != id),
            RecordKind::Candidate => data.candidates.retain(|r| r.id() != id),
            RecordKind::Job => data.jobs.retain(|r| r.id() != id),
        }
    }

    async fn round_trip(&self) -> DashboardResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match self.failures.lock().await.pop_front() {
            Some(error) => {
                app_log!(debug, "Injected record API failure: {}", error);
                Err(error)
            }
            None => Ok(()),
        }
    }
}

fn set_status<R: Record>(
    records: &mut [R],
    id: &RecordId,
    status: &str,
) -> DashboardResult<AnyRecord> {
    let status: R::Status = status.parse()?;
    let record = records
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| DashboardError::not_found(R::KIND, id))?;
    *record = record.with_status(status);
    Ok(record.clone().into_any())
}

fn wrap<R: Record>(records: &[R]) -> Vec<AnyRecord> {
    records.iter().cloned().map(Record::into_any).collect()
}

#[rocket::async_trait]
impl RecordApi for MockRecordApi {
    async fn list_records(
        &self,
        kind: RecordKind,
        scope: Option<&RecordId>,
    ) -> DashboardResult<Vec<AnyRecord>> {
        self.round_trip().await?;
        let data = self.data.lock().await;

        let records = match (kind, scope) {
            (RecordKind::Application, Some(job_id)) => {
                if !data.jobs.iter().any(|j| &j.id == job_id) {
                    return Err(DashboardError::not_found(RecordKind::Job, job_id));
                }
                data.applications
                    .iter()
                    .filter(|a| &a.job_id == job_id)
                    .cloned()
                    .map(Record::into_any)
                    .collect()
            }
            (RecordKind::Application, None) => wrap(&data.applications),
            (RecordKind::Candidate, _) => wrap(&data.candidates),
            (RecordKind::Job, _) => wrap(&data.jobs),
        };

        app_log!(debug, "Listed {} {}", records.len(), kind.plural());
        Ok(records)
    }

    async fn update_record_status(
        &self,
        kind: RecordKind,
        id: &RecordId,
        status: &str,
    ) -> DashboardResult<AnyRecord> {
        self.round_trip().await?;
        let mut data = self.data.lock().await;

        match kind {
            RecordKind::Application => set_status(&mut data.applications, id, status),
            RecordKind::Candidate => set_status(&mut data.candidates, id, status),
            RecordKind::Job => set_status(&mut data.jobs, id, status),
        }
    }

    async fn create_job(&self, job: Job) -> DashboardResult<Job> {
        self.round_trip().await?;
        let mut data = self.data.lock().await;

        if data.jobs.iter().any(|j| j.id == job.id) {
            return Err(DashboardError::invalid(
                "id",
                format!("job '{}' already exists", job.id),
            ));
        }
        data.jobs.push(job.clone());
        Ok(job)
    }

    async fn update_job(&self, job: Job) -> DashboardResult<Job> {
        self.round_trip().await?;
        let mut data = self.data.lock().await;

        let existing = data
            .jobs
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or_else(|| DashboardError::not_found(RecordKind::Job, &job.id))?;
        *existing = job.clone();
        Ok(job)
    }

    async fn save_account(&self, profile: AccountProfile) -> DashboardResult<AccountProfile> {
        self.round_trip().await?;
        Ok(profile)
    }

    async fn change_plan(&self, _plan_id: &str) -> DashboardResult<()> {
        self.round_trip().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Application, ApplicationStatus};

    #[tokio::test]
    async fn test_list_applications_scoped_to_job() {
        let api = MockRecordApi::builtin();
        let records = api
            .list_records(RecordKind::Application, Some(&RecordId::from("1")))
            .await
            .unwrap();
        assert_eq!(records.len(), 4);

        let none = api
            .list_records(RecordKind::Application, Some(&RecordId::from("3")))
            .await
            .unwrap();
        assert!(none.is_empty());

        let err = api
            .list_records(RecordKind::Application, Some(&RecordId::from("404")))
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { kind: RecordKind::Job, .. }));
    }

    #[tokio::test]
    async fn test_update_status_persists() {
        let api = MockRecordApi::builtin();
        let updated = api
            .update_record_status(RecordKind::Application, &RecordId::from("4"), "qualified")
            .await
            .unwrap();
        let app = Application::try_from_any(updated).unwrap();
        assert_eq!(app.status, ApplicationStatus::Qualified);

        let again = api.list_records(RecordKind::Application, None).await.unwrap();
        let app = Application::try_from_any(again[3].clone()).unwrap();
        assert_eq!(app.status, ApplicationStatus::Qualified);
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let api = MockRecordApi::builtin();
        api.remove(RecordKind::Application, &RecordId::from("4")).await;
        let err = api
            .update_record_status(RecordKind::Application, &RecordId::from("4"), "qualified")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_injected_failure_is_consumed_once() {
        let api = MockRecordApi::builtin();
        api.fail_next(DashboardError::TransientIo("timeout".to_string()))
            .await;

        assert!(api.list_records(RecordKind::Job, None).await.is_err());
        assert_eq!(api.list_records(RecordKind::Job, None).await.unwrap().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let api = MockRecordApi::new(SeedData::builtin(), Duration::from_millis(1000));
        let started = tokio::time::Instant::now();
        api.change_plan("premium").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
