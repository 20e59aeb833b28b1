// src/dashboard.rs
use chrono::NaiveDate;
use serde::Serialize;

use crate::lfd::{Record, RecordId, RecordStatus, RecordStore};
use crate::types::{Candidate, CandidateStatus, Job};

pub const RECENT_JOBS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobStats {
    pub active_postings: usize,
    pub total_applications: u32,
    /// Positions still to fill across open postings.
    pub open_positions: u32,
}

impl JobStats {
    pub fn compute(jobs: &RecordStore<Job>) -> Self {
        let jobs = jobs.as_slice();
        Self {
            active_postings: jobs.iter().filter(|j| j.is_open()).count(),
            total_applications: jobs.iter().map(|j| j.applications).sum(),
            open_positions: jobs.iter().filter(|j| j.is_open()).map(|j| j.positions).sum(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentJob {
    pub id: RecordId,
    pub title: String,
    pub applications: u32,
    pub status: &'static str,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub active_jobs: usize,
    pub total_applications: u32,
    pub shortlisted_candidates: usize,
    pub recent_jobs: Vec<RecentJob>,
}

impl DashboardSummary {
    pub fn build(jobs: &RecordStore<Job>, candidates: &RecordStore<Candidate>) -> Self {
        let stats = JobStats::compute(jobs);

        let mut recent: Vec<_> = jobs.all();
        // stable sort keeps store order for jobs posted the same day
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Self {
            active_jobs: stats.active_postings,
            total_applications: stats.total_applications,
            shortlisted_candidates: candidates
                .as_slice()
                .iter()
                .filter(|c| c.status() == CandidateStatus::Qualified)
                .count(),
            recent_jobs: recent
                .into_iter()
                .take(RECENT_JOBS)
                .map(|job| RecentJob {
                    id: job.id.clone(),
                    title: job.title.clone(),
                    applications: job.applications,
                    status: job.status.label(),
                    created_at: job.created_at,
                })
                .collect(),
        }
    }
}
