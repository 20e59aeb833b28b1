// src/types/job.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AnyRecord;
use crate::error::{DashboardError, DashboardResult};
use crate::lfd::{
    parse_action, parse_status, PanelAction, Record, RecordId, RecordKind, RecordStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    Closed,
}

impl RecordStatus for JobStatus {
    fn all() -> &'static [Self] {
        &[Self::Open, Self::Closed]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Closed => "closed",
        })
    }
}

impl FromStr for JobStatus {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(RecordKind::Job, s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobAction {
    Close,
}

impl PanelAction for JobAction {
    type Status = JobStatus;

    fn label(&self) -> &'static str {
        match self {
            Self::Close => "Close Job Posting",
        }
    }

    fn target_status(&self) -> Option<JobStatus> {
        match self {
            Self::Close => Some(JobStatus::Closed),
        }
    }

    fn closes_panel(&self) -> bool {
        true
    }
}

impl fmt::Display for JobAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Close => f.write_str("close"),
        }
    }
}

impl FromStr for JobAction {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_action(&[Self::Close], RecordKind::Job, s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationWindow {
    pub opens_at: NaiveDateTime,
    pub closes_at: NaiveDateTime,
}

impl ApplicationWindow {
    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        self.opens_at <= at && at <= self.closes_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: RecordId,
    pub title: String,
    /// Department code from the posting form (`engineering`, `other`, ...).
    pub department: String,
    /// Free-text department, used when `department` is `other`.
    #[serde(default)]
    pub custom_department: Option<String>,
    pub location: String,
    pub applications: u32,
    pub status: JobStatus,
    pub created_at: NaiveDate,
    pub positions: u32,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub window: Option<ApplicationWindow>,
}

impl Job {
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }

    /// Human department name, e.g. "Human Resources" for `hr`.
    pub fn department_label(&self) -> String {
        super::department_display(&self.department, self.custom_department.as_deref()).to_string()
    }

    /// "Engineering • San Francisco, CA"
    pub fn subtitle(&self) -> String {
        format!("{} • {}", self.department_label(), self.location)
    }
}

impl Record for Job {
    type Status = JobStatus;
    type Action = JobAction;

    const KIND: RecordKind = RecordKind::Job;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> JobStatus {
        self.status
    }

    fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            super::department_display(&self.department, self.custom_department.as_deref()),
            self.location.as_str(),
        ]
    }

    fn with_status(&self, status: JobStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    fn can_transition(from: JobStatus, to: JobStatus) -> bool {
        matches!((from, to), (JobStatus::Open, JobStatus::Closed))
    }

    fn available_actions(status: JobStatus) -> &'static [JobAction] {
        match status {
            JobStatus::Open => &[JobAction::Close],
            JobStatus::Closed => &[],
        }
    }

    fn columns() -> &'static [&'static str] {
        &[
            "Job Title",
            "Department",
            "Location",
            "Applications",
            "Positions",
            "Status",
            "Posted",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.department_label(),
            self.location.clone(),
            self.applications.to_string(),
            self.positions.to_string(),
            self.status.label().to_string(),
            self.created_at.to_string(),
        ]
    }

    fn empty_message() -> &'static str {
        "No job postings match your search."
    }

    fn into_any(self) -> AnyRecord {
        AnyRecord::Job(self)
    }

    fn try_from_any(any: AnyRecord) -> DashboardResult<Self> {
        match any {
            AnyRecord::Job(j) => Ok(j),
            other => Err(other.kind_mismatch(Self::KIND)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures;

    #[test]
    fn test_open_to_closed_only() {
        assert!(Job::can_transition(JobStatus::Open, JobStatus::Closed));
        assert!(!Job::can_transition(JobStatus::Closed, JobStatus::Open));
    }

    #[test]
    fn test_subtitle_uses_department_label() {
        let jobs = fixtures::jobs();
        assert_eq!(jobs[0].subtitle(), "Engineering • San Francisco, CA");
    }

    #[test]
    fn test_custom_department_is_searchable() {
        let mut job = fixtures::jobs().remove(2);
        job.department = "other".to_string();
        job.custom_department = Some("Research Lab".to_string());
        assert!(job.searchable_fields().contains(&"Research Lab"));
        assert_eq!(job.department_label(), "Research Lab");
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let job = fixtures::jobs().remove(0);
        let window = job.window.unwrap();
        assert!(window.is_open_at(window.opens_at));
        assert!(window.is_open_at(window.closes_at));
        assert!(!window.is_open_at(window.closes_at + chrono::Duration::minutes(1)));
    }
}
