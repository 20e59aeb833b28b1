// src/types/candidate.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AnyRecord;
use crate::error::{DashboardError, DashboardResult};
use crate::lfd::{parse_status, PanelAction, Record, RecordId, RecordKind, RecordStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Qualified,
    NotQualified,
}

impl RecordStatus for CandidateStatus {
    fn all() -> &'static [Self] {
        &[Self::Qualified, Self::NotQualified]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Qualified => "Qualified",
            Self::NotQualified => "Not Qualified",
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Qualified => "qualified",
            Self::NotQualified => "not_qualified",
        })
    }
}

impl FromStr for CandidateStatus {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(RecordKind::Candidate, s)
    }
}

/// Shortlisted candidates are display-only, so there is nothing to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CandidateAction {}

impl PanelAction for CandidateAction {
    type Status = CandidateStatus;

    fn label(&self) -> &'static str {
        match *self {}
    }

    fn target_status(&self) -> Option<CandidateStatus> {
        match *self {}
    }
}

impl fmt::Display for CandidateAction {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl FromStr for CandidateAction {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Err(DashboardError::invalid(
            "action",
            format!("candidates have no '{}' action", s.trim()),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub job_role: String,
    pub status: CandidateStatus,
    pub added_date: NaiveDate,
}

impl Record for Candidate {
    type Status = CandidateStatus;
    type Action = CandidateAction;

    const KIND: RecordKind = RecordKind::Candidate;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> CandidateStatus {
        self.status
    }

    fn created_at(&self) -> NaiveDate {
        self.added_date
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.job_role.as_str(),
        ]
    }

    fn with_status(&self, status: CandidateStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    fn can_transition(_from: CandidateStatus, _to: CandidateStatus) -> bool {
        false
    }

    fn available_actions(_status: CandidateStatus) -> &'static [CandidateAction] {
        &[]
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Job Role", "AI Decision", "Added Date"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.job_role.clone(),
            self.status.label().to_string(),
            self.added_date.to_string(),
        ]
    }

    fn empty_message() -> &'static str {
        "No candidates match your search."
    }

    fn into_any(self) -> AnyRecord {
        AnyRecord::Candidate(self)
    }

    fn try_from_any(any: AnyRecord) -> DashboardResult<Self> {
        match any {
            AnyRecord::Candidate(c) => Ok(c),
            other => Err(other.kind_mismatch(Self::KIND)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lfd::RecordStore;
    use crate::types::fixtures;

    #[test]
    fn test_candidate_status_is_read_only() {
        let mut store = RecordStore::new(fixtures::candidates());
        let err = store
            .update_status(&RecordId::from("1"), CandidateStatus::NotQualified)
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidTransition { .. }));
    }

    #[test]
    fn test_no_actions_parse() {
        assert!("send_offer".parse::<CandidateAction>().is_err());
    }
}
