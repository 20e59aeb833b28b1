// src/types/application.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AnyRecord;
use crate::error::{DashboardError, DashboardResult};
use crate::lfd::{
    parse_action, parse_status, PanelAction, Record, RecordId, RecordKind, RecordStatus,
};

/// AI screening decision on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Qualified,
    NotQualified,
    Pending,
}

impl RecordStatus for ApplicationStatus {
    fn all() -> &'static [Self] {
        &[Self::Qualified, Self::NotQualified, Self::Pending]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Qualified => "Qualified",
            Self::NotQualified => "Not Qualified",
            Self::Pending => "Pending",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Qualified => "qualified",
            Self::NotQualified => "not_qualified",
            Self::Pending => "pending",
        })
    }
}

impl FromStr for ApplicationStatus {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(RecordKind::Application, s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationAction {
    MarkQualified,
    MarkNotQualified,
    ScheduleInterview,
    SendOffer,
    SendRejection,
}

impl ApplicationAction {
    pub const ALL: [Self; 5] = [
        Self::MarkQualified,
        Self::MarkNotQualified,
        Self::ScheduleInterview,
        Self::SendOffer,
        Self::SendRejection,
    ];
}

impl PanelAction for ApplicationAction {
    type Status = ApplicationStatus;

    fn label(&self) -> &'static str {
        match self {
            Self::MarkQualified => "Mark as Qualified",
            Self::MarkNotQualified => "Mark as Not Qualified",
            Self::ScheduleInterview => "Schedule Interview",
            Self::SendOffer => "Send Offer",
            Self::SendRejection => "Send Rejection",
        }
    }

    fn target_status(&self) -> Option<ApplicationStatus> {
        match self {
            Self::MarkQualified => Some(ApplicationStatus::Qualified),
            Self::MarkNotQualified => Some(ApplicationStatus::NotQualified),
            Self::ScheduleInterview | Self::SendOffer | Self::SendRejection => None,
        }
    }
}

impl fmt::Display for ApplicationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MarkQualified => "mark_qualified",
            Self::MarkNotQualified => "mark_not_qualified",
            Self::ScheduleInterview => "schedule_interview",
            Self::SendOffer => "send_offer",
            Self::SendRejection => "send_rejection",
        })
    }
}

impl FromStr for ApplicationAction {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_action(&Self::ALL, RecordKind::Application, s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: RecordId,
    pub job_id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: ApplicationStatus,
    pub reason: String,
    pub applied_at: NaiveDate,
    #[serde(default)]
    pub cv_file: Option<String>,
    #[serde(default)]
    pub cv_name: Option<String>,
    pub experience: String,
    pub years_experience: u32,
    #[serde(default)]
    pub missing_requirements: Vec<String>,
}

impl Application {
    /// Resume label shown in the panel: display name, else file name.
    pub fn resume_label(&self) -> Option<&str> {
        self.cv_name.as_deref().or(self.cv_file.as_deref())
    }

    /// Missing requirements are only surfaced for rejected applicants.
    pub fn visible_missing_requirements(&self) -> &[String] {
        if self.status == ApplicationStatus::NotQualified {
            self.missing_requirements.as_slice()
        } else {
            &[]
        }
    }
}

impl Record for Application {
    type Status = ApplicationStatus;
    type Action = ApplicationAction;

    const KIND: RecordKind = RecordKind::Application;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> ApplicationStatus {
        self.status
    }

    fn created_at(&self) -> NaiveDate {
        self.applied_at
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }

    fn with_status(&self, status: ApplicationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    fn can_transition(from: ApplicationStatus, to: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (from, to),
            (Pending, Qualified)
                | (Pending, NotQualified)
                | (Qualified, NotQualified)
                | (NotQualified, Qualified)
        )
    }

    fn available_actions(status: ApplicationStatus) -> &'static [ApplicationAction] {
        match status {
            ApplicationStatus::Pending => &[
                ApplicationAction::MarkQualified,
                ApplicationAction::MarkNotQualified,
            ],
            ApplicationStatus::Qualified => &[
                ApplicationAction::ScheduleInterview,
                ApplicationAction::SendOffer,
            ],
            ApplicationStatus::NotQualified => &[ApplicationAction::SendRejection],
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Decision", "Reason", "Applied"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.status.label().to_string(),
            self.reason.clone(),
            self.applied_at.to_string(),
        ]
    }

    fn empty_message() -> &'static str {
        "No applications found for this filter."
    }

    fn into_any(self) -> AnyRecord {
        AnyRecord::Application(self)
    }

    fn try_from_any(any: AnyRecord) -> DashboardResult<Self> {
        match any {
            AnyRecord::Application(a) => Ok(a),
            other => Err(other.kind_mismatch(Self::KIND)),
        }
    }
}
