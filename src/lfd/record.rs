// src/lfd/record.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use crate::error::{DashboardError, DashboardResult};
use crate::types::AnyRecord;

/// Opaque record identifier. Assigned once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Application,
    Candidate,
    Job,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Candidate => "candidate",
            Self::Job => "job",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::Application => "applications",
            Self::Candidate => "candidates",
            Self::Job => "jobs",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "application" | "applications" => Ok(Self::Application),
            "candidate" | "candidates" => Ok(Self::Candidate),
            "job" | "jobs" => Ok(Self::Job),
            other => Err(DashboardError::invalid(
                "screen",
                format!("unknown screen '{}'", other),
            )),
        }
    }
}

/// Closed per-kind status set. `Display`/`FromStr` use the wire form (`not_qualified`),
/// `label` the badge text (`Not Qualified`).
pub trait RecordStatus:
    Copy + Eq + Debug + Display + FromStr<Err = DashboardError> + Serialize + Send + Sync + 'static
{
    fn all() -> &'static [Self];
    fn label(&self) -> &'static str;
}

/// Something a detail panel button can do to the open record.
pub trait PanelAction:
    Copy + Eq + Debug + Display + FromStr<Err = DashboardError> + Serialize + Send + Sync + 'static
{
    type Status: RecordStatus;

    fn label(&self) -> &'static str;

    /// `None` for outward-facing actions (send an offer, schedule an interview)
    /// that notify someone without changing the record.
    fn target_status(&self) -> Option<Self::Status>;

    fn closes_panel(&self) -> bool {
        false
    }
}

/// A domain entity shown through the list-filter-detail screens.
pub trait Record: Clone + Debug + Serialize + Send + Sync + 'static {
    type Status: RecordStatus;
    type Action: PanelAction<Status = Self::Status>;

    const KIND: RecordKind;

    fn id(&self) -> &RecordId;
    fn status(&self) -> Self::Status;
    fn created_at(&self) -> NaiveDate;

    /// Fields matched by free-text search, in display order.
    fn searchable_fields(&self) -> Vec<&str>;

    /// Copy of this record carrying `status`. Identity is kept.
    fn with_status(&self, status: Self::Status) -> Self;

    fn can_transition(from: Self::Status, to: Self::Status) -> bool;

    fn available_actions(status: Self::Status) -> &'static [Self::Action];

    fn columns() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
    fn empty_message() -> &'static str;

    fn into_any(self) -> AnyRecord;
    fn try_from_any(any: AnyRecord) -> DashboardResult<Self>;
}

/// Parses a wire value against `S::all()` by its `Display` form.
pub fn parse_status<S: RecordStatus>(kind: RecordKind, value: &str) -> DashboardResult<S> {
    let wanted = value.trim().to_lowercase();
    S::all()
        .iter()
        .copied()
        .find(|s| s.to_string() == wanted)
        .ok_or_else(|| {
            DashboardError::invalid("status", format!("'{}' is not a {} status", value, kind))
        })
}

/// Same lookup for panel actions, over the action set a record kind can ever offer.
pub fn parse_action<A: PanelAction>(
    all: &[A],
    kind: RecordKind,
    value: &str,
) -> DashboardResult<A> {
    let wanted = value.trim().to_lowercase();
    all.iter()
        .copied()
        .find(|a| a.to_string() == wanted)
        .ok_or_else(|| {
            DashboardError::invalid("action", format!("'{}' is not a {} action", value, kind))
        })
}
