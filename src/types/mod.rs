// src/types/mod.rs
pub mod application;
pub mod candidate;
pub mod fixtures;
pub mod job;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DashboardError;
use crate::lfd::{Record, RecordId, RecordKind};

pub use application::{Application, ApplicationAction, ApplicationStatus};
pub use candidate::{Candidate, CandidateAction, CandidateStatus};
pub use job::{ApplicationWindow, Job, JobAction, JobStatus};

/// A record of any kind, as it travels to and from the record API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyRecord {
    Application(Application),
    Candidate(Candidate),
    Job(Job),
}

impl AnyRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Application(_) => RecordKind::Application,
            Self::Candidate(_) => RecordKind::Candidate,
            Self::Job(_) => RecordKind::Job,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            Self::Application(a) => a.id(),
            Self::Candidate(c) => c.id(),
            Self::Job(j) => j.id(),
        }
    }

    /// The collaborator answered with a record of the wrong kind. Treated as a
    /// transport fault: the caller may retry, local state is untouched.
    pub fn kind_mismatch(&self, expected: RecordKind) -> DashboardError {
        DashboardError::TransientIo(format!(
            "expected a {} record, got {} {}",
            expected,
            self.kind(),
            self.id()
        ))
    }
}

/// Display name for a department code. Unknown codes are shown as given.
pub fn department_display<'a>(code: &'a str, custom: Option<&'a str>) -> &'a str {
    match code {
        "engineering" => "Engineering",
        "product" => "Product",
        "design" => "Design",
        "sales" => "Sales",
        "marketing" => "Marketing",
        "hr" => "Human Resources",
        "other" => match custom {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Other",
        },
        other => other,
    }
}

/// Initial record set for the mock collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl SeedData {
    pub fn builtin() -> Self {
        Self {
            applications: fixtures::applications(),
            candidates: fixtures::candidates(),
            jobs: fixtures::jobs(),
        }
    }

    /// Loads a TOML seed file (`[[applications]]`, `[[candidates]]`, `[[jobs]]`).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse seed file: {}", path.display()))
    }
}
