// src/error.rs
use serde::Serialize;
use thiserror::Error;

use crate::lfd::{RecordId, RecordKind};

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: RecordKind, id: RecordId },

    #[error("plan '{0}' not found")]
    UnknownPlan(String),

    #[error("service call failed: {0}")]
    TransientIo(String),

    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("{kind} cannot move from {from} to {to}")]
    InvalidTransition {
        kind: RecordKind,
        from: String,
        to: String,
    },

    #[error("{0} is already in progress")]
    Busy(&'static str),

    #[error("no {0} is currently selected")]
    NothingSelected(RecordKind),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    pub fn not_found(kind: RecordKind, id: &RecordId) -> Self {
        Self::NotFound {
            kind,
            id: id.clone(),
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    /// Stable machine-readable code used in API error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } | Self::UnknownPlan(_) => "NOT_FOUND",
            Self::TransientIo(_) => "SERVICE_UNAVAILABLE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Busy(_) => "REQUEST_IN_FLIGHT",
            Self::NothingSelected(_) => "NOTHING_SELECTED",
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { kind, .. } => vec![
                format!("Refresh the {} list", kind.plural()),
                "The record may have been removed by another user".to_string(),
            ],
            Self::UnknownPlan(_) => vec![
                "Choose one of: free, standard, pro, premium".to_string(),
            ],
            Self::TransientIo(_) => vec![
                "Try again in a few moments".to_string(),
                "Contact support if the problem persists".to_string(),
            ],
            Self::Validation(fields) => fields
                .iter()
                .map(|f| format!("Check the '{}' field: {}", f.field, f.message))
                .collect(),
            Self::InvalidTransition { .. } => {
                vec!["Reload the record to see its current status".to_string()]
            }
            Self::Busy(_) => vec!["Wait for the current request to finish".to_string()],
            Self::NothingSelected(kind) => vec![format!("Open a {} from the list first", kind)],
        }
    }

    /// Whether retrying the same call later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientIo(_) | Self::Busy(_))
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(fields) => fields,
            _ => &[],
        }
    }
}
