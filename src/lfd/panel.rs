// src/lfd/panel.rs
use serde::Serialize;
use std::sync::Arc;

use super::record::{PanelAction, Record, RecordStatus};
use super::selection::SelectionController;
use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Clone, Serialize)]
pub struct ActionView {
    pub action: String,
    pub label: &'static str,
    pub changes_status: bool,
}

impl ActionView {
    fn from_action<A: PanelAction>(action: &A) -> Self {
        Self {
            action: action.to_string(),
            label: action.label(),
            changes_status: action.target_status().is_some(),
        }
    }
}

/// Read-only rendering of the open record plus the buttons its status allows.
#[derive(Debug, Clone, Serialize)]
pub struct PanelView<R: Record> {
    pub record: R,
    pub status: String,
    pub status_label: &'static str,
    pub actions: Vec<ActionView>,
}

impl<R: Record> PanelView<R> {
    pub fn render(selection: &SelectionController<R>) -> Option<Self> {
        selection.current().map(|record| Self::for_record(record))
    }

    pub fn for_record(record: &R) -> Self {
        let status = record.status();
        Self {
            record: record.clone(),
            status: status.to_string(),
            status_label: status.label(),
            actions: R::available_actions(status)
                .iter()
                .map(ActionView::from_action)
                .collect(),
        }
    }
}

/// An action checked against the open record, waiting for the collaborator call.
#[derive(Debug, Clone)]
pub struct PlannedAction<R: Record> {
    pub record: Arc<R>,
    pub action: R::Action,
}

impl<R: Record> PlannedAction<R> {
    pub fn target_status(&self) -> Option<R::Status> {
        self.action.target_status()
    }
}

#[derive(Debug, Clone)]
pub enum ActionOutcome<R> {
    /// Status changed; the panel now shows `record`.
    Transitioned { record: Arc<R>, panel_closed: bool },
    /// Outward notification handed off. The record is unchanged.
    Dispatched { record: Arc<R>, label: &'static str },
}

impl<R: Record> ActionOutcome<R> {
    pub fn record(&self) -> &Arc<R> {
        match self {
            Self::Transitioned { record, .. } | Self::Dispatched { record, .. } => record,
        }
    }
}

/// Checks that `action` is offered for the record currently open.
pub fn plan_action<R: Record>(
    selection: &SelectionController<R>,
    action: R::Action,
) -> DashboardResult<PlannedAction<R>> {
    let record = selection
        .current()
        .cloned()
        .ok_or(DashboardError::NothingSelected(R::KIND))?;

    if !R::available_actions(record.status()).contains(&action) {
        return Err(DashboardError::invalid(
            "action",
            format!(
                "'{}' is not available for a {} {}",
                action.label(),
                record.status().label(),
                R::KIND
            ),
        ));
    }

    Ok(PlannedAction { record, action })
}
