// src/lfd/screen.rs
use std::sync::Arc;

use super::filter::{filter, FilterState, StatusFilter};
use super::list::ListView;
use super::panel::{plan_action, ActionOutcome, PanelView, PlannedAction};
use super::record::{PanelAction, Record, RecordId};
use super::selection::SelectionController;
use super::store::RecordStore;
use crate::app_log;
use crate::error::{DashboardError, DashboardResult};

/// One list-filter-detail screen: its own store scope, filter inputs and selection.
#[derive(Debug, Clone)]
pub struct Screen<R: Record> {
    store: RecordStore<R>,
    filter: FilterState<R::Status>,
    selection: SelectionController<R>,
}

impl<R: Record> Screen<R> {
    pub fn new(store: RecordStore<R>) -> Self {
        Self::with_filter(store, FilterState::default())
    }

    pub fn with_filter(store: RecordStore<R>, filter: FilterState<R::Status>) -> Self {
        Self {
            store,
            filter,
            selection: SelectionController::new(),
        }
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn filter_state(&self) -> &FilterState<R::Status> {
        &self.filter
    }

    pub fn selection(&self) -> &SelectionController<R> {
        &self.selection
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter<R::Status>) {
        self.filter.status = status;
    }

    pub fn set_filter(&mut self, filter: FilterState<R::Status>) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<Arc<R>> {
        filter(self.store.as_slice(), &self.filter)
    }

    /// Swaps in a freshly loaded store. An open record still present follows the reload;
    /// one that disappeared stays on screen until the panel is closed.
    pub fn reload(&mut self, store: RecordStore<R>) {
        self.store = store;
        let fresh = self
            .selection
            .current()
            .and_then(|open| self.store.get(open.id()));
        if let Some(fresh) = fresh {
            self.selection.on_mutation(&fresh);
        }
    }

    pub fn list(&self) -> ListView<R> {
        ListView::render(&self.store, &self.filter)
    }

    pub fn select(&mut self, id: &RecordId) -> DashboardResult<Arc<R>> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| DashboardError::not_found(R::KIND, id))?;
        self.selection.select(Arc::clone(&record));
        Ok(record)
    }

    pub fn close_panel(&mut self) {
        self.selection.close();
    }

    pub fn panel(&self) -> Option<PanelView<R>> {
        PanelView::render(&self.selection)
    }

    /// Status mutation through the store; an open panel on the same record follows it.
    pub fn update_status(&mut self, id: &RecordId, status: R::Status) -> DashboardResult<Arc<R>> {
        let updated = self.store.update_status(id, status)?;
        self.selection.on_mutation(&updated);
        Ok(updated)
    }

    pub fn check_transition(&self, id: &RecordId, status: R::Status) -> DashboardResult<Arc<R>> {
        self.store.check_transition(id, status)
    }

    pub fn insert(&mut self, record: R) -> DashboardResult<Arc<R>> {
        self.store.insert(record)
    }

    pub fn replace(&mut self, record: R) -> DashboardResult<Arc<R>> {
        let updated = self.store.replace(record)?;
        self.selection.on_mutation(&updated);
        Ok(updated)
    }

    pub fn plan_action(&self, action: R::Action) -> DashboardResult<PlannedAction<R>> {
        let planned = plan_action(&self.selection, action)?;
        if let Some(target) = planned.target_status() {
            self.store.check_transition(planned.record.id(), target)?;
        }
        Ok(planned)
    }

    /// Stores the record the collaborator returned for a status change on `id`.
    /// It must be that record and carry `status`; an open panel on it follows.
    pub fn apply_confirmed(
        &mut self,
        id: &RecordId,
        confirmed: R,
        status: R::Status,
    ) -> DashboardResult<Arc<R>> {
        if confirmed.id() != id || confirmed.status() != status {
            return Err(DashboardError::TransientIo(format!(
                "record service confirmed {} {} as {}, expected {} {} as {}",
                R::KIND,
                confirmed.id(),
                confirmed.status(),
                R::KIND,
                id,
                status
            )));
        }

        let current = self.store.check_transition(id, status)?;
        app_log!(
            info,
            "{} {} status {} -> {} (confirmed)",
            R::KIND,
            id,
            current.status(),
            status
        );
        self.replace(confirmed)
    }

    /// Applies a planned action once any collaborator call for it has succeeded.
    /// `confirmed` is the record the collaborator returned, stored in place of a local
    /// copy; `None` when there was no round-trip. A record that vanished meanwhile is
    /// logged and reported, the panel is left as is.
    pub fn complete_action(
        &mut self,
        planned: PlannedAction<R>,
        confirmed: Option<R>,
    ) -> DashboardResult<ActionOutcome<R>> {
        let PlannedAction { record, action } = planned;

        let Some(target) = action.target_status() else {
            app_log!(info, "{} on {} {}", action.label(), R::KIND, record.id());
            return Ok(ActionOutcome::Dispatched {
                record,
                label: action.label(),
            });
        };

        let result = match confirmed {
            Some(confirmed) => self.apply_confirmed(record.id(), confirmed, target),
            None => self.update_status(record.id(), target),
        };

        match result {
            Ok(updated) => {
                let panel_closed = action.closes_panel();
                if panel_closed {
                    self.selection.close();
                }
                Ok(ActionOutcome::Transitioned {
                    record: updated,
                    panel_closed,
                })
            }
            Err(e) => {
                app_log!(
                    warn,
                    "{} on {} {} failed: {}",
                    action.label(),
                    R::KIND,
                    record.id(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Plan and complete in one step, for callers with no collaborator round-trip.
    pub fn invoke(&mut self, action: R::Action) -> DashboardResult<ActionOutcome<R>> {
        let planned = self.plan_action(action)?;
        self.complete_action(planned, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lfd::Selection;
    use crate::types::fixtures;
    use crate::types::{
        Application, ApplicationAction, ApplicationStatus, Job, JobAction, JobStatus,
    };

    fn applications() -> Screen<Application> {
        Screen::new(RecordStore::new(fixtures::applications()))
    }

    #[test]
    fn test_mark_qualified_updates_list_and_panel() {
        let mut screen = applications();
        screen.select(&RecordId::from("4")).unwrap();

        let outcome = screen.invoke(ApplicationAction::MarkQualified).unwrap();
        assert!(matches!(
            outcome,
            ActionOutcome::Transitioned {
                panel_closed: false,
                ..
            }
        ));

        let panel = screen.panel().expect("panel stays open");
        assert_eq!(panel.record.status, ApplicationStatus::Qualified);
        assert_eq!(
            panel
                .actions
                .iter()
                .map(|a| a.action.as_str())
                .collect::<Vec<_>>(),
            vec!["schedule_interview", "send_offer"]
        );

        let list = screen.list();
        let row = list.row(&RecordId::from("4")).unwrap();
        assert_eq!(row.status, "qualified");
    }

    #[test]
    fn test_filtered_list_follows_mutation() {
        let mut screen = applications();
        screen.set_status_filter(StatusFilter::Only(ApplicationStatus::Qualified));
        assert_eq!(screen.visible().len(), 2);

        screen
            .update_status(&RecordId::from("4"), ApplicationStatus::Qualified)
            .unwrap();
        assert_eq!(screen.visible().len(), 3);
    }

    #[test]
    fn test_select_then_select_keeps_one_open() {
        let mut screen = applications();
        screen.select(&RecordId::from("1")).unwrap();
        screen.select(&RecordId::from("3")).unwrap();

        match screen.selection().state() {
            Selection::Open(record) => assert_eq!(record.id().as_str(), "3"),
            Selection::Closed => panic!("expected an open panel"),
        }
    }

    #[test]
    fn test_select_unknown_keeps_previous() {
        let mut screen = applications();
        screen.select(&RecordId::from("2")).unwrap();
        assert!(screen.select(&RecordId::from("77")).is_err());
        assert_eq!(screen.panel().unwrap().record.name, "Michael Johnson");
    }

    #[test]
    fn test_outward_action_leaves_record_untouched() {
        let mut screen = applications();
        screen.select(&RecordId::from("1")).unwrap();
        let before = Arc::clone(screen.selection().current().unwrap());

        let outcome = screen.invoke(ApplicationAction::SendOffer).unwrap();
        match outcome {
            ActionOutcome::Dispatched { record, label } => {
                assert!(Arc::ptr_eq(&record, &before));
                assert_eq!(label, "Send Offer");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_action_on_vanished_record_reports_not_found() {
        let mut screen = applications();
        screen.select(&RecordId::from("4")).unwrap();
        let planned = screen.plan_action(ApplicationAction::MarkNotQualified).unwrap();

        // the store scope was reloaded without that applicant
        screen.store = screen.store.scoped(|a| a.id().as_str() != "4");

        let err = screen.complete_action(planned, None).unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { .. }));
        assert_eq!(
            screen.panel().unwrap().record.status,
            ApplicationStatus::Pending
        );
    }

    #[test]
    fn test_confirmed_record_replaces_local_copy() {
        let mut screen = applications();
        screen.select(&RecordId::from("4")).unwrap();
        let planned = screen.plan_action(ApplicationAction::MarkQualified).unwrap();

        let mut confirmed = fixtures::applications().remove(3);
        confirmed.status = ApplicationStatus::Qualified;
        confirmed.reason = "Screened by the hiring team".to_string();
        screen.complete_action(planned, Some(confirmed)).unwrap();

        let panel = screen.panel().unwrap();
        assert_eq!(panel.record.status, ApplicationStatus::Qualified);
        assert_eq!(panel.record.reason, "Screened by the hiring team");
        assert_eq!(
            screen.store().get(&RecordId::from("4")).unwrap().reason,
            "Screened by the hiring team"
        );
    }

    #[test]
    fn test_confirmed_record_with_other_status_is_rejected() {
        let mut screen = applications();
        screen.select(&RecordId::from("4")).unwrap();
        let planned = screen.plan_action(ApplicationAction::MarkQualified).unwrap();

        let stale = fixtures::applications().remove(3);
        let err = screen.complete_action(planned, Some(stale)).unwrap_err();
        assert!(err.is_transient());
        assert_eq!(
            screen.panel().unwrap().record.status,
            ApplicationStatus::Pending
        );
    }

    #[test]
    fn test_reload_refreshes_open_record() {
        let mut screen = applications();
        screen.select(&RecordId::from("4")).unwrap();

        let mut records = fixtures::applications();
        records[3].status = ApplicationStatus::NotQualified;
        screen.reload(RecordStore::new(records));

        assert_eq!(
            screen.panel().unwrap().record.status,
            ApplicationStatus::NotQualified
        );
    }

    #[test]
    fn test_close_job_from_panel_closes_panel() {
        let mut jobs = Screen::<Job>::new(RecordStore::new(fixtures::jobs()));
        jobs.select(&RecordId::from("2")).unwrap();

        let outcome = jobs.invoke(JobAction::Close).unwrap();
        assert!(matches!(
            outcome,
            ActionOutcome::Transitioned {
                panel_closed: true,
                ..
            }
        ));
        assert!(!jobs.selection().is_open());
        assert_eq!(
            jobs.store().get(&RecordId::from("2")).unwrap().status,
            JobStatus::Closed
        );
    }

    #[test]
    fn test_external_close_keeps_job_panel_open() {
        let mut jobs = Screen::<Job>::new(RecordStore::new(fixtures::jobs()));
        jobs.select(&RecordId::from("1")).unwrap();
        jobs.update_status(&RecordId::from("1"), JobStatus::Closed)
            .unwrap();

        let panel = jobs.panel().unwrap();
        assert_eq!(panel.status, "closed");
        assert!(panel.actions.is_empty());
    }
}
