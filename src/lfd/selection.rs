// src/lfd/selection.rs
use std::sync::Arc;

use super::record::Record;

#[derive(Debug, Clone)]
pub enum Selection<R> {
    Closed,
    Open(Arc<R>),
}

/// Owns the single record being inspected. The detail panel is visible exactly
/// when the state is `Open`.
#[derive(Debug, Clone)]
pub struct SelectionController<R> {
    state: Selection<R>,
}

impl<R> Default for SelectionController<R> {
    fn default() -> Self {
        Self {
            state: Selection::Closed,
        }
    }
}

impl<R: Record> SelectionController<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Selection<R> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, Selection::Open(_))
    }

    pub fn current(&self) -> Option<&Arc<R>> {
        match &self.state {
            Selection::Open(record) => Some(record),
            Selection::Closed => None,
        }
    }

    /// Opens `record`, replacing any previous selection without passing through `Closed`.
    pub fn select(&mut self, record: Arc<R>) {
        self.state = Selection::Open(record);
    }

    pub fn close(&mut self) {
        self.state = Selection::Closed;
    }

    /// Refreshes the open record after a store mutation. Returns whether the panel changed.
    pub fn on_mutation(&mut self, updated: &Arc<R>) -> bool {
        match &mut self.state {
            Selection::Open(current) if current.id() == updated.id() => {
                *current = Arc::clone(updated);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lfd::{RecordId, RecordStore};
    use crate::types::fixtures;
    use crate::types::{Application, ApplicationStatus};

    fn store() -> RecordStore<Application> {
        RecordStore::new(fixtures::applications())
    }

    #[test]
    fn test_initial_state_is_closed() {
        let selection = SelectionController::<Application>::new();
        assert!(!selection.is_open());
        assert!(selection.current().is_none());
    }

    #[test]
    fn test_select_replaces_previous() {
        let store = store();
        let mut selection = SelectionController::new();

        selection.select(store.get(&RecordId::from("1")).unwrap());
        selection.select(store.get(&RecordId::from("3")).unwrap());

        assert_eq!(selection.current().unwrap().id().as_str(), "3");
        assert!(matches!(selection.state(), Selection::Open(r) if r.name == "Emma Davis"));
    }

    #[test]
    fn test_close() {
        let store = store();
        let mut selection = SelectionController::new();
        selection.select(store.get(&RecordId::from("2")).unwrap());
        selection.close();
        assert!(!selection.is_open());
    }

    #[test]
    fn test_mutation_refreshes_open_record_only() {
        let mut store = store();
        let mut selection = SelectionController::new();
        selection.select(store.get(&RecordId::from("4")).unwrap());

        let other = store
            .update_status(&RecordId::from("3"), ApplicationStatus::Qualified)
            .unwrap();
        assert!(!selection.on_mutation(&other));
        assert_eq!(
            selection.current().unwrap().status(),
            ApplicationStatus::Pending
        );

        let updated = store
            .update_status(&RecordId::from("4"), ApplicationStatus::Qualified)
            .unwrap();
        assert!(selection.on_mutation(&updated));
        assert_eq!(
            selection.current().unwrap().status(),
            ApplicationStatus::Qualified
        );
    }

    #[test]
    fn test_mutation_while_closed_stays_closed() {
        let mut store = store();
        let mut selection = SelectionController::new();
        let updated = store
            .update_status(&RecordId::from("4"), ApplicationStatus::NotQualified)
            .unwrap();
        assert!(!selection.on_mutation(&updated));
        assert!(!selection.is_open());
    }
}
