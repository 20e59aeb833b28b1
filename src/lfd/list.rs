// src/lfd/list.rs
use serde::Serialize;
use std::sync::Arc;

use super::filter::{filter, status_counts, FilterState, StatusCount};
use super::record::{Record, RecordId, RecordStatus};
use super::selection::SelectionController;
use super::store::RecordStore;

/// One table row. `inspect` is the row's only affordance.
#[derive(Debug, Clone, Serialize)]
pub struct ListRow<R: Record> {
    pub id: RecordId,
    pub status: String,
    pub status_label: &'static str,
    pub cells: Vec<String>,
    #[serde(skip)]
    record: Arc<R>,
}

impl<R: Record> ListRow<R> {
    fn new(record: Arc<R>) -> Self {
        Self {
            id: record.id().clone(),
            status: record.status().to_string(),
            status_label: record.status().label(),
            cells: record.row(),
            record,
        }
    }

    pub fn inspect(&self, selection: &mut SelectionController<R>) {
        selection.select(Arc::clone(&self.record));
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListView<R: Record> {
    pub headers: &'static [&'static str],
    pub rows: Vec<ListRow<R>>,
    pub tabs: Vec<StatusCount>,
    pub total: usize,
    /// Set exactly when `rows` is empty.
    pub empty_message: Option<&'static str>,
}

impl<R: Record> ListView<R> {
    pub fn render(store: &RecordStore<R>, state: &FilterState<R::Status>) -> Self {
        let rows: Vec<ListRow<R>> = filter(store.as_slice(), state)
            .into_iter()
            .map(ListRow::new)
            .collect();

        let empty_message = rows.is_empty().then(R::empty_message);

        Self {
            headers: R::columns(),
            tabs: status_counts(store.as_slice()),
            total: store.len(),
            rows,
            empty_message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The records behind the rows, in list order.
    pub fn records(&self) -> Vec<Arc<R>> {
        self.rows.iter().map(|row| Arc::clone(&row.record)).collect()
    }

    pub fn row(&self, id: &RecordId) -> Option<&ListRow<R>> {
        self.rows.iter().find(|row| &row.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures;
    use crate::types::{Application, Candidate};

    #[test]
    fn test_render_rows_and_tabs() {
        let store = RecordStore::<Application>::new(fixtures::applications());
        let view = ListView::render(&store, &FilterState::default());

        assert_eq!(view.rows.len(), 4);
        assert_eq!(view.total, 4);
        assert!(view.empty_message.is_none());
        assert_eq!(view.headers.len(), view.rows[0].cells.len());
        assert_eq!(view.rows[0].cells[0], "Sarah Chen");
        assert_eq!(view.tabs[0].count, 4);

        let ids: Vec<_> = view.records().iter().map(|r| r.id().to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_empty_result_shows_message() {
        let store = RecordStore::<Application>::new(fixtures::applications());
        let view = ListView::render(&store, &FilterState::query("nobody-here"));

        assert!(view.is_empty());
        assert_eq!(
            view.empty_message,
            Some("No applications found for this filter.")
        );
        // tabs still count the whole store
        assert_eq!(view.tabs[0].count, 4);
    }

    #[test]
    fn test_empty_store_shows_message() {
        let store = RecordStore::<Candidate>::default();
        let view = ListView::render(&store, &FilterState::default());
        assert_eq!(view.empty_message, Some(Candidate::empty_message()));
    }

    #[test]
    fn test_row_inspect_opens_panel() {
        let store = RecordStore::<Application>::new(fixtures::applications());
        let view = ListView::render(&store, &FilterState::default());
        let mut selection = SelectionController::new();

        view.row(&RecordId::from("2")).unwrap().inspect(&mut selection);
        assert_eq!(selection.current().unwrap().name, "Michael Johnson");
    }
}
