// src/lfd/mod.rs
//! List-filter-detail: a record store, a derived filtered view, and a single-selection
//! detail panel. One generic implementation serves applications, candidates and jobs.

pub mod export;
pub mod filter;
pub mod list;
pub mod panel;
pub mod record;
pub mod screen;
pub mod selection;
pub mod store;

pub use filter::{filter, matches_query, status_counts, FilterState, StatusCount, StatusFilter};
pub use list::{ListRow, ListView};
pub use panel::{plan_action, ActionOutcome, ActionView, PanelView, PlannedAction};
pub use record::{
    parse_action, parse_status, PanelAction, Record, RecordId, RecordKind, RecordStatus,
};
pub use screen::Screen;
pub use selection::{Selection, SelectionController};
pub use store::RecordStore;
