// src/lfd/filter.rs
use serde::Serialize;
use std::sync::Arc;

use super::record::{parse_status, Record, RecordStatus};
use crate::error::DashboardResult;
use crate::utils::normalize_search;

/// Status narrowing. `All` is the sentinel that skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        Self::All
    }
}

impl<S: RecordStatus> StatusFilter<S> {
    pub fn matches(&self, status: S) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }

    /// `None`, empty and `"all"` mean no narrowing.
    pub fn parse<R: Record<Status = S>>(value: Option<&str>) -> DashboardResult<Self> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(v) if v.eq_ignore_ascii_case("all") => Ok(Self::All),
            Some(v) => parse_status::<S>(R::KIND, v).map(Self::Only),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<S> {
    pub query: String,
    pub status: StatusFilter<S>,
}

impl<S> Default for FilterState<S> {
    fn default() -> Self {
        Self {
            query: String::new(),
            status: StatusFilter::All,
        }
    }
}

impl<S: RecordStatus> FilterState<S> {
    pub fn new(query: impl Into<String>, status: StatusFilter<S>) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    pub fn query(query: impl Into<String>) -> Self {
        Self::new(query, StatusFilter::All)
    }

    pub fn status(status: S) -> Self {
        Self::new(String::new(), StatusFilter::Only(status))
    }
}

/// Case-insensitive literal substring match over any searchable field.
pub fn matches_query<R: Record>(record: &R, needle: &str) -> bool {
    record
        .searchable_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Visible subset for `state`: status first, then text. Never re-sorts.
pub fn filter<R: Record>(records: &[Arc<R>], state: &FilterState<R::Status>) -> Vec<Arc<R>> {
    let needle = normalize_search(&state.query);

    records
        .iter()
        .filter(|r| state.status.matches(r.status()))
        .filter(|r| match &needle {
            Some(needle) => matches_query(r.as_ref(), needle),
            None => true,
        })
        .cloned()
        .collect()
}

/// Count behind one filter tab, e.g. "Qualified (2)".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub label: String,
    pub count: usize,
}

pub fn status_counts<R: Record>(records: &[Arc<R>]) -> Vec<StatusCount> {
    let mut counts = vec![StatusCount {
        status: "all".to_string(),
        label: "All".to_string(),
        count: records.len(),
    }];

    counts.extend(R::Status::all().iter().map(|status| StatusCount {
        status: status.to_string(),
        label: status.label().to_string(),
        count: records.iter().filter(|r| r.status() == *status).count(),
    }));

    counts
}
