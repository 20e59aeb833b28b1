// src/usage.rs
//! Plan usage meters and the recent-activity log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::utils::{format_long_date, format_short_date};

pub const ACTIVITY_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTone {
    Green,
    Yellow,
    Red,
}

impl ProgressTone {
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            0..=50 => Self::Green,
            51..=75 => Self::Yellow,
            _ => Self::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetric {
    pub label: String,
    pub value: u32,
    pub limit: u32,
    pub unit: String,
}

impl UsageMetric {
    pub fn new(label: &str, value: u32, limit: u32, unit: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            limit,
            unit: unit.to_string(),
        }
    }

    /// Whole percent used, rounded down and capped at 100.
    pub fn percentage(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        let pct = u64::from(self.value) * 100 / u64::from(self.limit);
        pct.min(100) as u32
    }

    pub fn tone(&self) -> ProgressTone {
        ProgressTone::for_percentage(self.percentage())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub action: String,
    pub date: NaiveDate,
    pub details: String,
    pub cost: String,
}

impl ActivityEntry {
    pub fn new(
        action: impl Into<String>,
        date: NaiveDate,
        details: impl Into<String>,
        cost: &str,
    ) -> Self {
        Self {
            action: action.into(),
            date,
            details: details.into(),
            cost: cost.to_string(),
        }
    }
}

/// Newest entry first. Old entries fall off past `ACTIVITY_LOG_CAPACITY`.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn new(entries: impl IntoIterator<Item = ActivityEntry>) -> Self {
        let mut log = Self::default();
        let mut entries: Vec<_> = entries.into_iter().collect();
        // seed lists are newest-first already
        entries.reverse();
        for entry in entries {
            log.record(entry);
        }
        log
    }

    pub fn record(&mut self, entry: ActivityEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(ACTIVITY_LOG_CAPACITY);
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct UsageTracker {
    pub metrics: Vec<UsageMetric>,
    pub activity: ActivityLog,
}

impl UsageTracker {
    pub fn builtin() -> Self {
        let day = |d| NaiveDate::from_ymd_opt(2024, 12, d).unwrap_or_default();
        Self {
            metrics: vec![
                UsageMetric::new("Job Postings", 5, 10, "postings"),
                UsageMetric::new("Application Reviews", 142, 500, "reviews"),
                UsageMetric::new("AI Screenings", 87, 200, "screenings"),
                UsageMetric::new("Team Members", 3, 5, "members"),
            ],
            activity: ActivityLog::new([
                ActivityEntry::new("Job Posted", day(30), "Senior Frontend Developer", "Free"),
                ActivityEntry::new(
                    "AI Screening Run",
                    day(29),
                    "24 applications screened",
                    "Included",
                ),
                ActivityEntry::new("Team Member Added", day(28), "john.doe@company.com", "Free"),
                ActivityEntry::new(
                    "AI Screening Run",
                    day(27),
                    "18 applications screened",
                    "Included",
                ),
                ActivityEntry::new("Job Posted", day(26), "Product Manager", "Free"),
            ]),
        }
    }

    /// Bumps the named meter. Unknown labels are ignored.
    pub fn increment(&mut self, label: &str) {
        if let Some(metric) = self.metrics.iter_mut().find(|m| m.label == label) {
            metric.value = metric.value.saturating_add(1);
        }
    }

    pub fn record(&mut self, entry: ActivityEntry) {
        self.activity.record(entry);
    }

    pub fn report(&self, plan_name: &str, renews_on: NaiveDate) -> UsageReport {
        UsageReport {
            plan: PlanBanner {
                name: plan_name.to_string(),
                renews_on: format_long_date(renews_on),
            },
            metrics: self
                .metrics
                .iter()
                .map(|m| MetricView {
                    label: m.label.clone(),
                    value: m.value,
                    limit: m.limit,
                    unit: m.unit.clone(),
                    percentage: m.percentage(),
                    tone: m.tone(),
                })
                .collect(),
            activity: self
                .activity
                .entries()
                .map(|e| ActivityView {
                    action: e.action.clone(),
                    date: format_short_date(e.date),
                    details: e.details.clone(),
                    cost: e.cost.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanBanner {
    pub name: String,
    pub renews_on: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricView {
    pub label: String,
    pub value: u32,
    pub limit: u32,
    pub unit: String,
    pub percentage: u32,
    pub tone: ProgressTone,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityView {
    pub action: String,
    pub date: String,
    pub details: String,
    pub cost: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    pub plan: PlanBanner,
    pub metrics: Vec<MetricView>,
    pub activity: Vec<ActivityView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages_match_dashboard() {
        let tracker = UsageTracker::builtin();
        let pct: Vec<_> = tracker.metrics.iter().map(|m| m.percentage()).collect();
        assert_eq!(pct, vec![50, 28, 43, 60]);
    }

    #[test]
    fn test_percentage_edges() {
        assert_eq!(UsageMetric::new("x", 5, 0, "u").percentage(), 0);
        assert_eq!(UsageMetric::new("x", 250, 200, "u").percentage(), 100);
    }

    #[test]
    fn test_tone_thresholds() {
        assert_eq!(ProgressTone::for_percentage(50), ProgressTone::Green);
        assert_eq!(ProgressTone::for_percentage(51), ProgressTone::Yellow);
        assert_eq!(ProgressTone::for_percentage(75), ProgressTone::Yellow);
        assert_eq!(ProgressTone::for_percentage(76), ProgressTone::Red);
    }

    #[test]
    fn test_activity_newest_first_and_capped() {
        let mut tracker = UsageTracker::builtin();
        assert_eq!(tracker.activity.entries().next().unwrap().details, "Senior Frontend Developer");

        let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        for i in 0..60 {
            tracker.record(ActivityEntry::new("Offer Sent", day, format!("#{}", i), "Included"));
        }
        assert_eq!(tracker.activity.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(tracker.activity.entries().next().unwrap().details, "#59");
    }

    #[test]
    fn test_report_formats_dates() {
        let tracker = UsageTracker::builtin();
        let report = tracker.report("Pro", NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(report.plan.renews_on, "January 31, 2025");
        assert_eq!(report.activity[0].date, "Dec 30, 2024");
        assert_eq!(report.metrics[2].tone, ProgressTone::Green);
    }

    #[test]
    fn test_increment_known_metric() {
        let mut tracker = UsageTracker::builtin();
        tracker.increment("Job Postings");
        tracker.increment("Nonexistent");
        assert_eq!(tracker.metrics[0].value, 6);
    }
}
