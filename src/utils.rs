// src/utils.rs
use chrono::NaiveDate;
use uuid::Uuid;

/// Normalize a search term: lowercased as typed, `None` when it is blank.
/// Surrounding whitespace is kept and must match literally.
pub fn normalize_search(term: &str) -> Option<String> {
    if term.trim().is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

/// Short opaque id for a new job posting (9 hex characters).
pub fn new_job_id() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}

/// "January 31, 2025"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "Dec 30, 2024"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Left-aligned plain-text table, used by the CLI.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = vec![line(headers.to_vec())];
    out.push(line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}
