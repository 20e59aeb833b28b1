// src/types/fixtures.rs
//! Built-in records served by the mock record API when no seed file is configured.

use chrono::NaiveDate;

use super::{
    Application, ApplicationStatus, ApplicationWindow, Candidate, CandidateStatus, Job, JobStatus,
};
use crate::lfd::RecordId;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn window(
    opens: NaiveDate,
    open_hm: (u32, u32),
    closes: NaiveDate,
    close_hm: (u32, u32),
) -> ApplicationWindow {
    ApplicationWindow {
        opens_at: opens.and_hms_opt(open_hm.0, open_hm.1, 0).unwrap_or_default(),
        closes_at: closes.and_hms_opt(close_hm.0, close_hm.1, 0).unwrap_or_default(),
    }
}

#[allow(clippy::too_many_arguments)]
fn application(
    id: &str,
    name: &str,
    phone: &str,
    status: ApplicationStatus,
    reason: &str,
    applied_at: NaiveDate,
    experience: &str,
    years_experience: u32,
) -> Application {
    let first = name.split_whitespace().next().unwrap_or(name).to_lowercase();
    let file_stem = name.to_lowercase().replace(' ', "_");
    Application {
        id: RecordId::from(id),
        job_id: RecordId::from("1"),
        name: name.to_string(),
        email: format!("{}@example.com", first),
        phone: phone.to_string(),
        status,
        reason: reason.to_string(),
        applied_at,
        cv_file: Some(format!("{}_resume.pdf", file_stem)),
        cv_name: Some(format!("{} Resume", name)),
        experience: experience.to_string(),
        years_experience,
        missing_requirements: Vec::new(),
    }
}

/// Applications received for job `1` (Senior Frontend Developer).
pub fn applications() -> Vec<Application> {
    let mut emma = application(
        "3",
        "Emma Davis",
        "+1 (555) 345-6789",
        ApplicationStatus::NotQualified,
        "Lacks required Python experience",
        date(2024, 12, 19),
        "3 years with React, primarily frontend UI work.",
        3,
    );
    emma.missing_requirements = vec![
        "Insufficient React experience (3 years vs required 5+)".to_string(),
        "Missing advanced TypeScript proficiency".to_string(),
        "No experience with performance optimization".to_string(),
    ];

    vec![
        application(
            "1",
            "Sarah Chen",
            "+1 (555) 123-4567",
            ApplicationStatus::Qualified,
            "Meets all technical requirements",
            date(2024, 12, 20),
            concat!(
                "8 years of experience building complex React applications ",
                "with TypeScript and modern tooling."
            ),
            8,
        ),
        application(
            "2",
            "Michael Johnson",
            "+1 (555) 234-5678",
            ApplicationStatus::Qualified,
            "5+ years experience, matches role",
            date(2024, 12, 19),
            "6 years working with React, Redux, and backend integration.",
            6,
        ),
        emma,
        application(
            "4",
            "James Wilson",
            "+1 (555) 456-7890",
            ApplicationStatus::Pending,
            "Under review",
            date(2024, 12, 18),
            "5 years with React and Vue.js, good overall frontend skills.",
            5,
        ),
    ]
}

pub fn candidates() -> Vec<Candidate> {
    [
        ("1", "Sarah Chen", "sarah", "Senior Frontend Developer", 20),
        ("2", "Michael Johnson", "michael", "Senior Frontend Developer", 19),
        ("3", "Alex Kumar", "alex", "Product Manager", 18),
        ("4", "Jessica Lee", "jessica", "Product Manager", 17),
    ]
    .into_iter()
    .map(|(id, name, mailbox, role, day)| Candidate {
        id: RecordId::from(id),
        name: name.to_string(),
        email: format!("{}@example.com", mailbox),
        job_role: role.to_string(),
        status: CandidateStatus::Qualified,
        added_date: date(2024, 12, day),
    })
    .collect()
}

pub fn jobs() -> Vec<Job> {
    let posting_ends = date(2025, 12, 31);

    vec![
        Job {
            id: RecordId::from("1"),
            title: "Senior Frontend Developer".to_string(),
            department: "engineering".to_string(),
            custom_department: None,
            location: "San Francisco, CA".to_string(),
            applications: 24,
            status: JobStatus::Open,
            created_at: date(2024, 12, 15),
            positions: 2,
            requirements: "5+ years React experience, TypeScript, strong communication skills"
                .to_string(),
            questions: vec![
                "What's your experience with React and state management?".to_string(),
                "Describe your experience leading a project from design to deployment".to_string(),
                "How do you approach testing in your frontend projects?".to_string(),
                "Tell us about your experience with TypeScript".to_string(),
            ],
            window: Some(window(date(2024, 12, 15), (9, 0), posting_ends, (23, 59))),
        },
        Job {
            id: RecordId::from("2"),
            title: "Product Manager".to_string(),
            department: "product".to_string(),
            custom_department: None,
            location: "New York, NY".to_string(),
            applications: 18,
            status: JobStatus::Open,
            created_at: date(2024, 12, 10),
            positions: 1,
            requirements: "3+ years PM experience, strong analytical skills".to_string(),
            questions: Vec::new(),
            window: Some(window(date(2024, 12, 10), (9, 0), posting_ends, (23, 59))),
        },
        Job {
            id: RecordId::from("3"),
            title: "UX Designer".to_string(),
            department: "design".to_string(),
            custom_department: None,
            location: "Remote".to_string(),
            applications: 12,
            status: JobStatus::Open,
            created_at: date(2024, 12, 8),
            positions: 1,
            requirements: String::new(),
            questions: Vec::new(),
            window: None,
        },
        Job {
            id: RecordId::from("4"),
            title: "DevOps Engineer".to_string(),
            department: "engineering".to_string(),
            custom_department: None,
            location: "San Francisco, CA".to_string(),
            applications: 8,
            status: JobStatus::Closed,
            created_at: date(2024, 12, 1),
            positions: 1,
            requirements: String::new(),
            questions: Vec::new(),
            window: None,
        },
    ]
}
