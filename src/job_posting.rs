// src/job_posting.rs
//! Job posting form: raw draft, validation into a posting, and the applicant preview.
//! Also the per-posting application form applicants fill in.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, DashboardResult, FieldError};
use crate::lfd::RecordId;
use crate::types::{department_display, ApplicationWindow, Job, JobStatus};

pub const MAX_SCREENING_QUESTIONS: usize = 4;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Engineering,
    Product,
    Design,
    Sales,
    Marketing,
    Hr,
    Other,
}

impl Department {
    pub const ALL: [Self; 7] = [
        Self::Engineering,
        Self::Product,
        Self::Design,
        Self::Sales,
        Self::Marketing,
        Self::Hr,
        Self::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Engineering => "engineering",
            Self::Product => "product",
            Self::Design => "design",
            Self::Sales => "sales",
            Self::Marketing => "marketing",
            Self::Hr => "hr",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(department_display(self.code(), None))
    }
}

impl FromStr for Department {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.code() == wanted)
            .ok_or_else(|| {
                DashboardError::invalid("department", format!("Unknown department '{}'", s))
            })
    }
}

/// Form contents as typed. Every field is text until `validate` succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDraft {
    pub title: String,
    pub department: String,
    pub custom_department: String,
    pub location: String,
    pub positions: String,
    pub requirements: String,
    pub application_open_date: String,
    pub application_open_time: String,
    pub application_close_date: String,
    pub application_close_time: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedJob {
    pub title: String,
    pub department: Department,
    pub custom_department: Option<String>,
    pub location: String,
    pub positions: u32,
    pub requirements: String,
    pub window: ApplicationWindow,
    pub questions: Vec<String>,
}

impl JobDraft {
    /// Draft pre-filled from an existing posting, for edit mode.
    pub fn from_job(job: &Job) -> Self {
        let (open_date, open_time, close_date, close_time) = match &job.window {
            Some(w) => (
                w.opens_at.format(DATE_FORMAT).to_string(),
                w.opens_at.format(TIME_FORMAT).to_string(),
                w.closes_at.format(DATE_FORMAT).to_string(),
                w.closes_at.format(TIME_FORMAT).to_string(),
            ),
            None => Default::default(),
        };

        Self {
            title: job.title.clone(),
            department: job.department.clone(),
            custom_department: job.custom_department.clone().unwrap_or_default(),
            location: job.location.clone(),
            positions: job.positions.to_string(),
            requirements: job.requirements.clone(),
            application_open_date: open_date,
            application_open_time: open_time,
            application_close_date: close_date,
            application_close_time: close_time,
            questions: job.questions.clone(),
        }
    }

    fn filled_questions(&self) -> Vec<String> {
        self.questions
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> DashboardResult<ValidatedJob> {
        let mut errors = Vec::new();

        let mut required = |field: &str, value: &str, label: &str| {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, format!("{} is required", label)));
                false
            } else {
                true
            }
        };

        let has_title = required("title", &self.title, "Job title");
        let has_department = required("department", &self.department, "Department");
        let has_location = required("location", &self.location, "Location");
        let has_positions = required("positions", &self.positions, "Number of positions");
        let has_requirements = required("requirements", &self.requirements, "Job requirements");
        let has_open =
            required("application_open_date", &self.application_open_date, "Open date")
                & required("application_open_time", &self.application_open_time, "Open time");
        let has_close =
            required("application_close_date", &self.application_close_date, "Close date")
                & required("application_close_time", &self.application_close_time, "Close time");

        let department = if has_department {
            match self.department.parse::<Department>() {
                Ok(d) => Some(d),
                Err(e) => {
                    errors.extend(e.field_errors().iter().cloned());
                    None
                }
            }
        } else {
            None
        };

        let custom_department = match department {
            Some(Department::Other) if self.custom_department.trim().is_empty() => {
                errors.push(FieldError::new(
                    "custom_department",
                    "Specify the department name",
                ));
                None
            }
            Some(Department::Other) => Some(self.custom_department.trim().to_string()),
            _ => None,
        };

        let positions = if has_positions {
            match self.positions.trim().parse::<u32>() {
                Ok(n) if n >= 1 => Some(n),
                _ => {
                    errors.push(FieldError::new(
                        "positions",
                        "Must be a whole number of at least 1",
                    ));
                    None
                }
            }
        } else {
            None
        };

        let opens_at = if has_open {
            parse_datetime(
                &self.application_open_date,
                &self.application_open_time,
                "application_open",
                &mut errors,
            )
        } else {
            None
        };
        let closes_at = if has_close {
            parse_datetime(
                &self.application_close_date,
                &self.application_close_time,
                "application_close",
                &mut errors,
            )
        } else {
            None
        };
        if let (Some(open), Some(close)) = (opens_at, closes_at) {
            if close <= open {
                errors.push(FieldError::new(
                    "application_close_date",
                    "Applications must close after they open",
                ));
            }
        }

        if self.filled_questions().len() > MAX_SCREENING_QUESTIONS {
            errors.push(FieldError::new(
                "questions",
                format!("At most {} screening questions", MAX_SCREENING_QUESTIONS),
            ));
        }

        match (department, positions, opens_at, closes_at) {
            (Some(department), Some(positions), Some(opens_at), Some(closes_at))
                if errors.is_empty() && has_title && has_location && has_requirements =>
            {
                Ok(ValidatedJob {
                    title: self.title.trim().to_string(),
                    department,
                    custom_department,
                    location: self.location.trim().to_string(),
                    positions,
                    requirements: self.requirements.trim().to_string(),
                    window: ApplicationWindow { opens_at, closes_at },
                    questions: self.filled_questions(),
                })
            }
            _ => Err(DashboardError::Validation(errors)),
        }
    }

    /// What an applicant would see. Works on incomplete drafts too.
    pub fn preview(&self, company_name: &str) -> JobPreview {
        let department = match self.department.trim() {
            "" => String::new(),
            code => department_display(code, Some(self.custom_department.trim())).to_string(),
        };

        let period = match (
            NaiveDate::parse_from_str(self.application_open_date.trim(), DATE_FORMAT),
            NaiveDate::parse_from_str(self.application_close_date.trim(), DATE_FORMAT),
        ) {
            (Ok(open), Ok(close)) => Some(format!(
                "{} to {}",
                open.format("%-m/%-d/%Y"),
                close.format("%-m/%-d/%Y")
            )),
            _ => None,
        };

        let title = self.title.trim();
        let requirements = self.requirements.trim();

        JobPreview {
            company_name: company_name.to_string(),
            company_initial: company_name.chars().next().map(String::from).unwrap_or_default(),
            title: if title.is_empty() { "Job Title".to_string() } else { title.to_string() },
            subtitle: format!("{} • {}", department, self.location.trim()),
            application_period: period,
            positions: self.positions.trim().to_string(),
            requirements: if requirements.is_empty() {
                "No requirements specified".to_string()
            } else {
                requirements.to_string()
            },
            questions: self.filled_questions(),
        }
    }
}

fn parse_datetime(
    date: &str,
    time: &str,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| errors.push(FieldError::new(format!("{}_date", field), "Use YYYY-MM-DD")))
        .ok();
    let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
        .map_err(|_| errors.push(FieldError::new(format!("{}_time", field), "Use HH:MM")))
        .ok();
    Some(date?.and_time(time?))
}

impl ValidatedJob {
    /// A fresh open posting with no applications yet.
    pub fn into_new_job(self, id: RecordId, created_at: NaiveDate) -> Job {
        Job {
            id,
            title: self.title,
            department: self.department.code().to_string(),
            custom_department: self.custom_department,
            location: self.location,
            applications: 0,
            status: JobStatus::Open,
            created_at,
            positions: self.positions,
            requirements: self.requirements,
            questions: self.questions,
            window: Some(self.window),
        }
    }

    /// Edited fields over an existing posting; id, status, counts and creation date stay.
    pub fn apply_to(self, existing: &Job) -> Job {
        Job {
            title: self.title,
            department: self.department.code().to_string(),
            custom_department: self.custom_department,
            location: self.location,
            positions: self.positions,
            requirements: self.requirements,
            questions: self.questions,
            window: Some(self.window),
            ..existing.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPreview {
    pub company_name: String,
    pub company_initial: String,
    pub title: String,
    pub subtitle: String,
    pub application_period: Option<String>,
    pub positions: String,
    pub requirements: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostingMode {
    Create,
    Edit(RecordId),
}

/// Result of a successful submit: the stored posting and its public apply link.
#[derive(Debug, Clone, Serialize)]
pub struct PostingReceipt {
    pub job: Job,
    pub link: String,
    pub updated: bool,
}

/// Input type of an application-form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    Text,
    Number,
    Email,
    File,
}

impl QuestionType {
    pub const ALL: [Self; 4] = [Self::Text, Self::Number, Self::Email, Self::File];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::File => "file",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                DashboardError::invalid("type", format!("Unknown question type '{}'", s))
            })
    }
}

/// Fields every application form starts with. They cannot be removed.
pub const DEFAULT_FORM_FIELDS: [(&str, QuestionType); 4] = [
    ("Full Name", QuestionType::Text),
    ("Email Address", QuestionType::Email),
    ("Phone Number", QuestionType::Text),
    ("CV Upload", QuestionType::File),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormQuestion {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub required: bool,
}

/// Body of an add-question request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewQuestion {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
}

/// One field as an applicant sees it. Default fields carry no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub id: Option<String>,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub required: bool,
    pub default: bool,
}

/// Application form of one posting: the default fields plus custom questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    questions: Vec<FormQuestion>,
    next_id: u32,
    published: bool,
}

impl ApplicationForm {
    pub fn questions(&self) -> &[FormQuestion] {
        &self.questions
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    /// Appends a required question. A blank label is rejected and nothing changes.
    pub fn add_question(&mut self, question: &NewQuestion) -> DashboardResult<&FormQuestion> {
        let label = question.label.trim();
        if label.is_empty() {
            return Err(DashboardError::invalid("label", "Question text is required"));
        }

        self.next_id += 1;
        self.questions.push(FormQuestion {
            id: format!("q{}", self.next_id),
            label: label.to_string(),
            kind: question.kind,
            required: true,
        });
        Ok(&self.questions[self.questions.len() - 1])
    }

    pub fn remove_question(&mut self, id: &str) -> DashboardResult<FormQuestion> {
        let idx = self
            .questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| {
                DashboardError::invalid("question_id", format!("No question '{}' on this form", id))
            })?;
        Ok(self.questions.remove(idx))
    }

    pub fn publish(&mut self) {
        self.published = true;
    }

    /// Default fields first, then custom questions in the order they were added.
    pub fn fields(&self) -> Vec<FormField> {
        let defaults = DEFAULT_FORM_FIELDS.iter().map(|(label, kind)| FormField {
            id: None,
            label: label.to_string(),
            kind: *kind,
            required: true,
            default: true,
        });
        let custom = self.questions.iter().map(|q| FormField {
            id: Some(q.id.clone()),
            label: q.label.clone(),
            kind: q.kind,
            required: q.required,
            default: false,
        });
        defaults.chain(custom).collect()
    }

    pub fn view(&self, job: &Job) -> FormView {
        FormView {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            fields: self.fields(),
            published: self.published,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub job_id: RecordId,
    pub job_title: String,
    pub fields: Vec<FormField>,
    pub published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures;

    fn draft() -> JobDraft {
        JobDraft {
            title: "Data Engineer".to_string(),
            department: "engineering".to_string(),
            location: "Berlin".to_string(),
            positions: "2".to_string(),
            requirements: "SQL, Python".to_string(),
            application_open_date: "2025-01-10".to_string(),
            application_open_time: "09:00".to_string(),
            application_close_date: "2025-03-01".to_string(),
            application_close_time: "17:30".to_string(),
            questions: vec!["Why data?".to_string(), "  ".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft() {
        let job = draft().validate().unwrap();
        assert_eq!(job.department, Department::Engineering);
        assert_eq!(job.positions, 2);
        assert_eq!(job.questions, vec!["Why data?"]);
        assert_eq!(job.window.closes_at.format("%H:%M").to_string(), "17:30");
    }

    #[test]
    fn test_empty_draft_reports_all_required_fields() {
        let err = JobDraft::default().validate().unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|f| f.field.as_str()).collect();
        for field in [
            "title",
            "department",
            "location",
            "positions",
            "requirements",
            "application_open_date",
            "application_close_time",
        ] {
            assert!(fields.contains(&field), "missing {}", field);
        }
    }

    #[test]
    fn test_other_department_needs_name() {
        let mut d = draft();
        d.department = "other".to_string();
        let err = d.validate().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "custom_department");

        d.custom_department = "Research".to_string();
        let job = d.validate().unwrap();
        assert_eq!(job.custom_department.as_deref(), Some("Research"));
    }

    #[test]
    fn test_positions_must_be_positive() {
        let mut d = draft();
        d.positions = "0".to_string();
        assert!(d.validate().is_err());
        d.positions = "two".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_close_must_follow_open() {
        let mut d = draft();
        d.application_close_date = "2025-01-10".to_string();
        d.application_close_time = "09:00".to_string();
        let err = d.validate().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "application_close_date");
    }

    #[test]
    fn test_too_many_questions() {
        let mut d = draft();
        d.questions = (1..=5).map(|i| format!("Q{}", i)).collect();
        let err = d.validate().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "questions");
    }

    #[test]
    fn test_edit_draft_round_trips_fixture() {
        let job = fixtures::jobs().remove(0);
        let d = JobDraft::from_job(&job);
        assert_eq!(d.application_open_time, "09:00");
        assert_eq!(d.questions.len(), 4);

        let edited = d.validate().unwrap().apply_to(&job);
        assert_eq!(edited, job);
    }

    #[test]
    fn test_preview() {
        let mut d = draft();
        d.requirements = String::new();
        let preview = d.preview("Acme Corporation");
        assert_eq!(preview.company_initial, "A");
        assert_eq!(preview.subtitle, "Engineering • Berlin");
        assert_eq!(preview.application_period.as_deref(), Some("1/10/2025 to 3/1/2025"));
        assert_eq!(preview.requirements, "No requirements specified");
        assert_eq!(preview.questions.len(), 1);

        assert_eq!(JobDraft::default().preview("Acme").title, "Job Title");
    }

    fn question(label: &str, kind: QuestionType) -> NewQuestion {
        NewQuestion {
            label: label.to_string(),
            kind,
        }
    }

    #[test]
    fn test_form_starts_with_default_fields() {
        let form = ApplicationForm::default();
        let fields = form.fields();
        let labels: Vec<_> = fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Full Name", "Email Address", "Phone Number", "CV Upload"]
        );
        assert!(fields.iter().all(|f| f.required && f.default && f.id.is_none()));
        assert_eq!(fields[3].kind, QuestionType::File);
    }

    #[test]
    fn test_add_and_remove_questions() {
        let mut form = ApplicationForm::default();
        let first = form
            .add_question(&question("  Years of Go experience ", QuestionType::Number))
            .unwrap()
            .id
            .clone();
        form.add_question(&question("Portfolio", QuestionType::File))
            .unwrap();

        let fields = form.fields();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[4].label, "Years of Go experience");
        assert_eq!(fields[4].kind, QuestionType::Number);
        assert!(fields[4].required && !fields[4].default);

        let removed = form.remove_question(&first).unwrap();
        assert_eq!(removed.label, "Years of Go experience");
        assert_eq!(form.questions().len(), 1);
        assert!(form.remove_question(&first).is_err());

        // ids are never reused
        let third = form.add_question(&question("Start date", QuestionType::Text)).unwrap();
        assert_eq!(third.id, "q3");
    }

    #[test]
    fn test_blank_question_is_rejected() {
        let mut form = ApplicationForm::default();
        let err = form.add_question(&question("   ", QuestionType::Text)).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "label");
        assert!(form.questions().is_empty());
    }

    #[test]
    fn test_question_type_wire_form() {
        assert_eq!("EMAIL".parse::<QuestionType>().unwrap(), QuestionType::Email);
        assert!("date".parse::<QuestionType>().is_err());

        let q: NewQuestion = serde_json::from_str(r#"{"label": "Age", "type": "number"}"#).unwrap();
        assert_eq!(q.kind, QuestionType::Number);
        let q: NewQuestion = serde_json::from_str(r#"{"label": "Why us?"}"#).unwrap();
        assert_eq!(q.kind, QuestionType::Text);
    }
}
