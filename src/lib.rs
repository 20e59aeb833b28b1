// src/lib.rs
//! RecruitAI dashboard: list-filter-detail screens over applications, candidates
//! and job postings, served over HTTP and from the command line.

pub mod logging;
pub mod core;
pub mod dashboard;
pub mod dashboard_cli;
pub mod environment;
pub mod error;
pub mod job_posting;
pub mod lfd;
pub mod profile;
pub mod types;
pub mod usage;
pub mod utils;
pub mod web;
pub mod workspace;

pub use error::{DashboardError, DashboardResult};
pub use web::start_web_server;
pub use workspace::Workspace;
