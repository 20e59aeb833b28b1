// src/core/mod.rs
//! Collaborators and infrastructure shared by the web server and the CLI

pub mod config_manager;
pub mod link_share;
pub mod pending;
pub mod record_api;
pub mod service_client;

pub use config_manager::{ConfigManager, ServiceConfig};
pub use link_share::{apply_link, Clipboard, CopyFeedback, CopyResult, LinkSharer, MemoryClipboard};
pub use pending::{PendingFlag, PendingGuard};
pub use record_api::{MockRecordApi, RecordApi};
pub use service_client::{HttpRecordApi, ServiceClient};
