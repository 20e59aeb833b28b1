// src/main.rs
use anyhow::Result;
use recruitai_dashboard::app_log;
use recruitai_dashboard::logging::init_file_logging;
use recruitai_dashboard::{core::ConfigManager, start_web_server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration using unified ConfigManager
    let config = ConfigManager::load()?;

    // Initialize logging before anything else talks
    init_file_logging(&config.environment.log_file)?;

    app_log!(info, "Starting RecruitAI dashboard API server");
    app_log!(info, "Environment: {}", config.environment_name);
    app_log!(info, "Server: http://0.0.0.0:{}", config.environment.port);
    app_log!(info, "Public links: {}", config.environment.public_base_url);
    match &config.service.api_base_url {
        Some(url) => app_log!(info, "Record service: {}", url),
        None => app_log!(info, "Record service: in-memory seed data"),
    }

    start_web_server(config).await
}
