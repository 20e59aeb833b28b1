// src/core/config_manager.rs
//! One place that turns configuration into running collaborators.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use super::link_share::{CommandClipboard, LinkSharer, MemoryClipboard};
use super::record_api::{MockRecordApi, RecordApi};
use super::service_client::HttpRecordApi;
use crate::app_log;
use crate::environment::EnvironmentConfig;
use crate::types::SeedData;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment_name: String,
    pub environment: EnvironmentConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub api_base_url: Option<String>,
    pub timeout_seconds: u64,
    pub simulated_latency: Duration,
}

impl ConfigManager {
    pub fn load() -> Result<Self> {
        let environment = EnvironmentConfig::load()?;
        Ok(Self::from_environment(
            EnvironmentConfig::get_environment(),
            environment,
        ))
    }

    pub fn from_environment(environment_name: String, environment: EnvironmentConfig) -> Self {
        let service = ServiceConfig {
            api_base_url: environment.api_base_url.clone(),
            timeout_seconds: environment.request_timeout_seconds,
            simulated_latency: Duration::from_millis(environment.simulated_latency_ms),
        };
        Self {
            environment_name,
            environment,
            service,
        }
    }

    pub fn seed_data(&self) -> Result<SeedData> {
        match &self.environment.seed_file {
            Some(path) => {
                app_log!(info, "Loading seed records from {}", path.display());
                SeedData::load(path)
            }
            None => Ok(SeedData::builtin()),
        }
    }

    /// HTTP collaborator when a base URL is configured, otherwise the in-memory one.
    pub fn build_api(&self) -> Result<Arc<dyn RecordApi>> {
        match &self.service.api_base_url {
            Some(url) => {
                app_log!(info, "Using record service at {}", url);
                let api = HttpRecordApi::new(url, self.service.timeout_seconds)
                    .context("Failed to set up record service client")?;
                Ok(Arc::new(api))
            }
            None => {
                app_log!(
                    info,
                    "Using in-memory records ({}ms simulated latency)",
                    self.service.simulated_latency.as_millis()
                );
                Ok(Arc::new(MockRecordApi::new(
                    self.seed_data()?,
                    self.service.simulated_latency,
                )))
            }
        }
    }

    pub fn build_link_sharer(&self) -> LinkSharer {
        LinkSharer::new(
            self.environment.public_base_url.clone(),
            Box::new(CommandClipboard::detect()),
        )
        .with_fallback(Box::new(MemoryClipboard::default()))
    }
}
