// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app_log;

pub const CONFIG_FILE: &str = "config.yaml";

fn default_port() -> u16 {
    4000
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("/tmp/recruitai.log")
}

fn default_latency_ms() -> u64 {
    1000
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origin used to build public apply links.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Artificial delay of the in-memory record service.
    #[serde(default = "default_latency_ms")]
    pub simulated_latency_ms: u64,
    /// When set, records come from this HTTP service instead of the in-memory one.
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub request_timeout_seconds: u64,
    /// TOML file replacing the built-in records.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            public_base_url: default_public_base_url(),
            log_file: default_log_file(),
            simulated_latency_ms: default_latency_ms(),
            api_base_url: None,
            request_timeout_seconds: default_timeout_seconds(),
            seed_file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// `config.yaml` from the working directory, section picked by environment,
    /// then `RECRUITAI_*` overrides. Built-in defaults when the file is absent.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        app_log!(info, "Loading configuration for environment: {}", environment);

        let mut config = Self::load_from_file(Path::new(CONFIG_FILE), &environment)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn get_environment() -> String {
        std::env::var("RECRUITAI_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(config_path: &Path, environment: &str) -> Result<Self> {
        if !config_path.exists() {
            app_log!(
                warn,
                "{} not found, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let config_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config_file: ConfigFile = serde_yaml::from_str(&config_content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let mut env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        // seed paths are relative to the config file
        if let (Some(seed), Some(base)) = (&env_config.seed_file, config_path.parent()) {
            if seed.is_relative() {
                env_config.seed_file = Some(base.join(seed));
            }
        }

        Ok(env_config)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = lookup("RECRUITAI_PORT") {
            self.port = port
                .parse()
                .with_context(|| {
                    format!("RECRUITAI_PORT must be a valid port number, got '{}'", port)
                })?;
        }
        if let Some(url) = lookup("RECRUITAI_API_URL") {
            self.api_base_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        Ok(())
    }
}
