// src/core/config_manager.rs
//! Client configuration: defaults, optional YAML file, then environment

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_CONFIG_FILE: &str = "resumesense.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
    /// Default key for the saliency feature when the user supplies none.
    pub google_api_key: Option<String>,
}

/// One environment section of `resumesense.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileSection {
    api_url: Option<String>,
    timeout_seconds: Option<u64>,
    google_api_key: Option<String>,
    output_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl ConfigManager {
    /// Load configuration from `.env`, the YAML file if present, and the
    /// process environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = Self::get_environment();
        info!("Loading client configuration for environment: {}", environment);

        let config_path = std::env::var("RESUMESENSE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let file_content = if config_path.exists() {
            Some(
                std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?,
            )
        } else {
            debug!("No config file at {}, using defaults", config_path.display());
            None
        };

        Self::from_sources(&environment, file_content.as_deref(), |key| {
            std::env::var(key).ok()
        })
    }

    /// Merge defaults, a YAML document and a variable lookup. Later sources win.
    pub fn from_sources<F>(environment: &str, yaml: Option<&str>, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let section = match yaml {
            Some(content) => {
                let file: ConfigFile =
                    serde_yaml::from_str(content).context("Failed to parse config file")?;
                match environment {
                    "production" => file.production,
                    _ => file.local,
                }
            }
            None => FileSection::default(),
        };

        let api_url = var("RESUMESENSE_API_URL")
            .or_else(|| var("API_URL"))
            .or(section.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_seconds = match var("RESUMESENSE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("RESUMESENSE_TIMEOUT_SECS must be a number of seconds")?,
            None => section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let google_api_key = var("GOOGLE_API_KEY")
            .or(section.google_api_key)
            .filter(|k| !k.trim().is_empty());

        let output_path = var("RESUMESENSE_OUTPUT")
            .map(PathBuf::from)
            .or(section.output_path)
            .unwrap_or_else(|| PathBuf::from("out"));

        Ok(Self {
            environment: environment.to_string(),
            service: ServiceConfig {
                api_url: normalize_base_url(&api_url),
                timeout_seconds,
                google_api_key,
            },
            output_path,
        })
    }

    fn get_environment() -> String {
        std::env::var("RESUMESENSE_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.service.api_url = normalize_base_url(api_url);
        self
    }

    pub fn with_output_path(mut self, path: &Path) -> Self {
        self.output_path = path.to_path_buf();
        self
    }

    /// Ensure the export directory exists
    pub async fn ensure_directories(&self) -> Result<()> {
        crate::core::FsOps::ensure_dir_exists(&self.output_path).await
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigManager::from_sources("local", None, vars(&[])).expect("config");
        assert_eq!(config.service.api_url, DEFAULT_API_URL);
        assert_eq!(config.service.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.service.google_api_key, None);
        assert_eq!(config.output_path, PathBuf::from("out"));
    }

    #[test]
    fn test_yaml_section_selected_by_environment() {
        let yaml = r#"
local:
  api_url: http://127.0.0.1:9000/
production:
  api_url: https://resumes.example.com
  timeout_seconds: 60
"#;
        let local = ConfigManager::from_sources("local", Some(yaml), vars(&[])).expect("local");
        assert_eq!(local.service.api_url, "http://127.0.0.1:9000");

        let prod =
            ConfigManager::from_sources("production", Some(yaml), vars(&[])).expect("production");
        assert_eq!(prod.service.api_url, "https://resumes.example.com");
        assert_eq!(prod.service.timeout_seconds, 60);
    }

    #[test]
    fn test_environment_overrides_file() {
        let yaml = "local:\n  api_url: http://file\n  google_api_key: from-file\n";
        let config = ConfigManager::from_sources(
            "local",
            Some(yaml),
            vars(&[("API_URL", "http://env"), ("GOOGLE_API_KEY", "from-env")]),
        )
        .expect("config");
        assert_eq!(config.service.api_url, "http://env");
        assert_eq!(config.service.google_api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let config =
            ConfigManager::from_sources("local", None, vars(&[("GOOGLE_API_KEY", "  ")]))
                .expect("config");
        assert_eq!(config.service.google_api_key, None);
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let result = ConfigManager::from_sources(
            "local",
            None,
            vars(&[("RESUMESENSE_TIMEOUT_SECS", "soon")]),
        );
        assert!(result.is_err());
    }
}
