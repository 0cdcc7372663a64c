//! Configuration management for promptd.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (promptd.yaml)
//!
//! The Notion credentials (API token and prompts database id) are required
//! before any command can run; `validate()` rejects a configuration that
//! lacks them.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Default cache expiry in milliseconds (5 minutes).
pub const DEFAULT_CACHE_TTL_MS: u64 = 5 * 60 * 1000;

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Notion integration token (bearer auth)
    pub notion_token: Option<String>,

    /// Notion database id holding the prompt pages
    pub database_id: Option<String>,

    /// Base URL for the Notion API (override for testing)
    pub notion_base_url: Option<String>,

    /// Cache expiry in milliseconds
    pub cache_ttl_ms: u64,

    /// Default handling mode for composed prompts
    /// ("return-only", "process-locally", "call-external-api")
    pub handling_mode: String,

    /// Optional config file path
    pub config_file: Option<std::path::PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    notion: Option<NotionConfig>,
    cache: Option<CacheConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NotionConfig {
    token: Option<String>,
    #[serde(rename = "databaseId")]
    database_id: Option<String>,
    #[serde(rename = "baseUrl")]
    base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheConfig {
    #[serde(rename = "ttlMs")]
    ttl_ms: Option<u64>,
    #[serde(rename = "handlingMode")]
    handling_mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notion_token: None,
            database_id: None,
            notion_base_url: None,
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            handling_mode: "return-only".to_string(),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `NOTION_API_TOKEN`: Notion integration token
    /// - `NOTION_PROMPTS_DB_ID`: Notion database id for prompts
    /// - `PROMPTD_CONFIG`: Path to config file
    /// - `PROMPTD_CACHE_TTL_MS`: Cache expiry in milliseconds
    /// - `PROMPTD_HANDLING_MODE`: Default composition handling mode
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("PROMPTD_CONFIG") {
            config.config_file = Some(std::path::PathBuf::from(config_file));
        }

        // Load from YAML config file if one was named and exists
        if let Some(config_path) = config.config_file.clone() {
            if config_path.exists() {
                config = config.merge_yaml(&config_path)?;
            }
        }

        // Environment variables override YAML config
        if let Ok(token) = std::env::var("NOTION_API_TOKEN") {
            config.notion_token = Some(token);
        }

        if let Ok(db_id) = std::env::var("NOTION_PROMPTS_DB_ID") {
            config.database_id = Some(db_id);
        }

        if let Ok(ttl) = std::env::var("PROMPTD_CACHE_TTL_MS") {
            config.cache_ttl_ms = ttl.parse().map_err(|_| {
                AppError::Config(format!("Invalid PROMPTD_CACHE_TTL_MS value: {}", ttl))
            })?;
        }

        if let Ok(mode) = std::env::var("PROMPTD_HANDLING_MODE") {
            config.handling_mode = mode;
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &std::path::Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(notion) = config_file.notion {
            if notion.token.is_some() {
                result.notion_token = notion.token;
            }
            if notion.database_id.is_some() {
                result.database_id = notion.database_id;
            }
            if notion.base_url.is_some() {
                result.notion_base_url = notion.base_url;
            }
        }

        if let Some(cache) = config_file.cache {
            if let Some(ttl) = cache.ttl_ms {
                result.cache_ttl_ms = ttl;
            }
            if let Some(mode) = cache.handling_mode {
                result.handling_mode = mode;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    pub fn with_overrides(
        mut self,
        config_file: Option<std::path::PathBuf>,
        cache_ttl_ms: Option<u64>,
        handling_mode: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(ttl) = cache_ttl_ms {
            self.cache_ttl_ms = ttl;
        }

        if let Some(mode) = handling_mode {
            self.handling_mode = mode;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration for startup.
    ///
    /// Missing Notion credentials are fatal: the process must not start
    /// serving without a token and a database id.
    pub fn validate(&self) -> AppResult<()> {
        if self
            .notion_token
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
        {
            return Err(AppError::Config(
                "Notion API token is not configured. Set NOTION_API_TOKEN.".to_string(),
            ));
        }

        if self
            .database_id
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
        {
            return Err(AppError::Config(
                "Notion prompts database id is not configured. Set NOTION_PROMPTS_DB_ID."
                    .to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cache_ttl_ms, DEFAULT_CACHE_TTL_MS);
        assert_eq!(config.handling_mode, "return-only");
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_validate_missing_token() {
        let config = AppConfig {
            database_id: Some("db".to_string()),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_missing_database_id() {
        let config = AppConfig {
            notion_token: Some("secret".to_string()),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_blank_token_rejected() {
        let config = AppConfig {
            notion_token: Some("   ".to_string()),
            database_id: Some("db".to_string()),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_complete_config() {
        let config = AppConfig {
            notion_token: Some("secret".to_string()),
            database_id: Some("db".to_string()),
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            Some(60_000),
            Some("process-locally".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.cache_ttl_ms, 60_000);
        assert_eq!(overridden.handling_mode, "process-locally");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("promptd.yaml");
        std::fs::write(
            &path,
            r#"
notion:
  token: yaml-token
  databaseId: yaml-db
cache:
  ttlMs: 120000
logging:
  level: warn
"#,
        )
        .unwrap();

        let mut config = AppConfig::default();
        let merged = config.merge_yaml(&path).unwrap();

        assert_eq!(merged.notion_token, Some("yaml-token".to_string()));
        assert_eq!(merged.database_id, Some("yaml-db".to_string()));
        assert_eq!(merged.cache_ttl_ms, 120_000);
        assert_eq!(merged.log_level, Some("warn".to_string()));
    }
}
