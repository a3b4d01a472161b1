//! Configuration module for Quill.

use serde::Deserialize;
use std::path::Path;

use crate::{QuillError, Result};

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Populate an empty database with a demo user, posts and comments.
    #[serde(default)]
    pub seed_demo_data: bool,
}

fn default_db_path() -> String {
    "data/quill.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            seed_demo_data: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/quill.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// JWT secret key (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token expiry in seconds.
    #[serde(default = "default_jwt_access_expiry")]
    pub jwt_access_token_expiry_secs: u64,
    /// Require a matching CSRF token on mutating blog requests.
    #[serde(default = "default_csrf_protection")]
    pub csrf_protection: bool,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    8080
}

fn default_jwt_access_expiry() -> u64 {
    900 // 15 minutes
}

fn default_csrf_protection() -> bool {
    true
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            jwt_secret: String::new(),
            jwt_access_token_expiry_secs: default_jwt_access_expiry(),
            csrf_protection: default_csrf_protection(),
        }
    }
}

/// Blog listing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogConfig {
    /// Posts per page on the post index.
    #[serde(default = "default_page_size")]
    pub posts_per_page: u32,
    /// Comments per page on the post detail view.
    #[serde(default = "default_page_size")]
    pub comments_per_page: u32,
    /// Upper bound for a client-supplied `per_page`.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,
}

fn default_page_size() -> u32 {
    10
}

fn default_max_per_page() -> u32 {
    100
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_per_page: default_page_size(),
            comments_per_page: default_page_size(),
            max_per_page: default_max_per_page(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Blog listing configuration.
    #[serde(default)]
    pub blog: BlogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(QuillError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| QuillError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `QUILL_JWT_SECRET`: Override the JWT secret key
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("QUILL_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.web.jwt_secret = jwt_secret;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the JWT secret is not set or a page size is zero.
    pub fn validate(&self) -> Result<()> {
        if self.web.jwt_secret.is_empty() {
            return Err(QuillError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via QUILL_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.blog.posts_per_page == 0
            || self.blog.comments_per_page == 0
            || self.blog.max_per_page == 0
        {
            return Err(QuillError::Config(
                "page sizes must be greater than zero".to_string(),
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
        let config = Config::default();

        assert_eq!(config.database.path, "data/quill.db");
        assert!(!config.database.seed_demo_data);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/quill.log");

        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.web.port, 8080);
        assert!(config.web.cors_origins.is_empty());
        assert!(config.web.jwt_secret.is_empty());
        assert_eq!(config.web.jwt_access_token_expiry_secs, 900);
        assert!(config.web.csrf_protection);

        assert_eq!(config.blog.posts_per_page, 10);
        assert_eq!(config.blog.comments_per_page, 10);
        assert_eq!(config.blog.max_per_page, 100);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[database]
path = "custom/blog.sqlite"
seed_demo_data = true

[logging]
level = "debug"
file = "custom/logs/app.log"

[web]
host = "127.0.0.1"
port = 3000
cors_origins = ["http://localhost:3000", "http://localhost:5173"]
jwt_secret = "test-secret-key"
jwt_access_token_expiry_secs = 600
csrf_protection = false

[blog]
posts_per_page = 20
comments_per_page = 5
max_per_page = 50
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.database.path, "custom/blog.sqlite");
        assert!(config.database.seed_demo_data);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");

        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.web.port, 3000);
        assert_eq!(config.web.cors_origins.len(), 2);
        assert_eq!(config.web.cors_origins[0], "http://localhost:3000");
        assert_eq!(config.web.jwt_secret, "test-secret-key");
        assert_eq!(config.web.jwt_access_token_expiry_secs, 600);
        assert!(!config.web.csrf_protection);

        assert_eq!(config.blog.posts_per_page, 20);
        assert_eq!(config.blog.comments_per_page, 5);
        assert_eq!(config.blog.max_per_page, 50);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[web]
port = 3000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.web.port, 3000);
        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/quill.db");
        assert_eq!(config.blog.posts_per_page, 10);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(QuillError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(QuillError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides_jwt_secret() {
        let original = std::env::var("QUILL_JWT_SECRET").ok();

        std::env::set_var("QUILL_JWT_SECRET", "env-secret-key");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.web.jwt_secret, "env-secret-key");

        std::env::set_var("QUILL_JWT_SECRET", "");
        let mut config = Config::default();
        config.web.jwt_secret = "original-secret".to_string();
        config.apply_env_overrides();
        // Empty values do not override
        assert_eq!(config.web.jwt_secret, "original-secret");

        if let Some(val) = original {
            std::env::set_var("QUILL_JWT_SECRET", val);
        } else {
            std::env::remove_var("QUILL_JWT_SECRET");
        }
    }

    #[test]
    fn test_validate_requires_secret() {
        let config = Config::default();
        let result = config.validate();
        assert!(matches!(result, Err(QuillError::Config(msg)) if msg.contains("jwt_secret")));
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.web.jwt_secret = "secret".to_string();
        config.blog.posts_per_page = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ok() {
        let mut config = Config::default();
        config.web.jwt_secret = "secret".to_string();
        assert!(config.validate().is_ok());
    }
}
