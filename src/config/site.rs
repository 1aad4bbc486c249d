//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::DEFAULT_THEME;

/// Environment variable overriding `environment`
pub const ENV_VAR: &str = "ADVENT_ENV";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Calendar
    /// IANA timezone deciding when a day starts; empty means local time
    pub timezone: String,
    /// Anything other than "production" opens every door
    pub environment: String,
    /// Open every door regardless of environment
    pub preview: bool,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Advent Calendar".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "posts".to_string(),
            public_dir: "public".to_string(),

            timezone: String::new(),
            environment: "production".to_string(),
            preview: false,

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Apply an environment override, as read from [`ENV_VAR`]
    pub fn apply_env_override(&mut self, value: Option<String>) {
        if let Some(env) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            tracing::debug!("Environment overridden by {}: {}", ENV_VAR, env);
            self.environment = env;
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Whether future days are unlocked
    pub fn bypass_lock(&self) -> bool {
        self.preview || !self.is_production()
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "posts");
        assert!(config.is_production());
        assert!(!config.bypass_lock());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: A React Christmas
url: https://react.christmas
timezone: Europe/Oslo
highlight:
  line_number: true
"#;
        let config = SiteConfig::parse(yaml).unwrap();
        assert_eq!(config.title, "A React Christmas");
        assert_eq!(config.url, "https://react.christmas");
        assert_eq!(config.timezone, "Europe/Oslo");
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, DEFAULT_THEME);
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_empty_config() {
        let config = SiteConfig::parse("\n").unwrap();
        assert_eq!(config.title, "Advent Calendar");
    }

    #[test]
    fn test_bypass_lock() {
        let mut config = SiteConfig::default();
        config.environment = "development".to_string();
        assert!(config.bypass_lock());

        let mut config = SiteConfig::default();
        config.preview = true;
        assert!(config.bypass_lock());
    }

    #[test]
    fn test_env_override() {
        let mut config = SiteConfig::default();
        config.apply_env_override(Some("staging".to_string()));
        assert_eq!(config.environment, "staging");
        assert!(config.bypass_lock());

        config.apply_env_override(Some("  ".to_string()));
        assert_eq!(config.environment, "staging");

        config.apply_env_override(None);
        config.apply_env_override(Some("Production".to_string()));
        assert!(!config.bypass_lock());
    }
}
