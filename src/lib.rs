//! advent-rs: a date-gated advent calendar blog
//!
//! Each day from the 1st to the 24th unlocks one Markdown-authored article.
//! The [`resolver`] decides whether a requested day may be shown today and
//! loads it from a [`content::ContentStore`]; the [`server`] and the static
//! generator render the outcome.

pub mod calendar;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod resolver;
pub mod server;
pub mod templates;
pub mod view;

use anyhow::Result;
use std::path::Path;

use calendar::{Clock, FixedClock, SystemClock};
use content::{ContentLoader, DirectoryStore, MarkdownRenderer};
use resolver::DailyContentResolver;

/// Clock shared by the CLI commands and the server
pub type SiteClock = Box<dyn Clock + Send + Sync>;

/// Resolver over the site's content directory
pub type SiteResolver = DailyContentResolver<DirectoryStore, SiteClock>;

/// The main application
#[derive(Clone)]
pub struct Advent {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory holding `<day>.md` files
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Advent {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env_override(std::env::var(config::ENV_VAR).ok());

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Today's clock; `today` pins it to a fixed day
    pub fn clock(&self, today: Option<u32>) -> Result<SiteClock> {
        Ok(match today {
            Some(day) => Box::new(FixedClock(day)),
            None => Box::new(SystemClock::from_name(&self.config.timezone)?),
        })
    }

    /// Loader for the content directory
    pub fn loader(&self) -> ContentLoader {
        let renderer = MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        );
        ContentLoader::new(&self.content_dir, renderer)
    }

    /// Resolver over the content directory
    pub fn resolver(&self, today: Option<u32>) -> Result<SiteResolver> {
        Ok(DailyContentResolver::new(
            DirectoryStore::new(self.loader()),
            self.clock(today)?,
            self.config.bypass_lock(),
        ))
    }

    /// Generate the static site for the days open today
    pub async fn generate(&self, today: Option<u32>) -> Result<usize> {
        commands::generate::run(self, today).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
