//! inked-rs: markdown insights for a personal portfolio site
//!
//! This crate loads articles from a flat directory of markdown files,
//! derives listing metadata (read time, visibility, date order), renders
//! bodies to highlighted HTML, and can export or serve the insights pages.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The site being worked on
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding `<slug>.md` articles
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// JSON file listing recorded talks
    pub talks_path: std::path::PathBuf,
}

impl Site {
    /// Create a new Site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let talks_path = base_dir.join(&config.talks_file);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            talks_path,
        }
    }

    /// Loader over this site's content directory
    pub fn loader(&self) -> content::ContentLoader {
        content::ContentLoader::for_site(self)
    }

    /// Talks from the site's talks file, empty when there is none
    pub fn talks(&self) -> Result<Vec<content::Talk>> {
        Ok(content::load_talks(&self.talks_path)?)
    }

    /// Generate the static insights pages
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_site_without_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("content/insights"));
        assert_eq!(site.public_dir, dir.path().join("public"));
        assert_eq!(site.talks_path, dir.path().join("json-data/talks.json"));
        assert!(site.talks().unwrap().is_empty());
    }

    #[test]
    fn test_site_reads_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "content_dir: articles\nwords_per_minute: 100\n",
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("articles"));
        assert_eq!(site.loader().content_dir(), dir.path().join("articles"));
    }
}
