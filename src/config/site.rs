//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    /// JSON array of talks shown on the insights index
    pub talks_file: String,

    // Writing
    pub words_per_minute: usize,
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "The Inked Engineer".to_string(),
            description: String::new(),
            url: "http://localhost:4000".to_string(),

            content_dir: "content/insights".to_string(),
            public_dir: "public".to_string(),
            talks_file: "json-data/talks.json".to_string(),

            words_per_minute: crate::content::WORDS_PER_MINUTE,
            date_format: "DD/MM/YY".to_string(),
            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    /// Fence languages that get highlighted; anything else renders as plain code
    pub languages: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            languages: ["swift", "javascript", "typescript", "css", "html", "bash", "json"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
