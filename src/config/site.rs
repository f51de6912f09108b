//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    /// Content root; each category reads from `<content_dir>/<category>`
    pub content_dir: String,
    /// Directory the JSON collections are written to
    pub output_dir: String,
    /// Artifact file name, `:category` is replaced by the category name
    pub output_name: String,

    // Writing
    /// Document file extensions, without the leading dot
    pub extensions: Vec<String>,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "backend/data".to_string(),
            output_dir: "frontend/src/data".to_string(),
            output_name: ":categoryData.json".to_string(),
            extensions: vec!["md".to_string()],
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file decodes to null, which means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Whether a file extension marks a content document
    pub fn is_document_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// Class of the `<div>` wrapping highlighted code
    pub css_class: String,
    pub line_number: bool,
    /// syntect theme for inline styles; CSS classes are emitted when unset
    pub theme: Option<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            css_class: "codehilite".to_string(),
            line_number: false,
            theme: None,
        }
    }
}
