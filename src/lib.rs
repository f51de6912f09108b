//! folio-render: renders markdown content into ordered JSON collections
//!
//! Each category (blog posts, projects) is a directory of markdown files
//! with YAML front-matter. Rendering a category parses every file, turns
//! its body into HTML, orders the results and writes them as a single JSON
//! array for the website frontend.

pub mod category;
pub mod collection;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;

pub use category::Category;
pub use collection::{Collection, Item};
pub use commands::render::RenderReport;
pub use error::{Error, Result, SkipReason, Skipped};

use std::path::{Path, PathBuf};

/// Config file looked up in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main application handle
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root, one subdirectory per category
    pub content_dir: PathBuf,
    /// Directory the JSON collections are written to
    pub output_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            base_dir,
            content_dir,
            output_dir,
        }
    }

    /// Input directory of a category
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.content_dir.join(category.name())
    }

    /// Where a category's JSON collection is written
    pub fn artifact_path(&self, category: Category) -> PathBuf {
        self.output_dir
            .join(category.artifact_name(&self.config.output_name))
    }

    /// A markdown renderer using the configured highlighting
    pub fn renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::with_options(self.config.highlight.clone())
    }

    /// Build a category's collection without writing it
    pub fn assemble(&self, category: Category) -> Result<Collection> {
        commands::render::assemble(self, &self.renderer(), category)
    }

    /// Render a category and write its JSON artifact
    pub fn render_category(&self, category: Category) -> Result<RenderReport> {
        commands::render::run(self, category)
    }

    /// Render every known category
    pub fn render_all(&self) -> Result<Vec<RenderReport>> {
        commands::render::run_all(self)
    }

    /// Render a category given by name, or every category for `all`.
    ///
    /// Unknown names are rejected before any file is touched.
    pub fn render_named(&self, name: &str) -> Result<Vec<RenderReport>> {
        let categories = Category::parse_selection(name)?;
        self.render_categories(&categories)
    }

    /// Render the given categories in order
    pub fn render_categories(&self, categories: &[Category]) -> Result<Vec<RenderReport>> {
        commands::render::run_many(self, categories)
    }

    /// Remove generated collections
    pub fn clean(&self) -> Result<Vec<PathBuf>> {
        commands::clean::run(self)
    }
}
