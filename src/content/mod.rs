//! Content module - loads documents, parses front-matter, renders markdown

mod frontmatter;
pub mod loader;
mod markdown;

pub use frontmatter::FrontMatter;
pub use loader::{ContentLoader, RawDocument};
pub use markdown::MarkdownRenderer;

/// Author-defined front-matter fields, in header order
pub type Metadata = serde_json::Map<String, serde_json::Value>;
