//! Collection assembly - merges rendered documents, orders them and writes JSON

mod order;

pub use order::compare_values;

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::io::Write;
use std::path::Path;

use crate::category::{Category, SortField};
use crate::content::{FrontMatter, MarkdownRenderer, Metadata, RawDocument};
use crate::error::{Error, Result, SkipReason, Skipped};

/// Key the rendered body is stored under
pub const BODY_HTML: &str = "body_html";

/// One fully processed document: its front-matter plus `body_html`
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Source file name
    pub source: String,
    fields: Metadata,
}

impl Item {
    pub fn new(source: impl Into<String>, mut metadata: Metadata, body_html: String) -> Self {
        metadata.insert(BODY_HTML.to_string(), Value::String(body_html));
        Self {
            source: source.into(),
            fields: metadata,
        }
    }

    /// Parse and render one document
    pub fn from_document(
        doc: &RawDocument,
        renderer: &MarkdownRenderer,
    ) -> std::result::Result<Self, SkipReason> {
        let (fm, body) = FrontMatter::parse(doc.text()?)?;
        let body_html = renderer.render(body)?;
        Ok(Self::new(doc.name.clone(), fm.into_metadata(), body_html))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn body_html(&self) -> &str {
        self.fields
            .get(BODY_HTML)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn fields(&self) -> &Metadata {
        &self.fields
    }

    /// Value of a sort field, falling back to its default when absent or null
    pub fn sort_value(&self, field: &SortField) -> Value {
        match self.fields.get(field.key) {
            Some(value) if !value.is_null() => value.clone(),
            _ => field.default.value(),
        }
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Ordered items of one category, plus the documents that were left out
#[derive(Debug)]
pub struct Collection {
    pub category: Category,
    pub items: Vec<Item>,
    pub skipped: Vec<Skipped>,
}

impl Collection {
    /// Build a collection, ordering items by the category's policy
    pub fn assemble(category: Category, items: Vec<Item>, skipped: Vec<Skipped>) -> Self {
        let mut collection = Self {
            category,
            items,
            skipped,
        };
        collection.sort();
        collection
    }

    /// Sort descending by the category's fields; ties keep file-name order
    pub fn sort(&mut self) {
        let fields = self.category.sort_fields();
        self.items.sort_by(|a, b| {
            compare_items(b, a, fields).then_with(|| a.source.cmp(&b.source))
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pretty-printed JSON array, non-ASCII written as-is
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    /// Write the JSON artifact, replacing any previous one in a single rename
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| Error::io(tmp.path(), e))?;
        // Temp files are created owner-only; the artifact is a regular source file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|e| Error::io(tmp.path(), e))?;
        }
        tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

        tracing::debug!("Wrote {} bytes to {:?}", json.len(), path);
        Ok(())
    }
}

fn compare_items(a: &Item, b: &Item, fields: &[SortField]) -> Ordering {
    fields
        .iter()
        .map(|field| compare_values(&a.sort_value(field), &b.sort_value(field)))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}
