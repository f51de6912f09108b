//! Render categories to JSON collections

use std::path::PathBuf;
use std::time::Instant;

use crate::category::Category;
use crate::collection::{Collection, Item};
use crate::content::{ContentLoader, MarkdownRenderer};
use crate::error::{Result, Skipped};
use crate::Folio;

/// Outcome of rendering one category
#[derive(Debug)]
pub struct RenderReport {
    pub category: Category,
    /// Number of items written
    pub count: usize,
    pub output: PathBuf,
    pub skipped: Vec<Skipped>,
}

/// Load, parse and render every document of a category, then order them.
///
/// Broken documents are logged and left out; only run-level failures
/// (missing content directory, unreadable files) are returned as errors.
pub fn assemble(folio: &Folio, renderer: &MarkdownRenderer, category: Category) -> Result<Collection> {
    let dir = folio.category_dir(category);
    tracing::debug!("Loading {} documents from {:?}", category, dir);

    let loader = ContentLoader::new(&dir, &folio.config);
    let mut items = Vec::new();
    let mut skipped = Vec::new();

    for doc in loader.documents()? {
        let doc = doc?;
        match Item::from_document(&doc, renderer) {
            Ok(item) => {
                tracing::debug!("Rendered {}", doc.name);
                items.push(item);
            }
            Err(reason) => {
                // A RendererFault panic was already printed by the panic hook
                tracing::warn!("Skipping {}: {}", doc.name, reason);
                skipped.push(Skipped {
                    name: doc.name,
                    reason,
                });
            }
        }
    }

    Ok(Collection::assemble(category, items, skipped))
}

/// Render one category and write its artifact
pub fn run(folio: &Folio, category: Category) -> Result<RenderReport> {
    let renderer = folio.renderer();
    run_with_renderer(folio, &renderer, category)
}

/// Render every known category, stopping at the first run-level error
pub fn run_all(folio: &Folio) -> Result<Vec<RenderReport>> {
    run_many(folio, &Category::ALL)
}

/// Render several categories with one shared renderer, in the given order
pub fn run_many(folio: &Folio, categories: &[Category]) -> Result<Vec<RenderReport>> {
    let renderer = folio.renderer();
    categories
        .iter()
        .map(|&category| run_with_renderer(folio, &renderer, category))
        .collect()
}

fn run_with_renderer(
    folio: &Folio,
    renderer: &MarkdownRenderer,
    category: Category,
) -> Result<RenderReport> {
    let start = Instant::now();
    let collection = assemble(folio, renderer, category)?;

    let output = folio.artifact_path(category);
    collection.write(&output)?;

    tracing::info!(
        "Rendered {} {} items to {:?} in {:.2}s",
        collection.len(),
        category,
        output,
        start.elapsed().as_secs_f64()
    );

    Ok(RenderReport {
        category,
        count: collection.len(),
        output,
        skipped: collection.skipped,
    })
}
