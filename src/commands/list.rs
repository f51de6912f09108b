//! List the ordered contents of a category

use crate::category::Category;
use crate::collection::Collection;
use crate::error::Result;
use crate::Folio;

/// Print items in output order, then the documents that would be skipped
pub fn run(folio: &Folio, category: Category) -> Result<()> {
    let collection = super::render::assemble(folio, &folio.renderer(), category)?;
    for line in summarize(&collection) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per item with its sort fields, plus one per skipped document
pub fn summarize(collection: &Collection) -> Vec<String> {
    let fields = collection.category.sort_fields();
    let mut lines = vec![format!(
        "{} ({}):",
        collection.category,
        collection.len()
    )];

    for (i, item) in collection.items.iter().enumerate() {
        let keys = fields
            .iter()
            .map(|f| format!("{}={}", f.key, item.sort_value(f)))
            .collect::<Vec<_>>()
            .join(" ");
        let title = item
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or("Untitled");
        lines.push(format!("  {:>3}. {} - {} [{}]", i + 1, keys, title, item.source));
    }

    if !collection.skipped.is_empty() {
        lines.push(format!("Skipped ({}):", collection.skipped.len()));
        for skipped in &collection.skipped {
            lines.push(format!("  {}", skipped));
        }
    }

    lines
}
