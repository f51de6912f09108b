//! Remove generated collections

use std::fs;
use std::path::PathBuf;

use crate::category::Category;
use crate::error::{Error, Result};
use crate::Folio;

/// Delete the artifact of every category, returning the paths removed
pub fn run(folio: &Folio) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for category in Category::ALL {
        let path = folio.artifact_path(category);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
            tracing::info!("Deleted: {:?}", path);
            removed.push(path);
        }
    }
    Ok(removed)
}
