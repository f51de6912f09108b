//! Content loader - enumerates the documents of a category

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::error::{Error, Result, SkipReason};

/// Unparsed contents of one source file
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// File name, used in diagnostics and for tie-breaking
    pub name: String,
    pub path: PathBuf,
    bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            bytes: bytes.into(),
        }
    }

    /// Document text, if the file is valid UTF-8
    pub fn text(&self) -> std::result::Result<&str, SkipReason> {
        std::str::from_utf8(&self.bytes).map_err(|_| SkipReason::NotUtf8)
    }
}

/// Lists and reads the documents directly inside one category directory
pub struct ContentLoader<'a> {
    dir: PathBuf,
    config: &'a SiteConfig,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new<P: AsRef<Path>>(dir: P, config: &'a SiteConfig) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            config,
        }
    }

    /// Lazily read every document, in file-name order.
    ///
    /// Each call walks the directory again. Subdirectories are not entered.
    pub fn documents(&self) -> Result<impl Iterator<Item = Result<RawDocument>> + '_> {
        if !self.dir.is_dir() {
            return Err(Error::MissingContentDir(self.dir.clone()));
        }

        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        Ok(walker.into_iter().filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(self.dir.as_path()).to_path_buf();
                    return Some(Err(Error::io(path, e.into())));
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_document(path) {
                tracing::debug!("Ignoring {:?}", path);
                return None;
            }
            Some(read_document(path))
        }))
    }

    /// Check if a file has one of the configured document extensions
    fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.config.is_document_extension(e))
            .unwrap_or(false)
    }
}

fn read_document(path: &Path) -> Result<RawDocument> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    tracing::debug!("Read {} ({} bytes)", name, bytes.len());

    Ok(RawDocument {
        name,
        path: path.to_path_buf(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(loader: &ContentLoader) -> Vec<String> {
        loader
            .documents()
            .unwrap()
            .map(|doc| doc.unwrap().name)
            .collect()
    }

    #[test]
    fn test_lists_markdown_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b-post.md"), "---\na: 1\n---\n").unwrap();
        fs::write(dir.path().join("a-post.md"), "---\na: 1\n---\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("README"), "ignored").unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts").join("nested.md"), "---\na: 1\n---\n").unwrap();

        let config = SiteConfig::default();
        let loader = ContentLoader::new(dir.path(), &config);
        assert_eq!(names(&loader), vec!["a-post.md", "b-post.md"]);
    }

    #[test]
    fn test_listing_is_restartable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.md"), "x").unwrap();
        fs::write(dir.path().join("two.MD"), "y").unwrap();

        let config = SiteConfig::default();
        let loader = ContentLoader::new(dir.path(), &config);
        let first = names(&loader);
        assert_eq!(first, names(&loader));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.markdown"), "x").unwrap();
        fs::write(dir.path().join("b.md"), "x").unwrap();

        let config = SiteConfig {
            extensions: vec![".markdown".to_string()],
            ..Default::default()
        };
        let loader = ContentLoader::new(dir.path(), &config);
        assert_eq!(names(&loader), vec!["a.markdown"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let loader = ContentLoader::new(dir.path().join("nope"), &config);
        assert!(matches!(
            loader.documents().err(),
            Some(Error::MissingContentDir(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_is_reported_per_document() {
        let doc = RawDocument::new("bad.md", vec![0x2d, 0xff, 0xfe]);
        assert!(matches!(doc.text(), Err(SkipReason::NotUtf8)));
        let doc = RawDocument::new("ok.md", "---\n");
        assert_eq!(doc.text().unwrap(), "---\n");
    }
}
