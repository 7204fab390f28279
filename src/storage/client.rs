use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::AppError;

/// File extensions recognised as posts, in lookup priority order.
pub const CONTENT_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Trait for the durable source of raw post text.
///
/// Abstracted as a trait so tests can swap in a mock or an in-memory store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Every slug currently available, in ascending order.
    async fn list_slugs(&self) -> Result<Vec<String>, AppError>;

    /// Raw bytes of the post stored under `slug`. Returns `None` if it doesn't exist.
    async fn read(&self, slug: &str) -> Result<Option<Vec<u8>>, AppError>;
}

/// Whether `slug` is non-empty and made only of `[A-Za-z0-9_-]`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Filesystem implementation: one markdown file per post in a flat directory,
/// the file stem being the slug.
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn unavailable(&self, action: &str, e: std::io::Error) -> AppError {
        AppError::StoreUnavailable(format!(
            "Failed to {} '{}': {}",
            action,
            self.root.display(),
            e
        ))
    }
}

/// Slug for a directory entry, if it names a post file.
fn slug_for_path(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if !CONTENT_EXTENSIONS.contains(&ext) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    Some(stem.to_string())
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn list_slugs(&self) -> Result<Vec<String>, AppError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| self.unavailable("read content directory", e))?;

        let mut slugs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| self.unavailable("read content directory", e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| self.unavailable("stat entry in", e))?;
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            let Some(slug) = slug_for_path(&path) else {
                continue;
            };
            if !is_valid_slug(&slug) {
                tracing::warn!(path = %path.display(), "Skipping post with a non URL-safe file name");
                continue;
            }
            if slugs.contains(&slug) {
                tracing::warn!(%slug, path = %path.display(), "Duplicate slug, keeping the first file");
                continue;
            }
            slugs.push(slug);
        }

        slugs.sort();
        Ok(slugs)
    }

    async fn read(&self, slug: &str) -> Result<Option<Vec<u8>>, AppError> {
        if !is_valid_slug(slug) {
            return Ok(None);
        }

        for ext in CONTENT_EXTENSIONS {
            let path = self.root.join(format!("{}.{}", slug, ext));
            match tokio::fs::read(&path).await {
                Ok(bytes) => return Ok(Some(bytes)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(AppError::StoreUnavailable(format!(
                        "Failed to read '{}': {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        Ok(None)
    }
}

/// In-memory implementation, keyed by slug.
#[derive(Default)]
pub struct MemoryContentStore {
    posts: RwLock<BTreeMap<String, String>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the raw text stored under `slug`.
    pub fn insert(&self, slug: impl Into<String>, raw: impl Into<String>) {
        self.posts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(slug.into(), raw.into());
    }

    pub fn remove(&self, slug: &str) -> bool {
        self.posts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(slug)
            .is_some()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn list_slugs(&self) -> Result<Vec<String>, AppError> {
        let posts = self
            .posts
            .read()
            .map_err(|_| AppError::StoreUnavailable("memory store lock poisoned".into()))?;
        Ok(posts.keys().cloned().collect())
    }

    async fn read(&self, slug: &str) -> Result<Option<Vec<u8>>, AppError> {
        let posts = self
            .posts
            .read()
            .map_err(|_| AppError::StoreUnavailable("memory store lock poisoned".into()))?;
        Ok(posts.get(slug).map(|raw| raw.clone().into_bytes()))
    }
}
