use std::sync::Arc;

use crate::content::front_matter::parse_bytes;
use crate::error::AppError;
use crate::models::record::ContentRecord;
use crate::storage::client::{is_valid_slug, ContentStore};

/// Resolves one post by slug: fetch, parse, validate.
#[derive(Clone)]
pub struct ContentReader {
    store: Arc<dyn ContentStore>,
    words_per_minute: u32,
}

impl ContentReader {
    pub fn new(store: Arc<dyn ContentStore>, words_per_minute: u32) -> Self {
        Self {
            store,
            words_per_minute,
        }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Look up a post.
    ///
    /// A missing post and a post that fails validation both come back as
    /// `Ok(None)`; the latter is logged with the slug and offending field.
    /// Only a failing store is an error.
    pub async fn get_record(&self, slug: &str) -> Result<Option<ContentRecord>, AppError> {
        if !is_valid_slug(slug) {
            tracing::debug!(slug, "Ignoring lookup for invalid slug");
            return Ok(None);
        }

        let Some(bytes) = self.store.read(slug).await? else {
            return Ok(None);
        };

        match parse_bytes(slug, &bytes, self.words_per_minute) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(
                    slug,
                    field = e.field().unwrap_or("front matter"),
                    "Rejected post '{}': {}",
                    slug,
                    e
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::client::{MemoryContentStore, MockContentStore};

    fn post(author: Option<&str>) -> String {
        let author = author
            .map(|a| format!("author: {}\n", a))
            .unwrap_or_default();
        format!(
            "---\ntitle: Hello\ndescription: First post\ndate: 2024-01-02\n{}tags: [intro]\ncategory: News\n---\nHello world\n",
            author
        )
    }

    #[tokio::test]
    async fn test_get_record_found() {
        let store = MemoryContentStore::new();
        store.insert("hello", post(Some("Sam")));
        let reader = ContentReader::new(Arc::new(store), 200);

        let record = reader.get_record("hello").await.unwrap().unwrap();
        assert_eq!(record.slug, "hello");
        assert_eq!(record.author, "Sam");
        assert_eq!(record.reading_time, 1);
    }

    #[tokio::test]
    async fn test_get_record_absent_is_none() {
        let reader = ContentReader::new(Arc::new(MemoryContentStore::new()), 200);
        assert!(reader.get_record("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_record_invalid_is_none() {
        let store = MemoryContentStore::new();
        store.insert("anonymous", post(None));
        let reader = ContentReader::new(Arc::new(store), 200);
        assert!(reader.get_record("anonymous").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_slug_never_reaches_store() {
        let mut store = MockContentStore::new();
        store.expect_read().never();
        let reader = ContentReader::new(Arc::new(store), 200);

        assert!(reader.get_record("").await.unwrap().is_none());
        assert!(reader.get_record("../secrets").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockContentStore::new();
        store
            .expect_read()
            .times(1)
            .returning(|_| Err(AppError::StoreUnavailable("disk on fire".into())));
        let reader = ContentReader::new(Arc::new(store), 200);

        match reader.get_record("hello").await {
            Err(AppError::StoreUnavailable(msg)) => assert_eq!(msg, "disk on fire"),
            other => panic!("Expected StoreUnavailable, got: {:?}", other),
        }
    }
}
