use std::sync::Arc;

use crate::content::cache::{CachePolicy, CollectionCache};
use crate::content::index::Collection;
use crate::content::reader::ContentReader;
use crate::content::related::{self, RelatedPolicy};
use crate::error::AppError;
use crate::models::filter::PostFilter;
use crate::models::record::{Adjacent, ContentRecord, ContentSummary, FacetCount, PostDetail};
use crate::rendering::markdown::render_markdown;
use crate::rendering::text::DEFAULT_WORDS_PER_MINUTE;
use crate::storage::client::ContentStore;

/// Tunables for reading and ranking posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSettings {
    /// Reading speed used when a post has no explicit reading time.
    pub words_per_minute: u32,
    /// Default number of related posts on a detail view.
    pub related_limit: usize,
    pub related_policy: RelatedPolicy,
    pub cache_policy: CachePolicy,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            related_limit: 3,
            related_policy: RelatedPolicy::Fill,
            cache_policy: CachePolicy::Always,
        }
    }
}

/// Entry point for every consumer of blog content.
pub struct ContentService {
    reader: ContentReader,
    cache: CollectionCache,
    settings: ContentSettings,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>, settings: ContentSettings) -> Self {
        Self {
            reader: ContentReader::new(store, settings.words_per_minute),
            cache: CollectionCache::new(settings.cache_policy),
            settings,
        }
    }

    pub fn settings(&self) -> &ContentSettings {
        &self.settings
    }

    /// Read every post from the store, dropping the ones that fail validation
    /// or cannot be read.
    ///
    /// Only a failure to enumerate the store fails the whole collection.
    async fn load_collection(&self) -> Result<Collection, AppError> {
        let slugs = self.reader.store().list_slugs().await?;
        let lookups = slugs.iter().map(|slug| self.reader.get_record(slug));
        let results = futures::future::join_all(lookups).await;

        let mut records: Vec<ContentRecord> = Vec::with_capacity(results.len());
        for (slug, result) in slugs.iter().zip(results) {
            match result {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => tracing::error!(%slug, "Skipping unreadable post: {}", e),
            }
        }

        let rejected = slugs.len() - records.len();
        tracing::debug!(posts = records.len(), rejected, "Loaded collection");
        Ok(Collection::from_records(records))
    }

    /// The whole collection, from cache when the policy allows.
    pub async fn collection(&self) -> Result<Arc<Collection>, AppError> {
        self.cache.get_or_build(|| self.load_collection()).await
    }

    /// Look up one post. `Ok(None)` when it is absent or invalid.
    pub async fn get_record(&self, slug: &str) -> Result<Option<ContentRecord>, AppError> {
        match self.settings.cache_policy {
            CachePolicy::Always => self.reader.get_record(slug).await,
            _ => Ok(self.collection().await?.get(slug).cloned()),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<ContentSummary>, AppError> {
        Ok(self.collection().await?.list_all())
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<ContentSummary>, AppError> {
        Ok(self.collection().await?.list_by_category(category))
    }

    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<ContentSummary>, AppError> {
        Ok(self.collection().await?.list_by_tag(tag))
    }

    pub async fn list_featured(&self) -> Result<Vec<ContentSummary>, AppError> {
        Ok(self.collection().await?.list_featured())
    }

    pub async fn all_categories(&self) -> Result<Vec<String>, AppError> {
        Ok(self.collection().await?.all_categories())
    }

    pub async fn all_tags(&self) -> Result<Vec<String>, AppError> {
        Ok(self.collection().await?.all_tags())
    }

    pub async fn category_counts(&self) -> Result<Vec<FacetCount>, AppError> {
        Ok(self.collection().await?.category_counts())
    }

    pub async fn tag_counts(&self) -> Result<Vec<FacetCount>, AppError> {
        Ok(self.collection().await?.tag_counts())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ContentSummary>, AppError> {
        Ok(self.collection().await?.search(query))
    }

    pub async fn filter(&self, filter: &PostFilter) -> Result<Vec<ContentSummary>, AppError> {
        Ok(self.collection().await?.filter(filter))
    }

    /// Posts most related to `record`, ranked with the configured policy.
    pub async fn related_to(
        &self,
        record: &ContentRecord,
        limit: usize,
    ) -> Result<Vec<ContentSummary>, AppError> {
        let collection = self.collection().await?;
        Ok(related::related_to(
            &collection,
            record,
            limit,
            self.settings.related_policy,
        ))
    }

    /// Like [`Self::related_to`], resolving the reference post by slug first.
    pub async fn related_for_slug(
        &self,
        slug: &str,
        limit: usize,
    ) -> Result<Option<Vec<ContentSummary>>, AppError> {
        let Some(record) = self.get_record(slug).await? else {
            return Ok(None);
        };
        self.related_to(&record, limit).await.map(Some)
    }

    pub async fn adjacent(&self, slug: &str) -> Result<Option<Adjacent>, AppError> {
        Ok(self.collection().await?.adjacent(slug))
    }

    /// Everything a post page needs: the post, its HTML, related posts and
    /// neighbours.
    pub async fn detail(&self, slug: &str) -> Result<Option<PostDetail>, AppError> {
        let Some(post) = self.get_record(slug).await? else {
            return Ok(None);
        };

        let collection = self.collection().await?;
        let related = related::related_to(
            &collection,
            &post,
            self.settings.related_limit,
            self.settings.related_policy,
        );
        let adjacent = collection.adjacent(slug).unwrap_or_default();
        let html = render_markdown(&post.body);

        Ok(Some(PostDetail {
            post,
            html,
            related,
            adjacent,
        }))
    }

    /// Drop any cached collection so the next read goes to the store.
    pub fn invalidate(&self) {
        self.cache.invalidate();
        tracing::info!("Collection cache invalidated");
    }
}
