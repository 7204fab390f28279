use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published blog post, parsed and validated from the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// URL-safe identifier, derived from the storage unit's name.
    pub slug: String,
    /// Human-readable title.
    pub title: String,
    /// Short description shown on cards and in meta tags.
    pub description: String,
    /// Publication timestamp. Plain dates map to midnight UTC.
    pub date: DateTime<Utc>,
    /// Display name of the author.
    pub author: String,
    /// Free-text labels. Possibly empty, never null.
    pub tags: Vec<String>,
    /// Exactly one category per post.
    pub category: String,
    /// Whether the post is highlighted on landing pages.
    pub featured: bool,
    /// Reading time in whole minutes, always at least 1.
    pub reading_time: u32,
    /// Optional cover image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Raw markdown body.
    pub body: String,
}

/// A [`ContentRecord`] without its body, used for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub author: String,
    pub tags: Vec<String>,
    pub category: String,
    pub featured: bool,
    pub reading_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ContentRecord {
    pub fn summary(&self) -> ContentSummary {
        ContentSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
            author: self.author.clone(),
            tags: self.tags.clone(),
            category: self.category.clone(),
            featured: self.featured,
            reading_time: self.reading_time,
            image: self.image.clone(),
        }
    }

    /// Case-insensitive category comparison.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

impl From<ContentRecord> for ContentSummary {
    fn from(record: ContentRecord) -> Self {
        ContentSummary {
            slug: record.slug,
            title: record.title,
            description: record.description,
            date: record.date,
            author: record.author,
            tags: record.tags,
            category: record.category,
            featured: record.featured,
            reading_time: record.reading_time,
            image: record.image,
        }
    }
}

/// A category or tag together with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub name: String,
    pub count: usize,
}

/// The neighbours of a post in publication order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacent {
    /// The next more recent post, if any.
    pub newer: Option<ContentSummary>,
    /// The next older post, if any.
    pub older: Option<ContentSummary>,
}

/// Everything a detail view needs for one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: ContentRecord,
    /// Sanitized HTML rendering of the body.
    pub html: String,
    pub related: Vec<ContentSummary>,
    pub adjacent: Adjacent,
}
