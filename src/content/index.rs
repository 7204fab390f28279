use std::collections::HashMap;

use crate::models::record::{Adjacent, ContentRecord, ContentSummary, FacetCount};

/// Every valid post, ordered newest first.
///
/// Posts published at the same instant are ordered by slug ascending, so the
/// order never depends on how the store enumerates its entries.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    records: Vec<ContentRecord>,
}

/// Ordering shared by every listing: date descending, then slug ascending.
pub fn publication_order(a: &ContentRecord, b: &ContentRecord) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug))
}

/// Whether `record` matches a free-text query.
///
/// Case-insensitive substring match over title, description, author,
/// category and tags. A blank query matches everything.
pub(crate) fn matches_query(record: &ContentRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let haystack = format!(
        "{} {} {} {} {}",
        record.title,
        record.description,
        record.author,
        record.category,
        record.tags.join(" ")
    )
    .to_lowercase();
    haystack.contains(&needle)
}

/// Count facet values case-insensitively, reporting the first spelling seen,
/// sorted by name.
fn count_facets<'a>(values: impl Iterator<Item = &'a str>) -> Vec<FacetCount> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut facets: Vec<FacetCount> = Vec::new();

    for value in values {
        let key = value.to_lowercase();
        match positions.get(&key) {
            Some(&idx) => facets[idx].count += 1,
            None => {
                positions.insert(key, facets.len());
                facets.push(FacetCount {
                    name: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    facets.sort_by(|a, b| a.name.cmp(&b.name));
    facets
}

impl Collection {
    /// Build a collection from already validated records.
    ///
    /// If two records share a slug, the one earlier in publication order wins.
    pub fn from_records(mut records: Vec<ContentRecord>) -> Self {
        records.sort_by(publication_order);

        let mut seen: Vec<&str> = Vec::with_capacity(records.len());
        let mut duplicates = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            if seen.contains(&record.slug.as_str()) {
                tracing::warn!(slug = %record.slug, "Duplicate slug in collection, dropping later copy");
                duplicates.push(idx);
            } else {
                seen.push(&record.slug);
            }
        }
        for idx in duplicates.into_iter().rev() {
            records.remove(idx);
        }

        Self { records }
    }

    /// Full records in publication order.
    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&ContentRecord> {
        self.records.iter().find(|r| r.slug == slug)
    }

    fn summaries(&self, keep: impl Fn(&ContentRecord) -> bool) -> Vec<ContentSummary> {
        self.records
            .iter()
            .filter(|r| keep(r))
            .map(ContentRecord::summary)
            .collect()
    }

    /// Every post, newest first.
    pub fn list_all(&self) -> Vec<ContentSummary> {
        self.summaries(|_| true)
    }

    pub fn list_by_category(&self, category: &str) -> Vec<ContentSummary> {
        self.summaries(|r| r.in_category(category))
    }

    pub fn list_by_tag(&self, tag: &str) -> Vec<ContentSummary> {
        self.summaries(|r| r.has_tag(tag))
    }

    pub fn list_featured(&self) -> Vec<ContentSummary> {
        self.summaries(|r| r.featured)
    }

    pub fn search(&self, query: &str) -> Vec<ContentSummary> {
        self.summaries(|r| matches_query(r, query))
    }

    pub fn category_counts(&self) -> Vec<FacetCount> {
        count_facets(self.records.iter().map(|r| r.category.as_str()))
    }

    pub fn tag_counts(&self) -> Vec<FacetCount> {
        count_facets(
            self.records
                .iter()
                .flat_map(|r| r.tags.iter().map(String::as_str)),
        )
    }

    /// Distinct categories, sorted.
    pub fn all_categories(&self) -> Vec<String> {
        self.category_counts().into_iter().map(|f| f.name).collect()
    }

    /// Distinct tags, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        self.tag_counts().into_iter().map(|f| f.name).collect()
    }

    /// The posts immediately newer and older than `slug`, or `None` if the
    /// slug is not in the collection.
    pub fn adjacent(&self, slug: &str) -> Option<Adjacent> {
        let idx = self.records.iter().position(|r| r.slug == slug)?;
        let newer = idx
            .checked_sub(1)
            .and_then(|i| self.records.get(i))
            .map(ContentRecord::summary);
        let older = self.records.get(idx + 1).map(ContentRecord::summary);
        Some(Adjacent { newer, older })
    }
}
