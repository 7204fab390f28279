use serde::{Deserialize, Serialize};

/// A structured listing filter.
///
/// Supplied dimensions combine with AND. Within `tags` any single match is
/// enough, the way a tag cloud behaves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub query: Option<String>,
}

impl PostFilter {
    pub fn is_empty(&self) -> bool {
        self.category.as_deref().map_or(true, |c| c.trim().is_empty())
            && self.tags.iter().all(|t| t.trim().is_empty())
            && self.query.as_deref().map_or(true, |q| q.trim().is_empty())
    }
}

/// One page of an ordered listing. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice `items` into the requested page.
    ///
    /// `page` 0 is treated as 1 and `per_page` is clamped to `1..=max_per_page`.
    /// A page past the end has no items but still reports the totals.
    pub fn paginate(items: Vec<T>, page: usize, per_page: usize, max_per_page: usize) -> Self {
        let per_page = per_page.clamp(1, max_per_page.max(1));
        let page = page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page);

        let items = items
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
