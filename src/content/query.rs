use crate::content::index::{matches_query, Collection};
use crate::models::filter::PostFilter;
use crate::models::record::{ContentRecord, ContentSummary};

/// Whether `record` satisfies every dimension `filter` supplies.
///
/// Blank dimensions are ignored. Any one of the requested tags is enough.
pub fn matches(record: &ContentRecord, filter: &PostFilter) -> bool {
    let category_ok = match filter.category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => record.in_category(category),
        _ => true,
    };

    let wanted_tags: Vec<&str> = filter
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    let tags_ok = wanted_tags.is_empty() || wanted_tags.iter().any(|t| record.has_tag(t));

    let query_ok = filter
        .query
        .as_deref()
        .map_or(true, |q| matches_query(record, q));

    category_ok && tags_ok && query_ok
}

impl Collection {
    /// Summaries matching `filter`, in publication order.
    pub fn filter(&self, filter: &PostFilter) -> Vec<ContentSummary> {
        self.records()
            .iter()
            .filter(|r| matches(r, filter))
            .map(ContentRecord::summary)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::index::tests::{abc, record};

    fn slugs(items: &[ContentSummary]) -> Vec<&str> {
        items.iter().map(|s| s.slug.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_is_list_all() {
        let collection = abc();
        assert_eq!(
            collection.filter(&PostFilter::default()),
            collection.list_all()
        );
    }

    #[test]
    fn test_tags_are_or() {
        let collection = abc();
        let filter = PostFilter {
            tags: vec!["y".to_string(), "X".to_string()],
            ..Default::default()
        };
        assert_eq!(slugs(&collection.filter(&filter)), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_dimensions_are_and() {
        let collection = abc();
        let filter = PostFilter {
            category: Some("ai".to_string()),
            tags: vec!["x".to_string()],
            query: None,
        };
        assert_eq!(slugs(&collection.filter(&filter)), vec!["a"]);

        let filter = PostFilter {
            category: Some("DB".to_string()),
            tags: vec!["y".to_string()],
            query: None,
        };
        assert!(collection.filter(&filter).is_empty());
    }

    #[test]
    fn test_query_combines_with_category() {
        let collection = Collection::from_records(vec![
            record("rust-tips", "Engineering", &["rust"], 3),
            record("rust-news", "News", &["rust"], 2),
            record("go-tips", "Engineering", &["go"], 1),
        ]);
        let filter = PostFilter {
            category: Some("engineering".to_string()),
            tags: vec![],
            query: Some("RUST".to_string()),
        };
        assert_eq!(slugs(&collection.filter(&filter)), vec!["rust-tips"]);
    }

    #[test]
    fn test_blank_dimensions_ignored() {
        let collection = abc();
        let filter = PostFilter {
            category: Some(" ".to_string()),
            tags: vec!["".to_string()],
            query: Some(String::new()),
        };
        assert_eq!(collection.filter(&filter).len(), 3);
    }
}
