use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use folio::content::front_matter::{normalize_tags, parse_date, write_record};
use folio::models::record::ContentRecord;
use folio::storage::client::is_valid_slug;

pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub tags: Option<String>,
    pub description: String,
    pub date: Option<String>,
    pub featured: bool,
}

/// Write `<dir>/<slug>.md` and return its path. Never overwrites.
pub fn run(dir: &Path, post: NewPost) -> Result<PathBuf> {
    if !is_valid_slug(&post.slug) {
        bail!("'{}' is not a valid slug", post.slug);
    }
    let path = dir.join(format!("{}.md", post.slug));
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let date = match post.date.as_deref() {
        Some(raw) => parse_date(raw).ok_or_else(|| anyhow!("'{}' is not a valid date", raw))?,
        None => parse_date(&Utc::now().format("%Y-%m-%d").to_string())
            .ok_or_else(|| anyhow!("Failed to compute today's date"))?,
    };
    let tags: Vec<String> = post
        .tags
        .map(|t| t.split(',').map(|s| s.to_string()).collect())
        .unwrap_or_default();
    let description = if post.description.trim().is_empty() {
        post.title.clone()
    } else {
        post.description
    };
    let body = format!("# {}\n\n", post.title);

    let record = ContentRecord {
        slug: post.slug,
        title: post.title,
        description,
        date,
        author: post.author,
        tags: normalize_tags(tags),
        category: post.category,
        featured: post.featured,
        reading_time: 1,
        image: None,
        body,
    };

    let text = write_record(&record)?;
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    std::fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan_dir;

    fn sample(slug: &str) -> NewPost {
        NewPost {
            slug: slug.to_string(),
            title: "Vector Search".to_string(),
            author: "Ana".to_string(),
            category: "AI".to_string(),
            tags: Some("rust, vectors,".to_string()),
            description: String::new(),
            date: Some("2024-03-15".to_string()),
            featured: true,
        }
    }

    #[test]
    fn test_new_post_passes_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = run(dir.path(), sample("vector-search")).unwrap();
        assert!(path.ends_with("vector-search.md"));

        let entries = scan_dir(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        let record = entries[0].as_ref().unwrap();
        assert_eq!(record.tags, vec!["rust", "vectors"]);
        assert_eq!(record.description, "Vector Search");
        assert!(record.featured);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), sample("post")).unwrap();
        assert!(run(dir.path(), sample("post")).is_err());
    }

    #[test]
    fn test_rejects_bad_slug() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), sample("../escape")).is_err());
    }
}
