use std::path::Path;

use anyhow::{anyhow, Result};
use folio::content::index::Collection;
use folio::content::related::{rank, RelatedPolicy};

use crate::scan::{scan_dir, valid_records};

/// Rank the posts related to `slug` as `(score, slug, title)` rows.
pub fn scores(
    dir: &Path,
    slug: &str,
    limit: usize,
    positive_only: bool,
) -> Result<Vec<(u32, String, String)>> {
    let collection = Collection::from_records(valid_records(scan_dir(dir)?));
    let reference = collection
        .get(slug)
        .ok_or_else(|| anyhow!("No valid post with slug '{}' in {}", slug, dir.display()))?;

    let policy = if positive_only {
        RelatedPolicy::PositiveOnly
    } else {
        RelatedPolicy::Fill
    };

    Ok(rank(&collection, reference, limit, policy)
        .into_iter()
        .map(|s| (s.score, s.record.slug.clone(), s.record.title.clone()))
        .collect())
}

pub fn run(dir: &Path, slug: &str, limit: usize, positive_only: bool) -> Result<()> {
    for (score, slug, title) in scores(dir, slug, limit, positive_only)? {
        println!("{:>3}  {:<32} {}", score, slug, title);
    }
    Ok(())
}
