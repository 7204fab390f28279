use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::index::Collection;
use crate::models::record::{ContentRecord, ContentSummary};

/// Points for sharing the reference post's category.
pub const CATEGORY_WEIGHT: u32 = 3;
/// Points for each tag shared with the reference post.
pub const SHARED_TAG_WEIGHT: u32 = 2;

/// What to do when fewer than `limit` candidates score above zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelatedPolicy {
    /// Pad with unrelated posts, in publication order, up to `limit`.
    #[default]
    Fill,
    /// Only return posts with a positive score.
    PositiveOnly,
}

impl fmt::Display for RelatedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelatedPolicy::Fill => write!(f, "fill"),
            RelatedPolicy::PositiveOnly => write!(f, "positive-only"),
        }
    }
}

impl FromStr for RelatedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fill" => Ok(RelatedPolicy::Fill),
            "positive-only" | "positive_only" => Ok(RelatedPolicy::PositiveOnly),
            other => Err(format!(
                "unknown related policy '{}', expected fill or positive-only",
                other
            )),
        }
    }
}

/// A candidate and the score it got against the reference post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scored<'a> {
    pub record: &'a ContentRecord,
    pub score: u32,
}

fn tag_set(tags: &[String]) -> HashSet<String> {
    tags.iter().map(|t| t.to_lowercase()).collect()
}

/// `3 * same category + 2 * shared tags`, both compared case-insensitively.
pub fn relevance_score(reference: &ContentRecord, candidate: &ContentRecord) -> u32 {
    let category = if candidate.in_category(&reference.category) {
        CATEGORY_WEIGHT
    } else {
        0
    };
    let shared = tag_set(&reference.tags)
        .intersection(&tag_set(&candidate.tags))
        .count() as u32;
    category + SHARED_TAG_WEIGHT * shared
}

/// Rank every other post in `collection` against `reference`.
///
/// Highest score first; equal scores keep publication order. The reference
/// itself is never included.
pub fn rank<'a>(
    collection: &'a Collection,
    reference: &ContentRecord,
    limit: usize,
    policy: RelatedPolicy,
) -> Vec<Scored<'a>> {
    let mut scored: Vec<Scored<'a>> = collection
        .records()
        .iter()
        .filter(|candidate| candidate.slug != reference.slug)
        .map(|candidate| Scored {
            record: candidate,
            score: relevance_score(reference, candidate),
        })
        .filter(|s| policy == RelatedPolicy::Fill || s.score > 0)
        .collect();

    // stable: ties stay in publication order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// The `limit` posts most related to `reference`, as summaries.
pub fn related_to(
    collection: &Collection,
    reference: &ContentRecord,
    limit: usize,
    policy: RelatedPolicy,
) -> Vec<ContentSummary> {
    rank(collection, reference, limit, policy)
        .into_iter()
        .map(|s| s.record.summary())
        .collect()
}
