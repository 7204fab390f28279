use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::AppError;
use crate::models::filter::{Page, PostFilter};
use crate::models::record::{ContentSummary, PostDetail};

/// Query string accepted by `GET /api/v1/posts`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    /// Comma-separated; a post matching any one of them qualifies.
    pub tag: Option<String>,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ListQuery {
    pub fn to_filter(&self) -> PostFilter {
        PostFilter {
            category: self.category.clone(),
            tags: self
                .tag
                .as_deref()
                .map(|tags| {
                    tags.split(',')
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            query: self.q.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RelatedQuery {
    pub limit: Option<usize>,
}

/// Handler for `GET /api/v1/posts`.
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Page<ContentSummary>>, AppError> {
    let filter = params.to_filter();
    let items = state.content.filter(&filter).await?;

    tracing::debug!(?filter, matches = items.len(), "Listing posts");

    Ok(Json(Page::paginate(
        items,
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(state.api.default_per_page),
        state.api.max_per_page,
    )))
}

/// Handler for `GET /api/v1/posts/featured`.
pub async fn featured_posts_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentSummary>>, AppError> {
    Ok(Json(state.content.list_featured().await?))
}

/// Handler for `GET /api/v1/posts/{slug}`.
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetail>, AppError> {
    state
        .content
        .detail(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Post '{}' not found", slug)))
}

/// Handler for `GET /api/v1/posts/{slug}/related`.
pub async fn related_posts_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<RelatedQuery>,
) -> Result<Json<Vec<ContentSummary>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(state.content.settings().related_limit)
        .min(state.api.max_per_page);

    state
        .content
        .related_for_slug(&slug, limit)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Post '{}' not found", slug)))
}
