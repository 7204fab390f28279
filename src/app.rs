use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::ApiSettings;
use crate::content::service::ContentService;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub api: ApiSettings,
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the HTTP router for the content API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/posts", get(api::posts::list_posts_handler))
        .route(
            "/api/v1/posts/featured",
            get(api::posts::featured_posts_handler),
        )
        .route("/api/v1/posts/{slug}", get(api::posts::get_post_handler))
        .route(
            "/api/v1/posts/{slug}/related",
            get(api::posts::related_posts_handler),
        )
        .route("/api/v1/categories", get(api::facets::categories_handler))
        .route("/api/v1/tags", get(api::facets::tags_handler))
        .route(
            "/api/v1/cache/invalidate",
            post(api::cache::invalidate_cache_handler),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
