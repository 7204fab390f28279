use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::error::AppError;
use crate::models::record::FacetCount;

/// Handler for `GET /api/v1/categories`.
pub async fn categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<FacetCount>>, AppError> {
    Ok(Json(state.content.category_counts().await?))
}

/// Handler for `GET /api/v1/tags`.
pub async fn tags_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<FacetCount>>, AppError> {
    Ok(Json(state.content.tag_counts().await?))
}
