use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::routes::cards;
use crate::state::AppState;

/// GET /api/favorites
///
/// Favorite assets present in the current listing.
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let assets = state
        .sdk
        .run(|s| {
            let st = s.state();
            Ok(cards(st, &st.favorites_view()))
        })
        .await?;

    let count = assets.len();
    Ok(Json(json!({ "data": assets, "count": count })))
}

/// POST /api/favorites/:id/toggle
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let favorite = state
        .sdk
        .run(move |s| Ok(s.state_mut().toggle_favorite(&id)))
        .await?;

    Ok(Json(json!({ "favorite": favorite })))
}
