use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::routes::cards;
use crate::state::AppState;

/// GET /api/status
///
/// Load status, last fetch error and current preferences.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let status = state
        .sdk
        .run(|s| {
            let st = s.state();
            Ok(json!({
                "status": st.status(),
                "error": st.last_error(),
                "assets": st.dataset().len(),
                "sort": st.sort_key(),
                "theme": st.theme(),
                "selected": st.selection(),
                "favorites": st.favorites(),
            }))
        })
        .await?;

    Ok(Json(status))
}

/// GET /api/assets
///
/// All assets ordered by the stored sort preference.
pub async fn list_assets(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let (sort, assets) = state
        .sdk
        .run(|s| {
            let st = s.state();
            Ok((st.sort_key(), cards(st, &st.sorted_view())))
        })
        .await?;

    let count = assets.len();
    Ok(Json(json!({ "data": assets, "count": count, "sort": sort })))
}

/// POST /api/refresh
///
/// Re-fetch the market listing. On failure the previous listing stays.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let dataset = state.sdk.load_dataset().await?;
    Ok(Json(json!({ "count": dataset.len() })))
}
