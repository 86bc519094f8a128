use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// PUT /api/preferences/sort/:key
///
/// One of `name`, `price`, `24h_change`, `market_cap`.
pub async fn set_sort(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<Value>, AppError> {
    let sort = state
        .sdk
        .run(move |s| {
            s.state_mut().set_sort_preference(&key)?;
            Ok(s.state().sort_key())
        })
        .await?;

    Ok(Json(json!({ "sort": sort })))
}

/// POST /api/preferences/theme/toggle
pub async fn toggle_theme(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let theme = state.sdk.run(|s| Ok(s.state_mut().toggle_theme())).await?;
    Ok(Json(json!({ "theme": theme })))
}
