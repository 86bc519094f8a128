use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use coinwatch_sdk::display::AssetCard;
use coinwatch_sdk::models::SelectOutcome;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::routes::cards;
use crate::state::AppState;

/// GET /api/comparison
///
/// Selected assets in the order they were picked.
pub async fn list_comparison(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let assets = state
        .sdk
        .run(|s| {
            let st = s.state();
            Ok(cards(st, &st.comparison_view()))
        })
        .await?;

    let count = assets.len();
    Ok(Json(json!({ "data": assets, "count": count })))
}

/// GET /api/comparison/chart
pub async fn get_chart(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let chart = state.sdk.run(|s| Ok(s.state().comparison_chart())).await?;
    Ok(Json(json!({ "data": chart })))
}

/// POST /api/comparison/:id
///
/// Add an asset to the comparison. Responds 409 once five are selected.
pub async fn select(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let outcome = state
        .sdk
        .run(move |s| s.state_mut().select_for_comparison(&id))
        .await?;

    Ok(Json(json!({ "added": outcome == SelectOutcome::Added })))
}

/// DELETE /api/comparison/:id
pub async fn deselect(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let removed = state
        .sdk
        .run(move |s| Ok(s.state_mut().deselect(&id)))
        .await?;

    Ok(Json(json!({ "removed": removed })))
}

/// POST /api/comparison/refresh
///
/// Re-query just the selected assets from the market data API.
pub async fn refresh_comparison(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let records = state.sdk.refresh_comparison().await?;
    let assets: Vec<AssetCard> = records.iter().map(|r| AssetCard::new(r, false)).collect();

    let count = assets.len();
    Ok(Json(json!({ "data": assets, "count": count })))
}
