mod error;
mod routes;
mod state;
mod telemetry;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

#[tokio::main]
async fn main() {
    telemetry::init_tracing("info,coinwatch_sdk=debug");

    let offline = std::env::var("COINWATCH_OFFLINE").is_ok_and(|v| v == "1");
    tracing::info!(offline, "Initializing Coinwatch SDK");
    let sdk = coinwatch_sdk::AsyncCoinwatchSdk::builder()
        .offline(offline)
        .build()
        .await
        .expect("Failed to initialize Coinwatch SDK");

    // A failed first load is not fatal; the status endpoint reports it.
    if let Err(e) = sdk.load_dataset().await {
        tracing::warn!(error = %e, "Initial market data load failed");
    }

    let state = Arc::new(AppState { sdk });

    let app = Router::new()
        .route("/api/status", get(routes::assets::get_status))
        .route("/api/assets", get(routes::assets::list_assets))
        .route("/api/refresh", post(routes::assets::refresh))
        .route("/api/comparison", get(routes::comparison::list_comparison))
        .route("/api/comparison/refresh", post(routes::comparison::refresh_comparison))
        .route("/api/comparison/chart", get(routes::comparison::get_chart))
        .route(
            "/api/comparison/{id}",
            post(routes::comparison::select).delete(routes::comparison::deselect),
        )
        .route("/api/favorites", get(routes::favorites::list_favorites))
        .route("/api/favorites/{id}/toggle", post(routes::favorites::toggle))
        .route("/api/preferences/sort/{key}", put(routes::preferences::set_sort))
        .route("/api/preferences/theme/toggle", post(routes::preferences::toggle_theme))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = "0.0.0.0:3000";
    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
