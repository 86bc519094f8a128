/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async Coinwatch SDK instance. Owns the dataset and the persisted
    /// watchlist preferences.
    pub sdk: coinwatch_sdk::AsyncCoinwatchSdk,
}
