#[derive(Debug, thiserror::Error)]
pub enum CoinwatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Comparison is limited to {limit} assets")]
    SelectionLimitExceeded { limit: usize },

    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("Could not read stored '{key}': {message}")]
    PersistenceRead { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CoinwatchError {
    /// Whether this error came from talking to the market data gateway.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, CoinwatchError::Http(_) | CoinwatchError::Fetch(_))
    }
}

pub type Result<T> = std::result::Result<T, CoinwatchError>;
