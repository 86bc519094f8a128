use std::path::PathBuf;

pub const MARKETS_URL: &str = "https://api.coingecko.com/api/v3/coins/markets";
pub const DEFAULT_CURRENCY: &str = "usd";
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Maximum number of assets that can be compared side by side.
pub const MAX_SELECTION: usize = 5;

// Store keys
pub const SELECTION_KEY: &str = "selectedCryptos";
pub const FAVORITES_KEY: &str = "favoriteCryptos";
pub const SORT_KEY: &str = "sortPreference";
pub const THEME_KEY: &str = "theme";

pub fn default_state_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("coinwatch-sdk")
    } else {
        PathBuf::from(".coinwatch-sdk")
    }
}
