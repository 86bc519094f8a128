//! Coinwatch SDK for Rust.
//!
//! Fetches cryptocurrency market snapshots from a CoinGecko-compatible
//! `/coins/markets` endpoint and manages what a user does with them: a
//! bounded comparison selection, a favorites list, a sort preference and a
//! theme. Preferences are persisted to a local store and restored on the
//! next start.
//!
//! # Quick start
//!
//! ```no_run
//! use coinwatch_sdk::CoinwatchSdk;
//!
//! let mut sdk = CoinwatchSdk::builder().build().unwrap();
//! sdk.load_dataset().unwrap();
//!
//! sdk.state_mut().set_sort_preference("market_cap").unwrap();
//! sdk.state_mut().select_for_comparison("bitcoin").unwrap();
//! sdk.state_mut().toggle_favorite("ethereum");
//!
//! for asset in sdk.state().sorted_view() {
//!     println!("{} {:?}", asset.name, asset.market_cap);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod display;
pub mod error;
pub mod gateway;
pub mod manager;
pub mod models;
pub mod store;
pub mod views;

#[cfg(feature = "async")]
pub use async_client::AsyncCoinwatchSdk;
pub use error::{CoinwatchError, Result};
pub use gateway::{HttpGateway, MarketGateway, StaticGateway};
pub use manager::PreferenceManager;
pub use store::{FileStore, MemoryStore, Store};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::models::AssetRecord;

// ---------------------------------------------------------------------------
// CoinwatchSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CoinwatchSdk`] instance.
///
/// Use [`CoinwatchSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CoinwatchSdkBuilder::build) to create the SDK.
pub struct CoinwatchSdkBuilder {
    state_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    api_url: String,
    currency: String,
    per_page: u32,
    store: Option<Box<dyn Store>>,
    gateway: Option<Arc<dyn MarketGateway>>,
}

impl Default for CoinwatchSdkBuilder {
    fn default() -> Self {
        Self {
            state_dir: None,
            offline: false,
            timeout: Duration::from_secs(30),
            api_url: config::MARKETS_URL.to_string(),
            currency: config::DEFAULT_CURRENCY.to_string(),
            per_page: config::DEFAULT_PER_PAGE,
            store: None,
            gateway: None,
        }
    }
}

impl CoinwatchSdkBuilder {
    /// Set the directory preferences are persisted in.
    ///
    /// If not set, the platform-appropriate data directory is used
    /// (e.g. `~/.local/share/coinwatch-sdk` on Linux). Ignored when a
    /// custom [`store`](Self::store) is supplied.
    pub fn state_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.state_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never contacts the market data API and serves
    /// the bundled sample listing instead. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the SDK at a different markets endpoint.
    pub fn api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    /// Quote currency for prices and market caps. Defaults to `usd`.
    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }

    /// Number of assets requested per listing. Defaults to 100.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Persist preferences through a custom store.
    pub fn store<S: Store + 'static>(mut self, store: S) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Fetch market data through a custom gateway. Takes precedence over
    /// [`offline`](Self::offline) and the HTTP settings.
    pub fn gateway<G: MarketGateway + 'static>(mut self, gateway: G) -> Self {
        self.gateway = Some(Arc::new(gateway));
        self
    }

    /// Build the SDK, restoring persisted preferences.
    ///
    /// Does **not** fetch market data; call
    /// [`load_dataset()`](CoinwatchSdk::load_dataset) for that.
    pub fn build(self) -> Result<CoinwatchSdk> {
        let store: Box<dyn Store> = match self.store {
            Some(store) => store,
            None => Box::new(FileStore::open(self.state_dir)?),
        };
        let gateway: Arc<dyn MarketGateway> = match self.gateway {
            Some(gateway) => gateway,
            None if self.offline => Arc::new(StaticGateway::sample()),
            None => Arc::new(HttpGateway::new(
                &self.api_url,
                &self.currency,
                self.per_page,
                self.timeout,
            )?),
        };
        Ok(CoinwatchSdk {
            gateway,
            state: PreferenceManager::restore(store),
            offline: self.offline,
        })
    }
}

// ---------------------------------------------------------------------------
// CoinwatchSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Coinwatch SDK.
///
/// Pairs a [`MarketGateway`] with the [`PreferenceManager`] that holds the
/// fetched dataset and the user's preferences.
///
/// Created via [`CoinwatchSdk::builder()`].
pub struct CoinwatchSdk {
    gateway: Arc<dyn MarketGateway>,
    state: PreferenceManager,
    offline: bool,
}

impl CoinwatchSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> CoinwatchSdkBuilder {
        CoinwatchSdkBuilder::default()
    }

    /// Fetch the market listing once and make it the current dataset.
    ///
    /// On failure the previous dataset stays in place, the error is recorded
    /// on the state manager and returned. There is no automatic retry.
    pub fn load_dataset(&mut self) -> Result<Arc<[AssetRecord]>> {
        self.state.begin_fetch();
        let result = self.gateway.fetch_markets(None);
        self.state.finish_fetch(result)
    }

    /// Re-query only the selected assets and return them in selection order.
    ///
    /// Returns an empty list without contacting the gateway when nothing is
    /// selected.
    pub fn refresh_comparison(&mut self) -> Result<Vec<AssetRecord>> {
        let ids = self.state.selection_ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = self.gateway.fetch_markets(Some(ids.as_slice()));
        self.state.apply_comparison_refresh(result)
    }

    /// The selection and preference state.
    pub fn state(&self) -> &PreferenceManager {
        &self.state
    }

    /// Mutable access to the state, for commands.
    pub fn state_mut(&mut self) -> &mut PreferenceManager {
        &mut self.state
    }

    /// A shared handle to the gateway, for fetching off the owning thread.
    pub fn gateway(&self) -> Arc<dyn MarketGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CoinwatchSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CoinwatchSdk(status={:?}, assets={}, selected={}, favorites={}, sort={}, offline={})",
            self.state.status(),
            self.state.dataset().len(),
            self.state.selection().len(),
            self.state.favorites().len(),
            self.state.sort_key(),
            self.offline
        )
    }
}
