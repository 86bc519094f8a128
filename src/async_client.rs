//! Async wrapper around [`CoinwatchSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Network fetches run without holding the SDK lock, so commands issued
//! while a fetch is in flight apply immediately to the current dataset.
//!
//! # Example
//!
//! ```no_run
//! use coinwatch_sdk::AsyncCoinwatchSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncCoinwatchSdk::builder().build().await.unwrap();
//!     sdk.load_dataset().await.unwrap();
//!
//!     let names = sdk.run(|s| {
//!         Ok(s.state().sorted_view().iter().map(|a| a.name.clone()).collect::<Vec<_>>())
//!     }).await.unwrap();
//! }
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::error::{CoinwatchError, Result};
use crate::gateway::MarketGateway;
use crate::models::AssetRecord;
use crate::store::Store;
use crate::{CoinwatchSdk, CoinwatchSdkBuilder};

// ---------------------------------------------------------------------------
// AsyncCoinwatchSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCoinwatchSdk`] instance.
///
/// Accepts the same options as [`CoinwatchSdkBuilder`].
#[derive(Default)]
pub struct AsyncCoinwatchSdkBuilder {
    inner: CoinwatchSdkBuilder,
}

impl AsyncCoinwatchSdkBuilder {
    /// Set the directory preferences are persisted in.
    pub fn state_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.state_dir(path);
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.inner = self.inner.offline(offline);
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Point the SDK at a different markets endpoint.
    pub fn api_url(mut self, url: &str) -> Self {
        self.inner = self.inner.api_url(url);
        self
    }

    /// Quote currency for prices and market caps.
    pub fn currency(mut self, currency: &str) -> Self {
        self.inner = self.inner.currency(currency);
        self
    }

    /// Number of assets requested per listing.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.inner = self.inner.per_page(per_page);
        self
    }

    /// Persist preferences through a custom store.
    pub fn store<S: Store + 'static>(mut self, store: S) -> Self {
        self.inner = self.inner.store(store);
        self
    }

    /// Fetch market data through a custom gateway.
    pub fn gateway<G: MarketGateway + 'static>(mut self, gateway: G) -> Self {
        self.inner = self.inner.gateway(gateway);
        self
    }

    /// Build the async SDK, restoring persisted preferences.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncCoinwatchSdk> {
        let builder = self.inner;
        tokio::task::spawn_blocking(move || Ok(AsyncCoinwatchSdk::from_sdk(builder.build()?)))
            .await
            .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncCoinwatchSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`CoinwatchSdk`].
///
/// The SDK sits behind a [`Mutex`]; every operation locks it on a blocking
/// thread. Fetches release the lock while waiting on the network.
pub struct AsyncCoinwatchSdk {
    inner: Arc<Mutex<CoinwatchSdk>>,
    gateway: Arc<dyn MarketGateway>,
}

impl AsyncCoinwatchSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncCoinwatchSdkBuilder {
        AsyncCoinwatchSdkBuilder::default()
    }

    /// Wrap an already-built SDK.
    pub fn from_sdk(sdk: CoinwatchSdk) -> Self {
        let gateway = sdk.gateway();
        Self {
            inner: Arc::new(Mutex::new(sdk)),
            gateway,
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives `&mut CoinwatchSdk` and should return a
    /// `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut CoinwatchSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = lock(&sdk)?;
            f(&mut guard)
        })
        .await
        .map_err(join_error)?
    }

    /// Fetch the market listing and make it the current dataset.
    ///
    /// The status moves to `Loading`/`Refreshing` before the request goes
    /// out. Whichever fetch completes last wins. The fetch and its
    /// application run as one blocking task, so dropping the returned future
    /// does not leave the status stuck or discard the result.
    pub async fn load_dataset(&self) -> Result<Arc<[AssetRecord]>> {
        let sdk = Arc::clone(&self.inner);
        let gateway = Arc::clone(&self.gateway);
        tokio::task::spawn_blocking(move || {
            lock(&sdk)?.state_mut().begin_fetch();
            let result = gateway.fetch_markets(None);
            let mut guard = lock(&sdk)?;
            guard.state_mut().finish_fetch(result)
        })
        .await
        .map_err(join_error)?
    }

    /// Re-query only the selected assets and return them in selection order.
    pub async fn refresh_comparison(&self) -> Result<Vec<AssetRecord>> {
        let sdk = Arc::clone(&self.inner);
        let gateway = Arc::clone(&self.gateway);
        tokio::task::spawn_blocking(move || {
            let ids = lock(&sdk)?.state().selection_ids();
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            let result = gateway.fetch_markets(Some(ids.as_slice()));
            let mut guard = lock(&sdk)?;
            guard.state_mut().apply_comparison_refresh(result)
        })
        .await
        .map_err(join_error)?
    }
}

fn lock(sdk: &Mutex<CoinwatchSdk>) -> Result<MutexGuard<'_, CoinwatchSdk>> {
    sdk.lock()
        .map_err(|_| CoinwatchError::InvalidArgument("SDK lock poisoned".into()))
}

fn join_error(e: tokio::task::JoinError) -> CoinwatchError {
    CoinwatchError::InvalidArgument(format!("Task join error: {e}"))
}
