//! Market data gateway: the remote `/coins/markets` endpoint and an
//! in-process stand-in used when running offline.

use crate::config;
use crate::error::{CoinwatchError, Result};
use crate::models::AssetRecord;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Source of market snapshots.
///
/// `ids` narrows the result to the given asset identifiers; `None` asks for
/// the gateway's default top-N listing.
pub trait MarketGateway: Send + Sync {
    fn fetch_markets(&self, ids: Option<&[String]>) -> Result<Vec<AssetRecord>>;
}

// ---------------------------------------------------------------------------
// HttpGateway
// ---------------------------------------------------------------------------

/// Blocking HTTP client for a CoinGecko-compatible markets endpoint.
pub struct HttpGateway {
    client: Client,
    api_url: String,
    currency: String,
    per_page: u32,
}

impl HttpGateway {
    /// Create a gateway against `api_url`, quoting prices in `currency`.
    pub fn new(api_url: &str, currency: &str, per_page: u32, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.to_string(),
            currency: currency.to_string(),
            per_page,
        })
    }

    /// Gateway against the public endpoint with default settings.
    pub fn public(timeout: Duration) -> Result<Self> {
        Self::new(
            config::MARKETS_URL,
            config::DEFAULT_CURRENCY,
            config::DEFAULT_PER_PAGE,
            timeout,
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Query parameters for one markets request.
    pub fn query_params(&self, ids: Option<&[String]>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("vs_currency", self.currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", "1".to_string()),
        ];
        if let Some(ids) = ids {
            params.push(("ids", ids.join(",")));
        }
        params
    }
}

impl MarketGateway for HttpGateway {
    fn fetch_markets(&self, ids: Option<&[String]>) -> Result<Vec<AssetRecord>> {
        let params = self.query_params(ids);
        debug!(url = %self.api_url, ?params, "Fetching markets");

        let resp = self
            .client
            .get(&self.api_url)
            .query(&params)
            .send()?
            .error_for_status()?;
        let records: Vec<AssetRecord> = resp.json()?;

        debug!(count = records.len(), "Markets fetched");
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// StaticGateway
// ---------------------------------------------------------------------------

/// Serves a fixed set of records without touching the network.
#[derive(Debug, Clone, Default)]
pub struct StaticGateway {
    records: Vec<AssetRecord>,
    unavailable: Option<String>,
}

impl StaticGateway {
    pub fn new(records: Vec<AssetRecord>) -> Self {
        Self {
            records,
            unavailable: None,
        }
    }

    /// A gateway whose every fetch fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            records: Vec::new(),
            unavailable: Some(message.to_string()),
        }
    }

    /// The bundled sample listing used in offline mode.
    pub fn sample() -> Self {
        Self::new(sample_records())
    }
}

impl MarketGateway for StaticGateway {
    fn fetch_markets(&self, ids: Option<&[String]>) -> Result<Vec<AssetRecord>> {
        if let Some(message) = &self.unavailable {
            return Err(CoinwatchError::Fetch(message.clone()));
        }
        let records = match ids {
            Some(ids) => self
                .records
                .iter()
                .filter(|r| ids.contains(&r.id))
                .cloned()
                .collect(),
            None => self.records.clone(),
        };
        Ok(records)
    }
}

/// Five large-cap assets with fixed quotes.
pub fn sample_records() -> Vec<AssetRecord> {
    vec![
        AssetRecord::new("bitcoin", "Bitcoin", "btc")
            .with_price(96414.0)
            .with_market_cap(1_909_037_968_987.0)
            .with_change(4.8),
        AssetRecord::new("ethereum", "Ethereum", "eth")
            .with_price(3661.79)
            .with_market_cap(441_227_125_219.0)
            .with_change(9.95),
        AssetRecord::new("tether", "Tether", "usdt")
            .with_price(1.001)
            .with_market_cap(132_814_072_904.0)
            .with_change(0.16),
        AssetRecord::new("solana", "Solana", "sol")
            .with_price(200.0)
            .with_market_cap(50_000_000_000.0)
            .with_change(-2.5),
        AssetRecord::new("binancecoin", "Binance Coin", "bnb")
            .with_price(646.57)
            .with_market_cap(94_057_703_124.0)
            .with_change(4.90),
    ]
}
