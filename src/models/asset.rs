use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AssetRecord — One market snapshot as returned by the gateway
// ---------------------------------------------------------------------------

/// A single cryptocurrency's market snapshot.
///
/// Field names follow the `/coins/markets` payload. Numeric fields are
/// optional because the gateway reports `null` for assets it has no quote for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "current_price", default)]
    pub price: Option<f64>,
    #[serde(rename = "price_change_percentage_24h", default)]
    pub change_percent_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(rename = "image", default)]
    pub image_url: Option<String>,
}

impl AssetRecord {
    /// Build a record with the identity fields set and no market data.
    pub fn new(id: &str, name: &str, symbol: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            price: None,
            change_percent_24h: None,
            market_cap: None,
            image_url: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_change(mut self, change_percent_24h: f64) -> Self {
        self.change_percent_24h = Some(change_percent_24h);
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }
}

// ---------------------------------------------------------------------------
// SelectedAsset — Persisted comparison entry
// ---------------------------------------------------------------------------

/// The stored form of one comparison selection entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedAsset {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

impl From<&AssetRecord> for SelectedAsset {
    fn from(record: &AssetRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            symbol: record.symbol.clone(),
        }
    }
}
