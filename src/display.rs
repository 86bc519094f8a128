//! Display-ready strings for asset cards.

use serde::Serialize;

use crate::models::AssetRecord;

const MISSING: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// Pre-formatted fields for one asset card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetCard {
    pub id: String,
    /// `Name (SYMBOL)`
    pub title: String,
    pub price: String,
    pub market_cap: String,
    pub change: String,
    /// `None` when the 24h change is unknown.
    pub trend: Option<Trend>,
    pub image_url: Option<String>,
    pub favorite: bool,
}

impl AssetCard {
    pub fn new(record: &AssetRecord, favorite: bool) -> Self {
        Self {
            id: record.id.clone(),
            title: format!("{} ({})", record.name, record.symbol.to_uppercase()),
            price: format_price(record.price),
            market_cap: format_market_cap(record.market_cap),
            change: format_change(record.change_percent_24h),
            trend: trend(record.change_percent_24h),
            image_url: record.image_url.clone(),
            favorite,
        }
    }
}

/// `$1234.50`, two decimals, no grouping.
pub fn format_price(price: Option<f64>) -> String {
    match finite(price) {
        Some(p) => format!("${:.2}", p),
        None => MISSING.to_string(),
    }
}

/// `$1,909,037,968,987`, rounded to whole units.
pub fn format_market_cap(market_cap: Option<f64>) -> String {
    match finite(market_cap) {
        Some(m) => format!("${}", group_thousands(m.round())),
        None => MISSING.to_string(),
    }
}

/// `4.80%` / `-2.50%`
pub fn format_change(change: Option<f64>) -> String {
    match finite(change) {
        Some(c) => format!("{:.2}%", c),
        None => MISSING.to_string(),
    }
}

pub fn trend(change: Option<f64>) -> Option<Trend> {
    finite(change).map(|c| if c >= 0.0 { Trend::Up } else { Trend::Down })
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
