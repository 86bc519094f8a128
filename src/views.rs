//! Derived views over a dataset.
//!
//! Every function borrows from the dataset and returns references in the
//! requested order; records are never cloned.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{AssetRecord, SelectedAsset, SortKey};

/// Order `records` ascending by `key`. The sort is stable, so ties keep
/// their dataset order.
pub fn sorted<'a>(records: &'a [AssetRecord], key: SortKey) -> Vec<&'a AssetRecord> {
    let mut view: Vec<&AssetRecord> = records.iter().collect();
    match key {
        SortKey::Name => view.sort_by_cached_key(|r| r.name.to_lowercase()),
        SortKey::Price => view.sort_by(|a, b| compare_numeric(a.price, b.price)),
        SortKey::Change24h => {
            view.sort_by(|a, b| compare_numeric(a.change_percent_24h, b.change_percent_24h))
        }
        SortKey::MarketCap => view.sort_by(|a, b| compare_numeric(a.market_cap, b.market_cap)),
    }
    view
}

/// Total order for optional floats: missing and NaN values come first and
/// compare equal to each other; real numbers follow in ascending order.
pub fn compare_numeric(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.filter(|v| !v.is_nan());
    let b = b.filter(|v| !v.is_nan());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

/// Records that are selected, in selection order. Selected ids missing from
/// the dataset are skipped.
pub fn comparison<'a>(records: &'a [AssetRecord], selection: &[SelectedAsset]) -> Vec<&'a AssetRecord> {
    selection
        .iter()
        .filter_map(|s| records.iter().find(|r| r.id == s.id))
        .collect()
}

/// Records that are favorites, in dataset order.
pub fn favorites<'a>(records: &'a [AssetRecord], favorites: &[String]) -> Vec<&'a AssetRecord> {
    records
        .iter()
        .filter(|r| favorites.iter().any(|f| *f == r.id))
        .collect()
}

// ---------------------------------------------------------------------------
// ChartSeries
// ---------------------------------------------------------------------------

pub const PRICE_SERIES_LABEL: &str = "Cryptocurrency Price";

/// Bar-chart input for the comparison panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub labels: Vec<String>,
    /// One price per label; assets without a quote plot as 0.
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn prices(records: &[&AssetRecord]) -> Self {
        Self {
            label: PRICE_SERIES_LABEL.to_string(),
            labels: records.iter().map(|r| r.name.clone()).collect(),
            values: records
                .iter()
                .map(|r| r.price.filter(|p| p.is_finite()).unwrap_or(0.0))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
