//! Shared test fixtures for the Coinwatch SDK integration tests.
//!
//! Provides sample market records and helpers that build a
//! `PreferenceManager` over an in-memory store with a dataset already loaded.

#![allow(dead_code)]

use coinwatch_sdk::models::AssetRecord;
use coinwatch_sdk::{MemoryStore, PreferenceManager};

/// Three assets whose names, prices and caps all sort differently.
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
        AssetRecord::new("solana", "solana", "sol")
            .with_price(200.0)
            .with_market_cap(50_000_000_000.0)
            .with_change(-2.5),
    ]
}

/// `count` records with ids `coin-0`, `coin-1`, ...
pub fn numbered_records(count: usize) -> Vec<AssetRecord> {
    (0..count)
        .map(|i| {
            AssetRecord::new(&format!("coin-{i}"), &format!("Coin {i}"), &format!("c{i}"))
                .with_price(i as f64)
        })
        .collect()
}

/// Manager over an empty in-memory store with `records` loaded.
pub fn manager_with(records: Vec<AssetRecord>) -> PreferenceManager {
    manager_from_store(MemoryStore::new(), records)
}

/// Manager restored from `store` with `records` loaded.
pub fn manager_from_store(store: MemoryStore, records: Vec<AssetRecord>) -> PreferenceManager {
    let mut manager = PreferenceManager::restore(Box::new(store));
    load(&mut manager, records);
    manager
}

/// Run one successful fetch cycle.
pub fn load(manager: &mut PreferenceManager, records: Vec<AssetRecord>) {
    manager.begin_fetch();
    manager.finish_fetch(Ok(records)).unwrap();
}

pub fn ids(records: &[&AssetRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

pub fn selected_ids(manager: &PreferenceManager) -> Vec<String> {
    manager.selection_ids()
}
