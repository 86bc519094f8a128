pub mod assets;
pub mod comparison;
pub mod favorites;
pub mod preferences;

use coinwatch_sdk::display::AssetCard;
use coinwatch_sdk::manager::PreferenceManager;
use coinwatch_sdk::models::AssetRecord;

/// Render records as cards, flagging favorites.
pub fn cards(state: &PreferenceManager, records: &[&AssetRecord]) -> Vec<AssetCard> {
    records
        .iter()
        .map(|r| AssetCard::new(r, state.is_favorite(&r.id)))
        .collect()
}
