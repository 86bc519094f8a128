//! Card formatting for renderers.

use coinwatch_sdk::display::{self, AssetCard, Trend};
use coinwatch_sdk::models::AssetRecord;

#[test]
fn card_formats_every_field() {
    let record = AssetRecord::new("bitcoin", "Bitcoin", "btc")
        .with_price(96414.0)
        .with_market_cap(1_909_037_968_987.0)
        .with_change(4.8);

    let card = AssetCard::new(&record, true);

    assert_eq!(card.title, "Bitcoin (BTC)");
    assert_eq!(card.price, "$96414.00");
    assert_eq!(card.market_cap, "$1,909,037,968,987");
    assert_eq!(card.change, "4.80%");
    assert_eq!(card.trend, Some(Trend::Up));
    assert!(card.favorite);
}

#[test]
fn negative_change_trends_down() {
    assert_eq!(display::format_change(Some(-2.5)), "-2.50%");
    assert_eq!(display::trend(Some(-2.5)), Some(Trend::Down));
    assert_eq!(display::trend(Some(0.0)), Some(Trend::Up));
}

#[test]
fn missing_values_render_as_not_available() {
    let card = AssetCard::new(&AssetRecord::new("x", "X", "x"), false);

    assert_eq!(card.price, "N/A");
    assert_eq!(card.market_cap, "N/A");
    assert_eq!(card.change, "N/A");
    assert_eq!(card.trend, None);
    assert_eq!(display::format_price(Some(f64::NAN)), "N/A");
}

#[test]
fn market_cap_grouping() {
    assert_eq!(display::format_market_cap(Some(0.0)), "$0");
    assert_eq!(display::format_market_cap(Some(999.4)), "$999");
    assert_eq!(display::format_market_cap(Some(1000.0)), "$1,000");
    assert_eq!(display::format_market_cap(Some(132_814_072_904.0)), "$132,814,072,904");
}

#[test]
fn small_prices_keep_two_decimals() {
    assert_eq!(display::format_price(Some(1.001)), "$1.00");
    assert_eq!(display::format_price(Some(3661.79)), "$3661.79");
}

#[test]
fn card_serializes_for_renderers() {
    let record = AssetRecord::new("solana", "Solana", "sol").with_change(-1.0);
    let value = serde_json::to_value(AssetCard::new(&record, false)).unwrap();

    assert_eq!(value["title"], "Solana (SOL)");
    assert_eq!(value["trend"], "down");
}
