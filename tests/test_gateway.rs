//! Gateway tests: payload decoding, query construction, and HTTP handling
//! against a one-shot loopback server.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use coinwatch_sdk::config;
use coinwatch_sdk::gateway::sample_records;
use coinwatch_sdk::models::AssetRecord;
use coinwatch_sdk::{CoinwatchSdk, HttpGateway, MarketGateway, MemoryStore, StaticGateway};

const MARKETS_JSON: &str = r#"[
  {
    "id": "bitcoin",
    "symbol": "btc",
    "name": "Bitcoin",
    "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
    "current_price": 96414,
    "market_cap": 1909037968987,
    "market_cap_rank": 1,
    "price_change_percentage_24h": 4.8
  },
  {
    "id": "obscure",
    "symbol": "obs",
    "name": "Obscure",
    "image": null,
    "current_price": null,
    "market_cap": null,
    "price_change_percentage_24h": null
  }
]"#;

/// Serve exactly one HTTP response on a loopback port.
///
/// Returns the base URL and a handle yielding the request line received.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/v3/coins/markets", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
        .unwrap();
        stream.flush().unwrap();
        request_line.trim_end().to_string()
    });

    (url, handle)
}

fn gateway(url: &str) -> HttpGateway {
    HttpGateway::new(url, "usd", 100, Duration::from_secs(5)).unwrap()
}

// ---------------------------------------------------------------------------
// payload decoding
// ---------------------------------------------------------------------------

#[test]
fn decodes_markets_payload() {
    let records: Vec<AssetRecord> = serde_json::from_str(MARKETS_JSON).unwrap();

    assert_eq!(records.len(), 2);
    let btc = &records[0];
    assert_eq!(btc.id, "bitcoin");
    assert_eq!(btc.symbol, "btc");
    assert_eq!(btc.price, Some(96414.0));
    assert_eq!(btc.change_percent_24h, Some(4.8));
    assert_eq!(btc.market_cap, Some(1_909_037_968_987.0));
    assert!(btc.image_url.as_deref().unwrap().ends_with("bitcoin.png"));
}

#[test]
fn null_market_fields_decode_as_missing() {
    let records: Vec<AssetRecord> = serde_json::from_str(MARKETS_JSON).unwrap();
    let obscure = &records[1];

    assert_eq!(obscure.price, None);
    assert_eq!(obscure.change_percent_24h, None);
    assert_eq!(obscure.market_cap, None);
    assert_eq!(obscure.image_url, None);
}

#[test]
fn absent_market_fields_decode_as_missing() {
    let record: AssetRecord =
        serde_json::from_str(r#"{"id":"x","name":"X","symbol":"x"}"#).unwrap();
    assert_eq!(record, AssetRecord::new("x", "X", "x"));
}

// ---------------------------------------------------------------------------
// query construction
// ---------------------------------------------------------------------------

#[test]
fn listing_query_has_no_ids_filter() {
    let gw = gateway("http://localhost/markets");
    let params = gw.query_params(None);

    assert!(params.contains(&("vs_currency", "usd".to_string())));
    assert!(params.contains(&("per_page", "100".to_string())));
    assert!(params.iter().all(|(k, _)| *k != "ids"));
}

#[test]
fn public_gateway_uses_default_endpoint_and_settings() {
    let gw = HttpGateway::public(Duration::from_secs(5)).unwrap();

    assert_eq!(gw.api_url(), config::MARKETS_URL);
    let params = gw.query_params(None);
    assert!(params.contains(&("vs_currency", config::DEFAULT_CURRENCY.to_string())));
    assert!(params.contains(&("per_page", config::DEFAULT_PER_PAGE.to_string())));
}

#[test]
fn comparison_query_joins_ids_with_commas() {
    let gw = gateway("http://localhost/markets");
    let ids = vec!["bitcoin".to_string(), "ethereum".to_string()];

    let params = gw.query_params(Some(ids.as_slice()));

    assert!(params.contains(&("ids", "bitcoin,ethereum".to_string())));
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

#[test]
fn fetch_sends_query_and_parses_body() {
    let (url, server) = serve_once("200 OK", MARKETS_JSON);
    let gw = gateway(&url);

    let records = gw.fetch_markets(None).unwrap();
    let request_line = server.join().unwrap();

    assert_eq!(records.len(), 2);
    assert!(request_line.starts_with("GET /api/v3/coins/markets?"));
    assert!(request_line.contains("vs_currency=usd"));
}

#[test]
fn fetch_with_ids_encodes_filter() {
    let (url, server) = serve_once("200 OK", "[]");
    let gw = gateway(&url);
    let ids = vec!["bitcoin".to_string(), "solana".to_string()];

    let records = gw.fetch_markets(Some(ids.as_slice())).unwrap();
    let request_line = server.join().unwrap();

    assert!(records.is_empty());
    assert!(request_line.contains("ids=bitcoin%2Csolana"));
}

#[test]
fn non_success_status_is_a_fetch_error() {
    let (url, server) = serve_once("429 Too Many Requests", r#"{"error":"rate limited"}"#);
    let gw = gateway(&url);

    let err = gw.fetch_markets(None).unwrap_err();
    server.join().unwrap();

    assert!(err.is_fetch_error());
}

#[test]
fn malformed_body_is_a_fetch_error() {
    let (url, server) = serve_once("200 OK", r#"{"not":"a list"}"#);
    let gw = gateway(&url);

    let err = gw.fetch_markets(None).unwrap_err();
    server.join().unwrap();

    assert!(err.is_fetch_error());
}

#[test]
fn unreachable_host_is_a_fetch_error() {
    // Bind then drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let gw = gateway(&format!("http://127.0.0.1:{port}/markets"));

    assert!(gw.fetch_markets(None).unwrap_err().is_fetch_error());
}

#[test]
fn sdk_loads_through_configured_endpoint() {
    let (url, server) = serve_once("200 OK", MARKETS_JSON);
    let mut sdk = CoinwatchSdk::builder()
        .store(MemoryStore::new())
        .api_url(&url)
        .currency("eur")
        .per_page(10)
        .build()
        .unwrap();

    let dataset = sdk.load_dataset().unwrap();
    let request_line = server.join().unwrap();

    assert_eq!(dataset.len(), 2);
    assert!(request_line.contains("vs_currency=eur"));
    assert!(request_line.contains("per_page=10"));
}

// ---------------------------------------------------------------------------
// StaticGateway
// ---------------------------------------------------------------------------

#[test]
fn static_gateway_filters_by_ids() {
    let gw = StaticGateway::sample();
    let ids = vec!["solana".to_string(), "nope".to_string()];

    let records = gw.fetch_markets(Some(ids.as_slice())).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "solana");
}

#[test]
fn sample_listing_has_five_quoted_assets() {
    let records = sample_records();
    assert_eq!(records.len(), 5);
    assert!(records
        .iter()
        .all(|r| r.price.is_some() && r.market_cap.is_some()));
}
