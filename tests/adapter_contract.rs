//! Cross-venue contract tests.
//!
//! Drives both adapters polymorphically through `dyn VenueAdapter` over a
//! mock transport, asserting the behavior the two must share: canonical
//! scale, default pricing, side vocabulary translation, and the
//! failure-visibility asymmetry between capital-gating and polled
//! operations.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use venue_bridge::model::DEFAULT_PRICE;
use venue_bridge::transport::MockTransport;
use venue_bridge::{
    KalshiClient, MarketFilter, Platform, PolymarketClient, Side, TradeStatus, VenueAdapter,
};

fn kalshi(mock: &MockTransport) -> Box<dyn VenueAdapter> {
    Box::new(KalshiClient::with_transport(Arc::new(mock.clone())))
}

fn polymarket(mock: &MockTransport) -> Box<dyn VenueAdapter> {
    Box::new(PolymarketClient::with_transport(Arc::new(mock.clone())))
}

/// Transport where every route fails. Simulates a venue outage.
fn dead_transport() -> MockTransport {
    // MockTransport fails any unrouted request, so empty is enough.
    MockTransport::new()
}

#[tokio::test]
async fn both_venues_quote_fifty_with_no_asks() {
    let kalshi_mock = MockTransport::new();
    kalshi_mock.on_get("/markets/m1", json!({"market": {"yes_ask": 0, "no_ask": 0}}));

    let poly_mock = MockTransport::new();
    poly_mock.on_get("/markets/m1/book", json!({"asks": []}));

    for adapter in [kalshi(&kalshi_mock), polymarket(&poly_mock)] {
        let quote = adapter.market_quote("m1").await.unwrap();
        assert_eq!(quote.up_price, DEFAULT_PRICE);
        assert_eq!(quote.down_price, DEFAULT_PRICE);
        assert_eq!(quote.betted_price, None);
    }
}

#[tokio::test]
async fn canonical_prices_agree_across_scales() {
    // The same market state, expressed in each venue's native scale, must
    // normalize to the same canonical quote.
    let kalshi_mock = MockTransport::new();
    kalshi_mock.on_get("/markets/m1", json!({"market": {"yes_ask": 62, "no_ask": 39}}));

    let poly_mock = MockTransport::new();
    poly_mock.on_get(
        "/markets/m1/book",
        json!({"asks": [
            {"outcome": "YES", "price": "0.62"},
            {"outcome": "NO", "price": "0.39"},
        ]}),
    );

    let from_kalshi = kalshi(&kalshi_mock).market_quote("m1").await.unwrap();
    let from_poly = polymarket(&poly_mock).market_quote("m1").await.unwrap();

    assert_eq!(from_kalshi.up_price, from_poly.up_price);
    assert_eq!(from_kalshi.down_price, from_poly.down_price);
    assert_eq!(from_poly.up_price, 62);
    assert_eq!(from_poly.down_price, 39);
}

#[tokio::test]
async fn adapter_stamps_quote_timestamps() {
    let mock = MockTransport::new();
    // Venue payload carries its own timestamp; it must be ignored.
    mock.on_get(
        "/markets/m1",
        json!({"market": {"yes_ask": 50, "no_ask": 50, "timestamp": 0}}),
    );

    let before = time::OffsetDateTime::now_utc();
    let quote = kalshi(&mock).market_quote("m1").await.unwrap();
    let after = time::OffsetDateTime::now_utc();

    assert!(quote.timestamp >= before && quote.timestamp <= after);
}

#[tokio::test]
async fn buy_record_echoes_canonical_inputs_on_both_venues() {
    let kalshi_mock = MockTransport::new();
    kalshi_mock.on_post("/portfolio/orders", json!({"order_id": "k-1"}));

    let poly_mock = MockTransport::new();
    poly_mock.on_post("/orders", json!({"id": "p-1", "txHash": "0x1"}));

    for adapter in [kalshi(&kalshi_mock), polymarket(&poly_mock)] {
        let record = adapter.buy_token("m1", Side::Up, 10, 62).await.unwrap();
        assert_eq!(record.market_id, "m1");
        assert_eq!(record.side, Side::Up);
        assert_eq!(record.amount, 10);
        // Canonical scale in the record regardless of what went on the wire.
        assert_eq!(record.price, 62);
        assert_eq!(record.status, TradeStatus::Pending);
        assert_eq!(record.platform, adapter.platform());
    }
}

#[tokio::test]
async fn same_limit_price_scales_per_venue_on_the_wire() {
    let kalshi_mock = MockTransport::new();
    kalshi_mock.on_post("/portfolio/orders", json!({"order_id": "k-1"}));

    let poly_mock = MockTransport::new();
    poly_mock.on_post("/orders", json!({"id": "p-1", "txHash": "0x1"}));

    kalshi(&kalshi_mock)
        .buy_token("m1", Side::Up, 10, 62)
        .await
        .unwrap();
    polymarket(&poly_mock)
        .buy_token("m1", Side::Up, 10, 62)
        .await
        .unwrap();

    let kalshi_body = kalshi_mock.last_request().unwrap().body.unwrap();
    let poly_body = poly_mock.last_request().unwrap().body.unwrap();

    // Integer-scale venue sees 62 unchanged; fractional venue sees 0.62.
    assert_eq!(kalshi_body["yes_price"], 62);
    assert_eq!(poly_body["price"], "0.62");
}

#[tokio::test]
async fn capital_gating_operations_propagate_outage() {
    for adapter in [kalshi(&dead_transport()), polymarket(&dead_transport())] {
        assert!(adapter.market_quote("m1").await.is_err());
        assert!(adapter
            .active_markets(&MarketFilter::default())
            .await
            .is_err());
        assert!(adapter.buy_token("m1", Side::Up, 1, 50).await.is_err());
    }
}

#[tokio::test]
async fn polled_operations_degrade_under_outage() {
    for adapter in [kalshi(&dead_transport()), polymarket(&dead_transport())] {
        assert!(!adapter.is_market_resolved("m1").await);
        assert!(!adapter.redeem_tokens("m1", Side::Up).await);
        assert!(adapter.positions().await.is_empty());
    }
}

#[tokio::test]
async fn listings_stay_venue_native() {
    let kalshi_mock = MockTransport::new();
    kalshi_mock.on_get(
        "/markets",
        json!({"markets": [{"ticker": "BTC-15M-1765301400", "yes_ask": 62}]}),
    );

    let poly_mock = MockTransport::new();
    poly_mock.on_get("/markets", json!([{"market": "0xfeed", "active": true}]));

    let kalshi_markets = kalshi(&kalshi_mock)
        .active_markets(&MarketFilter::default())
        .await
        .unwrap();
    let poly_markets = polymarket(&poly_mock)
        .active_markets(&MarketFilter::default())
        .await
        .unwrap();

    // Descriptor shapes are untouched: each venue keeps its own id key.
    assert_eq!(kalshi_markets[0]["ticker"], "BTC-15M-1765301400");
    assert_eq!(poly_markets[0]["market"], "0xfeed");
}

#[tokio::test]
async fn platform_tags_are_distinct() {
    let kalshi = kalshi(&MockTransport::new());
    let poly = polymarket(&MockTransport::new());
    assert_eq!(kalshi.platform(), Platform::Kalshi);
    assert_eq!(poly.platform(), Platform::Polymarket);
}
