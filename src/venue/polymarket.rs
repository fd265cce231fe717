//! Polymarket venue adapter.
//!
//! Polymarket quotes fractionally on 0-1 with prices as decimal strings and
//! labels outcomes YES/NO, so every price crossing this boundary is scaled:
//! x100 (rounded) inbound to the canonical cents scale, /100 outbound on
//! order placement.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::config::VenueConfig;
use crate::error::VenueError;
use crate::model::{
    cents_from_fraction, fraction_from_cents, MarketFilter, MarketQuote, Platform, Side,
    TradeRecord, DEFAULT_PRICE,
};
use crate::transport::{HttpTransport, Transport};

/// Order book response for one market. The payload also carries bids, but
/// top-of-book buying cost is ask-side only, so they are not deserialized.
#[derive(Debug, Clone, Deserialize)]
struct BookResponse {
    #[serde(default)]
    asks: Vec<BookLevel>,
    /// Settlement price as a 0-1 decimal string, once settled.
    #[serde(rename = "bettedPrice", default)]
    betted_price: Option<String>,
}

/// Single book level, tagged with the outcome it belongs to.
#[derive(Debug, Clone, Deserialize)]
struct BookLevel {
    outcome: String,
    price: String,
}

/// Polymarket adapter (Venue B, fractional 0-1 price scale).
#[derive(Debug, Clone)]
pub struct PolymarketClient {
    transport: Arc<dyn Transport>,
}

impl PolymarketClient {
    /// Create an adapter speaking HTTPS to Polymarket per `config`.
    pub fn new(config: &VenueConfig) -> Self {
        Self {
            transport: Arc::new(HttpTransport::new(config)),
        }
    }

    /// Create an adapter over an injected transport (tests).
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    fn native_outcome(side: Side) -> &'static str {
        match side {
            Side::Up => "YES",
            Side::Down => "NO",
        }
    }

    /// Lowest standing ask for one outcome. Unparseable levels are skipped.
    fn best_ask(asks: &[BookLevel], outcome: &str) -> Option<Decimal> {
        asks.iter()
            .filter(|level| level.outcome == outcome)
            .filter_map(|level| level.price.parse::<Decimal>().ok())
            .min()
    }

    fn normalized_ask(asks: &[BookLevel], outcome: &str) -> u32 {
        Self::best_ask(asks, outcome)
            .map(cents_from_fraction)
            .unwrap_or(DEFAULT_PRICE)
    }
}

#[async_trait]
impl crate::venue::VenueAdapter for PolymarketClient {
    fn platform(&self) -> Platform {
        Platform::Polymarket
    }

    #[instrument(skip(self))]
    async fn market_quote(&self, market_id: &str) -> Result<MarketQuote, VenueError> {
        let raw = self
            .transport
            .get(&format!("/markets/{}/book", market_id), &[])
            .await?;

        let book: BookResponse = serde_json::from_value(raw)
            .map_err(|e| VenueError::Malformed(format!("unexpected book payload: {}", e)))?;

        let betted_price = book
            .betted_price
            .as_deref()
            .and_then(|price| price.parse::<Decimal>().ok())
            .map(cents_from_fraction);

        let quote = MarketQuote::new(
            Self::normalized_ask(&book.asks, "YES"),
            Self::normalized_ask(&book.asks, "NO"),
            betted_price,
        );

        debug!(up = quote.up_price, down = quote.down_price, "normalized quote");
        Ok(quote)
    }

    #[instrument(skip(self, filter))]
    async fn active_markets(&self, filter: &MarketFilter) -> Result<Vec<Value>, VenueError> {
        let query = [
            ("active", "true".to_string()),
            ("token", filter.asset.clone()),
            ("duration", filter.window.clone()),
        ];

        let raw = self.transport.get("/markets", &query).await?;
        Ok(raw.as_array().cloned().unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn buy_token(
        &self,
        market_id: &str,
        side: Side,
        amount: u32,
        max_price: u32,
    ) -> Result<TradeRecord, VenueError> {
        let body = json!({
            "market": market_id,
            "outcome": Self::native_outcome(side),
            "side": "buy",
            "amount": amount.to_string(),
            // Native scale is 0-1: 62 cents goes over the wire as "0.62".
            "price": fraction_from_cents(max_price).to_string(),
        });

        let raw = self.transport.post("/orders", body).await?;

        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| VenueError::Malformed("order response missing id".to_string()))?
            .to_string();
        let tx_hash = raw
            .get("txHash")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        debug!(order_id = %id, "order acknowledged");
        Ok(TradeRecord::pending(
            Platform::Polymarket,
            id,
            market_id,
            side,
            amount,
            max_price,
            tx_hash,
        ))
    }

    #[instrument(skip(self))]
    async fn is_market_resolved(&self, market_id: &str) -> bool {
        match self
            .transport
            .get(&format!("/markets/{}", market_id), &[])
            .await
        {
            Ok(raw) => raw.get("resolved").and_then(Value::as_bool).unwrap_or(false),
            Err(e) => {
                warn!(market_id, error = %e, "resolution check failed, treating as unresolved");
                false
            }
        }
    }

    #[instrument(skip(self))]
    async fn redeem_tokens(&self, market_id: &str, side: Side) -> bool {
        let body = json!({"outcome": Self::native_outcome(side)});

        match self
            .transport
            .post(&format!("/markets/{}/redeem", market_id), body)
            .await
        {
            Ok(raw) => raw.get("success").and_then(Value::as_bool).unwrap_or(false),
            Err(e) => {
                warn!(market_id, error = %e, "redeem request failed");
                false
            }
        }
    }

    #[instrument(skip(self))]
    async fn positions(&self) -> Vec<Value> {
        match self.transport.get("/positions", &[]).await {
            Ok(raw) => raw.as_array().cloned().unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "positions fetch failed, returning empty");
                Vec::new()
            }
        }
    }
}
