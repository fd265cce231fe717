//! Kalshi venue adapter.
//!
//! Kalshi already quotes in integer cents on the canonical 0-100 scale, so
//! prices pass through unchanged; the work here is side vocabulary
//! (`yes`/`no`) and Kalshi's ticker-keyed order and settlement bodies.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::config::VenueConfig;
use crate::error::VenueError;
use crate::model::{MarketFilter, MarketQuote, Platform, Side, TradeRecord, DEFAULT_PRICE};
use crate::transport::{HttpTransport, Transport};

/// Market payload envelope.
#[derive(Debug, Clone, Deserialize)]
struct MarketEnvelope {
    market: KalshiMarket,
}

/// The slice of Kalshi's market object this adapter reads.
#[derive(Debug, Clone, Deserialize)]
struct KalshiMarket {
    /// Best ask for the YES outcome, cents. 0 means no standing asks.
    #[serde(default)]
    yes_ask: u32,
    /// Best ask for the NO outcome, cents. 0 means no standing asks.
    #[serde(default)]
    no_ask: u32,
    /// Settlement price, cents, once the market has settled.
    #[serde(default)]
    betted_price: Option<u32>,
}

/// Kalshi adapter (Venue A, integer 0-100 price scale).
#[derive(Debug, Clone)]
pub struct KalshiClient {
    transport: Arc<dyn Transport>,
}

impl KalshiClient {
    /// Create an adapter speaking HTTPS to Kalshi per `config`.
    pub fn new(config: &VenueConfig) -> Self {
        Self {
            transport: Arc::new(HttpTransport::new(config)),
        }
    }

    /// Create an adapter over an injected transport (tests).
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    fn native_side(side: Side) -> &'static str {
        match side {
            Side::Up => "yes",
            Side::Down => "no",
        }
    }

    /// Best ask passes through unchanged; 0 means no asks, so the
    /// maximal-uncertainty default applies.
    fn ask_or_default(ask: u32) -> u32 {
        if ask > 0 {
            ask
        } else {
            DEFAULT_PRICE
        }
    }
}

#[async_trait]
impl crate::venue::VenueAdapter for KalshiClient {
    fn platform(&self) -> Platform {
        Platform::Kalshi
    }

    #[instrument(skip(self))]
    async fn market_quote(&self, market_id: &str) -> Result<MarketQuote, VenueError> {
        let raw = self
            .transport
            .get(&format!("/markets/{}", market_id), &[])
            .await?;

        let envelope: MarketEnvelope = serde_json::from_value(raw)
            .map_err(|e| VenueError::Malformed(format!("unexpected market payload: {}", e)))?;
        let market = envelope.market;

        let quote = MarketQuote::new(
            Self::ask_or_default(market.yes_ask),
            Self::ask_or_default(market.no_ask),
            // A reported 0 is "no settlement price yet", not a real price.
            market.betted_price.filter(|price| *price > 0),
        );

        debug!(up = quote.up_price, down = quote.down_price, "normalized quote");
        Ok(quote)
    }

    #[instrument(skip(self, filter))]
    async fn active_markets(&self, filter: &MarketFilter) -> Result<Vec<Value>, VenueError> {
        let query = [
            ("status", "open".to_string()),
            ("ticker", filter.asset.clone()),
            ("series_ticker", filter.series_ticker()),
        ];

        let raw = self.transport.get("/markets", &query).await?;
        Ok(raw
            .get("markets")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn buy_token(
        &self,
        market_id: &str,
        side: Side,
        amount: u32,
        max_price: u32,
    ) -> Result<TradeRecord, VenueError> {
        let mut body = json!({
            "ticker": market_id,
            "action": "buy",
            "side": Self::native_side(side),
            "count": amount,
            "type": "limit",
        });
        // Kalshi keys the limit price by side.
        match side {
            Side::Up => body["yes_price"] = json!(max_price),
            Side::Down => body["no_price"] = json!(max_price),
        }

        let raw = self.transport.post("/portfolio/orders", body).await?;

        let order_id = raw
            .get("order_id")
            .and_then(Value::as_str)
            .ok_or_else(|| VenueError::Malformed("order response missing order_id".to_string()))?;

        debug!(order_id, "order acknowledged");
        Ok(TradeRecord::pending(
            Platform::Kalshi,
            order_id,
            market_id,
            side,
            amount,
            max_price,
            // Kalshi has no separate settlement reference; the order id
            // doubles as the correlation token.
            order_id,
        ))
    }

    #[instrument(skip(self))]
    async fn is_market_resolved(&self, market_id: &str) -> bool {
        match self
            .transport
            .get(&format!("/markets/{}", market_id), &[])
            .await
        {
            Ok(raw) => raw.pointer("/market/status").and_then(Value::as_str) == Some("resolved"),
            Err(e) => {
                warn!(market_id, error = %e, "resolution check failed, treating as unresolved");
                false
            }
        }
    }

    #[instrument(skip(self))]
    async fn redeem_tokens(&self, market_id: &str, side: Side) -> bool {
        let body = json!({
            "ticker": market_id,
            "side": Self::native_side(side),
        });

        match self.transport.post("/portfolio/settlements", body).await {
            Ok(raw) => raw.get("success").and_then(Value::as_bool).unwrap_or(false),
            Err(e) => {
                warn!(market_id, error = %e, "redeem request failed");
                false
            }
        }
    }

    #[instrument(skip(self))]
    async fn positions(&self) -> Vec<Value> {
        match self.transport.get("/portfolio/balance", &[]).await {
            Ok(raw) => raw
                .get("positions")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "positions fetch failed, returning empty");
                Vec::new()
            }
        }
    }
}
