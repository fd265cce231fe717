//! Venue adapters and the abstract contract they implement.
//!
//! One adapter per brokerage, sharing nothing but the canonical model. A
//! caller holds one adapter per venue and treats them polymorphically
//! through [`VenueAdapter`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::VenueError;
use crate::model::{MarketFilter, MarketQuote, Platform, Side, TradeRecord};

pub mod kalshi;
pub mod polymarket;

pub use kalshi::KalshiClient;
pub use polymarket::PolymarketClient;

/// The abstract venue contract.
///
/// Failure visibility is part of the contract, not an accident:
/// operations that gate whether capital is risked ([`market_quote`],
/// [`active_markets`], [`buy_token`]) propagate every failure, while the
/// operations polled opportunistically in a loop ([`is_market_resolved`],
/// [`redeem_tokens`], [`positions`]) collapse failures into a safe default
/// and log a warning instead.
///
/// [`market_quote`]: VenueAdapter::market_quote
/// [`active_markets`]: VenueAdapter::active_markets
/// [`buy_token`]: VenueAdapter::buy_token
/// [`is_market_resolved`]: VenueAdapter::is_market_resolved
/// [`redeem_tokens`]: VenueAdapter::redeem_tokens
/// [`positions`]: VenueAdapter::positions
#[async_trait]
pub trait VenueAdapter: Send + Sync {
    /// Which venue this adapter speaks to.
    fn platform(&self) -> Platform;

    /// Fetch a normalized top-of-book quote for `market_id`.
    ///
    /// Best-ask prices per outcome on the canonical 0-100 scale;
    /// [`DEFAULT_PRICE`](crate::model::DEFAULT_PRICE) substituted for an
    /// outcome with no standing asks; `betted_price` populated only when
    /// the venue reports a settlement price. The timestamp is captured
    /// when this call completes, never taken from the venue payload.
    async fn market_quote(&self, market_id: &str) -> Result<MarketQuote, VenueError>;

    /// List the venue's currently open markets matching `filter`, as
    /// venue-native descriptors. No shape normalization: callers needing
    /// canonical identifiers extract them downstream.
    async fn active_markets(&self, filter: &MarketFilter) -> Result<Vec<Value>, VenueError>;

    /// Place a single-leg limit buy: `amount` contracts of `side` at
    /// `max_price` (canonical 0-100 scale). Exactly one order per call,
    /// no retry, no splitting; returns as soon as the venue acknowledges,
    /// without waiting for a fill.
    async fn buy_token(
        &self,
        market_id: &str,
        side: Side,
        amount: u32,
        max_price: u32,
    ) -> Result<TradeRecord, VenueError>;

    /// Whether the venue unambiguously reports the market as resolved.
    /// Any error reads as `false`.
    async fn is_market_resolved(&self, market_id: &str) -> bool;

    /// Request redemption of a resolved position. `true` only on an
    /// explicit success acknowledgment; ambiguity or any error reads as
    /// `false`. Idempotence under retry is the venue's responsibility.
    async fn redeem_tokens(&self, market_id: &str, side: Side) -> bool;

    /// The venue's native position/balance listing, best effort. Any
    /// error reads as an empty listing.
    async fn positions(&self) -> Vec<Value>;
}
