//! Canonical data model shared by every venue adapter.
//!
//! Everything outside the adapter boundary speaks in these types: prices on
//! a single 0-100 integer scale (cents per contract), sides as `up`/`down`
//! regardless of the venue's native vocabulary, and timestamps captured on
//! our side of the wire so they are comparable across venues.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

/// Upper bound of the canonical price scale (cents).
pub const MAX_PRICE: u32 = 100;

/// Canonical price substituted when an outcome has no standing asks.
///
/// 50 cents is maximal uncertainty. Never 0: a zero would read as a real
/// zero-probability quote to any strategy consuming it.
pub const DEFAULT_PRICE: u32 = 50;

/// Canonical outcome side for a binary up/down market.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// BTC closes up (the venue's YES outcome).
    #[strum(serialize = "up", serialize = "yes", serialize = "UP", serialize = "YES")]
    #[default]
    Up,
    /// BTC closes down (the venue's NO outcome).
    #[strum(serialize = "down", serialize = "no", serialize = "DOWN", serialize = "NO")]
    Down,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Up => Side::Down,
            Side::Down => Side::Up,
        }
    }
}

/// Closed set of venues this layer can speak to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Kalshi (integer 0-100 price scale).
    #[strum(serialize = "kalshi")]
    Kalshi,
    /// Polymarket (fractional 0-1 price scale).
    #[strum(serialize = "polymarket")]
    Polymarket,
}

/// Trade lifecycle status.
///
/// This layer only ever constructs `Pending`: fill confirmation is a
/// caller concern layered on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    /// Order acknowledged by the venue, fill unknown.
    #[strum(serialize = "pending")]
    Pending,
    /// Order confirmed filled.
    #[strum(serialize = "completed")]
    Completed,
    /// Order failed or was rejected after acknowledgment.
    #[strum(serialize = "failed")]
    Failed,
}

/// Normalized snapshot of a single market's top-of-book state.
///
/// Value object: constructed fresh on every quote request, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Cost of one "up" contract in cents, always within `[0, 100]`.
    pub up_price: u32,
    /// Cost of one "down" contract in cents, always within `[0, 100]`.
    pub down_price: u32,
    /// Settlement price, present only once the market has settled.
    pub betted_price: Option<u32>,
    /// Capture time, set by the adapter when the quote call completed.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl MarketQuote {
    /// Build a quote stamped with the current time.
    pub fn new(up_price: u32, down_price: u32, betted_price: Option<u32>) -> Self {
        Self {
            up_price,
            down_price,
            betted_price,
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

/// Outcome of a buy request, constructed once the venue acknowledges the
/// order. Immutable thereafter within this layer's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Venue-assigned order identifier.
    pub id: String,
    /// Caller-supplied market identifier, echoed back unchanged.
    pub market_id: String,
    /// Which venue produced this record.
    pub platform: Platform,
    /// Canonical side, independent of the venue's native vocabulary.
    pub side: Side,
    /// Contract count requested (not necessarily filled).
    pub amount: u32,
    /// Limit price on the canonical 0-100 scale, not the venue-native scale.
    pub price: u32,
    /// Always `Pending` at construction.
    pub status: TradeStatus,
    /// Opaque venue-specific settlement/transaction reference.
    pub tx_hash: String,
    /// Record creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl TradeRecord {
    /// Build a pending record for a just-acknowledged order.
    pub fn pending(
        platform: Platform,
        id: impl Into<String>,
        market_id: impl Into<String>,
        side: Side,
        amount: u32,
        price: u32,
        tx_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            market_id: market_id.into(),
            platform,
            side,
            amount,
            price,
            status: TradeStatus::Pending,
            tx_hash: tx_hash.into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

/// Canonical listing filter, translated by each adapter into its venue's
/// native query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketFilter {
    /// Underlying asset symbol.
    pub asset: String,
    /// Contract window label, lowercase (e.g. "15m").
    pub window: String,
}

impl Default for MarketFilter {
    fn default() -> Self {
        Self {
            asset: "BTC".to_string(),
            window: "15m".to_string(),
        }
    }
}

impl MarketFilter {
    /// Series ticker in the "ASSET-WINDOW" form integer-scale venues use
    /// (e.g. "BTC-15M").
    pub fn series_ticker(&self) -> String {
        format!("{}-{}", self.asset, self.window.to_uppercase())
    }
}

/// Convert a fractional 0-1 venue price into canonical cents:
/// `round(p * 100)`, clamped into `[0, 100]`.
pub fn cents_from_fraction(price: Decimal) -> u32 {
    // Conventional rounding: 0.625 is 63 cents, not banker's 62.
    let cents = (price * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    cents.to_u32().unwrap_or(0).min(MAX_PRICE)
}

/// Convert a canonical cents price into the fractional 0-1 scale
/// (62 -> 0.62). Exact: no float arithmetic involved.
pub fn fraction_from_cents(price: u32) -> Decimal {
    Decimal::new(i64::from(price), 2)
}
