//! Venue-abstraction layer for BTC 15-minute binary prediction markets.
//!
//! Two brokerages expose structurally different REST APIs for the same
//! 15-minute up/down contracts. This crate presents one canonical contract
//! for quoting, listing, buying, resolution checks, redemption, and
//! positions, so a strategy built on top never knows which venue it is
//! talking to.
//!
//! The real work is normalization:
//!
//! ```text
//! Kalshi:      integer cents, yes/no      ->  0-100 cents, up/down
//! Polymarket:  0-1 decimal strings, YES/NO -> 0-100 cents, up/down
//! ```
//!
//! An outcome with no standing asks quotes at 50 (maximal uncertainty),
//! never 0. Capital-gating operations propagate failures; polled
//! operations degrade to safe defaults. See [`venue::VenueAdapter`] for
//! the full contract.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`model`]: Canonical data model and price-scale conversions
//! - [`transport`]: JSON-over-HTTPS transport seam (real and mock)
//! - [`venue`]: The adapter contract and the per-venue implementations

pub mod config;
pub mod error;
pub mod model;
pub mod transport;
pub mod venue;

pub use config::{Config, VenueConfig};
pub use error::{BridgeError, Result, VenueError};
pub use model::{MarketFilter, MarketQuote, Platform, Side, TradeRecord, TradeStatus};
pub use venue::{KalshiClient, PolymarketClient, VenueAdapter};
