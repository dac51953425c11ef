//! Provider trait definitions for the two upstream rate sources.
//!
//! The aggregation service only ever talks to these traits, which keeps
//! the fan-out/degrade logic testable without touching the network.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::RateError;
use crate::models::OfficialRates;

/// A P2P market source producing one averaged sell-side price.
#[async_trait]
pub trait MarketRateProvider: Send + Sync {
    /// Unique identifier, used in logs and error diagnostics.
    fn id(&self) -> &'static str;

    /// Fetch the current listing page and average its prices.
    ///
    /// One attempt, no retry. Any failure mode — network, non-2xx,
    /// empty listing, unparsable price — surfaces as a [`RateError`].
    async fn average_sell_price(&self) -> Result<Decimal, RateError>;
}

/// An official source publishing USD and EUR reference rates.
#[async_trait]
pub trait OfficialRateProvider: Send + Sync {
    /// Unique identifier, used in logs and error diagnostics.
    fn id(&self) -> &'static str;

    /// Fetch the published rates.
    ///
    /// `Err` means the page itself could not be retrieved; an individual
    /// field is `None` when its slot on the page is missing or
    /// non-numeric. One attempt, no retry.
    async fn latest_rates(&self) -> Result<OfficialRates, RateError>;
}
