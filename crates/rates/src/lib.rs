//! Exchange-rate aggregation for the tasas-ve service.
//!
//! This crate fetches two independent views of the bolívar exchange rate
//! and merges them into one response object:
//!
//! - [`BinanceP2pProvider`] averages the first page of sell-side USDT/VES
//!   adverts from the Binance P2P search API.
//! - [`BcvProvider`] scrapes the USD and EUR reference rates the Banco
//!   Central de Venezuela publishes as plain HTML.
//!
//! [`RatesService`] runs both fetches concurrently and absorbs every
//! upstream failure: a field whose source is unavailable degrades to
//! `"0.00"` instead of surfacing an error. The service is therefore
//! infallible from the HTTP layer's point of view.
//!
//! No retries, no caching, no state across calls. Each aggregation is a
//! single fan-out/fan-in of two requests.

pub mod errors;
pub mod models;
pub mod provider;
pub mod service;

pub use errors::RateError;
pub use models::{AggregatedRates, BcvQuote, OfficialRates};
pub use provider::bcv::{BcvConfig, BcvProvider};
pub use provider::binance_p2p::{BinanceP2pConfig, BinanceP2pProvider};
pub use provider::{MarketRateProvider, OfficialRateProvider};
pub use service::{RatesService, RatesServiceTrait};
