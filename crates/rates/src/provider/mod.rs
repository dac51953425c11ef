//! Upstream rate providers.

pub mod bcv;
pub mod binance_p2p;
mod traits;

pub use traits::{MarketRateProvider, OfficialRateProvider};
