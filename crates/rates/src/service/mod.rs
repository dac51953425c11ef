//! Aggregation of the two upstream sources into one response.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{FixedOffset, Utc};

use crate::models::{format_rate, localized_timestamp, AggregatedRates, BcvQuote, DEFAULT_RATE};
use crate::provider::{MarketRateProvider, OfficialRateProvider};

/// Offset for America/Caracas. Venezuela does not observe DST.
const CARACAS_UTC_OFFSET_SECS: i32 = -4 * 3600;

/// Service seam for the HTTP layer; lets tests swap in canned providers.
#[async_trait]
pub trait RatesServiceTrait: Send + Sync {
    /// Fetch both sources concurrently and merge them.
    ///
    /// Infallible by contract: an unavailable upstream degrades its
    /// fields to `"0.00"` after a logged warning. The caller cannot
    /// distinguish a real zero from a failed fetch.
    async fn aggregate(&self) -> AggregatedRates;
}

pub struct RatesService {
    market: Arc<dyn MarketRateProvider>,
    official: Arc<dyn OfficialRateProvider>,
    offset: FixedOffset,
}

impl RatesService {
    pub fn new(
        market: Arc<dyn MarketRateProvider>,
        official: Arc<dyn OfficialRateProvider>,
    ) -> Self {
        // -4h is always within chrono's valid offset range.
        let offset = FixedOffset::east_opt(CARACAS_UTC_OFFSET_SECS).unwrap();
        Self::with_offset(market, official, offset)
    }

    pub fn with_offset(
        market: Arc<dyn MarketRateProvider>,
        official: Arc<dyn OfficialRateProvider>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            market,
            official,
            offset,
        }
    }
}

#[async_trait]
impl RatesServiceTrait for RatesService {
    async fn aggregate(&self) -> AggregatedRates {
        // Fan out both fetches at once; neither can cancel the other.
        let (market, official) = tokio::join!(
            self.market.average_sell_price(),
            self.official.latest_rates()
        );

        let binance = match market {
            Ok(mean) => format_rate(mean),
            Err(e) => {
                tracing::warn!(provider = self.market.id(), "market rate unavailable: {e}");
                DEFAULT_RATE.to_string()
            }
        };

        let bcv = match official {
            Ok(rates) => BcvQuote {
                usd: rates
                    .usd
                    .map(format_rate)
                    .unwrap_or_else(|| DEFAULT_RATE.to_string()),
                eur: rates
                    .eur
                    .map(format_rate)
                    .unwrap_or_else(|| DEFAULT_RATE.to_string()),
            },
            Err(e) => {
                tracing::warn!(
                    provider = self.official.id(),
                    "official rates unavailable: {e}"
                );
                BcvQuote {
                    usd: DEFAULT_RATE.to_string(),
                    eur: DEFAULT_RATE.to_string(),
                }
            }
        };

        AggregatedRates {
            fecha: localized_timestamp(Utc::now(), self.offset),
            bcv,
            binance,
        }
    }
}
