//! Binance P2P market provider.
//!
//! Queries the public P2P advert-search endpoint for sell-side USDT/VES
//! offers payable through a single payment method and averages the first
//! page of listings. Averaging page 1 / 10 rows / one payment method is a
//! sampling of a much larger live order book, not a volume-weighted
//! market price.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::RateError;
use crate::provider::MarketRateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "BINANCE_P2P";

/// Query parameters for the advert search.
///
/// Everything the endpoint is asked for is named here rather than inlined
/// at the call site. The defaults reproduce the production query: first
/// page of ten sell-side USDT/VES adverts payable via Pago Móvil.
#[derive(Clone, Debug)]
pub struct BinanceP2pConfig {
    pub endpoint: String,
    pub asset: String,
    pub fiat: String,
    pub trade_type: String,
    pub page: u32,
    pub rows: u32,
    pub pay_types: Vec<String>,
    /// The endpoint rejects clients without a browser-ish user agent.
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for BinanceP2pConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://p2p.binance.com/bapi/c2c/v2/friendly/c2c/adv/search".to_string(),
            asset: "USDT".to_string(),
            fiat: "VES".to_string(),
            trade_type: "SELL".to_string(),
            page: 1,
            rows: 10,
            pay_types: vec!["PagoMovil".to_string()],
            user_agent: "Mozilla/5.0".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Request body for the advert-search endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    asset: &'a str,
    fiat: &'a str,
    trade_type: &'a str,
    page: u32,
    rows: u32,
    pay_types: &'a [String],
}

/// Advert-search response. Only the unit price is of interest.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Option<Vec<Listing>>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    adv: Advert,
}

#[derive(Debug, Deserialize)]
struct Advert {
    /// Unit price as a decimal string, e.g. `"36.55"`.
    price: String,
}

pub struct BinanceP2pProvider {
    client: Client,
    config: BinanceP2pConfig,
}

impl BinanceP2pProvider {
    pub fn new(config: BinanceP2pConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Arithmetic mean of the listed prices.
    fn mean_price(listings: &[Listing]) -> Result<Decimal, RateError> {
        if listings.is_empty() {
            return Err(RateError::EmptyListing {
                provider: PROVIDER_ID,
            });
        }

        let mut sum = Decimal::ZERO;
        for listing in listings {
            let price: Decimal =
                listing
                    .adv
                    .price
                    .trim()
                    .parse()
                    .map_err(|_| RateError::Parse {
                        provider: PROVIDER_ID,
                        message: format!("unparsable listing price {:?}", listing.adv.price),
                    })?;
            sum += price;
        }

        Ok(sum / Decimal::from(listings.len()))
    }
}

#[async_trait]
impl MarketRateProvider for BinanceP2pProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn average_sell_price(&self) -> Result<Decimal, RateError> {
        let cfg = &self.config;
        let body = SearchRequest {
            asset: &cfg.asset,
            fiat: &cfg.fiat,
            trade_type: &cfg.trade_type,
            page: cfg.page,
            rows: cfg.rows,
            pay_types: &cfg.pay_types,
        };

        let response = self
            .client
            .post(&cfg.endpoint)
            .header(reqwest::header::USER_AGENT, &cfg.user_agent)
            .json(&body)
            .send()
            .await
            .map_err(|e| RateError::Http {
                provider: PROVIDER_ID,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status {
                provider: PROVIDER_ID,
                status: status.as_u16(),
            });
        }

        let search: SearchResponse = response.json().await.map_err(|e| RateError::Parse {
            provider: PROVIDER_ID,
            message: e.to_string(),
        })?;

        Self::mean_price(search.data.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn listings(prices: &[&str]) -> Vec<Listing> {
        prices
            .iter()
            .map(|p| Listing {
                adv: Advert {
                    price: (*p).to_string(),
                },
            })
            .collect()
    }

    #[test]
    fn mean_price_averages_the_listing() {
        let listings = listings(&["36.50", "36.60", "36.70"]);
        assert_eq!(
            BinanceP2pProvider::mean_price(&listings).unwrap(),
            dec!(36.60)
        );
    }

    #[test]
    fn mean_price_tolerates_whitespace() {
        let listings = listings(&[" 40.00 ", "41.00"]);
        assert_eq!(
            BinanceP2pProvider::mean_price(&listings).unwrap(),
            dec!(40.50)
        );
    }

    #[test]
    fn mean_price_rejects_empty_listing() {
        let err = BinanceP2pProvider::mean_price(&[]).unwrap_err();
        assert!(matches!(err, RateError::EmptyListing { .. }));
    }

    #[test]
    fn mean_price_rejects_unparsable_price() {
        let listings = listings(&["36.50", "not-a-number"]);
        let err = BinanceP2pProvider::mean_price(&listings).unwrap_err();
        assert!(matches!(err, RateError::Parse { .. }));
    }

    #[test]
    fn search_response_deserializes_nested_adverts() {
        let raw = r#"{"data":[{"adv":{"price":"36.55","other":"ignored"}},{"adv":{"price":"36.65"}}]}"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let data = parsed.data.unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].adv.price, "36.55");
    }

    #[test]
    fn search_response_tolerates_null_data() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(parsed.data.is_none());
    }

    #[test]
    fn search_request_serializes_camel_case() {
        let pay_types = vec!["PagoMovil".to_string()];
        let body = SearchRequest {
            asset: "USDT",
            fiat: "VES",
            trade_type: "SELL",
            page: 1,
            rows: 10,
            pay_types: &pay_types,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["tradeType"], "SELL");
        assert_eq!(json["payTypes"][0], "PagoMovil");
    }

    #[test]
    fn default_config_matches_production_query() {
        let cfg = BinanceP2pConfig::default();
        assert_eq!(cfg.asset, "USDT");
        assert_eq!(cfg.fiat, "VES");
        assert_eq!(cfg.trade_type, "SELL");
        assert_eq!(cfg.page, 1);
        assert_eq!(cfg.rows, 10);
        assert_eq!(cfg.pay_types, vec!["PagoMovil".to_string()]);
    }
}
