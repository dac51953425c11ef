//! BCV central-bank provider.
//!
//! The Banco Central de Venezuela publishes its reference rates as plain
//! HTML rather than a structured API. The two figures sit at fixed DOM
//! locations and use a decimal comma, so extraction is structural text
//! selection followed by a comma-to-period rewrite.
//!
//! The site presents a certificate chain the default trust store rejects,
//! so this provider's client relaxes certificate validation. The
//! relaxation is scoped to this one client; the market provider keeps
//! full verification.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use scraper::{Html, Selector};

use crate::errors::RateError;
use crate::models::OfficialRates;
use crate::provider::OfficialRateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "BCV";

/// Source URL and the structural selectors for the two published rates.
#[derive(Clone, Debug)]
pub struct BcvConfig {
    pub url: String,
    pub usd_selector: String,
    pub eur_selector: String,
    pub timeout: Duration,
}

impl Default for BcvConfig {
    fn default() -> Self {
        Self {
            url: "https://www.bcv.org.ve/".to_string(),
            usd_selector: "#dolar strong".to_string(),
            eur_selector: "#euro strong".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

pub struct BcvProvider {
    client: Client,
    config: BcvConfig,
}

impl BcvProvider {
    pub fn new(config: BcvConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }
}

/// Pull one locale-formatted rate out of the document.
fn extract_rate(document: &Html, selector: &str) -> Result<Decimal, RateError> {
    let parsed = Selector::parse(selector).map_err(|e| RateError::Parse {
        provider: PROVIDER_ID,
        message: format!("bad selector {selector:?}: {e}"),
    })?;

    let element = document
        .select(&parsed)
        .next()
        .ok_or_else(|| RateError::SelectorMiss {
            provider: PROVIDER_ID,
            selector: selector.to_string(),
        })?;

    let text = element.text().collect::<String>();
    let normalized = text.trim().replace(',', ".");
    normalized.parse().map_err(|_| RateError::Parse {
        provider: PROVIDER_ID,
        message: format!("non-numeric rate {:?} at {selector}", text.trim()),
    })
}

/// Extract both rates from a fetched page body.
///
/// Each field degrades to `None` on its own; one broken slot does not
/// take the other down.
fn parse_official_rates(body: &str, config: &BcvConfig) -> OfficialRates {
    let document = Html::parse_document(body);
    let mut rates = OfficialRates::default();

    for (slot, selector) in [
        (&mut rates.usd, &config.usd_selector),
        (&mut rates.eur, &config.eur_selector),
    ] {
        match extract_rate(&document, selector) {
            Ok(value) => *slot = Some(value),
            Err(e) => tracing::warn!("{e}"),
        }
    }

    rates
}

#[async_trait]
impl OfficialRateProvider for BcvProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_rates(&self) -> Result<OfficialRates, RateError> {
        let response = self
            .client
            .get(&self.config.url)
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

        let body = response.text().await.map_err(|e| RateError::Http {
            provider: PROVIDER_ID,
            message: e.to_string(),
        })?;

        // `Html` is not `Send`; parsing stays synchronous so the document
        // never crosses an await point.
        Ok(parse_official_rates(&body, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const PAGE: &str = r#"
        <html><body>
            <div id="dolar"><span>USD</span><strong> 36,50 </strong></div>
            <div id="euro"><span>EUR</span><strong> 39,80 </strong></div>
        </body></html>
    "#;

    #[test]
    fn parses_comma_decimal_rates() {
        let rates = parse_official_rates(PAGE, &BcvConfig::default());
        assert_eq!(rates.usd, Some(dec!(36.50)));
        assert_eq!(rates.eur, Some(dec!(39.80)));
    }

    #[test]
    fn missing_slot_defaults_that_field_alone() {
        let page = r#"<html><body>
            <div id="dolar"><strong>36,50</strong></div>
        </body></html>"#;
        let rates = parse_official_rates(page, &BcvConfig::default());
        assert_eq!(rates.usd, Some(dec!(36.50)));
        assert_eq!(rates.eur, None);
    }

    #[test]
    fn non_numeric_slot_defaults_that_field_alone() {
        let page = r#"<html><body>
            <div id="dolar"><strong>pronto</strong></div>
            <div id="euro"><strong>39,80</strong></div>
        </body></html>"#;
        let rates = parse_official_rates(page, &BcvConfig::default());
        assert_eq!(rates.usd, None);
        assert_eq!(rates.eur, Some(dec!(39.80)));
    }

    #[test]
    fn empty_document_yields_no_rates() {
        let rates = parse_official_rates("<html></html>", &BcvConfig::default());
        assert_eq!(rates.usd, None);
        assert_eq!(rates.eur, None);
    }

    #[test]
    fn extract_rate_keeps_full_precision() {
        let document = Html::parse_document(
            r#"<div id="dolar"><strong>36,49590000</strong></div>"#,
        );
        let value = extract_rate(&document, "#dolar strong").unwrap();
        assert_eq!(value, dec!(36.49590000));
    }

    #[test]
    fn extract_rate_reports_selector_miss() {
        let document = Html::parse_document("<html></html>");
        let err = extract_rate(&document, "#dolar strong").unwrap_err();
        assert!(matches!(err, RateError::SelectorMiss { .. }));
    }
}
