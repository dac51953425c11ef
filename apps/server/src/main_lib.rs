use std::sync::Arc;

use tasas_rates::{
    BcvConfig, BcvProvider, BinanceP2pConfig, BinanceP2pProvider, RatesService, RatesServiceTrait,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub rates_service: Arc<dyn RatesServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("TASAS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let market = BinanceP2pProvider::new(BinanceP2pConfig {
        timeout: config.http_timeout,
        ..BinanceP2pConfig::default()
    });
    let official = BcvProvider::new(BcvConfig {
        timeout: config.http_timeout,
        ..BcvConfig::default()
    });
    let rates_service = Arc::new(RatesService::new(Arc::new(market), Arc::new(official)));

    Arc::new(AppState { rates_service })
}
