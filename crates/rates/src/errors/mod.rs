//! Error types for upstream rate fetching.

use thiserror::Error;

/// Errors that can occur while fetching a rate from an upstream source.
///
/// Every variant carries the provider id so the aggregation layer can log
/// a useful diagnostic before degrading the affected field to `"0.00"`.
/// None of these errors ever reach the HTTP client.
#[derive(Error, Debug)]
pub enum RateError {
    /// The outbound request failed before a usable response arrived
    /// (connect error, TLS failure, timeout, truncated body).
    #[error("request failed: {provider} - {message}")]
    Http {
        /// The provider whose request failed
        provider: &'static str,
        /// The underlying client error
        message: String,
    },

    /// The upstream answered with a non-success HTTP status.
    #[error("unexpected status: {provider} - {status}")]
    Status {
        /// The provider that returned the status
        provider: &'static str,
        /// The HTTP status code
        status: u16,
    },

    /// The market listing came back empty or absent.
    #[error("empty listing: {provider}")]
    EmptyListing {
        /// The provider whose listing was empty
        provider: &'static str,
    },

    /// A payload could not be parsed, either as JSON or as a number.
    #[error("parse failure: {provider} - {message}")]
    Parse {
        /// The provider whose payload failed to parse
        provider: &'static str,
        /// Description of what failed to parse
        message: String,
    },

    /// A structural selector matched nothing in the scraped document.
    #[error("selector miss: {provider} - {selector}")]
    SelectorMiss {
        /// The provider whose document was scraped
        provider: &'static str,
        /// The selector that matched nothing
        selector: String,
    },
}
