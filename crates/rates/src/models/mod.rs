//! Wire-level models and formatting for the aggregated rates response.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Wire value used whenever an upstream rate is unavailable.
pub const DEFAULT_RATE: &str = "0.00";

/// BCV scrape result before formatting.
///
/// Each field is independently `None` when its DOM slot is missing or
/// non-numeric; one broken slot does not take the other down.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfficialRates {
    pub usd: Option<Decimal>,
    pub eur: Option<Decimal>,
}

/// Central-bank quote as it appears on the wire.
#[derive(Clone, Debug, Serialize)]
pub struct BcvQuote {
    pub usd: String,
    pub eur: String,
}

/// Response body for `GET /api/tasas`.
///
/// Field names are part of the public contract and stay in Spanish.
/// Built fresh on every request and dropped after serialization.
#[derive(Clone, Debug, Serialize)]
pub struct AggregatedRates {
    pub fecha: String,
    pub bcv: BcvQuote,
    pub binance: String,
}

/// Format a rate with exactly two fractional digits.
///
/// Rounds half away from zero, so `10.005` becomes `"10.01"` and `36.5`
/// becomes `"36.50"`.
pub fn format_rate(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Render a UTC instant the way the Venezuelan audience expects it, e.g.
/// `25/8/2026, 1:05:09 p. m.` — day and month without leading zeros,
/// twelve-hour clock, spelled-out meridiem.
pub fn localized_timestamp(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = instant.with_timezone(&offset);
    let (is_pm, hour) = local.hour12();
    let meridiem = if is_pm { "p. m." } else { "a. m." };
    format!(
        "{}/{}/{}, {}:{:02}:{:02} {}",
        local.day(),
        local.month(),
        local.year(),
        hour,
        local.minute(),
        local.second(),
        meridiem
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn format_rate_pads_to_two_decimals() {
        assert_eq!(format_rate(dec!(36.5)), "36.50");
        assert_eq!(format_rate(dec!(36)), "36.00");
        assert_eq!(format_rate(dec!(0)), "0.00");
    }

    #[test]
    fn format_rate_rounds_half_away_from_zero() {
        assert_eq!(format_rate(dec!(10.005)), "10.01");
        assert_eq!(format_rate(dec!(36.494)), "36.49");
        assert_eq!(format_rate(dec!(36.495)), "36.50");
    }

    #[test]
    fn format_rate_truncates_long_fractions() {
        assert_eq!(format_rate(dec!(36.49590000)), "36.50");
    }

    #[test]
    fn localized_timestamp_renders_caracas_afternoon() {
        // 2026-08-25 17:05:09 UTC is 1:05:09 p. m. at UTC-4.
        let instant = Utc.with_ymd_and_hms(2026, 8, 25, 17, 5, 9).unwrap();
        let offset = FixedOffset::east_opt(-4 * 3600).unwrap();
        assert_eq!(
            localized_timestamp(instant, offset),
            "25/8/2026, 1:05:09 p. m."
        );
    }

    #[test]
    fn localized_timestamp_renders_morning_and_midnight() {
        let offset = FixedOffset::east_opt(-4 * 3600).unwrap();

        let morning = Utc.with_ymd_and_hms(2026, 1, 2, 13, 0, 0).unwrap();
        assert_eq!(localized_timestamp(morning, offset), "2/1/2026, 9:00:00 a. m.");

        // Midnight local renders as 12, not 0.
        let midnight = Utc.with_ymd_and_hms(2026, 1, 2, 4, 0, 0).unwrap();
        assert_eq!(
            localized_timestamp(midnight, offset),
            "2/1/2026, 12:00:00 a. m."
        );
    }
}
