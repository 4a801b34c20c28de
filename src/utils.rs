//! Miscellaneous helper utilities.

use alloy_primitives::U256;
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, Sign};
use tracing_subscriber::{EnvFilter, fmt};

/// Decimal places between a token's smallest unit and its display unit.
pub const UNIT_DECIMALS: i64 = 18;

/// Initialize `tracing` subscriber with env-based filter.
///
/// If `RUST_LOG` is not set, defaults to `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

pub fn u256_to_bigint(value: U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>())
}

/// Smallest-unit amount to display units (divides by 10^18, exact).
pub fn from_wei(value: U256) -> BigDecimal {
    BigDecimal::new(u256_to_bigint(value), UNIT_DECIMALS).normalized()
}

/// Display-unit amount to smallest units, rounded half-up to an integer.
pub fn to_wei(value: &BigDecimal) -> BigInt {
    let scaled = value * BigDecimal::new(BigInt::from(1), -UNIT_DECIMALS);
    let (digits, _) = scaled
        .with_scale_round(0, RoundingMode::HalfUp)
        .into_bigint_and_exponent();
    digits
}

/// Round to two decimals using banker's rounding.
pub fn round_percentage(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfEven)
}

/// Plain (non-scientific) string with trailing zeros removed.
pub fn decimal_string(value: &BigDecimal) -> String {
    value.normalized().to_plain_string()
}

/// Fraction to a two-decimal percentage string, e.g. `0.0123` -> `"1.23"`.
pub fn format_pct_string(fraction: &BigDecimal) -> String {
    let pct = fraction * BigDecimal::from(100);
    round_percentage(&pct).to_plain_string()
}

/// Serialize a `BigDecimal` as a plain decimal string, never scientific.
pub mod plain_decimal {
    use bigdecimal::BigDecimal;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        value: &BigDecimal,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_plain_string())
    }
}

/// Serialize a `BigDecimal` as a JSON number.
pub mod decimal_number {
    use bigdecimal::BigDecimal;
    use num_traits::ToPrimitive;
    use serde::{Serializer, ser::Error};

    pub fn serialize<S: Serializer>(
        value: &BigDecimal,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let number = value
            .to_f64()
            .ok_or_else(|| S::Error::custom(format!("{value} is not representable as f64")))?;
        serializer.serialize_f64(number)
    }
}
