//! Lenient numeric input.
//!
//! Quantities, prices and the delivery charge arrive as whatever the user
//! typed. Anything that is not a finite number counts as zero; none of this
//! is ever reported as an error.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Replace NaN and infinities with zero.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Parse free-form text as an amount.
///
/// Surrounding whitespace is ignored; empty, unparsable and non-finite input
/// all become `0.0`.
pub fn coerce_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().map(sanitize).unwrap_or(0.0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Serde adapter accepting numbers, numeric strings, `null` or anything else,
/// coerced with the same rules as [`coerce_amount`].
pub fn lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(n) => sanitize(n),
        RawAmount::Text(s) => coerce_amount(&s),
        RawAmount::Other(_) => 0.0,
    })
}
