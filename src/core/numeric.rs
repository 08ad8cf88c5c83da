//! Lenient numeric parsing for snapshot fields
//!
//! Nation and offer feeds deliver resource levels either as JSON numbers or as
//! comma-grouped strings ("1,234.50"). Anything that cannot be read as a
//! finite, non-negative number becomes 0 so that dirty input degrades to zero
//! capacity instead of failing a run.

use serde::{Deserialize, Deserializer};

/// Parse a possibly comma-grouped number, returning 0.0 for anything invalid
pub fn parse_lenient(raw: &str) -> f64 {
    parse_grouped(raw).map(sanitize).unwrap_or(0.0)
}

fn parse_grouped(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    cleaned.parse::<f64>().ok()
}

/// Clamp NaN, infinities and negatives to 0.0
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Serde adapter for `#[serde(deserialize_with = "deserialize_lenient")]`
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => sanitize(n),
        RawNumber::Text(s) => parse_lenient(&s),
        RawNumber::Other(_) => 0.0,
    };
    Ok(value)
}

/// Serde adapter for small optional counts such as slot numbers and priorities
///
/// Numbers and numeric strings are truncated and capped at `u8::MAX`. Nulls,
/// negatives and anything unreadable count as absent.
pub fn deserialize_lenient_u8<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => Some(n),
        RawNumber::Text(s) => parse_grouped(&s),
        RawNumber::Other(_) => None,
    };
    Ok(value
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.trunc().min(u8::MAX as f64) as u8))
}
