//! Parser for the compact battle timestamps of the battle log.
//!
//! The API writes `20230115T142233.000Z`: a fixed-width UTC timestamp without
//! date or time separators.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{ApiError, ApiResult};

const COMPACT_LEN: usize = 20;

/// Parses a compact battle timestamp into a UTC instant.
///
/// The string must be exactly `YYYYMMDDTHHMMSS.mmmZ`. Milliseconds are checked
/// but not kept. Any deviation is a [`ApiError::ParseFailure`].
///
/// # Examples
///
/// ```
/// # use bs_api::parse_battle_time;
/// let time = parse_battle_time("20230115T142233.000Z").unwrap();
/// assert_eq!(time.to_rfc3339(), "2023-01-15T14:22:33+00:00");
/// ```
pub fn parse_battle_time(raw: &str) -> ApiResult<DateTime<Utc>> {
    let invalid = || ApiError::ParseFailure(format!("invalid battle time `{}`", raw));

    let bytes = raw.as_bytes();
    if bytes.len() != COMPACT_LEN {
        return Err(invalid());
    }

    let layout_ok = bytes.iter().enumerate().all(|(index, b)| match index {
        8 => *b == b'T',
        15 => *b == b'.',
        19 => *b == b'Z',
        _ => b.is_ascii_digit(),
    });
    if !layout_ok {
        return Err(invalid());
    }

    // only ascii from here on, slicing by byte offsets is safe
    let rebuilt = format!(
        "{}-{}-{}:{}:{}:{}",
        &raw[0..4],
        &raw[4..6],
        &raw[6..8],
        &raw[9..11],
        &raw[11..13],
        &raw[13..15]
    );

    NaiveDateTime::parse_from_str(&rebuilt, "%Y-%m-%d:%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| invalid())
}

/// serde adapter for an optional compact battle timestamp.
pub(crate) fn deserialize_battle_time<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|raw| parse_battle_time(&raw).map_err(<D::Error as serde::de::Error>::custom))
        .transpose()
}
