//! Serde adapter for appointment timestamps.
//!
//! Writes RFC 3339 in UTC. Reads any RFC 3339 offset, and reads offset-less
//! `YYYY-MM-DDTHH:MM:SS[.fff]` values as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub(crate) fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_text(value))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn to_text(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, NAIVE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|err| format!("invalid timestamp `{trimmed}`: {err}"))
}
