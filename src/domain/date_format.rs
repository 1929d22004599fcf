//! Wire format for timestamps: UTC, whole seconds, literal `Z` suffix
//! (`1970-01-01T00:00:00Z`). Input accepts any RFC 3339 offset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn format(date: &DateTime<Utc>) -> String {
    date.format(FORMAT).to_string()
}

pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|d| d.with_timezone(&Utc))
}

pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(d) => serializer.serialize_str(&format(d)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) => parse(&s)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", s, e))),
        None => Ok(None),
    }
}
