use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{PocketlinkError, Result};

/// Referrer recorded when the visit carries none.
pub const DIRECT_REFERRER: &str = "direct";

/// Last year a persisted timestamp can carry. RFC 3339 has no room for
/// five-digit years, so anything later would not read back.
pub const MAX_STORABLE_YEAR: i32 = 9999;

/// Whether `dt` survives a write/read cycle through [`iso_millis`].
pub fn is_storable(dt: &DateTime<Utc>) -> bool {
    (0..=MAX_STORABLE_YEAR).contains(&dt.year())
}

/// `created_at + validity_minutes`, or `None` when the result cannot be stored.
pub fn expiry_after(created_at: DateTime<Utc>, validity_minutes: u32) -> Option<DateTime<Utc>> {
    created_at
        .checked_add_signed(Duration::minutes(i64::from(validity_minutes)))
        .filter(is_storable)
}

/// A single visit recorded against a short link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRecord {
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    /// Coarse `"lat,lon"` location, two decimals each.
    #[serde(default)]
    pub geo: Option<String>,
}

impl ClickRecord {
    pub fn new(timestamp: DateTime<Utc>, referrer: Option<&str>, geo: Option<String>) -> Self {
        let referrer = match referrer.map(str::trim) {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => DIRECT_REFERRER.to_string(),
        };
        Self {
            timestamp,
            referrer,
            geo,
        }
    }

    pub fn is_direct(&self) -> bool {
        self.referrer == DIRECT_REFERRER
    }
}

/// Persisted representation of a shortened link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    pub shortcode: String,
    pub long_url: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub expiry_at: DateTime<Utc>,
    #[serde(default)]
    pub clicks: Vec<ClickRecord>,
}

impl ShortLink {
    /// Builds a fresh link whose expiry is `created_at + validity_minutes`.
    pub fn new(
        shortcode: impl Into<String>,
        long_url: impl Into<String>,
        created_at: DateTime<Utc>,
        validity_minutes: u32,
    ) -> Result<Self> {
        let expiry_at = expiry_after(created_at, validity_minutes).ok_or_else(|| {
            PocketlinkError::date_parse(format!(
                "Validity of {} minutes ends after year {}",
                validity_minutes, MAX_STORABLE_YEAR
            ))
        })?;

        Ok(Self {
            shortcode: shortcode.into(),
            long_url: long_url.into(),
            created_at,
            expiry_at,
            clicks: Vec::new(),
        })
    }

    /// Expired strictly after `expiry_at`; the boundary instant is still active.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry_at
    }
}

/// Shape of the persisted link slot: `{ "links": { [shortcode]: ShortLink } }`.
///
/// `BTreeMap` keeps the serialized key order stable, so re-writing a freshly
/// read schema reproduces the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSchema {
    pub links: BTreeMap<String, ShortLink>,
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix.
pub(crate) mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        // 写出去读不回来的时间戳宁可让整次写入失败
        if !super::is_storable(dt) {
            return Err(serde::ser::Error::custom(format!(
                "timestamp {} is outside years 0000-{}",
                dt,
                super::MAX_STORABLE_YEAR
            )));
        }
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_expiry_is_created_plus_validity() {
        let link = ShortLink::new("abcd", "https://example.com", at(0), 30).unwrap();
        assert_eq!(link.expiry_at - link.created_at, Duration::minutes(30));
        assert!(link.clicks.is_empty());
    }

    #[test]
    fn test_expiry_boundary() {
        let link = ShortLink::new("abcd", "https://example.com", at(0), 1).unwrap();
        assert!(!link.is_expired_at(at(59)));
        assert!(!link.is_expired_at(at(60)));
        assert!(link.is_expired_at(at(61)));
    }

    #[test]
    fn test_click_referrer_defaults_to_direct() {
        assert!(ClickRecord::new(at(0), None, None).is_direct());
        assert!(ClickRecord::new(at(0), Some("  "), None).is_direct());
        let click = ClickRecord::new(at(0), Some("https://news.example"), None);
        assert_eq!(click.referrer, "https://news.example");
    }

    #[test]
    fn test_json_shape() {
        let mut link = ShortLink::new("abcd", "https://example.com", at(0), 30).unwrap();
        link.clicks.push(ClickRecord::new(at(5), None, None));

        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["shortcode"], "abcd");
        assert_eq!(json["longUrl"], "https://example.com");
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20.000Z");
        assert_eq!(json["expiryAt"], "2023-11-14T22:43:20.000Z");
        assert_eq!(json["clicks"][0]["referrer"], "direct");
        assert!(json["clicks"][0]["geo"].is_null());
    }

    #[test]
    fn test_reads_browser_style_timestamps() {
        let raw = r#"{
            "shortcode": "abcd",
            "longUrl": "https://example.com",
            "createdAt": "2024-05-01T10:00:00.123Z",
            "expiryAt": "2024-05-01T10:30:00.123Z",
            "clicks": [{ "timestamp": "2024-05-01T10:01:00.000Z", "referrer": "direct" }]
        }"#;
        let link: ShortLink = serde_json::from_str(raw).unwrap();
        assert_eq!(link.clicks.len(), 1);
        assert_eq!(link.clicks[0].geo, None);
        assert_eq!(link.expiry_at - link.created_at, Duration::minutes(30));
    }

    #[test]
    fn test_expiry_past_year_9999_is_rejected() {
        assert!(ShortLink::new("abcd", "https://example.com", at(0), u32::MAX).is_err());

        let last = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 0).unwrap();
        assert!(expiry_after(last, 1).is_none());
        assert_eq!(expiry_after(last - Duration::minutes(1), 1), Some(last));
    }

    #[test]
    fn test_unstorable_timestamp_fails_serialization() {
        let mut link = ShortLink::new("abcd", "https://example.com", at(0), 30).unwrap();
        link.expiry_at = Utc.with_ymd_and_hms(10190, 2, 15, 4, 15, 0).unwrap();
        assert!(serde_json::to_string(&link).is_err());
    }
}
