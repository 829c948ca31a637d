//! # Transactions
//!
//! Read-only view of payments as reported by HoodPay.
//! Nothing here is persisted; the list is fetched fresh on every page view.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Display format for transaction dates
pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A payment as listed by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Provider payment ID (string or number on the wire)
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,

    /// Amount as the provider wrote it
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,

    #[serde(default)]
    pub currency: String,

    #[serde(default)]
    pub status: String,

    /// Source timestamp, unparsed
    #[serde(rename = "createdAt", default, deserialize_with = "string_or_number")]
    pub created_at: String,
}

impl Transaction {
    /// Parsed creation time, if the source timestamp is recognisable
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// `YYYY-MM-DD HH:MM:SS` in UTC, or the raw value when it cannot be parsed
    pub fn created_at_display(&self) -> String {
        match self.created_at_utc() {
            Some(ts) => ts.format(DATE_DISPLAY_FORMAT).to_string(),
            None => self.created_at.clone(),
        }
    }
}

/// Parse the timestamp shapes HoodPay and similar APIs emit.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    // Unix seconds
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_provider_shape() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": 42,
            "amount": 10.5,
            "currency": "USD",
            "status": "COMPLETED",
            "createdAt": "2024-03-05T14:07:09.000Z"
        }))
        .unwrap();

        assert_eq!(tx.id, "42");
        assert_eq!(tx.amount, "10.5");
        assert_eq!(tx.status, "COMPLETED");
        assert_eq!(tx.created_at_display(), "2024-03-05 14:07:09");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let tx: Transaction = serde_json::from_value(json!({ "id": "pay_1" })).unwrap();
        assert_eq!(tx.id, "pay_1");
        assert_eq!(tx.amount, "");
        assert_eq!(tx.created_at_display(), "");
    }

    #[test]
    fn test_timestamp_shapes() {
        let expected = "2024-01-02 03:04:05";
        for raw in [
            "2024-01-02T03:04:05Z",
            "2024-01-02T05:04:05+02:00",
            "2024-01-02T03:04:05",
            "2024-01-02 03:04:05",
            "1704164645",
        ] {
            let tx = Transaction {
                id: "x".into(),
                amount: "1".into(),
                currency: "USD".into(),
                status: "PENDING".into(),
                created_at: raw.into(),
            };
            assert_eq!(tx.created_at_display(), expected, "input {}", raw);
        }
    }

    #[test]
    fn test_unparseable_timestamp_shown_raw() {
        assert!(parse_timestamp("yesterday-ish").is_none());
        let tx: Transaction =
            serde_json::from_value(json!({ "id": "1", "createdAt": "yesterday-ish" })).unwrap();
        assert_eq!(tx.created_at_display(), "yesterday-ish");
    }
}
