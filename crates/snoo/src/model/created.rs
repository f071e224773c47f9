//! Creation timestamps and the edited marker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Creation time of an item, as decimal epoch seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Created {
    /// Creation time in the server's local epoch.
    #[serde(rename = "created", default)]
    pub local: f64,
    /// Creation time in UTC epoch seconds.
    #[serde(rename = "created_utc", default)]
    pub utc: f64,
}

impl Created {
    /// The `created` field as an instant.
    pub fn local_time(&self) -> DateTime<Utc> {
        timestamp(self.local)
    }

    /// The `created_utc` field as an instant.
    pub fn utc_time(&self) -> DateTime<Utc> {
        timestamp(self.utc)
    }
}

/// Convert decimal epoch seconds into an instant.
///
/// The integer part is whole seconds and the fraction is sub-second precision.
/// Values that cannot be represented fall back to the epoch.
pub fn timestamp(seconds: f64) -> DateTime<Utc> {
    if !seconds.is_finite() {
        return DateTime::<Utc>::UNIX_EPOCH;
    }
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return DateTime::<Utc>::UNIX_EPOCH;
    }
    DateTime::from_timestamp(whole as i64, nanos).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Whether an item was edited, and when.
///
/// The server sends `false`, `true`, or the edit time in epoch seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Edited {
    /// `true` if the item was edited.
    pub status: bool,
    /// Edit time, when the server reports one.
    pub at: Option<DateTime<Utc>>,
}

impl<'de> Deserialize<'de> for Edited {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let edited = match Value::deserialize(deserializer)? {
            Value::Bool(status) => Edited { status, at: None },
            Value::Number(n) => Edited {
                status: true,
                at: n.as_f64().map(timestamp),
            },
            Value::Null => Edited::default(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected bool or timestamp for 'edited', found {other}"
                )));
            }
        };
        Ok(edited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_splits_fraction() {
        let t = timestamp(12345.5);
        assert_eq!(t.timestamp(), 12345);
        assert_eq!(t.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn timestamp_whole_seconds() {
        assert_eq!(timestamp(1389987587.0).timestamp(), 1389987587);
    }

    #[test]
    fn timestamp_garbage_is_epoch() {
        assert_eq!(timestamp(f64::NAN), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(timestamp(f64::MAX), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn created_reads_both_fields() {
        let c: Created =
            serde_json::from_str(r#"{"created": 1389987587.0, "created_utc": 1389958787.0}"#)
                .unwrap();
        assert_eq!(c.local_time().timestamp(), 1389987587);
        assert_eq!(c.utc_time().timestamp(), 1389958787);
    }

    #[test]
    fn edited_variants() {
        #[derive(Deserialize)]
        struct Holder {
            edited: Edited,
        }

        let cases = [
            (r#"{"edited": false}"#, false, None),
            (r#"{"edited": true}"#, true, None),
            (r#"{"edited": 1234567890.0}"#, true, Some(1234567890)),
        ];

        for (json, status, at) in cases {
            let h: Holder = serde_json::from_str(json).unwrap();
            assert_eq!(h.edited.status, status, "{json}");
            assert_eq!(h.edited.at.map(|t| t.timestamp()), at, "{json}");
        }
    }

    #[test]
    fn edited_rejects_strings() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Holder {
            edited: Edited,
        }

        assert!(serde_json::from_str::<Holder>(r#"{"edited": "yes"}"#).is_err());
    }
}
