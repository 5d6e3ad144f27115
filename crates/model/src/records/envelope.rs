use crate::records::record::GenericRecord;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A record handed to the host by an extraction cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub timestamp: DateTime<Utc>,
    pub record: GenericRecord,
}

impl Envelope {
    pub fn new(timestamp: DateTime<Utc>, record: GenericRecord) -> Self {
        Self { timestamp, record }
    }
}

/// Timestamp forms the host may attach to an inbound record.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    Structured(DateTime<Utc>),
    Epoch(u64),
    Unrecognized(String),
}

impl EventTime {
    /// Classifies a JSON timestamp: integers are unix seconds, RFC 3339
    /// strings are structured times, anything else is unrecognized.
    pub fn from_json(json: &serde_json::Value) -> Self {
        if let Some(secs) = json.as_u64() {
            return EventTime::Epoch(secs);
        }
        if let Some(text) = json.as_str()
            && let Ok(ts) = DateTime::parse_from_rfc3339(text)
        {
            return EventTime::Structured(ts.with_timezone(&Utc));
        }
        EventTime::Unrecognized(json.to_string())
    }

    /// Resolves to an instant, defaulting unrecognized forms to `now`.
    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            EventTime::Structured(ts) => *ts,
            EventTime::Epoch(secs) => i64::try_from(*secs)
                .ok()
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
                .unwrap_or_else(|| {
                    warn!(secs, "Epoch timestamp out of range, defaulting to now");
                    now
                }),
            EventTime::Unrecognized(raw) => {
                warn!(raw = %raw, "Time provided invalid, defaulting to now");
                now
            }
        }
    }
}

/// A record delivered by the host for loading.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEnvelope {
    pub timestamp: EventTime,
    pub record: GenericRecord,
}

impl InboundEnvelope {
    pub fn new(timestamp: EventTime, record: GenericRecord) -> Self {
        Self { timestamp, record }
    }

    /// Decodes the `[timestamp, {record}]` pair the host frames records as.
    /// Returns `None` when the shape does not match.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        let pair = json.as_array()?;
        let [ts, body] = pair.as_slice() else {
            return None;
        };
        let record = GenericRecord::from_json(body.as_object()?);
        Some(Self::new(EventTime::from_json(ts), record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_epoch_resolves_to_seconds() {
        let ts = EventTime::from_json(&json!(1_700_000_000u64));
        assert_eq!(ts, EventTime::Epoch(1_700_000_000));
        assert_eq!(ts.resolve(now()).timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_structured_time() {
        let ts = EventTime::from_json(&json!("2024-05-01T12:00:00+02:00"));
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(ts.resolve(now()), expected);
    }

    #[test]
    fn test_unrecognized_defaults_to_now() {
        let ts = EventTime::from_json(&json!({"sec": 1}));
        assert!(matches!(ts, EventTime::Unrecognized(_)));
        assert_eq!(ts.resolve(now()), now());

        let negative = EventTime::from_json(&json!(-5));
        assert_eq!(negative.resolve(now()), now());
    }

    #[test]
    fn test_inbound_from_json_pair() {
        let envelope = InboundEnvelope::from_json(&json!([10, {"a": 1}])).unwrap();
        assert_eq!(envelope.timestamp, EventTime::Epoch(10));
        assert_eq!(envelope.record.get("a"), Some(&Value::Int(1)));

        assert!(InboundEnvelope::from_json(&json!({"a": 1})).is_none());
        assert!(InboundEnvelope::from_json(&json!([1, 2, 3])).is_none());
    }
}
