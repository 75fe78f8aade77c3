//! Domain models for FitTrack
//!
//! The serde representations of these types follow the backend's JSON
//! shapes, so the same structs are used for wire decoding, secure-store
//! persistence and rendering.
//!
//! - [`session`] -- the signed-in user's profile blob
//! - [`member`]  -- admin-facing member records and member list derivations
//! - [`workout`] -- logged workouts and the today/history derivations

pub mod member;
pub mod session;
pub mod workout;

pub use member::{filter_members, remove_member, Member, MemberStats};
pub use session::{AdminSession, Session};
pub use workout::{
    distinct_types, filter_by_type, partition_by_day, sort_by_date, SortOrder, Workout,
    WorkoutFilter, WorkoutSplit,
};

/// Lenient field decoders for backend payloads
///
/// The backend stores form input as-is, so numeric fields arrive either as
/// JSON numbers or as strings (sometimes empty).
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Decodes a number, a numeric string, an empty string or null.
    pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("expected a number, got {:?}", s))),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected a number, got {}",
                other
            ))),
        }
    }

    /// Decodes a whole number of minutes from a number or numeric string.
    pub fn minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match optional_f64(deserializer)? {
            None => Ok(0),
            Some(v) if v >= 0.0 && v <= u32::MAX as f64 => Ok(v.round() as u32),
            Some(v) => Err(serde::de::Error::custom(format!(
                "duration out of range: {}",
                v
            ))),
        }
    }

    /// Decodes an identifier that may be a string or a number.
    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "expected an id, got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Reading {
        #[serde(default, deserialize_with = "lenient::optional_f64")]
        value: Option<f64>,
    }

    #[test]
    fn test_lenient_number_accepts_numbers_and_strings() {
        let a: Reading = serde_json::from_str(r#"{"value": 72.5}"#).unwrap();
        let b: Reading = serde_json::from_str(r#"{"value": "180"}"#).unwrap();
        let c: Reading = serde_json::from_str(r#"{"value": ""}"#).unwrap();
        let d: Reading = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(a.value, Some(72.5));
        assert_eq!(b.value, Some(180.0));
        assert_eq!(c.value, None);
        assert_eq!(d.value, None);
    }

    #[test]
    fn test_lenient_number_rejects_garbage() {
        let result = serde_json::from_str::<Reading>(r#"{"value": "tall"}"#);
        assert!(result.is_err());
    }
}
