//! Serde adapters for quirks in Tailscale API payloads.

use serde::{Deserialize, Deserializer};

/// RFC 3339 timestamps that the API may send as an empty string.
///
/// Use with `#[serde(default, with = "...::optional_timestamp")]` on an
/// `Option<DateTime<Utc>>` field. `""` and `null` both decode to `None`; any
/// other string must be a valid RFC 3339 timestamp.
pub mod optional_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Deserialize an optional timestamp, mapping `""` to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-empty value is not RFC 3339.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(value) => DateTime::parse_from_rfc3339(value)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(|err| D::Error::custom(format!("invalid timestamp `{value}`: {err}"))),
        }
    }

    /// Serialize an optional timestamp as RFC 3339 with a `Z` suffix.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => serializer.serialize_none(),
        }
    }
}

/// Deserialize `null` as the type's default value.
///
/// Collections the API documents as lists are sometimes sent as `null`.
///
/// # Errors
///
/// Returns an error if a non-null value does not match `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
