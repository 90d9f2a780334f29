//! Strongly-typed identifiers for Tailscale resources.
//!
//! Tailscale identifiers are opaque strings. Wrapping each resource's
//! identifier in its own type prevents passing a user ID where a device ID is
//! expected. All wrappers serialize transparently as plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate strongly-typed identifier wrapper types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Converts into the inner [`String`].
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

id_type!(
    DeviceId,
    "Device identifier (the preferred `nodeId` or the legacy numeric `id`)"
);
id_type!(UserId, "User identifier");
id_type!(DeviceInviteId, "Device share invite identifier");
id_type!(UserInviteId, "User invite identifier");
id_type!(KeyId, "API key or auth key identifier");
id_type!(WebhookId, "Webhook endpoint identifier");
id_type!(PostureIntegrationId, "Device posture integration identifier");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_as_str() {
        let id = DeviceId::new("nTZsFC5CNTRL");
        assert_eq!(id.to_string(), "nTZsFC5CNTRL");
        assert_eq!(id.as_str(), "nTZsFC5CNTRL");
    }

    #[test]
    fn test_conversions() {
        let id: UserId = "u123".into();
        let owned: String = id.clone().into();
        assert_eq!(owned, "u123");
        assert_eq!(UserId::from(owned), id);
        assert_eq!(id.into_inner(), "u123");
    }

    #[test]
    fn test_serde_transparent() {
        let id = WebhookId::new("wh-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"wh-1\"");

        let parsed: WebhookId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_distinct_types_hash_independently() {
        use std::collections::HashSet;

        let mut keys = HashSet::new();
        keys.insert(KeyId::new("k1"));
        keys.insert(KeyId::new("k1"));
        keys.insert(KeyId::new("k2"));
        assert_eq!(keys.len(), 2);
    }
}
