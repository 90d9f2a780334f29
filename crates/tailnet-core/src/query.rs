//! Builder for HTTP query parameters.
//!
//! Values that are absent or render to an empty string are never emitted, so
//! optional filters can be pushed unconditionally.

use std::fmt::Display;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: Display,
    {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Append using a mapping function when the value is present.
    pub fn push_opt_with<T, F>(&mut self, key: &'static str, value: Option<T>, map: F)
    where
        F: FnOnce(T) -> String,
    {
        if let Some(value) = value {
            self.push(key, map(value));
        }
    }

    /// Append a key/value pair unless the value renders empty.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key, value));
        }
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
