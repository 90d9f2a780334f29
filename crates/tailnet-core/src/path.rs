//! Percent-encoding for caller-supplied API path segments.

use crate::error::{Error, Result};
use std::fmt::Display;
use url::Url;

/// Encode one value as a single URL path segment.
///
/// Reserved characters such as `/`, `?`, `#` and `%` are percent-encoded so
/// the value cannot split the path or start a query. Empty values and the
/// dot segments `.` and `..` are rejected because a URL parser collapses
/// them.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] for an empty or dot segment.
pub fn segment(value: &(impl Display + ?Sized)) -> Result<String> {
    let value = value.to_string();
    if value.is_empty() || value == "." || value == ".." {
        return Err(Error::InvalidRequest(format!(
            "`{value}` cannot be used as a path segment"
        )));
    }

    let mut url = Url::parse("http://localhost/")?;
    url.path_segments_mut()
        .map_err(|()| Error::InvalidEndpoint("URL cannot carry path segments".to_string()))?
        .clear()
        .push(&value);
    Ok(url.path().trim_start_matches('/').to_string())
}
