//! # tailnet-core
//!
//! Transport and shared building blocks for the Tailscale API v2 client.
//!
//! This crate owns everything below the resource methods: the authenticated
//! HTTP transport, configuration, error translation and the small helpers
//! used to map resources onto requests.
//!
//! ## Modules
//!
//! - [`error`] - Error type carrying HTTP status and parsed error bodies
//! - [`config`] - Client configuration (credential, tailnet, API root)
//! - [`transport`] - The [`Transport`] seam and its reqwest implementation
//! - [`query`] - Query parameter builder
//! - [`path`] - Percent-encoding for path segments
//! - [`ids`] - Strongly-typed resource identifiers
//! - [`serde_helpers`] - Serde adapters for API payload quirks

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod ids;
pub mod path;
pub mod query;
pub mod serde_helpers;
pub mod transport;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ApiError, Error, Result};
pub use transport::{decode_value, ApiRequest, ApiResponse, HttpTransport, Transport};
