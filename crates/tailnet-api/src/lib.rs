//! Typed client for the Tailscale API v2.
//!
//! [`TailscaleClient`] exposes one asynchronous method per API operation,
//! grouped by resource family. Each call performs exactly one HTTP round trip
//! through a [`tailnet_core::Transport`]; there are no retries, caching or
//! pagination.
//!
//! ```no_run
//! use tailnet_api::{DeviceFields, TailscaleClient};
//!
//! # async fn run() -> tailnet_api::Result<()> {
//! let client = TailscaleClient::new("tskey-api-...")?;
//! for device in client.list_devices(DeviceFields::All).await? {
//!     println!("{} {}", device.name, device.os);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Operations whose responses the API does not pin down return
//! [`serde_json::Value`]; the matching models in [`models`] can be applied
//! with [`tailnet_core::decode_value`].

#![deny(missing_docs)]

pub mod client;
mod devices;
mod keys;
mod logging;
pub mod models;
mod policy;
mod tailnet;
mod users;

pub use client::{TailscaleClient, TailscaleClientBuilder};
pub use models::{
    Acl, AclPreviewQuery, ApiKey, AuditLogQuery, AuthKey, Contact, ContactType, Contacts,
    CreateApiKeyRequest, CreateAuthKeyRequest, CreateDeviceInviteRequest,
    CreatePostureIntegrationRequest, CreateUserInviteRequest, CreateWebhookRequest, Device,
    DeviceFields, DeviceInvite, DeviceRoutes, DnsConfig, LogStreamRequest, LogType,
    NetworkLogQuery, PostureIdentity, PostureIntegration, SetAttributeRequest, TailnetSettings,
    User, UserInvite, UserRole, Webhook,
};
pub use tailnet_core::ids::{
    DeviceId, DeviceInviteId, KeyId, PostureIntegrationId, UserId, UserInviteId, WebhookId,
};
pub use tailnet_core::{decode_value, ApiError, ClientConfig, Error};

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = tailnet_core::Result<T>;
