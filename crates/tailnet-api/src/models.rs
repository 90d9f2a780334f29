//! Tailscale API models.
//!
//! Response types are snapshots of remote state; the client never mutates
//! them after decoding. Each field declares exactly one wire name, either via
//! the container's `rename_all = "camelCase"` or an explicit `rename` where
//! the API's casing is irregular (`tailscaleIPs`, `magicDNS`, ...).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fmt;
use tailnet_core::ids::{
    DeviceId, DeviceInviteId, KeyId, PostureIntegrationId, UserId, UserInviteId, WebhookId,
};
use tailnet_core::query::QueryParams;
use tailnet_core::serde_helpers::null_as_default;

/// Default lifetime for newly created keys: 90 days.
pub const DEFAULT_KEY_EXPIRY_SECS: u64 = 90 * 24 * 60 * 60;

/// Default webhook provider type.
pub const DEFAULT_WEBHOOK_PROVIDER: &str = "generic";

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Field set requested when listing or fetching devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceFields {
    /// Every field, including routes and posture identity
    #[default]
    All,
    /// The API's default, limited field set
    Default,
}

impl DeviceFields {
    /// Query value for the `fields` parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for DeviceFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a user holds in the tailnet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    /// Tailnet owner
    Owner,
    /// Regular member
    #[default]
    Member,
    /// Full administrator
    Admin,
    /// IT administrator
    ItAdmin,
    /// Network administrator
    NetworkAdmin,
    /// Billing administrator
    BillingAdmin,
    /// Read-only auditor
    Auditor,
}

impl UserRole {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Member => "member",
            Self::Admin => "admin",
            Self::ItAdmin => "it-admin",
            Self::NetworkAdmin => "network-admin",
            Self::BillingAdmin => "billing-admin",
            Self::Auditor => "auditor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log stream kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    /// Configuration audit logs
    Configuration,
    /// Network flow logs
    Network,
}

impl LogType {
    /// Path segment for the log type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Network => "network",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tailnet contact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    /// Account and billing notices
    Account,
    /// Support communication
    Support,
    /// Security issues
    Security,
}

impl ContactType {
    /// Path segment for the contact type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Support => "support",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// A device (node) in the tailnet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Legacy numeric device ID.
    pub id: DeviceId,
    /// Tailnet IP addresses.
    pub addresses: Vec<String>,
    /// Whether the device is authorized to join the tailnet.
    pub authorized: bool,
    /// Ports blocked on the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_ports: Option<Vec<u16>>,
    /// Whether the device refuses incoming connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks_incoming_connections: Option<bool>,
    /// Connectivity report (endpoints, DERP latency, NAT mapping).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_connectivity: Option<Value>,
    /// Tailscale client version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_version: Option<String>,
    /// When the device was added to the tailnet.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub created: Option<DateTime<Utc>>,
    /// When the device key expires.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub expires: Option<DateTime<Utc>>,
    /// Machine hostname.
    pub hostname: String,
    /// Whether the device is shared in from another tailnet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_external: Option<bool>,
    /// Whether key expiry is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_expiry_disabled: Option<bool>,
    /// When the device was last connected to the control plane.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub last_seen: Option<DateTime<Utc>>,
    /// Machine key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_key: Option<String>,
    /// MagicDNS name.
    pub name: String,
    /// Preferred stable node ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<DeviceId>,
    /// Node key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_key: Option<String>,
    /// Operating system.
    pub os: String,
    /// ACL tags applied to the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Tailnet lock error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailnet_lock_error: Option<String>,
    /// Tailnet lock key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailnet_lock_key: Option<String>,
    /// Tailscale IPs.
    #[serde(
        rename = "tailscaleIPs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tailscale_ips: Option<Vec<String>>,
    /// Whether a client update is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_available: Option<bool>,
    /// Owning user's login name.
    pub user: String,
    /// Subnet routes advertised by the device (`fields=all` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertised_routes: Option<Vec<String>>,
    /// Subnet routes approved for the device (`fields=all` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_routes: Option<Vec<String>>,
    /// Posture identity collected from the device (`fields=all` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posture_identity: Option<PostureIdentity>,
}

/// Device hardware identity used for posture checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostureIdentity {
    /// Hardware serial numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_numbers: Option<Vec<String>>,
    /// Whether collection is disabled on the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// Subnet routes of a device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRoutes {
    /// Routes the device advertises.
    #[serde(default, deserialize_with = "null_as_default")]
    pub advertised_routes: Vec<String>,
    /// Routes approved by an admin.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled_routes: Vec<String>,
}

/// Request payload for setting a custom posture attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetAttributeRequest {
    /// Attribute value (string, number or boolean).
    pub value: Value,
    /// When the attribute expires.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub expiry: Option<DateTime<Utc>>,
    /// Audit log comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl SetAttributeRequest {
    /// Attribute with no expiry or comment.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            expiry: None,
            comment: None,
        }
    }

    /// Set an expiry time.
    #[must_use]
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Set an audit log comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Device invites
// ---------------------------------------------------------------------------

/// A device share invite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInvite {
    /// Invite ID.
    pub id: DeviceInviteId,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Recipient email, if the invite was emailed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the invite can be accepted more than once.
    pub multi_use: bool,
    /// Whether recipients may use the device as an exit node.
    pub allow_exit_node: bool,
    /// Whether the invite has been used.
    pub used: bool,
    /// Shared device.
    pub device_id: DeviceId,
    /// Expiry time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub expires: Option<DateTime<Utc>>,
    /// Shareable invite URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_url: Option<String>,
}

/// Request payload for creating a device share invite.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceInviteRequest {
    /// Allow the invite to be accepted more than once.
    pub multi_use: bool,
    /// Allow recipients to use the device as an exit node.
    pub allow_exit_node: bool,
    /// Email the invite to this address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A user of the tailnet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Login name (usually an email address).
    pub login_name: String,
    /// Display name.
    pub display_name: String,
    /// Profile picture URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
    /// Tailnet the user belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailnet_id: Option<String>,
    /// When the user joined.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub created: Option<DateTime<Utc>>,
    /// `member` or `shared`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    /// Role name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Account status (`active`, `idle`, `suspended`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Number of devices owned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_count: Option<u32>,
    /// Last activity.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub last_seen: Option<DateTime<Utc>>,
    /// Whether any of the user's devices is connected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currently_connected: Option<bool>,
}

/// A pending invitation for a new user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInvite {
    /// Invite ID.
    pub id: UserInviteId,
    /// Invited email address.
    pub email: String,
    /// Role granted on acceptance.
    pub role: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
    /// Whether the invite has been accepted.
    pub accepted: bool,
    /// When the invite email was last sent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub sent_at: Option<DateTime<Utc>>,
    /// Shareable invite URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_url: Option<String>,
}

/// Request payload for inviting a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateUserInviteRequest {
    /// Email address to invite.
    pub email: String,
    /// Role granted on acceptance.
    pub role: UserRole,
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Tailnet policy file (ACL).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Acl {
    /// Access rules; empty when the policy has none.
    #[serde(default, deserialize_with = "null_as_default")]
    pub acls: Vec<Value>,
    /// Named groups of users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<HashMap<String, Vec<String>>>,
    /// Host aliases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts: Option<HashMap<String, String>>,
    /// Who may assign each tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_owners: Option<HashMap<String, Vec<String>>>,
    /// Policy assertions checked on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<Value>>,
    /// Tailscale SSH rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh: Option<Vec<Value>>,
    /// Node attribute assignments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_attrs: Option<Vec<Value>>,
    /// Grant rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grants: Option<Vec<Value>>,
    /// Route and exit-node auto approvers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approvers: Option<Value>,
}

/// Query parameters for previewing a policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AclPreviewQuery {
    /// `user` or `ipport`.
    pub preview_type: Option<String>,
    /// User email or `ip:port` to preview rules for.
    pub preview_for: Option<String>,
}

impl AclPreviewQuery {
    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("type", self.preview_type.as_deref());
        params.push_opt("previewFor", self.preview_for.as_deref());
        params.into_pairs()
    }
}

/// DNS preferences of the tailnet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DnsConfig {
    /// Search domains.
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: Vec<String>,
    /// Whether MagicDNS is enabled.
    #[serde(rename = "magicDNS")]
    pub magic_dns: bool,
    /// Global nameservers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub nameservers: Vec<String>,
    /// Whether to override clients' local DNS settings.
    #[serde(
        rename = "overrideLocalDNS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub override_local_dns: Option<bool>,
    /// Split DNS routes: domain to nameservers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<HashMap<String, Vec<String>>>,
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// An API access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiKey {
    /// Key ID.
    pub id: KeyId,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Capability tree, kept as sent by the API.
    pub capabilities: Map<String, Value>,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Expiry time.
    pub expires: DateTime<Utc>,
    /// Revocation time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub revoked: Option<DateTime<Utc>>,
}

/// A device auth key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthKey {
    /// Key ID.
    pub id: KeyId,
    /// Key material; only present in the creation response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Expiry time.
    pub expires: DateTime<Utc>,
    /// Capability tree, kept as sent by the API.
    pub capabilities: Map<String, Value>,
    /// Revocation time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub revoked: Option<DateTime<Utc>>,
}

/// Request payload for creating an API key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    /// Capability tree.
    pub capabilities: Value,
    /// Lifetime in seconds.
    pub expiry_seconds: u64,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateApiKeyRequest {
    /// Key with the given capabilities and the default 90-day expiry.
    #[must_use]
    pub fn new(capabilities: Value) -> Self {
        Self {
            capabilities,
            expiry_seconds: DEFAULT_KEY_EXPIRY_SECS,
            description: None,
        }
    }
}

/// Request options for creating a device auth key.
///
/// Defaults to a non-ephemeral, single-use, untagged key valid for 90 days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAuthKeyRequest {
    /// Devices registered with the key are removed when they go offline.
    pub ephemeral: bool,
    /// The key can register more than one device.
    pub reusable: bool,
    /// Devices registered with the key skip device approval.
    pub preauthorized: Option<bool>,
    /// ACL tags applied to registered devices.
    pub tags: Vec<String>,
    /// Lifetime in seconds.
    pub expiry_seconds: u64,
    /// Description.
    pub description: Option<String>,
}

impl Default for CreateAuthKeyRequest {
    fn default() -> Self {
        Self {
            ephemeral: false,
            reusable: false,
            preauthorized: None,
            tags: Vec::new(),
            expiry_seconds: DEFAULT_KEY_EXPIRY_SECS,
            description: None,
        }
    }
}

impl CreateAuthKeyRequest {
    /// Wire body: options nested under `capabilities.devices.create`.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut create = json!({
            "ephemeral": self.ephemeral,
            "reusable": self.reusable,
            "tags": self.tags,
        });
        if let Some(preauthorized) = self.preauthorized {
            create["preauthorized"] = Value::Bool(preauthorized);
        }

        let mut body = json!({
            "capabilities": { "devices": { "create": create } },
            "expirySeconds": self.expiry_seconds,
        });
        if let Some(description) = &self.description {
            body["description"] = Value::String(description.clone());
        }
        body
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Query for configuration audit logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogQuery {
    /// Start of the window (required).
    pub start: DateTime<Utc>,
    /// End of the window.
    pub end: Option<DateTime<Utc>>,
    /// Filter by actor.
    pub actor: Option<String>,
    /// Filter by target.
    pub target: Option<String>,
    /// Filter by event type.
    pub event: Option<String>,
}

impl AuditLogQuery {
    /// Logs from `start` until now.
    #[must_use]
    pub fn since(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: None,
            actor: None,
            target: None,
            event: None,
        }
    }

    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push("start", rfc3339(self.start));
        params.push_opt_with("end", self.end, rfc3339);
        params.push_opt("actor", self.actor.as_deref());
        params.push_opt("target", self.target.as_deref());
        params.push_opt("event", self.event.as_deref());
        params.into_pairs()
    }
}

/// Query for network flow logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkLogQuery {
    /// Start of the window.
    pub start: Option<DateTime<Utc>>,
    /// End of the window.
    pub end: Option<DateTime<Utc>>,
}

impl NetworkLogQuery {
    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt_with("start", self.start, rfc3339);
        params.push_opt_with("end", self.end, rfc3339);
        params.into_pairs()
    }
}

/// Request payload for configuring log streaming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogStreamRequest {
    /// Destination URL or identifier.
    pub destination: String,
    /// Whether streaming is enabled.
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

/// Contact preferences for the tailnet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Contacts {
    /// Account contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Contact>,
    /// Support contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<Contact>,
    /// Security contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Contact>,
}

/// A single contact entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Address used while `email` is unverified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_email: Option<String>,
    /// Whether `email` still needs verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_verification: Option<bool>,
}

// ---------------------------------------------------------------------------
// Webhooks
// ---------------------------------------------------------------------------

/// A webhook endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Endpoint ID.
    pub endpoint_id: WebhookId,
    /// Destination URL.
    pub endpoint_url: String,
    /// Provider (`generic`, `slack`, ...).
    pub provider_type: String,
    /// Subscribed event types.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subscriptions: Vec<String>,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last delivery time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tailnet_core::serde_helpers::optional_timestamp"
    )]
    pub last_triggered: Option<DateTime<Utc>>,
    /// Signing secret; only present after creation or rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Request payload for creating a webhook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhookRequest {
    /// Destination URL.
    pub endpoint_url: String,
    /// Provider type.
    pub provider_type: String,
    /// Subscribed event types; omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscriptions: Vec<String>,
}

impl CreateWebhookRequest {
    /// Generic webhook with no subscriptions.
    #[must_use]
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            provider_type: DEFAULT_WEBHOOK_PROVIDER.to_string(),
            subscriptions: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings and posture
// ---------------------------------------------------------------------------

/// Tailnet-wide settings. Every field is optional; only set fields are sent
/// when used as an update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TailnetSettings {
    /// Require approval for new devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices_approval_on: Option<bool>,
    /// Auto-update clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices_auto_updates_on: Option<bool>,
    /// Node key lifetime in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices_key_duration_days: Option<u32>,
    /// Require approval for new users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_approval_on: Option<bool>,
    /// Which roles may join external tailnets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_role_allowed_to_join_external_tailnets: Option<String>,
    /// Network flow logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_flow_logging_on: Option<bool>,
    /// Regional routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regional_routing_on: Option<bool>,
    /// Route all traffic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_all_on: Option<bool>,
    /// Collect device posture identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posture_identity_collection_on: Option<bool>,
    /// MagicDNS.
    #[serde(
        rename = "magicDNSEnabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub magic_dns_enabled: Option<bool>,
    /// Enhanced security features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_security_features_on: Option<bool>,
}

/// A third-party device posture integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostureIntegration {
    /// Integration ID.
    pub id: PostureIntegrationId,
    /// Provider (`intune`, `jamfpro`, `kandji`, ...).
    pub provider: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Provider configuration.
    pub config: Map<String, Value>,
}

/// Request payload for creating a posture integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePostureIntegrationRequest {
    /// Provider name.
    pub provider: String,
    /// Provider configuration.
    pub config: Value,
}
