//! ACL and DNS operations.
//!
//! Update methods accept any `Serialize` body so callers can pass either the
//! typed model or a raw [`serde_json::Value`] policy document.

use crate::client::TailscaleClient;
use crate::models::{Acl, AclPreviewQuery, DnsConfig};
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use tailnet_core::{ApiRequest, Result};

impl TailscaleClient {
    /// Current policy file.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] or [`tailnet_core::Error::Decode`].
    pub async fn get_acl(&self) -> Result<Acl> {
        self.get_json(&self.tailnet_path("acl")?, Vec::new()).await
    }

    /// Replace the policy file.
    ///
    /// With `if_unmodified_since` set, the update is conditional on the
    /// policy not having changed since that HTTP date; a stale date yields a
    /// 412 API error.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] or [`tailnet_core::Error::Decode`].
    pub async fn update_acl<B>(&self, policy: &B, if_unmodified_since: Option<&str>) -> Result<Acl>
    where
        B: Serialize + ?Sized,
    {
        let mut request = ApiRequest::new(Method::POST, self.tailnet_path("acl")?).with_json(policy)?;
        if let Some(since) = if_unmodified_since {
            request = request.with_header("If-Unmodified-Since", since);
        }
        self.execute(request).await?.decode()
    }

    /// Preview the rules a policy would apply to a user or `ip:port`.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn preview_acl<B>(&self, policy: &B, query: &AclPreviewQuery) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::new(Method::POST, self.tailnet_path("acl/preview")?)
            .with_query(query.to_pairs())
            .with_json(policy)?;
        Ok(self.execute(request).await?.into_value())
    }

    /// Validate a policy without applying it.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn validate_acl<B>(&self, policy: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.send_value(Method::POST, &self.tailnet_path("acl/validate")?, policy)
            .await
    }

    /// DNS preferences.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] or [`tailnet_core::Error::Decode`].
    pub async fn get_dns_config(&self) -> Result<DnsConfig> {
        self.get_json(&self.tailnet_path("dns/preferences")?, Vec::new())
            .await
    }

    /// Update DNS preferences.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] or [`tailnet_core::Error::Decode`].
    pub async fn update_dns_config<B>(&self, config: &B) -> Result<DnsConfig>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, &self.tailnet_path("dns/preferences")?, config)
            .await
    }

    /// Global nameservers.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] or [`tailnet_core::Error::Decode`].
    pub async fn get_nameservers(&self) -> Result<Vec<String>> {
        self.get_list(&self.tailnet_path("dns/nameservers")?, Vec::new(), "dns")
            .await
    }

    /// Replace the global nameservers.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn set_nameservers(&self, nameservers: &[String]) -> Result<()> {
        let path = self.tailnet_path("dns/nameservers")?;
        self.send_empty(Method::POST, &path, Some(&json!({ "dns": nameservers })))
            .await
    }

    /// DNS search paths.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] or [`tailnet_core::Error::Decode`].
    pub async fn get_search_paths(&self) -> Result<Vec<String>> {
        let path = self.tailnet_path("dns/searchpaths")?;
        self.get_list(&path, Vec::new(), "searchPaths").await
    }

    /// Replace the DNS search paths.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn set_search_paths(&self, search_paths: &[String]) -> Result<()> {
        let path = self.tailnet_path("dns/searchpaths")?;
        let body = json!({ "searchPaths": search_paths });
        self.send_empty(Method::POST, &path, Some(&body)).await
    }

    /// Split DNS routes: domain to nameservers.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_split_dns(&self) -> Result<Value> {
        self.get_value(&self.tailnet_path("dns/split-dns")?).await
    }

    /// Patch split DNS routes. Domains mapped to `null` are removed.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn update_split_dns<B>(&self, config: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.send_value(Method::PATCH, &self.tailnet_path("dns/split-dns")?, config)
            .await
    }
}
