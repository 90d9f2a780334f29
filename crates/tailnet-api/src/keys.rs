//! API access tokens and device auth keys.
//!
//! Both kinds live under `/tailnet/{tailnet}/keys`; the listing returns them
//! together and the capability tree tells them apart.

use crate::client::TailscaleClient;
use crate::models::{CreateApiKeyRequest, CreateAuthKeyRequest};
use reqwest::Method;
use serde_json::Value;
use tailnet_core::ids::KeyId;
use tailnet_core::path::segment;
use tailnet_core::Result;

impl TailscaleClient {
    /// Keys of the tailnet.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn list_api_keys(&self) -> Result<Vec<Value>> {
        self.get_list(&self.tailnet_path("keys")?, Vec::new(), "keys")
            .await
    }

    /// Keys of the tailnet. Same listing as [`Self::list_api_keys`].
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn list_auth_keys(&self) -> Result<Vec<Value>> {
        self.list_api_keys().await
    }

    /// Create an API access token. The response carries the key material,
    /// which is never returned again.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn create_api_key(&self, request: &CreateApiKeyRequest) -> Result<Value> {
        self.send_value(Method::POST, &self.tailnet_path("keys")?, request)
            .await
    }

    /// Create a device auth key.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn create_auth_key(&self, request: &CreateAuthKeyRequest) -> Result<Value> {
        self.send_value(Method::POST, &self.tailnet_path("keys")?, &request.to_body())
            .await
    }

    /// Fetch a key.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_api_key(&self, id: &KeyId) -> Result<Value> {
        self.get_value(&self.tailnet_path(&format!("keys/{}", segment(id)?))?)
            .await
    }

    /// Revoke a key.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn delete_api_key(&self, id: &KeyId) -> Result<()> {
        self.delete(&self.tailnet_path(&format!("keys/{}", segment(id)?))?).await
    }
}
