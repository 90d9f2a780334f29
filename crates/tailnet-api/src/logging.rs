//! Configuration audit logs, network flow logs and log streaming.

use crate::client::TailscaleClient;
use crate::models::{AuditLogQuery, LogStreamRequest, LogType, NetworkLogQuery};
use reqwest::Method;
use serde_json::Value;
use tailnet_core::Result;

impl TailscaleClient {
    /// Configuration audit log entries in the query window. A `null` log
    /// list yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_configuration_audit_logs(&self, query: &AuditLogQuery) -> Result<Vec<Value>> {
        let path = self.tailnet_path("logging/configuration")?;
        self.get_list(&path, query.to_pairs(), "logs").await
    }

    /// Network flow log entries.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_network_logs(&self, query: &NetworkLogQuery) -> Result<Vec<Value>> {
        let path = self.tailnet_path("logging/network")?;
        self.get_list(&path, query.to_pairs(), "logs").await
    }

    /// Streaming status for a log type.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_log_stream_status(&self, log_type: LogType) -> Result<Value> {
        let path = self.tailnet_path(&format!("logging/{log_type}/stream/status"))?;
        self.get_value(&path).await
    }

    /// Configure log streaming.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn set_log_stream(
        &self,
        log_type: LogType,
        destination: &str,
        enabled: bool,
    ) -> Result<()> {
        let path = self.tailnet_path(&format!("logging/{log_type}/stream"))?;
        let body = LogStreamRequest {
            destination: destination.to_string(),
            enabled,
        };
        self.send_empty(Method::POST, &path, Some(&body)).await
    }

    /// Remove the log streaming configuration.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn delete_log_stream(&self, log_type: LogType) -> Result<()> {
        self.delete(&self.tailnet_path(&format!("logging/{log_type}/stream"))?)
            .await
    }
}
