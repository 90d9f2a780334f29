//! Tailnet-wide resources: contacts, webhooks, settings and device posture
//! integrations.

use crate::client::TailscaleClient;
use crate::models::{
    Contacts, ContactType, CreatePostureIntegrationRequest, CreateWebhookRequest,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use tailnet_core::ids::{PostureIntegrationId, WebhookId};
use tailnet_core::path::segment;
use tailnet_core::{ApiRequest, Result};

impl TailscaleClient {
    /// Contact preferences.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] or [`tailnet_core::Error::Decode`].
    pub async fn get_contacts(&self) -> Result<Contacts> {
        self.get_json(&self.tailnet_path("contacts")?, Vec::new())
            .await
    }

    /// Change a contact's email address. The new address must be verified
    /// before it takes effect.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn update_contact(&self, contact_type: ContactType, email: &str) -> Result<Value> {
        let path = self.tailnet_path(&format!("contacts/{contact_type}"))?;
        self.send_value(Method::PATCH, &path, &json!({ "email": email }))
            .await
    }

    /// Resend the verification email for a contact.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn resend_contact_verification(&self, contact_type: ContactType) -> Result<()> {
        let path = self.tailnet_path(&format!(
            "contacts/{contact_type}/resend-verification-email"
        ))?;
        self.post_empty(&path).await
    }

    /// Webhook endpoints of the tailnet.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn list_webhooks(&self) -> Result<Vec<Value>> {
        self.get_list(&self.tailnet_path("webhooks")?, Vec::new(), "webhooks")
            .await
    }

    /// Register a webhook endpoint. The response carries the signing secret.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn create_webhook(&self, request: &CreateWebhookRequest) -> Result<Value> {
        self.send_value(Method::POST, &self.tailnet_path("webhooks")?, request)
            .await
    }

    /// Fetch a webhook endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_webhook(&self, id: &WebhookId) -> Result<Value> {
        self.get_value(&format!("/webhooks/{}", segment(id)?)).await
    }

    /// Replace a webhook's subscriptions.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn update_webhook(&self, id: &WebhookId, subscriptions: &[String]) -> Result<Value> {
        let path = format!("/webhooks/{}", segment(id)?);
        let body = json!({ "subscriptions": subscriptions });
        self.send_value(Method::PATCH, &path, &body).await
    }

    /// Delete a webhook endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn delete_webhook(&self, id: &WebhookId) -> Result<()> {
        self.delete(&format!("/webhooks/{}", segment(id)?)).await
    }

    /// Send a test event to a webhook endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn test_webhook(&self, id: &WebhookId) -> Result<()> {
        self.post_empty(&format!("/webhooks/{}/test", segment(id)?)).await
    }

    /// Rotate a webhook's signing secret. The new secret is only available
    /// in this response.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn rotate_webhook_secret(&self, id: &WebhookId) -> Result<Value> {
        let request = ApiRequest::new(Method::POST, format!("/webhooks/{}/rotate", segment(id)?));
        Ok(self.execute(request).await?.into_value())
    }

    /// Tailnet settings.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_tailnet_settings(&self) -> Result<Value> {
        self.get_value(&self.tailnet_path("settings")?).await
    }

    /// Patch tailnet settings. Only the fields present in `settings` change.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn update_tailnet_settings<B>(&self, settings: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.send_value(Method::PATCH, &self.tailnet_path("settings")?, settings)
            .await
    }

    /// Device posture integrations.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn list_posture_integrations(&self) -> Result<Vec<Value>> {
        let path = self.tailnet_path("posture/integrations")?;
        self.get_list(&path, Vec::new(), "integrations").await
    }

    /// Create a posture integration for a provider.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn create_posture_integration(&self, provider: &str, config: Value) -> Result<Value> {
        let path = self.tailnet_path("posture/integrations")?;
        let request = CreatePostureIntegrationRequest {
            provider: provider.to_string(),
            config,
        };
        self.send_value(Method::POST, &path, &request).await
    }

    /// Fetch a posture integration.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_posture_integration(&self, id: &PostureIntegrationId) -> Result<Value> {
        self.get_value(&self.tailnet_path(&format!("posture/integrations/{}", segment(id)?))?)
            .await
    }

    /// Replace a posture integration's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn update_posture_integration(
        &self,
        id: &PostureIntegrationId,
        config: Value,
    ) -> Result<Value> {
        let path = self.tailnet_path(&format!("posture/integrations/{}", segment(id)?))?;
        self.send_value(Method::PATCH, &path, &json!({ "config": config }))
            .await
    }

    /// Delete a posture integration.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn delete_posture_integration(&self, id: &PostureIntegrationId) -> Result<()> {
        self.delete(&self.tailnet_path(&format!("posture/integrations/{}", segment(id)?))?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{client_for, MockTransport};
    use crate::client::TailscaleClient;
    use crate::models::{
        ContactType, CreateWebhookRequest, PostureIntegration, TailnetSettings, Webhook,
    };
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;
    use tailnet_core::ids::{PostureIntegrationId, WebhookId};
    use tailnet_core::{decode_value, ApiResponse};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn contacts_decode_and_update() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tailnet/-/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account": {"email": "ops@example.com"},
                "security": {
                    "email": "sec@example.com",
                    "fallbackEmail": "ops@example.com",
                    "needsVerification": true
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/tailnet/-/contacts/security"))
            .and(body_json(json!({"email": "new-sec@example.com"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/tailnet/-/contacts/support/resend-verification-email"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let contacts = client.get_contacts().await.unwrap();
        assert!(contacts.support.is_none());
        let security = contacts.security.unwrap();
        assert_eq!(security.needs_verification, Some(true));
        assert_eq!(security.fallback_email.as_deref(), Some("ops@example.com"));

        client
            .update_contact(ContactType::Security, "new-sec@example.com")
            .await
            .unwrap();
        client
            .resend_contact_verification(ContactType::Support)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_webhook_returns_secret() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tailnet/-/webhooks"))
            .and(body_json(json!({
                "endpointUrl": "https://hooks.example/ts",
                "providerType": "slack",
                "subscriptions": ["nodeCreated"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "endpointId": "w1",
                "endpointUrl": "https://hooks.example/ts",
                "providerType": "slack",
                "subscriptions": ["nodeCreated"],
                "created": "2024-06-01T00:00:00Z",
                "secret": "whsec"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = CreateWebhookRequest {
            provider_type: "slack".into(),
            subscriptions: vec!["nodeCreated".into()],
            ..CreateWebhookRequest::new("https://hooks.example/ts")
        };
        let value = client_for(&server).create_webhook(&request).await.unwrap();
        let webhook: Webhook = decode_value(value).unwrap();
        assert_eq!(webhook.endpoint_id, WebhookId::new("w1"));
        assert_eq!(webhook.secret.as_deref(), Some("whsec"));
        assert!(webhook.last_triggered.is_none());
    }

    #[tokio::test]
    async fn list_webhooks_null_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tailnet/-/webhooks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"webhooks": null})))
            .mount(&server)
            .await;

        assert!(client_for(&server).list_webhooks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn webhook_by_id_requests() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request| {
                request.method == Method::PATCH
                    && request.path == "/webhooks/w1"
                    && request.body == Some(json!({"subscriptions": ["policyUpdate"]}))
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::Json(json!({"endpointId": "w1"}))));
        transport
            .expect_execute()
            .withf(|request| request.method == Method::POST && request.path == "/webhooks/w1/test")
            .times(1)
            .returning(|_| Ok(ApiResponse::NoContent));
        transport
            .expect_execute()
            .withf(|request| {
                request.method == Method::POST
                    && request.path == "/webhooks/w1/rotate"
                    && request.body.is_none()
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::Json(json!({"secret": "rotated"}))));
        transport
            .expect_execute()
            .withf(|request| request.method == Method::GET && request.path == "/webhooks/w1")
            .times(1)
            .returning(|_| Ok(ApiResponse::Json(json!({"endpointId": "w1"}))));
        transport
            .expect_execute()
            .withf(|request| request.method == Method::DELETE && request.path == "/webhooks/w1")
            .times(1)
            .returning(|_| Ok(ApiResponse::NoContent));

        let client = TailscaleClient::with_transport(Arc::new(transport), "-");
        let id = WebhookId::new("w1");
        client
            .update_webhook(&id, &["policyUpdate".to_string()])
            .await
            .unwrap();
        client.test_webhook(&id).await.unwrap();
        let rotated = client.rotate_webhook_secret(&id).await.unwrap();
        assert_eq!(rotated["secret"], "rotated");
        assert_eq!(client.get_webhook(&id).await.unwrap()["endpointId"], "w1");
        client.delete_webhook(&id).await.unwrap();
    }

    #[tokio::test]
    async fn settings_patch_only_set_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tailnet/-/settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "devicesApprovalOn": false,
                "devicesKeyDurationDays": 180
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/tailnet/-/settings"))
            .and(body_json(json!({"devicesApprovalOn": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"devicesApprovalOn": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let settings: TailnetSettings =
            decode_value(client.get_tailnet_settings().await.unwrap()).unwrap();
        assert_eq!(settings.devices_key_duration_days, Some(180));
        assert!(settings.magic_dns_enabled.is_none());

        let patch = TailnetSettings {
            devices_approval_on: Some(true),
            ..TailnetSettings::default()
        };
        let updated = client.update_tailnet_settings(&patch).await.unwrap();
        assert_eq!(updated["devicesApprovalOn"], true);
    }

    #[tokio::test]
    async fn posture_integrations_lifecycle() {
        let server = MockServer::start().await;
        let integration = json!({
            "id": "pi1",
            "provider": "intune",
            "createdAt": "2024-07-01T00:00:00Z",
            "config": {"tenantId": "t1"}
        });
        Mock::given(method("GET"))
            .and(path("/tailnet/-/posture/integrations"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"integrations": [integration.clone()]})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/tailnet/-/posture/integrations"))
            .and(body_json(json!({"provider": "intune", "config": {"tenantId": "t1"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(integration.clone()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tailnet/-/posture/integrations/pi1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(integration.clone()))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/tailnet/-/posture/integrations/pi1"))
            .and(body_json(json!({"config": {"tenantId": "t2"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(integration.clone()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/tailnet/-/posture/integrations/pi1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let listed = client.list_posture_integrations().await.unwrap();
        assert_eq!(listed.len(), 1);

        let created = client
            .create_posture_integration("intune", json!({"tenantId": "t1"}))
            .await
            .unwrap();
        let created: PostureIntegration = decode_value(created).unwrap();
        assert_eq!(created.provider, "intune");

        let id = PostureIntegrationId::new("pi1");
        assert_eq!(client.get_posture_integration(&id).await.unwrap()["id"], "pi1");
        client
            .update_posture_integration(&id, json!({"tenantId": "t2"}))
            .await
            .unwrap();
        client.delete_posture_integration(&id).await.unwrap();
    }
}
