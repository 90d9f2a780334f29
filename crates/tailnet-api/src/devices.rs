//! Device and device-invite operations.

use crate::client::TailscaleClient;
use crate::models::{CreateDeviceInviteRequest, Device, DeviceFields, SetAttributeRequest};
use reqwest::Method;
use serde_json::{json, Value};
use tailnet_core::ids::{DeviceId, DeviceInviteId};
use tailnet_core::path::segment;
use tailnet_core::Result;

fn fields_query(fields: DeviceFields) -> Vec<(&'static str, String)> {
    vec![("fields", fields.as_str().to_string())]
}

impl TailscaleClient {
    /// List the devices in the tailnet.
    ///
    /// An empty tailnet yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure and
    /// [`tailnet_core::Error::Decode`] if a device record is malformed.
    pub async fn list_devices(&self, fields: DeviceFields) -> Result<Vec<Device>> {
        let path = self.tailnet_path("devices")?;
        self.get_list(&path, fields_query(fields), "devices").await
    }

    /// Fetch one device. Both the stable node ID and the legacy numeric ID
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] (404 if unknown) or
    /// [`tailnet_core::Error::Decode`].
    pub async fn get_device(&self, id: &DeviceId, fields: DeviceFields) -> Result<Device> {
        let path = format!("/device/{}", segment(id)?);
        self.get_json(&path, fields_query(fields)).await
    }

    /// Remove a device from the tailnet.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn delete_device(&self, id: &DeviceId) -> Result<()> {
        self.delete(&format!("/device/{}", segment(id)?)).await
    }

    /// Authorize or deauthorize a device. Pass `true` for the usual approval.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn authorize_device(&self, id: &DeviceId, authorized: bool) -> Result<()> {
        let path = format!("/device/{}/authorized", segment(id)?);
        self.send_empty(Method::POST, &path, Some(&json!({ "authorized": authorized })))
            .await
    }

    /// Replace the ACL tags on a device.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn update_device_tags(&self, id: &DeviceId, tags: &[String]) -> Result<()> {
        let path = format!("/device/{}/tags", segment(id)?);
        self.send_empty(Method::POST, &path, Some(&json!({ "tags": tags })))
            .await
    }

    /// Expire the device's node key, forcing re-authentication.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn expire_device_key(&self, id: &DeviceId) -> Result<()> {
        self.post_empty(&format!("/device/{}/expire", segment(id)?)).await
    }

    /// Advertised and enabled subnet routes, as returned by the API.
    ///
    /// Decode with [`tailnet_core::decode_value`] into
    /// [`crate::models::DeviceRoutes`] for typed access.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_device_routes(&self, id: &DeviceId) -> Result<Value> {
        self.get_value(&format!("/device/{}/routes", segment(id)?)).await
    }

    /// Set the enabled subnet routes of a device.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn set_device_routes(&self, id: &DeviceId, routes: &[String]) -> Result<Value> {
        let path = format!("/device/{}/routes", segment(id)?);
        self.send_value(Method::POST, &path, &json!({ "routes": routes }))
            .await
    }

    /// Rename a device. Accepts either a FQDN or the bare machine name.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn set_device_name(&self, id: &DeviceId, name: &str) -> Result<()> {
        let path = format!("/device/{}/name", segment(id)?);
        self.send_empty(Method::POST, &path, Some(&json!({ "name": name })))
            .await
    }

    /// Enable or disable key expiry for a device.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn update_device_key(&self, id: &DeviceId, key_expiry_disabled: bool) -> Result<()> {
        let path = format!("/device/{}/key", segment(id)?);
        let body = json!({ "keyExpiryDisabled": key_expiry_disabled });
        self.send_empty(Method::POST, &path, Some(&body)).await
    }

    /// Assign a specific Tailscale IPv4 address. Existing connections to the
    /// device break.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn set_device_ipv4(&self, id: &DeviceId, ipv4: &str) -> Result<()> {
        let path = format!("/device/{}/ip", segment(id)?);
        self.send_empty(Method::POST, &path, Some(&json!({ "ipv4": ipv4 })))
            .await
    }

    /// Posture attributes of a device.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_device_attributes(&self, id: &DeviceId) -> Result<Value> {
        self.get_value(&format!("/device/{}/attributes", segment(id)?)).await
    }

    /// Set a custom posture attribute. Keys carry the `custom:` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn set_device_attribute(
        &self,
        id: &DeviceId,
        key: &str,
        request: &SetAttributeRequest,
    ) -> Result<Value> {
        let path = format!("/device/{}/attributes/{}", segment(id)?, segment(key)?);
        self.send_value(Method::POST, &path, request).await
    }

    /// Remove a custom posture attribute.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn delete_device_attribute(&self, id: &DeviceId, key: &str) -> Result<()> {
        self.delete(&format!("/device/{}/attributes/{}", segment(id)?, segment(key)?)).await
    }

    /// Share invites for a device.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn list_device_invites(&self, id: &DeviceId) -> Result<Vec<Value>> {
        let path = format!("/device/{}/device-invites", segment(id)?);
        self.get_list(&path, Vec::new(), "invites").await
    }

    /// Create a share invite for a device.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn create_device_invite(
        &self,
        id: &DeviceId,
        request: &CreateDeviceInviteRequest,
    ) -> Result<Value> {
        let path = format!("/device/{}/device-invites", segment(id)?);
        self.send_value(Method::POST, &path, request).await
    }

    /// Fetch a device invite.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_device_invite(&self, id: &DeviceInviteId) -> Result<Value> {
        self.get_value(&format!("/device-invites/{}", segment(id)?)).await
    }

    /// Delete a device invite.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn delete_device_invite(&self, id: &DeviceInviteId) -> Result<()> {
        self.delete(&format!("/device-invites/{}", segment(id)?)).await
    }

    /// Resend a device invite email.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn resend_device_invite(&self, id: &DeviceInviteId) -> Result<()> {
        self.post_empty(&format!("/device-invites/{}/resend", segment(id)?))
            .await
    }

    /// Accept a device share invite by its code.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn accept_device_invite(&self, code: &str) -> Result<()> {
        self.send_empty(
            Method::POST,
            "/device-invites/-/accept",
            Some(&json!({ "code": code })),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{client_for, MockTransport};
    use crate::client::TailscaleClient;
    use crate::models::{CreateDeviceInviteRequest, DeviceFields, DeviceRoutes, SetAttributeRequest};
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;
    use tailnet_core::ids::{DeviceId, DeviceInviteId};
    use tailnet_core::{decode_value, ApiResponse, Error};
    use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_devices_decodes_entities() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tailnet/-/devices"))
            .and(query_param("fields", "all"))
            .and(basic_auth("tskey-test", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "devices": [{
                    "id": "d1",
                    "addresses": ["100.64.0.1"],
                    "authorized": true,
                    "hostname": "h",
                    "name": "h",
                    "os": "linux",
                    "user": "u@x.com"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let devices = client_for(&server)
            .list_devices(DeviceFields::All)
            .await
            .unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id.as_str(), "d1");
        assert!(devices[0].authorized);
    }

    #[tokio::test]
    async fn list_devices_empty_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tailnet/-/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"devices": []})))
            .mount(&server)
            .await;

        let devices = client_for(&server)
            .list_devices(DeviceFields::Default)
            .await
            .unwrap();
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn get_device_not_found_carries_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/device/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_device(&DeviceId::new("missing"), DeviceFields::All)
            .await
            .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status_code(), Some(404));
                assert_eq!(api.payload(), Some(&json!({"message": "not found"})));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_device_missing_field_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/device/d1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "d1"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_device(&DeviceId::new("d1"), DeviceFields::All)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn delete_device_issues_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/device/d1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .delete_device(&DeviceId::new("d1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn authorize_device_sends_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/device/d1/authorized"))
            .and(body_json(json!({"authorized": false})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .authorize_device(&DeviceId::new("d1"), false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn routes_pass_through_and_decode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/device/d1/routes"))
            .and(body_json(json!({"routes": ["10.0.0.0/24"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "advertisedRoutes": ["10.0.0.0/24", "10.1.0.0/24"],
                "enabledRoutes": ["10.0.0.0/24"]
            })))
            .mount(&server)
            .await;

        let value = client_for(&server)
            .set_device_routes(&DeviceId::new("d1"), &["10.0.0.0/24".to_string()])
            .await
            .unwrap();
        let routes: DeviceRoutes = decode_value(value).unwrap();
        assert_eq!(routes.advertised_routes.len(), 2);
        assert_eq!(routes.enabled_routes, vec!["10.0.0.0/24".to_string()]);
    }

    #[tokio::test]
    async fn device_mutations_send_expected_bodies() {
        let server = MockServer::start().await;
        for (suffix, body) in [
            ("tags", json!({"tags": ["tag:web"]})),
            ("name", json!({"name": "web-1"})),
            ("key", json!({"keyExpiryDisabled": true})),
            ("ip", json!({"ipv4": "100.64.0.9"})),
        ] {
            Mock::given(method("POST"))
                .and(path(format!("/device/d1/{suffix}")))
                .and(body_json(body))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        let id = DeviceId::new("d1");
        client
            .update_device_tags(&id, &["tag:web".to_string()])
            .await
            .unwrap();
        client.set_device_name(&id, "web-1").await.unwrap();
        client.update_device_key(&id, true).await.unwrap();
        client.set_device_ipv4(&id, "100.64.0.9").await.unwrap();
    }

    #[tokio::test]
    async fn set_attribute_omits_unset_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/device/d1/attributes/custom:tier"))
            .and(body_json(json!({"value": "gold"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": "gold"})))
            .expect(1)
            .mount(&server)
            .await;

        let value = client_for(&server)
            .set_device_attribute(
                &DeviceId::new("d1"),
                "custom:tier",
                &SetAttributeRequest::new("gold"),
            )
            .await
            .unwrap();
        assert_eq!(value["value"], "gold");
    }

    #[tokio::test]
    async fn attribute_key_stays_in_its_segment() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/device/d%231/attributes/custom:a%2Fb%3Fc"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .delete_device_attribute(&DeviceId::new("d#1"), "custom:a/b?c")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn dot_segment_ids_are_rejected_before_sending() {
        let client = TailscaleClient::with_transport(Arc::new(MockTransport::new()), "-");
        let err = client
            .get_device(&DeviceId::new(".."), DeviceFields::Default)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));

        let err = client
            .delete_device_attribute(&DeviceId::new("d1"), ".")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn device_invites_flow() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/device/d1/device-invites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/device/d1/device-invites"))
            .and(body_json(json!({"multiUse": true, "allowExitNode": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "inv1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/device-invites/-/accept"))
            .and(body_json(json!({"code": "abc"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let id = DeviceId::new("d1");
        assert!(client.list_device_invites(&id).await.unwrap().is_empty());

        let request = CreateDeviceInviteRequest {
            multi_use: true,
            ..CreateDeviceInviteRequest::default()
        };
        let invite = client.create_device_invite(&id, &request).await.unwrap();
        assert_eq!(invite["id"], "inv1");

        client.accept_device_invite("abc").await.unwrap();
    }

    #[tokio::test]
    async fn device_invite_by_id_requests() {
        let mut transport = MockTransport::new();
        let mut sequence = mockall::Sequence::new();
        for (verb, target) in [
            (Method::GET, "/device-invites/inv1"),
            (Method::POST, "/device-invites/inv1/resend"),
            (Method::DELETE, "/device-invites/inv1"),
        ] {
            transport
                .expect_execute()
                .withf(move |request| {
                    request.method == verb && request.path == target && request.body.is_none()
                })
                .times(1)
                .in_sequence(&mut sequence)
                .returning(|_| Ok(ApiResponse::NoContent));
        }

        let client = TailscaleClient::with_transport(Arc::new(transport), "-");
        let id = DeviceInviteId::new("inv1");
        client.get_device_invite(&id).await.unwrap();
        client.resend_device_invite(&id).await.unwrap();
        client.delete_device_invite(&id).await.unwrap();
    }
}
