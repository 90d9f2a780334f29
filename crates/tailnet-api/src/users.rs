//! User and user-invite operations.

use crate::client::TailscaleClient;
use crate::models::{CreateUserInviteRequest, User, UserRole};
use reqwest::Method;
use serde_json::{json, Value};
use tailnet_core::ids::{UserId, UserInviteId};
use tailnet_core::path::segment;
use tailnet_core::Result;

impl TailscaleClient {
    /// List the users of the tailnet.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure and
    /// [`tailnet_core::Error::Decode`] if a user record is malformed.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let path = self.tailnet_path("users")?;
        self.get_list(&path, Vec::new(), "users").await
    }

    /// Fetch one user.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] or [`tailnet_core::Error::Decode`].
    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        let path = self.tailnet_path(&format!("users/{}", segment(id)?))?;
        self.get_json(&path, Vec::new()).await
    }

    /// Delete a user through the tailnet-scoped endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        self.delete(&self.tailnet_path(&format!("users/{}", segment(id)?))?)
            .await
    }

    /// Delete a user through `POST /users/{id}/delete`.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn delete_user_v2(&self, id: &UserId) -> Result<()> {
        self.post_empty(&format!("/users/{}/delete", segment(id)?)).await
    }

    /// Approve a pending user.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn approve_user(&self, id: &UserId) -> Result<()> {
        self.post_empty(&format!("/users/{}/approve", segment(id)?)).await
    }

    /// Suspend a user.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn suspend_user(&self, id: &UserId) -> Result<()> {
        self.post_empty(&format!("/users/{}/suspend", segment(id)?)).await
    }

    /// Restore a suspended user.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn restore_user(&self, id: &UserId) -> Result<()> {
        self.post_empty(&format!("/users/{}/restore", segment(id)?)).await
    }

    /// Change a user's role.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn set_user_role(&self, id: &UserId, role: UserRole) -> Result<()> {
        let path = format!("/users/{}/role", segment(id)?);
        self.send_empty(Method::POST, &path, Some(&json!({ "role": role })))
            .await
    }

    /// Pending user invites.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn list_user_invites(&self) -> Result<Vec<Value>> {
        let path = self.tailnet_path("user-invites")?;
        self.get_list(&path, Vec::new(), "invites").await
    }

    /// Invite a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn create_user_invite(&self, email: &str, role: UserRole) -> Result<Value> {
        let path = self.tailnet_path("user-invites")?;
        let request = CreateUserInviteRequest {
            email: email.to_string(),
            role,
        };
        self.send_value(Method::POST, &path, &request).await
    }

    /// Fetch a user invite.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn get_user_invite(&self, id: &UserInviteId) -> Result<Value> {
        self.get_value(&format!("/user-invites/{}", segment(id)?)).await
    }

    /// Delete a user invite.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn delete_user_invite(&self, id: &UserInviteId) -> Result<()> {
        self.delete(&format!("/user-invites/{}", segment(id)?)).await
    }

    /// Resend a user invite email.
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::Api`] on request failure.
    pub async fn resend_user_invite(&self, id: &UserInviteId) -> Result<()> {
        self.post_empty(&format!("/user-invites/{}/resend", segment(id)?)).await
    }
}
