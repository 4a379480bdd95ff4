//! Authentication endpoints.
//!
//! Thin typed wrappers; the backend sets/clears the session cookies and the
//! transport's cookie jar picks them up.

use serde::{Deserialize, Serialize};

use erpdesk_core::RecordId;

use crate::client::ApiClient;
use crate::config::AuthPaths;
use crate::error::ApiError;
use crate::transport::{Method, Transport};

/// Authenticated user as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl User {
    /// Name shown in the header bar.
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.username
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.to_string())
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordResetConfirm {
    pub uid: String,
    pub token: String,
    pub new_password: String,
}

/// Acknowledgement for endpoints that return no resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Endpoints answer either with the user object or `{"user": {...}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl From<UserEnvelope> for User {
    fn from(value: UserEnvelope) -> Self {
        match value {
            UserEnvelope::Wrapped { user } => user,
            UserEnvelope::Bare(user) => user,
        }
    }
}

/// Auth endpoint calls bound to a client and a set of paths.
pub struct AuthService<'a, T> {
    client: &'a ApiClient<T>,
    paths: &'a AuthPaths,
}

impl<'a, T: Transport> AuthService<'a, T> {
    pub fn new(client: &'a ApiClient<T>, paths: &'a AuthPaths) -> Self {
        Self { client, paths }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.client.post(&self.paths.login, credentials).await?;
        Ok(envelope.into())
    }

    pub async fn logout(&self) -> Result<Ack, ApiError> {
        let value = self
            .client
            .request(Method::Post, &self.paths.logout, None, &[])
            .await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .client
            .post(&self.paths.register, registration)
            .await?;
        Ok(envelope.into())
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.client.get(&self.paths.current_user).await?;
        Ok(envelope.into())
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<Ack, ApiError> {
        self.client
            .post(&self.paths.password_reset, &serde_json::json!({ "email": email }))
            .await
    }

    pub async fn confirm_password_reset(
        &self,
        confirm: &PasswordResetConfirm,
    ) -> Result<Ack, ApiError> {
        self.client
            .post(&self.paths.password_reset_confirm, confirm)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    fn setup() -> (ScriptedTransport, ApiClient<ScriptedTransport>, AuthPaths) {
        let transport = ScriptedTransport::new();
        let client = ApiClient::new(transport.clone(), "/auth/token/refresh/");
        (transport, client, AuthPaths::default())
    }

    #[tokio::test]
    async fn login_accepts_wrapped_user() {
        let (transport, client, paths) = setup();
        transport.push_json(200, json!({"user": {"id": 7, "username": "ana", "groups": ["sales"]}}));

        let user = AuthService::new(&client, &paths)
            .login(&Credentials::new("ana", "secret"))
            .await
            .unwrap();

        assert_eq!(user.id, RecordId::from(7));
        assert!(user.in_group("sales"));
        let call = &transport.calls()[0];
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/auth/login/");
        assert_eq!(call.body, Some(json!({"username": "ana", "password": "secret"})));
    }

    #[tokio::test]
    async fn current_user_accepts_bare_user() {
        let (transport, client, paths) = setup();
        transport.push_json(
            200,
            json!({"id": "u-1", "email": "ops@example.com", "first_name": "Ops", "last_name": "Team"}),
        );

        let user = AuthService::new(&client, &paths).current_user().await.unwrap();

        assert_eq!(user.display_name(), "Ops Team");
        assert_eq!(transport.calls()[0].method, Method::Get);
    }

    #[tokio::test]
    async fn logout_with_no_content_is_acknowledged() {
        let (transport, client, paths) = setup();
        transport.push_status(204);

        let ack = AuthService::new(&client, &paths).logout().await.unwrap();

        assert_eq!(ack, Ack::default());
    }

    #[tokio::test]
    async fn failed_login_carries_backend_detail() {
        let (transport, client, paths) = setup();
        transport.push_json(400, json!({"detail": "Invalid credentials."}));

        let err = AuthService::new(&client, &paths)
            .login(&Credentials::new("ana", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message(), "Invalid credentials.");
    }

    #[tokio::test]
    async fn password_reset_flow_posts_expected_payloads() {
        let (transport, client, paths) = setup();
        transport.push_json(200, json!({"detail": "Password reset e-mail has been sent."}));
        transport.push_json(200, json!({"detail": "Password has been reset."}));

        let auth = AuthService::new(&client, &paths);
        let sent = auth.request_password_reset("ana@example.com").await.unwrap();
        let done = auth
            .confirm_password_reset(&PasswordResetConfirm {
                uid: "MQ".into(),
                token: "abc-123".into(),
                new_password: "n3w-pass".into(),
            })
            .await
            .unwrap();

        assert_eq!(sent.detail.as_deref(), Some("Password reset e-mail has been sent."));
        assert_eq!(done.detail.as_deref(), Some("Password has been reset."));
        let calls = transport.calls();
        assert_eq!(calls[0].body, Some(json!({"email": "ana@example.com"})));
        assert_eq!(calls[1].path, "/auth/password/reset/confirm/");
        assert_eq!(calls[1].body.as_ref().unwrap()["token"], "abc-123");
    }

    #[tokio::test]
    async fn register_returns_created_user() {
        let (transport, client, paths) = setup();
        transport.push_json(201, json!({"id": 12, "username": "new", "email": "new@example.com"}));

        let user = AuthService::new(&client, &paths)
            .register(&Registration {
                username: "new".into(),
                email: "new@example.com".into(),
                password: "pw".into(),
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap();

        assert_eq!(user.display_name(), "new");
        let body = transport.calls()[0].body.clone().unwrap();
        assert!(body.get("first_name").is_none());
    }
}
