//! Session context: who is logged in, and whether we are still finding out.
//!
//! One owned value per application, passed explicitly to whoever needs it.
//! `restore()` is the mount-time init, `logout()` the teardown.

use tracing::{info, warn};

use crate::auth::{AuthService, Credentials, Registration, User};
use crate::client::ApiClient;
use crate::config::AuthPaths;
use crate::error::ApiError;
use crate::transport::Transport;

pub struct SessionContext<T> {
    client: ApiClient<T>,
    paths: AuthPaths,
    current_user: Option<User>,
    loading: bool,
}

impl<T: Transport> SessionContext<T> {
    /// New context; `loading` stays true until the first `restore()` finishes.
    pub fn new(client: ApiClient<T>, paths: AuthPaths) -> Self {
        Self {
            client,
            paths,
            current_user: None,
            loading: true,
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn auth(&self) -> AuthService<'_, T> {
        AuthService::new(&self.client, &self.paths)
    }

    /// Try to pick up an existing session from the cookie jar.
    ///
    /// Never fails: any error simply leaves the context logged out.
    pub async fn restore(&mut self) -> Option<&User> {
        self.loading = true;
        let result = self.auth().current_user().await;
        self.current_user = match result {
            Ok(user) => {
                info!(user = %user.id, "session restored");
                Some(user)
            }
            Err(err) => {
                info!(error = %err, "no active session");
                None
            }
        };
        self.loading = false;
        self.current_user.as_ref()
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<&User, ApiError> {
        self.loading = true;
        let result = self.auth().login(credentials).await;
        self.loading = false;

        let user = result?;
        info!(user = %user.id, "logged in");
        Ok(&*self.current_user.insert(user))
    }

    /// Create an account. The new user is not logged in.
    pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        self.auth().register(registration).await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.auth().request_password_reset(email).await.map(|_| ())
    }

    /// End the session. Local state is cleared even when the call fails.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let result = self.auth().logout().await;
        if let Some(user) = self.current_user.take() {
            info!(user = %user.id, "logged out");
        }
        result.map(|_| ()).inspect_err(|err| {
            warn!(error = %err, "logout call failed; local session cleared anyway");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    fn context(transport: &ScriptedTransport) -> SessionContext<ScriptedTransport> {
        let client = ApiClient::new(transport.clone(), "/auth/token/refresh/");
        SessionContext::new(client, AuthPaths::default())
    }

    #[tokio::test]
    async fn restore_picks_up_existing_session() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"id": 3, "username": "ana"}));
        let mut session = context(&transport);
        assert!(session.is_loading());

        session.restore().await;

        assert!(!session.is_loading());
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().display_name(), "ana");
    }

    #[tokio::test]
    async fn restore_with_dead_session_stays_logged_out() {
        let transport = ScriptedTransport::new();
        transport.push_status(401);
        transport.push_status(401);
        let mut session = context(&transport);

        assert!(session.restore().await.is_none());

        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
        // current-user + one refresh attempt, no retry
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn login_then_logout_round_trip() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"user": {"id": 5, "username": "bo"}}));
        transport.push_status(204);
        let mut session = context(&transport);

        let user = session.login(&Credentials::new("bo", "pw")).await.unwrap();
        assert_eq!(user.username.as_deref(), Some("bo"));
        assert!(session.is_authenticated());

        session.logout().await.unwrap();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn failed_logout_still_clears_local_state() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"id": 5}));
        transport.push_json(500, json!({"detail": "boom"}));
        let mut session = context(&transport);
        session.restore().await;

        let err = session.logout().await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn failed_login_keeps_context_logged_out() {
        let transport = ScriptedTransport::new();
        transport.push_json(400, json!({"non_field_errors": ["Unable to log in."]}));
        let mut session = context(&transport);

        let err = session
            .login(&Credentials::new("bo", "nope"))
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Unable to log in.");
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
    }
}
