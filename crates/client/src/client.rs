//! Session-aware request client.
//!
//! Every call goes through [`ApiClient::execute`]:
//! 1. send the request once;
//! 2. on `401`, POST the refresh endpoint once;
//! 3. if the refresh succeeded, replay the original request once.
//!
//! Nothing else is retried. Concurrent calls are independent: two requests
//! that hit an expired session at the same time each run their own refresh.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport, TransportError};

/// JSON client for the ERP API.
#[derive(Debug, Clone)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    refresh_path: String,
}

impl ApiClient<HttpTransport> {
    /// Build a client with the reqwest transport described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(transport, config.refresh_path.clone()))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, refresh_path: impl Into<String>) -> Self {
        Self {
            transport,
            refresh_path: refresh_path.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn refresh_path(&self) -> &str {
        &self.refresh_path
    }

    /// Perform a request with an optional JSON body and extra headers.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        let mut request = ApiRequest::new(method, path);
        request.body = body;
        request.headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.execute(request).await
    }

    /// Send `request`, recovering once from an expired session.
    ///
    /// A failed refresh surfaces the original `401`; a failed retry surfaces
    /// the retry's own error.
    pub async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        match self.send_once(&request).await {
            Err(err) if err.is_unauthorized() && request.path != self.refresh_path => {
                debug!(method = %request.method, path = %request.path, "session expired; refreshing");

                match self.refresh_session().await {
                    Ok(()) => {
                        debug!(method = %request.method, path = %request.path, "session refreshed; retrying");
                        self.send_once(&request).await
                    }
                    Err(refresh_err) => {
                        warn!(path = %request.path, error = %refresh_err, "session refresh failed");
                        Err(err)
                    }
                }
            }
            other => other,
        }
    }

    /// POST the refresh endpoint with no body.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Post, self.refresh_path.clone());
        self.send_once(&request).await.map(|_| ())
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let value = self.execute(ApiRequest::new(Method::Get, path)).await?;
        decode(value)
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::Post, path, body).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::Put, path, body).await
    }

    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::Patch, path, body).await
    }

    /// DELETE; a `204 No Content` comes back as `{}`.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(ApiRequest::new(Method::Delete, path)).await
    }

    async fn send_json<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let value = self
            .execute(ApiRequest::new(method, path).with_body(body))
            .await?;
        decode(value)
    }

    async fn send_once(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let resp = self.transport.send(request).await.map_err(|e| {
            warn!(method = %request.method, path = %request.path, error = %e, "transport failure");
            ApiError::from(e)
        })?;

        debug!(method = %request.method, path = %request.path, status = resp.status, "response");

        if resp.is_success() {
            Ok(success_body(request, &resp))
        } else {
            Err(ApiError::Status {
                status: resp.status,
                detail: error_body(&resp),
            })
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Decode a 2xx body; no-content and unparseable bodies become `{}`.
fn success_body(request: &ApiRequest, resp: &ApiResponse) -> Value {
    if resp.status == 204 || resp.body.iter().all(u8::is_ascii_whitespace) {
        return empty_object();
    }
    match serde_json::from_slice(&resp.body) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %request.path, status = resp.status, error = %e, "unparseable success body; using empty payload");
            empty_object()
        }
    }
}

/// Best-effort decode of an error payload; never fails.
fn error_body(resp: &ApiResponse) -> Value {
    serde_json::from_slice(&resp.body).unwrap_or_else(|_| empty_object())
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    const REFRESH: &str = "/auth/token/refresh/";

    fn client(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport> {
        ApiClient::new(transport.clone(), REFRESH)
    }

    #[tokio::test]
    async fn expired_session_is_refreshed_and_retried_once() {
        let transport = ScriptedTransport::new();
        transport.push_json(401, json!({"detail": "Token expired"}));
        transport.push_status(200);
        transport.push_json(200, json!([{"id": 1}, {"id": 2}]));

        let orders: Vec<Value> = client(&transport).get("/sales/orders/").await.unwrap();

        assert_eq!(orders.len(), 2);
        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].path, "/sales/orders/");
        assert_eq!((calls[1].method, calls[1].path.as_str()), (Method::Post, REFRESH));
        assert_eq!(calls[1].body, None);
        assert_eq!(calls[2], calls[0]);
    }

    #[tokio::test]
    async fn failed_refresh_surfaces_the_original_401() {
        let transport = ScriptedTransport::new();
        transport.push_json(401, json!({"detail": "Token expired"}));
        transport.push_json(401, json!({"detail": "Refresh token invalid"}));

        let err = client(&transport)
            .get::<Value>("/sales/orders/")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.message(), "Token expired");
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn refresh_transport_failure_surfaces_the_original_401() {
        let transport = ScriptedTransport::new();
        transport.push_status(401);
        transport.push_error(TransportError::Connect("connection reset".into()));

        let err = client(&transport).delete("/clients/3/").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn retry_failure_is_surfaced_without_a_second_refresh() {
        let transport = ScriptedTransport::new();
        transport.push_status(401);
        transport.push_status(200);
        transport.push_json(401, json!({"detail": "Still expired"}));

        let err = client(&transport)
            .get::<Value>("/stock/items/")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.message(), "Still expired");
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn retry_returns_the_retry_error_not_the_original() {
        let transport = ScriptedTransport::new();
        transport.push_status(401);
        transport.push_status(204);
        transport.push_json(404, json!({"detail": "Not found."}));

        let err = client(&transport)
            .get::<Value>("/sales/invoices/9/")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.kind(), ErrorKind::Client);
    }

    #[tokio::test]
    async fn delete_with_no_content_yields_empty_object() {
        let transport = ScriptedTransport::new();
        transport.push_status(204);

        let value = client(&transport).delete("/sales/quotes/4/").await.unwrap();

        assert_eq!(value, json!({}));
        assert_eq!(transport.calls()[0].method, Method::Delete);
    }

    #[tokio::test]
    async fn unparseable_success_body_yields_empty_object() {
        let transport = ScriptedTransport::new();
        transport.push_body(200, "<html>ok</html>");

        let value = client(&transport)
            .request(Method::Post, "/sales/invoices/1/send/", None, &[])
            .await
            .unwrap();

        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn unparseable_error_body_keeps_the_status() {
        let transport = ScriptedTransport::new();
        transport.push_body(502, "Bad Gateway");

        let err = client(&transport).get::<Value>("/clients/").await.unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert_eq!(err.detail(), Some(&json!({})));
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[tokio::test]
    async fn validation_errors_are_not_retried() {
        let transport = ScriptedTransport::new();
        transport.push_json(400, json!({"name": ["This field is required."]}));

        let err = client(&transport)
            .post::<_, Value>("/clients/", &json!({"name": ""}))
            .await
            .unwrap_err();

        assert_eq!(err.message(), "name: This field is required.");
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn transport_failures_are_not_retried() {
        let transport = ScriptedTransport::new();
        transport.push_error(TransportError::Timeout);

        let err = client(&transport).get::<Value>("/clients/").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn bodies_and_headers_are_forwarded() {
        let transport = ScriptedTransport::new();
        transport.push_json(201, json!({"id": 10, "name": "Acme"}));

        let created = client(&transport)
            .request(
                Method::Post,
                "/clients/",
                Some(json!({"name": "Acme"})),
                &[("X-Request-Source", "erpdesk")],
            )
            .await
            .unwrap();

        assert_eq!(created["id"], 10);
        let call = &transport.calls()[0];
        assert_eq!(call.body, Some(json!({"name": "Acme"})));
        assert_eq!(
            call.headers,
            vec![("X-Request-Source".to_string(), "erpdesk".to_string())]
        );
    }

    #[tokio::test]
    async fn typed_decode_failure_is_reported() {
        let transport = ScriptedTransport::new();
        transport.push_status(204);

        let err = client(&transport)
            .get::<Vec<Value>>("/clients/")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn unauthorized_refresh_call_is_not_refreshed_again() {
        let transport = ScriptedTransport::new();
        transport.push_status(401);

        let err = client(&transport)
            .request(Method::Post, REFRESH, None, &[])
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(transport.call_count(), 1);
    }
}
