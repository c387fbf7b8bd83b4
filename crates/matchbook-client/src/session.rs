// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, trace};

use matchbook_domain::{RemoteStatus, StatusCode};
use matchbook_fingerprint::{DigestEngine, FingerprintEngine};

use crate::config::{ClientConfig, ClientCredentials};
use crate::error::{ClientError, Result};

const USER_AGENT: &str = concat!("matchbook/", env!("CARGO_PKG_VERSION"));

/// Which backend surface a session is authenticated against. Sent with the
/// auth handshake; determines the operations the token is valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Metadata,
    License,
    Private,
    Registry,
}

/// An authenticated connection to the identification service.
///
/// Owns its credentials-derived token, its HTTP client, and the mutex that
/// serializes every remote operation issued through it. Sessions are
/// independent of each other; there is no process-global state.
pub(crate) struct Session {
    http: Client,
    base_url: String,
    token: String,
    long_poll_timeout: Duration,
    op_lock: Mutex<()>,
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    kind: SessionKind,
}

#[derive(Deserialize)]
struct AuthResponse {
    access_token: String,
}

impl Session {
    /// Establish a session: one auth round trip exchanging the credential
    /// pair for a bearer token reused by all subsequent operations.
    pub(crate) async fn connect(
        kind: SessionKind,
        credentials: &ClientCredentials,
        config: &ClientConfig,
    ) -> Result<Arc<Self>> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()?;
        let base_url = url::Url::parse(&config.base_url)?
            .as_str()
            .trim_end_matches('/')
            .to_string();

        debug!(target: "matchbook", ?kind, "connecting to {}", base_url);

        let response = http
            .post(format!("{base_url}/v4/auth"))
            .json(&AuthRequest {
                client_id: &credentials.client_id,
                client_secret: &credentials.client_secret,
                kind,
            })
            .send()
            .await?;
        let auth: AuthResponse = Self::read_json(response).await?;

        Ok(Arc::new(Session {
            http,
            base_url,
            token: auth.access_token,
            long_poll_timeout: config.long_poll_timeout(),
            op_lock: Mutex::new(()),
        }))
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body);
        self.dispatch(path, request).await
    }

    /// POST whose response body is irrelevant (ingest, archive).
    pub(crate) async fn post_empty<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let request = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body);
        self.dispatch_empty(path, request).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let request = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .query(query);
        self.dispatch(path, request).await
    }

    /// Long-poll GET used by stream sessions. Blocks until the service has
    /// an event available, so it overrides the one-shot request timeout.
    pub(crate) async fn pull_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .timeout(self.long_poll_timeout);
        self.dispatch(path, request).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let request = self.http.delete(self.url(path)).bearer_auth(&self.token);
        self.dispatch_empty(path, request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn dispatch<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let _guard = self.op_lock.lock().await;
        trace!(target: "matchbook", "request: {path}");
        let response = request.send().await?;
        Self::read_json(response).await
    }

    async fn dispatch_empty(&self, path: &str, request: RequestBuilder) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        trace!(target: "matchbook", "request: {path}");
        let response = request.send().await?;
        let status = response.status();
        debug!(target: "matchbook", "response status: {status}");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_from_response(status, body));
        }
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        debug!(target: "matchbook", "response status: {status}");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_from_response(status, body));
        }

        let body = response.text().await?;
        trace!(target: "matchbook", "response body: {body}");
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// A failed response carries a `{code, message}` body when the service
    /// produced the failure itself; otherwise fall back to the HTTP status.
    fn error_from_response(status: reqwest::StatusCode, body: String) -> ClientError {
        if let Ok(remote) = serde_json::from_str::<RemoteStatus>(&body) {
            return ClientError::Status(remote);
        }
        let code = match status.as_u16() {
            400 => StatusCode::InvalidInput,
            401 => StatusCode::Unauthenticated,
            403 => StatusCode::PermissionDenied,
            404 => StatusCode::NotFound,
            408 | 504 => StatusCode::DeadlineExceeded,
            _ => StatusCode::InternalError,
        };
        let message = if body.is_empty() {
            status.to_string()
        } else {
            body
        };
        ClientError::Status(RemoteStatus::new(code, message))
    }
}

/// Builder shared by every client variant: credentials plus optional
/// configuration and a pluggable extraction engine.
pub struct ClientBuilder {
    credentials: ClientCredentials,
    config: ClientConfig,
    engine: Arc<dyn FingerprintEngine>,
}

impl ClientBuilder {
    pub fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            config: ClientConfig::default(),
            engine: Arc::new(DigestEngine::new()),
        }
    }

    /// Replace the whole configuration, e.g. one produced by
    /// [`ClientConfig::load`](crate::ClientConfig::load).
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a custom service endpoint (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs();
        self
    }

    /// Plug in a real codec-backed extraction engine. Defaults to the
    /// deterministic [`DigestEngine`].
    pub fn engine(mut self, engine: Arc<dyn FingerprintEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub(crate) async fn connect(
        self,
        kind: SessionKind,
    ) -> Result<(Arc<Session>, Arc<dyn FingerprintEngine>)> {
        let session = Session::connect(kind, &self.credentials, &self.config).await?;
        Ok((session, self.engine))
    }
}
