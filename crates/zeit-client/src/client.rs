//! Main client implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use zeit_auth::{HttpTokenRefresher, SessionStore, TokenRefresher};
use zeit_notify::{NotificationCenter, Notifier};

use crate::api::{AbsencesApi, DiagnosticsApi, TimeEntriesApi, UserApi};
use crate::error::{validation_message, ApiError, Result};
use crate::request::RequestDescriptor;

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long pipeline notices stay on screen.
const NOTICE_DURATION_MS: u64 = 5_000;

/// Zeiterfassung API client.
///
/// Provides typed access to the backend and runs every request through the
/// authenticated pipeline: token lookup, header merge, status classification,
/// a single refresh-and-reissue on 401/403, and notifier reporting.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use zeit_auth::InMemorySessionStore;
/// use zeit_client::ZeitClient;
///
/// # async fn example() -> zeit_client::Result<()> {
/// let client = ZeitClient::builder()
///     .base_url("http://localhost:8000")
///     .session_store(Arc::new(InMemorySessionStore::with_token("secret")))
///     .build()?;
///
/// let user = client.user().me().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ZeitClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests.
    pub(crate) base_url: Url,
    /// Request timeout.
    pub(crate) timeout: Duration,
    /// Session token storage.
    pub(crate) session: Arc<dyn SessionStore>,
    /// Refresh collaborator for 401/403 recovery.
    pub(crate) refresher: Arc<dyn TokenRefresher>,
    /// Where non-success outcomes are reported.
    pub(crate) notifier: Arc<dyn Notifier>,
}

impl ZeitClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The session store this client reads its token from.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.inner.session
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the current-user API.
    pub fn user(&self) -> UserApi {
        UserApi::new(self.clone())
    }

    /// Access the time entries API.
    pub fn time_entries(&self) -> TimeEntriesApi {
        TimeEntriesApi::new(self.clone())
    }

    /// Access the absences API.
    pub fn absences(&self) -> AbsencesApi {
        AbsencesApi::new(self.clone())
    }

    /// Access the endpoint diagnostics API.
    pub fn diagnostics(&self) -> DiagnosticsApi {
        DiagnosticsApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request pipeline
    // ─────────────────────────────────────────────────────────────────────────

    /// Run one request through the pipeline and classify the outcome.
    ///
    /// Every outcome other than success is reported to the notifier exactly
    /// once before it is returned.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let outcome = self.run_pipeline(descriptor).await;
        if let Err(err) = &outcome {
            self.report(err);
        }
        outcome
    }

    async fn run_pipeline(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let Some(token) = self.inner.session.token().await else {
            tracing::debug!("no session token, request not issued");
            return Err(ApiError::AuthExpired);
        };

        let response = self.send_once(descriptor, &token).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            if let Err(e) = self.inner.session.clear().await {
                tracing::warn!("failed to clear rejected token: {e}");
            }

            let fresh = match self.inner.refresher.refresh(&token).await {
                Ok(fresh) => fresh,
                Err(e) => {
                    tracing::warn!("token refresh failed: {e}");
                    return Err(ApiError::AuthExpired);
                }
            };
            if let Err(e) = self.inner.session.save(&fresh).await {
                tracing::warn!("failed to persist refreshed token: {e}");
            }

            // Re-read the store instead of trusting the local copy; a refresh
            // triggered by a concurrent request may have won the race.
            let token = self.inner.session.token().await.unwrap_or(fresh);
            let retry = self.send_once(descriptor, &token).await?;

            // The reissued outcome is final: another 401 means the session is
            // gone for good, a 403 means the fresh token lacks permission.
            if retry.status() == StatusCode::UNAUTHORIZED {
                if let Err(e) = self.inner.session.clear().await {
                    tracing::warn!("failed to clear rejected token: {e}");
                }
                return Err(ApiError::AuthExpired);
            }
            return self.classify(retry, descriptor.method()).await;
        }

        self.classify(response, descriptor.method()).await
    }

    /// Issue the request once with the given bearer token.
    async fn send_once(
        &self,
        descriptor: &RequestDescriptor,
        token: &str,
    ) -> Result<reqwest::Response> {
        let url = self.url(descriptor.path())?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ApiError::Config("session token contains characters invalid in a header".to_string())
        })?;
        headers.insert(AUTHORIZATION, bearer);
        // Caller-supplied headers win on conflict.
        for (name, value) in descriptor.headers() {
            headers.insert(name.clone(), value.clone());
        }

        let mut request = self
            .inner
            .http
            .request(descriptor.method().clone(), url.clone())
            .headers(headers)
            .timeout(self.inner.timeout);
        if let Some(body) = descriptor.body() {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::debug!(
            url = %url,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        Ok(response)
    }

    /// Map a received response to its outcome.
    async fn classify(&self, response: reqwest::Response, method: &Method) -> Result<Value> {
        let status = response.status();

        // DELETE endpoints signal completion with 204 and no body.
        if *method == Method::DELETE && status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            return serde_json::from_str(&text)
                .map_err(|e| ApiError::MalformedResponse(e.to_string()));
        }

        let status_text = status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string();

        Err(match status.as_u16() {
            401 => ApiError::AuthExpired,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            422 => {
                let body = response.json::<Value>().await.ok();
                ApiError::Validation(validation_message(body.as_ref()))
            }
            code => ApiError::Server {
                status: code,
                message: status_text,
            },
        })
    }

    fn report(&self, err: &ApiError) {
        self.inner
            .notifier
            .notify(&err.user_message(), err.severity(), NOTICE_DURATION_MS);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner
            .base_url
            .join(&format!("api/{}", path))
            .map_err(ApiError::from)
    }

    /// Make a GET request and decode the payload.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.execute(&RequestDescriptor::get(path)).await?;
        self.decode(value)
    }

    /// Make a POST request and decode the payload.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Config(format!("failed to encode request body: {e}")))?;
        let value = self.execute(&RequestDescriptor::post(path, body)).await?;
        self.decode(value)
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.execute(&RequestDescriptor::delete(path)).await?;
        Ok(())
    }

    /// Decode a classified payload into the caller's type.
    fn decode<T: serde::de::DeserializeOwned>(&self, value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|e| {
            let err = ApiError::MalformedResponse(e.to_string());
            self.report(&err);
            err
        })
    }
}

/// Builder for creating a ZeitClient.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    session: Option<Arc<dyn SessionStore>>,
    refresher: Option<Arc<dyn TokenRefresher>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL for the backend.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the session store. Required.
    pub fn session_store(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the refresh collaborator. Defaults to [`HttpTokenRefresher`]
    /// against the backend's refresh route.
    pub fn refresher(mut self, refresher: Arc<dyn TokenRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Set the notifier. Defaults to a fresh [`NotificationCenter`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ZeitClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let session = self
            .session
            .ok_or_else(|| ApiError::Config("session store is required".to_string()))?;

        let refresher = match self.refresher {
            Some(refresher) => refresher,
            None => Arc::new(HttpTokenRefresher::new(base_url.join("api/auth/refresh")?)),
        };

        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(NotificationCenter::new()));

        let http = reqwest::Client::builder()
            .user_agent(format!("zeit-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(ZeitClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
                session,
                refresher,
                notifier,
            }),
        })
    }
}
