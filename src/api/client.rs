use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::config::AdminConfig;
use crate::errors::ClientError;

/// Credentials posted to `/api/authenticate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub remember_me: bool,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub id_token: String,
}

/// Error body as the backend sends it. Every field is optional because
/// proxies and older backends send less.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    title: Option<String>,
    detail: Option<String>,
    error: Option<String>,
}

/// Shared HTTP client for the backend. Cloning is cheap and clones share the
/// session token.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        // A trailing slash keeps `join` from dropping the last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|_| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("facility-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                token: RwLock::new(None),
            }),
        })
    }

    pub fn from_config(config: &AdminConfig) -> Result<Self, ClientError> {
        Self::new(&config.api.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an API path such as `api/rooms/3` against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| ClientError::InvalidBaseUrl {
                url: format!("{}{}", self.inner.base_url, path),
            })
    }

    /// Exchange credentials for a bearer token and keep it for later requests.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<(), ClientError> {
        tracing::debug!(username, "Authenticating against backend");
        let resp = self
            .inner
            .http
            .post(self.url("api/authenticate")?)
            .json(&LoginRequest {
                username,
                password,
                remember_me: false,
            })
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let resp = check_status(resp, "account", None).await?;
        let token: TokenResponse = resp.json().await.map_err(|source| ClientError::Decode {
            resource: "account",
            source,
        })?;
        *self.inner.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.id_token);
        tracing::info!(username, "Signed in");
        Ok(())
    }

    pub fn sign_out(&self) {
        *self.inner.token.write().unwrap_or_else(|e| e.into_inner()) = None;
        tracing::info!("Signed out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Start a request to `path`, attaching the bearer token when signed in.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let builder = self.inner.http.request(method, self.url(path)?);
        let token = self
            .inner
            .token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        Ok(match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }
}

/// Map non-success responses onto `ClientError`.
///
/// `id` is the record the request addressed, so a 404 can name it.
pub(crate) async fn check_status(
    resp: Response,
    resource: &'static str,
    id: Option<i64>,
) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => Err(ClientError::NotFound { resource, id }),
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => Err(ClientError::Unauthorized),
        _ => {
            let text = resp.text().await.unwrap_or_default();
            Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(&text, status),
            })
        }
    }
}

fn error_message(body: &str, status: StatusCode) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.detail)
        .or(parsed.title)
        .or(parsed.error)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected status")
                .to_string()
        })
}
