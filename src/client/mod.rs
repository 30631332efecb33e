//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tracing::Instrument;
use url::Url;

use crate::config::{Config, ConfigError, DEFAULT_BASE_URL};
use crate::domain::{
    AccessToken, ApiVersion, IdempotencyKey, Page, Pagination, SpaceId, ValidationError,
};
use crate::transport::{Outcome, TransportError};

mod checkout_sessions;
#[cfg(test)]
mod fake;
mod financial_accounts;

pub use checkout_sessions::CheckoutSessions;
pub use financial_accounts::FinancialAccounts;

const AUTHORIZATION_HEADER: &str = "Authorization";
const SPACE_ID_HEADER: &str = "Monime-Space-Id";
const VERSION_HEADER: &str = "Monime-Version";
const DEFAULT_USER_AGENT: &str = concat!("monime-rust/", env!("CARGO_PKG_VERSION"));

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: Method,
    url: Url,
    headers: Vec<(&'static str, String)>,
    body: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, request.url);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Credentials for Monime API calls: an access token scoped to one space.
pub struct Auth {
    access_token: AccessToken,
    space_id: SpaceId,
}

impl Auth {
    /// Validate that both the token and the space id are non-empty after trimming.
    pub fn new(
        access_token: impl Into<String>,
        space_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            access_token: AccessToken::new(access_token)?,
            space_id: SpaceId::new(space_id)?,
        })
    }

    pub fn space_id(&self) -> &SpaceId {
        &self.space_id
    }

    fn push_headers(&self, headers: &mut Vec<(&'static str, String)>) {
        headers.push((
            AUTHORIZATION_HEADER,
            format!("Bearer {}", self.access_token.as_str()),
        ));
        headers.push((SPACE_ID_HEADER, self.space_id.as_str().to_owned()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Coarse classification of HTTP failures.
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    ServerError,
    Other,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500..=599 => Self::ServerError,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MonimeClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - API-level failures (`success: false` in a 2xx envelope),
/// - validation/parse failures.
pub enum MonimeError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    HttpStatus {
        status: u16,
        message: Option<String>,
        body: Option<String>,
    },

    /// The server answered 2xx but reported `success: false`.
    #[error("API error: {}", .messages.join(", "))]
    Api { messages: Vec<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),

    /// A successful envelope arrived without a `result`.
    #[error("response is missing a result")]
    MissingResult,

    #[error("invalid base URL: {input}")]
    InvalidBaseUrl { input: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl MonimeError {
    /// Classification of an [`MonimeError::HttpStatus`]; `None` for every other variant.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::HttpStatus { status, .. } => Some(ErrorKind::from_status(*status)),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`MonimeClient`].
///
/// Use this when you need to customize the base URL, API version, timeout, or user-agent.
pub struct MonimeClientBuilder {
    auth: Auth,
    base_url: String,
    api_version: Option<ApiVersion>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MonimeClientBuilder {
    /// Create a builder with the production base URL and no version/timeout override.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API root, for example a sandbox or a local mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Pin the API version sent as `Monime-Version`.
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`MonimeClient`].
    pub fn build(self) -> Result<MonimeClient, MonimeError> {
        parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder().user_agent(
            self.user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
        );
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|err| MonimeError::Transport(Box::new(err)))?;

        Ok(MonimeClient {
            auth: self.auth,
            base_url: self.base_url,
            api_version: self.api_version,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Monime client.
///
/// Resources hang off it: [`MonimeClient::financial_accounts`] and
/// [`MonimeClient::checkout_sessions`]. Every call sends `Authorization: Bearer <token>`
/// and `Monime-Space-Id`, plus `Monime-Version` when one is configured.
pub struct MonimeClient {
    auth: Auth,
    base_url: String,
    api_version: Option<ApiVersion>,
    http: Arc<dyn HttpTransport>,
}

impl MonimeClient {
    /// Create a client against the production API.
    ///
    /// For more customization, use [`MonimeClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: None,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> MonimeClientBuilder {
        MonimeClientBuilder::new(auth)
    }

    /// Build a client from a [`Config`] (for example [`Config::from_env`]).
    pub fn from_config(config: &Config) -> Result<Self, MonimeError> {
        let auth = Auth::new(config.access_token.as_str(), config.space_id.as_str())?;
        let mut builder = Self::builder(auth).base_url(config.base_url.as_str());
        if let Some(version) = config.api_version.as_deref() {
            builder = builder.api_version(ApiVersion::new(version)?);
        }
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Financial accounts: create, get, list, update, delete.
    pub fn financial_accounts(&self) -> FinancialAccounts<'_> {
        FinancialAccounts::new(self)
    }

    /// Checkout sessions: create, get, list, delete.
    pub fn checkout_sessions(&self) -> CheckoutSessions<'_> {
        CheckoutSessions::new(self)
    }

    fn endpoint(&self, segments: &[&str], query: &[(String, String)]) -> Result<Url, MonimeError> {
        let mut url = parse_base_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| MonimeError::InvalidBaseUrl {
                input: self.base_url.clone(),
            })?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Send one API call and return the raw 2xx body.
    async fn execute(&self, call: ApiCall<'_>) -> Result<String, MonimeError> {
        let url = self.endpoint(&call.segments, &call.query)?;
        let span = tracing::info_span!("monime.http", method = %call.method, path = %url.path());

        async move {
            let mut headers = vec![
                ("Content-Type", "application/json".to_owned()),
                ("Accept", "application/json".to_owned()),
            ];
            self.auth.push_headers(&mut headers);
            if let Some(version) = self.api_version.as_ref() {
                headers.push((VERSION_HEADER, version.as_str().to_owned()));
            }
            if let Some(key) = call.idempotency_key.as_ref() {
                headers.push((IdempotencyKey::HEADER, key.as_str().to_owned()));
            }

            tracing::debug!(
                idempotency_key = call.idempotency_key.as_ref().map(IdempotencyKey::as_str),
                "starting HTTP request"
            );

            let response = self
                .http
                .send(HttpRequest {
                    method: call.method,
                    url,
                    headers,
                    body: call.body,
                })
                .await
                .map_err(|err| {
                    tracing::error!(error = %err, "HTTP request failed");
                    MonimeError::Transport(err)
                })?;

            if !(200..=299).contains(&response.status) {
                let message = crate::transport::decode_error_message(&response.body);
                tracing::warn!(
                    status = response.status,
                    error_message = message.as_deref(),
                    "HTTP response error"
                );
                let body = if response.body.trim().is_empty() {
                    None
                } else {
                    Some(response.body)
                };
                return Err(MonimeError::HttpStatus {
                    status: response.status,
                    message,
                    body,
                });
            }

            tracing::debug!(status = response.status, "completed HTTP request");
            Ok(response.body)
        }
        .instrument(span)
        .await
    }
}

fn parse_base_url(input: &str) -> Result<Url, MonimeError> {
    let invalid = || MonimeError::InvalidBaseUrl {
        input: input.to_owned(),
    };
    let url = Url::parse(input.trim()).map_err(|_| invalid())?;
    if url.cannot_be_a_base() {
        return Err(invalid());
    }
    Ok(url)
}

/// One request against the API, relative to the base URL.
#[derive(Debug)]
struct ApiCall<'a> {
    method: Method,
    segments: Vec<&'a str>,
    query: Vec<(String, String)>,
    body: Option<String>,
    idempotency_key: Option<IdempotencyKey>,
}

impl<'a> ApiCall<'a> {
    fn new(method: Method, segments: Vec<&'a str>) -> Self {
        Self {
            method,
            segments,
            query: Vec::new(),
            body: None,
            idempotency_key: None,
        }
    }

    fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    fn json(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    fn idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }
}

fn encode_error(err: TransportError) -> MonimeError {
    tracing::error!(error = %err, "failed to encode request body");
    MonimeError::Encode(Box::new(err))
}

fn parse_error(err: TransportError) -> MonimeError {
    tracing::error!(error = %err, "failed to decode response");
    MonimeError::Parse(Box::new(err))
}

/// Unwrap a single-result envelope, mapping `success: false` to [`MonimeError::Api`].
fn into_result<T>(outcome: Outcome<T>) -> Result<T, MonimeError> {
    if !outcome.success {
        return Err(MonimeError::Api {
            messages: outcome.messages,
        });
    }
    outcome.result.ok_or(MonimeError::MissingResult)
}

fn into_page<T>(outcome: Outcome<Vec<T>>) -> Result<Page<T>, MonimeError> {
    if !outcome.success {
        return Err(MonimeError::Api {
            messages: outcome.messages,
        });
    }
    let items = outcome.result.unwrap_or_default();
    let pagination = outcome.pagination.unwrap_or(Pagination {
        count: items.len() as u64,
        next: None,
    });
    Ok(Page {
        items,
        pagination,
        messages: outcome.messages,
    })
}
