//! Content generation function client.
//!
//! Provides a client for the remote generation function with rate limiting,
//! request validation, and response normalization.
//!
//! ### Contract
//!
//! - **Endpoint**: the configured generation function URL.
//! - **Authentication**: `Authorization: Bearer <key>` header when a key is
//!   configured.
//! - **Rate Limiting**: generation is expensive and the backend throttles;
//!   a minimum interval is enforced between requests.
//! - **Persistence**: a successful bundle is written into the content store
//!   before it is returned, so subsequent cache reads for the key observe a
//!   complete set of fields.
//! - **Normalization**: the function's JSON response is converted into a
//!   `ContentBundle`; responses with empty fields are rejected.

pub mod request;
pub mod response;

pub use request::{GenerateRequest, RequestType};
pub use response::GenerateResponse;

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use async_trait::async_trait;
use localpages_core::config::AppConfig;
use localpages_core::{ContentBundle, ContentField, ContentGenerator, ContentKey, ContentStore, GenerationError};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "localpages/0.1";

/// Minimum interval between generation requests.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

/// Generation client configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Full URL of the generation function.
    pub endpoint: String,
    /// Bearer token, if the function requires one.
    pub api_key: Option<String>,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: localpages/0.x).
    pub user_agent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Build a generator configuration from the application configuration.
    ///
    /// Returns `MissingEndpoint` if no generator URL is configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GenerationError> {
        let endpoint = config
            .require_generator_url()
            .map_err(|_| GenerationError::MissingEndpoint)?
            .to_string();

        Ok(Self {
            endpoint,
            api_key: config.generator_api_key.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Rate limiter to enforce request intervals.
#[derive(Debug)]
struct RateLimiter {
    last_request: Mutex<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(Instant::now().checked_sub(min_interval).unwrap_or_else(Instant::now)),
            min_interval,
        }
    }

    /// Acquire permission to make a request, waiting if necessary.
    async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.min_interval {
            tokio::time::sleep(self.min_interval - elapsed).await;
        }
        *last = Instant::now();
    }
}

/// HTTP client for the content generation function.
#[derive(Clone)]
pub struct HttpGenerator {
    http: reqwest::Client,
    config: GeneratorConfig,
    store: Arc<dyn ContentStore>,
    rate_limiter: Arc<RateLimiter>,
}

impl HttpGenerator {
    /// Create a new generator client with the given configuration.
    ///
    /// `store` receives the persistence side effect of every successful
    /// generation.
    pub fn new(config: GeneratorConfig, store: Arc<dyn ContentStore>) -> Result<Self, GenerationError> {
        if config.endpoint.is_empty() {
            return Err(GenerationError::MissingEndpoint);
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self { http, config, store, rate_limiter: Arc::new(RateLimiter::new(MIN_REQUEST_INTERVAL)) })
    }

    /// Execute one generation request against the remote function.
    ///
    /// This method handles rate limiting, request validation, and response
    /// normalization. It does not touch the content store.
    pub async fn request_bundle(&self, req: &GenerateRequest) -> Result<ContentBundle, GenerationError> {
        req.validate()?;

        self.rate_limiter.acquire().await;

        let start = Instant::now();

        tracing::debug!("requesting generation: key={}/{}", req.location, req.service);

        let mut http_request = self
            .http
            .post(&self.config.endpoint)
            .header("Accept", "application/json")
            .json(req);

        if let Some(api_key) = &self.config.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let http_response = http_request.send().await.map_err(map_transport_error)?;

        let status = http_response.status();
        tracing::debug!("generation function response status: {}", status);

        if status == 401 || status == 403 {
            return Err(GenerationError::AuthError);
        }

        if status == 429 {
            return Err(GenerationError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(GenerationError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await.map_err(map_transport_error)?;
        let api_response: GenerateResponse =
            serde_json::from_slice(&bytes).map_err(|e| GenerationError::Parse(e.to_string()))?;

        let bundle = api_response.into_bundle()?;

        tracing::debug!("generation completed in {:?}", start.elapsed());

        Ok(bundle)
    }

    /// Write every field of a generated bundle into the content store.
    ///
    /// Persistence is best-effort: a store failure is logged and the bundle
    /// is still returned to the caller, it just won't be a cache hit next
    /// time.
    async fn persist(&self, key: &ContentKey, bundle: &ContentBundle) {
        for field in ContentField::ALL {
            if let Err(err) = self.store.put(key, field, bundle.field(field)).await {
                tracing::warn!(key = %key, field = %field, error = %err, "failed to persist generated content");
            }
        }
    }
}

#[async_trait]
impl ContentGenerator for HttpGenerator {
    async fn generate(&self, key: &ContentKey) -> Result<ContentBundle, GenerationError> {
        let req = GenerateRequest::for_key(key);
        let bundle = self.request_bundle(&req).await?;

        self.persist(key, &bundle).await;

        Ok(bundle)
    }
}

fn map_transport_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() { GenerationError::Timeout } else { GenerationError::Network(err.to_string()) }
}
