//! Transactional email provider clients.
//!
//! # Architecture
//!
//! - [`EmailProvider`] - The seam the dispatcher talks to: one `send` call per inquiry
//! - [`emailjs`] - EmailJS REST client (`POST /api/v1.0/email/send`)
//!
//! Providers are opaque collaborators: a single request/response call, no retries,
//! no streaming. The caller decides what to do with a failure.
//!
//! # Error Handling
//!
//! Non-2xx responses surface as [`ProviderError::Http`] carrying the status code and
//! the (capped) response body, so callers can classify rejections by status.
//! Transport failures (DNS, TLS, connect) surface as [`ProviderError::Transport`].

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

pub use inquiry_types;
use inquiry_types::TemplateParams;

pub mod emailjs;
pub use emailjs::EmailJs;

/// Canonical EmailJS REST API origin.
pub const EMAILJS_API_BASE_URL: &str = "https://api.emailjs.com";

const CONNECT_TIMEOUT_SECS: u64 = 30;

// Connection pool settings (httpx defaults)
const POOL_MAX_IDLE_PER_HOST: usize = 100;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// What the provider answered when it accepted a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub status: u16,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("provider rejected the request with status {status}: {text}")]
    Http { status: u16, text: String },
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API origin is not HTTPS; the hardened client would refuse every send.
    #[error("provider origin must use https: {url}")]
    InsecureOrigin { url: String },
}

impl ProviderError {
    /// HTTP status of the rejection, if the provider answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Http { status, .. } => Some(*status),
            ProviderError::Transport(e) => e.status().map(|s| s.as_u16()),
            ProviderError::InsecureOrigin { .. } => None,
        }
    }

    /// Response body text, if any was returned.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            ProviderError::Http { text, .. } if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }
}

/// An external transactional email service.
///
/// `send` resolves once the provider has accepted or rejected the message. The
/// returned future must be `Send` so hosts can drive it from a multi-threaded runtime.
pub trait EmailProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> impl Future<Output = Result<ProviderResponse, ProviderError>> + Send;
}

fn base_client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .https_only(true)
        .user_agent(concat!("inquiry/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
}

/// Hardened HTTPS-only client.
///
/// Only the connect phase is bounded unless `request_timeout` is given; a slow
/// provider otherwise keeps the send pending.
pub fn http_client(request_timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = base_client_builder();
    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

pub async fn read_capped_error_body(response: reqwest::Response) -> String {
    use futures_util::StreamExt;
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else { break };
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            let text = String::from_utf8_lossy(&body);
            return format!("{text}...(truncated)");
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}
