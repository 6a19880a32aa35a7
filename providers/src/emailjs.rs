//! EmailJS REST client.
//!
//! Sends a templated email through `POST {base}/api/v1.0/email/send`. The public key
//! travels in the body as `user_id`; the service and template ids pick the mail
//! account and template configured in the EmailJS dashboard. A successful send
//! answers `200 OK` with the plain-text body `OK`.

use std::time::Duration;

use inquiry_types::{PublicKey, TemplateParams};
use serde::Serialize;

use crate::{
    EMAILJS_API_BASE_URL, EmailProvider, ProviderError, ProviderResponse, http_client,
    read_capped_error_body,
};

const SEND_PATH: &str = "/api/v1.0/email/send";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    user_id: &'a str,
    service_id: &'a str,
    template_id: &'a str,
    template_params: &'a TemplateParams,
}

/// EmailJS client bound to one public key.
#[derive(Debug, Clone)]
pub struct EmailJs {
    client: reqwest::Client,
    send_url: String,
    public_key: PublicKey,
}

impl EmailJs {
    /// Initialise against the public EmailJS API.
    pub fn init(public_key: PublicKey) -> Result<Self, ProviderError> {
        Self::init_with(public_key, EMAILJS_API_BASE_URL, None)
    }

    /// Initialise against a custom origin (self-hosted proxy, regional endpoint).
    /// The origin must be `https://`.
    pub fn init_with(
        public_key: PublicKey,
        base_url: &str,
        request_timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        if !base_url.trim_start().to_ascii_lowercase().starts_with("https://") {
            tracing::warn!(base_url, "Refusing non-HTTPS EmailJS origin");
            return Err(ProviderError::InsecureOrigin {
                url: base_url.to_string(),
            });
        }
        let client = http_client(request_timeout)?;
        Ok(Self::with_client(client, base_url, public_key))
    }

    /// Use a caller-supplied HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str, public_key: PublicKey) -> Self {
        Self {
            client,
            send_url: format!("{}{SEND_PATH}", base_url.trim_end_matches('/')),
            public_key,
        }
    }

    #[must_use]
    pub fn send_url(&self) -> &str {
        &self.send_url
    }
}

impl EmailProvider for EmailJs {
    fn name(&self) -> &'static str {
        "emailjs"
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let body = SendRequest {
            user_id: self.public_key.expose_secret(),
            service_id,
            template_id,
            template_params: params,
        };

        tracing::debug!(
            provider = self.name(),
            service_id,
            template_id,
            "Sending email"
        );

        let response = self.client.post(&self.send_url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = read_capped_error_body(response).await;
            tracing::warn!(
                provider = self.name(),
                status = status.as_u16(),
                body = %text,
                "Email send rejected"
            );
            return Err(ProviderError::Http {
                status: status.as_u16(),
                text,
            });
        }

        let text = response.text().await?;
        Ok(ProviderResponse {
            status: status.as_u16(),
            text,
        })
    }
}
