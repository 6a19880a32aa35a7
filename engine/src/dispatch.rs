//! Dispatch wrapper: turns a validated inquiry into one provider call.
//!
//! The wrapper checks that it has usable credentials and a provider, builds the
//! template parameters, and hands the provider's result back untouched. It never
//! retries and never swallows a rejection.

use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;

use inquiry_providers::{EmailProvider, ProviderError, ProviderResponse};
use inquiry_types::{DispatchConfig, Inquiry, TemplateParams};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// `1/2/2026, 3:04:05 PM`
const TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Wall-clock source for the `time` template parameter.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local time of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("email delivery is not configured ({} unset)", .fields.join(", "))]
    NotConfigured { fields: Vec<&'static str> },
    #[error("email provider is not available")]
    ProviderUnavailable,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[must_use]
pub fn format_time(at: NaiveDateTime) -> String {
    at.format(TIME_FORMAT).to_string()
}

#[must_use]
pub fn message_body(inquiry: &Inquiry) -> String {
    format!(
        "Contact Form Details:\n\
         \n\
         {RULE}\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Purpose: {purpose}\n\
         {RULE}\n\
         \n\
         Please respond to this inquiry at your earliest convenience.",
        name = inquiry.full_name(),
        email = inquiry.email(),
        phone = inquiry.phone(),
        purpose = inquiry.purpose().label(),
    )
}

#[must_use]
pub fn build_template_params(inquiry: &Inquiry, at: NaiveDateTime) -> TemplateParams {
    let label = inquiry.purpose().label();
    TemplateParams {
        name: inquiry.full_name().to_string(),
        title: format!("{label} Inquiry from {}", inquiry.full_name()),
        message: message_body(inquiry),
        time: format_time(at),
        email: inquiry.email().to_string(),
        phone: inquiry.phone().to_string(),
        purpose: label.to_string(),
    }
}

/// Sends inquiries through an injected provider with injected credentials.
///
/// Cheap to clone; hosts that keep handling events while a send is in flight
/// clone the dispatcher out of the controller and await it separately.
pub struct Dispatcher<P> {
    config: Arc<DispatchConfig>,
    provider: Option<Arc<P>>,
    clock: Arc<dyn Clock>,
}

impl<P> Clone for Dispatcher<P> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            provider: self.provider.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P> std::fmt::Debug for Dispatcher<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("has_provider", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl<P: EmailProvider> Dispatcher<P> {
    /// A dispatcher with no provider yet; every send fails with
    /// [`DispatchError::ProviderUnavailable`] until one is attached.
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config: Arc::new(config),
            provider: None,
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: P) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    #[must_use]
    pub fn provider(&self) -> Option<&P> {
        self.provider.as_deref()
    }

    #[must_use]
    pub fn template_params(&self, inquiry: &Inquiry) -> TemplateParams {
        build_template_params(inquiry, self.clock.now())
    }

    pub async fn dispatch(&self, inquiry: &Inquiry) -> Result<ProviderResponse, DispatchError> {
        let unconfigured = self.config.unconfigured_fields();
        if !unconfigured.is_empty() {
            tracing::error!(
                fields = ?unconfigured,
                "Email dispatch is not configured"
            );
            return Err(DispatchError::NotConfigured {
                fields: unconfigured,
            });
        }

        let Some(provider) = self.provider.as_deref() else {
            tracing::error!("Email provider is not available");
            return Err(DispatchError::ProviderUnavailable);
        };

        let params = self.template_params(inquiry);
        let response = provider
            .send(self.config.service_id(), self.config.template_id(), &params)
            .await?;
        Ok(response)
    }
}
