//! Classification of failed sends into visitor-facing messages.

use std::fmt;

use crate::dispatch::DispatchError;

/// Why a send failed, in terms the form can explain to a visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    NotConfigured,
    ProviderUnavailable,
    /// 400
    BadRequest,
    /// 401
    AuthenticationFailed,
    /// 404
    NotFound,
    /// 429
    RateLimited,
    /// 500
    ServerError,
    /// Anything else: unrecognised status or no response at all.
    Other {
        status: Option<u16>,
        text: Option<String>,
    },
}

impl FailureKind {
    #[must_use]
    pub fn classify(err: &DispatchError) -> Self {
        match err {
            DispatchError::NotConfigured { .. } => FailureKind::NotConfigured,
            DispatchError::ProviderUnavailable => FailureKind::ProviderUnavailable,
            DispatchError::Provider(provider_err) => match provider_err.status() {
                Some(400) => FailureKind::BadRequest,
                Some(401) => FailureKind::AuthenticationFailed,
                Some(404) => FailureKind::NotFound,
                Some(429) => FailureKind::RateLimited,
                Some(500) => FailureKind::ServerError,
                status => FailureKind::Other {
                    status,
                    text: provider_err.text().map(str::to_string),
                },
            },
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FailureKind::NotConfigured => {
                "Email delivery is not configured. Please set the service and template IDs."
                    .to_string()
            }
            FailureKind::ProviderUnavailable => {
                "The email service is not available. Please check your internet connection."
                    .to_string()
            }
            FailureKind::BadRequest => "Sorry, your message could not be sent because the \
                                        request was invalid. Please check your details and try again."
                .to_string(),
            FailureKind::AuthenticationFailed => "Sorry, email service authentication failed. \
                                                  Please try again later or contact us directly."
                .to_string(),
            FailureKind::NotFound => "Sorry, the email service or template could not be found. \
                                      Please contact us directly."
                .to_string(),
            FailureKind::RateLimited => {
                "Too many requests have been sent. Please wait a moment and try again.".to_string()
            }
            FailureKind::ServerError => {
                "The email service is temporarily unavailable. Please try again later.".to_string()
            }
            FailureKind::Other { status, text } => {
                let mut msg = String::from("Sorry, there was an error sending your message. ");
                if let Some(text) = text {
                    msg.push_str(text);
                    msg.push(' ');
                } else if let Some(status) = status {
                    msg.push_str(&format!("Error code: {status}. "));
                }
                msg.push_str("Please try again or contact us directly.");
                msg
            }
        }
    }
}

impl From<&DispatchError> for FailureKind {
    fn from(err: &DispatchError) -> Self {
        Self::classify(err)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}
