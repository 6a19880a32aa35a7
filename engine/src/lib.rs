//! Contact form engine for Inquiry.
//!
//! Validation, dispatch and page effects with no dependency on a real page.
//! Hosts implement [`FormSurface`] and [`PageSurface`] and forward events to
//! [`FormController`], [`PageEffects`] and the [`feedback`] handlers.

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod dom;
pub mod effects;
pub mod failure;
pub mod feedback;
pub mod platform;


pub use config::{ConfigError, EffectsConfig, EmailJsConfig, FormConfig, InquiryConfig};
pub use controller::{FormController, FormState, SUCCESS_MESSAGE, SubmitOutcome, SubmitStart};
pub use dispatch::{
    Clock, DispatchError, Dispatcher, SystemClock, build_template_params, format_time,
    message_body,
};
pub use effects::PageEffects;
pub use failure::FailureKind;
pub use platform::{
    Bounds, DeferredTask, Element, FieldId, FormSurface, MessageKind, PageSurface, Section,
    StyleProp,
};

pub use inquiry_providers::{self, EmailJs, EmailProvider, ProviderError, ProviderResponse};
pub use inquiry_types::{
    self, DispatchConfig, FormFields, Inquiry, PublicKey, Purpose, PurposeOptions, TemplateParams,
    ValidationError,
};

/// Dispatcher wired to EmailJS with the configured credentials, origin and timeout.
pub fn emailjs_dispatcher(config: &InquiryConfig) -> Result<Dispatcher<EmailJs>, ProviderError> {
    let dispatch_config = config.dispatch_config();
    let provider = EmailJs::init_with(
        dispatch_config.public_key().clone(),
        config.api_base(),
        config.request_timeout(),
    )?;
    Ok(Dispatcher::new(dispatch_config).with_provider(provider))
}

/// Controller for the configured purposes, sending through EmailJS.
pub fn emailjs_controller(
    config: &InquiryConfig,
) -> Result<FormController<EmailJs>, ProviderError> {
    let dispatcher = emailjs_dispatcher(config)?;
    Ok(
        FormController::new(dispatcher, config.form.purposes.clone())
            .with_success_hide_after(config.form.success_hide_after()),
    )
}
