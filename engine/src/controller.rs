//! Contact form controller.
//!
//! # State machine
//!
//! ```text
//! Idle --submit--> (validate) --invalid--> Invalid --input--> Idle
//!                      |
//!                      +--valid--> Sending --ok----> Success --hide--> Idle
//!                                          +--err---> Failed  --submit--> ...
//! ```
//!
//! Validation is synchronous inside [`FormController::begin_submit`]. The only
//! suspension point is the provider call. Hosts that want to keep handling
//! events while it is in flight use the split form:
//!
//! ```text
//! begin_submit() -> SubmitStart::Ready(inquiry)
//! dispatcher.dispatch(&inquiry).await        (controller free for other events)
//! complete_submit(result)
//! ```
//!
//! A second submit while `Sending` is refused with [`SubmitOutcome::Busy`], the
//! same effect as the disabled submit button. The in-flight send is never cancelled.

use std::time::Duration;

use inquiry_providers::{EmailProvider, ProviderResponse};
use inquiry_types::{Inquiry, PurposeOptions, ValidationError, validate_form};

use crate::dispatch::{DispatchError, Dispatcher};
use crate::dom;
use crate::failure::FailureKind;
use crate::feedback;
use crate::platform::{DeferredTask, FieldId, FormSurface, MessageKind};

pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your request has been submitted successfully. We will contact you soon.";

const DEFAULT_SUCCESS_HIDE_AFTER: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Invalid(ValidationError),
    Sending,
    Success,
    Failed(FailureKind),
}

/// First half of a submit: either a validated inquiry ready to send, or the
/// reason nothing will be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    Ready(Inquiry),
    Invalid(ValidationError),
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent(ProviderResponse),
    Invalid(ValidationError),
    Failed(FailureKind),
    Busy,
}

#[derive(Debug)]
pub struct FormController<P> {
    dispatcher: Dispatcher<P>,
    purposes: PurposeOptions,
    success_hide_after: Duration,
    state: FormState,
    message_generation: u64,
}

impl<P: EmailProvider> FormController<P> {
    #[must_use]
    pub fn new(dispatcher: Dispatcher<P>, purposes: PurposeOptions) -> Self {
        Self {
            dispatcher,
            purposes,
            success_hide_after: DEFAULT_SUCCESS_HIDE_AFTER,
            state: FormState::Idle,
            message_generation: 0,
        }
    }

    #[must_use]
    pub fn with_success_hide_after(mut self, delay: Duration) -> Self {
        self.success_hide_after = delay;
        self
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher<P> {
        &self.dispatcher
    }

    #[must_use]
    pub fn purposes(&self) -> &PurposeOptions {
        &self.purposes
    }

    /// Full submit: validate, send, render the result.
    pub async fn submit<S: FormSurface>(&mut self, surface: &mut S) -> SubmitOutcome {
        match self.begin_submit(surface) {
            SubmitStart::Busy => SubmitOutcome::Busy,
            SubmitStart::Invalid(err) => SubmitOutcome::Invalid(err),
            SubmitStart::Ready(inquiry) => {
                let result = self.dispatcher.dispatch(&inquiry).await;
                self.complete_submit(result, surface)
            }
        }
    }

    pub fn begin_submit<S: FormSurface>(&mut self, surface: &mut S) -> SubmitStart {
        surface.prevent_default();

        if self.state == FormState::Sending {
            tracing::debug!("Submit ignored while a send is in flight");
            return SubmitStart::Busy;
        }

        self.clear_message(surface);

        let fields = surface.read_fields();
        match validate_form(&fields, &self.purposes) {
            Ok(inquiry) => {
                surface.disable_submit(dom::SENDING_LABEL);
                self.state = FormState::Sending;
                SubmitStart::Ready(inquiry)
            }
            Err(err) => {
                tracing::debug!(error = %err, "Contact form rejected");
                self.show_message(surface, MessageKind::Error, &err.to_string());
                surface.scroll_message_into_view();
                self.state = FormState::Invalid(err.clone());
                SubmitStart::Invalid(err)
            }
        }
    }

    pub fn complete_submit<S: FormSurface>(
        &mut self,
        result: Result<ProviderResponse, DispatchError>,
        surface: &mut S,
    ) -> SubmitOutcome {
        match result {
            Ok(response) => {
                tracing::info!(
                    status = response.status,
                    text = %response.text,
                    "Inquiry sent"
                );
                let generation =
                    self.show_message(surface, MessageKind::Success, SUCCESS_MESSAGE);
                surface.reset_fields();
                surface.restore_submit();
                surface.scroll_message_into_view();
                surface.schedule(
                    self.success_hide_after,
                    DeferredTask::HideMessage { generation },
                );
                self.state = FormState::Success;
                SubmitOutcome::Sent(response)
            }
            Err(err) => {
                tracing::error!(error = %err, "Inquiry send failed");
                let kind = FailureKind::classify(&err);
                self.show_message(surface, MessageKind::Error, &kind.user_message());
                surface.restore_submit();
                surface.scroll_message_into_view();
                self.state = FormState::Failed(kind.clone());
                SubmitOutcome::Failed(kind)
            }
        }
    }

    /// A field changed. Clears a validation error state and runs the field's
    /// cosmetic input feedback.
    pub fn on_input<S: FormSurface>(&mut self, surface: &mut S, field: FieldId) {
        if matches!(self.state, FormState::Invalid(_)) {
            self.state = FormState::Idle;
        }
        feedback::on_input(surface, field);
    }

    pub fn run_deferred<S: FormSurface>(&mut self, surface: &mut S, task: DeferredTask) {
        match task {
            DeferredTask::HideMessage { generation } => {
                if generation != self.message_generation {
                    return;
                }
                surface.hide_message();
                if self.state == FormState::Success {
                    self.state = FormState::Idle;
                }
            }
            DeferredTask::EndTyping(_) | DeferredTask::EndPress(_) => {
                feedback::run_deferred(surface, task);
            }
        }
    }

    fn clear_message<S: FormSurface>(&mut self, surface: &mut S) {
        // Any pending auto-hide now refers to a message that is gone.
        self.message_generation = self.message_generation.wrapping_add(1);
        surface.hide_message();
    }

    fn show_message<S: FormSurface>(
        &mut self,
        surface: &mut S,
        kind: MessageKind,
        text: &str,
    ) -> u64 {
        self.message_generation = self.message_generation.wrapping_add(1);
        surface.show_message(kind, text);
        self.message_generation
    }
}
