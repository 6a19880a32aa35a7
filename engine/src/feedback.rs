//! Per-field cosmetic feedback: focus highlight, blur validation, typing hint.
//!
//! None of this gates submission; the controller re-validates everything.

use std::time::Duration;

use inquiry_types::{validate_email, validate_name, validate_phone};

use crate::dom;
use crate::platform::{DeferredTask, FieldId, FormSurface, StyleProp};

pub const TYPING_HINT_DURATION: Duration = Duration::from_millis(300);
pub const PRESS_DURATION: Duration = Duration::from_millis(150);

/// Whether a non-empty value passes the field's check.
#[must_use]
pub fn field_is_valid(field: FieldId, value: &str) -> bool {
    match field {
        FieldId::FullName => validate_name(value),
        FieldId::Email => validate_email(value),
        FieldId::Phone => validate_phone(value),
    }
}

pub fn on_focus<S: FormSurface>(surface: &mut S, field: FieldId) {
    surface.set_wrapper_class(field, dom::INPUT_FOCUSED_CLASS, true);
}

pub fn on_blur<S: FormSurface>(surface: &mut S, field: FieldId) {
    surface.set_wrapper_class(field, dom::INPUT_FOCUSED_CLASS, false);

    let value = surface.field_value(field);
    let value = value.trim();
    if !value.is_empty() && !field_is_valid(field, value) {
        surface.set_field_style(field, StyleProp::BorderColor, dom::ERROR_BORDER_COLOR);
        surface.set_field_style(field, StyleProp::Animation, dom::SHAKE_ANIMATION);
    } else {
        clear_error(surface, field);
    }
}

pub fn on_input<S: FormSurface>(surface: &mut S, field: FieldId) {
    if surface.field_style(field, StyleProp::BorderColor) == dom::ERROR_BORDER_COLOR {
        clear_error(surface, field);
    }
    surface.set_wrapper_class(field, dom::INPUT_TYPING_CLASS, true);
    surface.schedule(TYPING_HINT_DURATION, DeferredTask::EndTyping(field));
}

/// Only Enter reacts; every other key is ignored.
pub fn on_keypress<S: FormSurface>(surface: &mut S, field: FieldId, key: &str) {
    if key != "Enter" {
        return;
    }
    surface.set_field_style(field, StyleProp::Transform, dom::PRESSED_TRANSFORM);
    surface.schedule(PRESS_DURATION, DeferredTask::EndPress(field));
}

pub fn run_deferred<S: FormSurface>(surface: &mut S, task: DeferredTask) {
    match task {
        DeferredTask::EndTyping(field) => {
            surface.set_wrapper_class(field, dom::INPUT_TYPING_CLASS, false);
        }
        DeferredTask::EndPress(field) => {
            surface.set_field_style(field, StyleProp::Transform, "");
        }
        DeferredTask::HideMessage { .. } => {
            tracing::debug!("Message hiding belongs to the form controller");
        }
    }
}

fn clear_error<S: FormSurface>(surface: &mut S, field: FieldId) {
    surface.set_field_style(field, StyleProp::BorderColor, "");
    surface.set_field_style(field, StyleProp::Animation, "");
}
