//! Platform seams.
//!
//! The controller and effects never touch a real page. A host (browser binding,
//! terminal, test double) implements these traits and forwards its events to the
//! handler methods. Deferred work is handed back to the host as [`DeferredTask`]
//! values; the host calls the matching `run_deferred` once the delay has elapsed.

use std::time::Duration;

use inquiry_types::FormFields;

use crate::dom;

/// Which contact form input an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    FullName,
    Email,
    Phone,
}

impl FieldId {
    #[must_use]
    pub fn element_id(&self) -> &'static str {
        match self {
            FieldId::FullName => dom::FULL_NAME_ID,
            FieldId::Email => dom::EMAIL_ID,
            FieldId::Phone => dom::PHONE_ID,
        }
    }

    #[must_use]
    pub fn all() -> &'static [FieldId] {
        &[FieldId::FullName, FieldId::Email, FieldId::Phone]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// Class list applied to the message element.
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self {
            MessageKind::Success => "form-message success",
            MessageKind::Error => "form-message error",
        }
    }
}

/// Inline style properties the handlers set. An empty value clears the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProp {
    BorderColor,
    Animation,
    Transform,
    Opacity,
    Transition,
}

/// Work to run after a delay (`setTimeout` in a browser host).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Hide the message shown under `generation`; stale generations are ignored.
    HideMessage { generation: u64 },
    /// Drop the typing hint from a field's wrapper.
    EndTyping(FieldId),
    /// Restore a field's transform after an Enter press.
    EndPress(FieldId),
}

/// The contact form as the controller sees it.
pub trait FormSurface {
    /// Stop the browser from navigating away on submit.
    fn prevent_default(&mut self);

    fn read_fields(&self) -> FormFields;
    fn reset_fields(&mut self);

    fn show_message(&mut self, kind: MessageKind, text: &str);
    fn hide_message(&mut self);
    fn scroll_message_into_view(&mut self);

    /// Disable the submit control and swap its label.
    fn disable_submit(&mut self, label: &str);
    /// Re-enable the submit control with its original label.
    fn restore_submit(&mut self);

    fn field_value(&self, field: FieldId) -> String;
    fn field_style(&self, field: FieldId, prop: StyleProp) -> String;
    fn set_field_style(&mut self, field: FieldId, prop: StyleProp, value: &str);
    /// Toggle a class on the element wrapping the field.
    fn set_wrapper_class(&mut self, field: FieldId, class: &str, on: bool);

    fn schedule(&mut self, delay: Duration, task: DeferredTask);
}

/// Elements the page effects address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    Navbar,
    NavToggle,
    NavMenu,
    /// Navigation link, identified by its `href`.
    NavLink(String),
    /// Element registered for fade-in, identified by host-assigned id.
    Animated(u32),
    PropertyCard(u32),
}

/// Vertical geometry in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub bounds: Bounds,
}

/// The page around the form: navigation, scrolling, animated blocks.
pub trait PageSurface {
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;

    /// `section[id]` elements in document order.
    fn sections(&self) -> Vec<Section>;
    /// `href` of every navigation link.
    fn nav_links(&self) -> Vec<String>;
    /// Elements registered for fade-in and their current geometry.
    fn animated_elements(&self) -> Vec<(u32, Bounds)>;
    /// Top of the element an in-page anchor points at, if it exists.
    fn anchor_target_top(&self, fragment: &str) -> Option<f64>;

    fn has_class(&self, element: &Element, class: &str) -> bool;
    fn set_class(&mut self, element: &Element, class: &str, on: bool);
    fn set_style(&mut self, element: &Element, prop: StyleProp, value: &str);

    fn smooth_scroll_to(&mut self, top: f64);
    fn prevent_default(&mut self);
}
