//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inquiry_engine::{
    Bounds, DeferredTask, Dispatcher, Element, EmailJs, FieldId, FormFields, FormSurface,
    MessageKind, PageSurface, PublicKey, Section, StyleProp,
};
use inquiry_types::DispatchConfig;

pub const SEND_PATH: &str = "/api/v1.0/email/send";

pub const TEST_PUBLIC_KEY: &str = "uyaKio4T7vNuVoj1w";
pub const TEST_SERVICE_ID: &str = "service_j1rjw37";
pub const TEST_TEMPLATE_ID: &str = "template_s1ldd07";

/// Start a mock server that simulates the EmailJS API
pub async fn start_emailjs_mock() -> MockServer {
    MockServer::start().await
}

/// Mount an EmailJS answer for every send
pub async fn mount_send_response(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

pub fn test_dispatch_config() -> DispatchConfig {
    DispatchConfig::new(
        PublicKey::new(TEST_PUBLIC_KEY),
        TEST_SERVICE_ID,
        TEST_TEMPLATE_ID,
    )
}

/// EmailJS client pointed at the mock server over plain HTTP
pub fn emailjs_for(server: &MockServer) -> EmailJs {
    EmailJs::with_client(
        reqwest::Client::new(),
        &server.uri(),
        PublicKey::new(TEST_PUBLIC_KEY),
    )
}

pub fn dispatcher_for(server: &MockServer) -> Dispatcher<EmailJs> {
    Dispatcher::new(test_dispatch_config()).with_provider(emailjs_for(server))
}

/// Form surface that records everything the controller does to it
#[derive(Debug, Default)]
pub struct RecordingForm {
    pub fields: FormFields,
    pub message: Option<(MessageKind, String)>,
    pub submit_label: Option<String>,
    pub resets: usize,
    pub scheduled: Vec<(Duration, DeferredTask)>,
    pub styles: HashMap<(FieldId, StyleProp), String>,
    pub wrapper_classes: HashSet<(FieldId, String)>,
}

impl RecordingForm {
    pub fn with_fields(name: &str, email: &str, phone: &str, purpose: Option<&str>) -> Self {
        Self {
            fields: FormFields {
                full_name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                purpose: purpose.map(str::to_string),
            },
            ..Self::default()
        }
    }

    pub fn jane(purpose: &str) -> Self {
        Self::with_fields("Jane Doe", "jane@x.com", "555-123-4567", Some(purpose))
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|(_, text)| text.as_str())
    }
}

impl FormSurface for RecordingForm {
    fn prevent_default(&mut self) {}

    fn read_fields(&self) -> FormFields {
        self.fields.clone()
    }

    fn reset_fields(&mut self) {
        self.resets += 1;
        self.fields = FormFields::default();
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        self.message = Some((kind, text.to_string()));
    }

    fn hide_message(&mut self) {
        self.message = None;
    }

    fn scroll_message_into_view(&mut self) {}

    fn disable_submit(&mut self, label: &str) {
        self.submit_label = Some(label.to_string());
    }

    fn restore_submit(&mut self) {
        self.submit_label = None;
    }

    fn field_value(&self, field: FieldId) -> String {
        match field {
            FieldId::FullName => self.fields.full_name.clone(),
            FieldId::Email => self.fields.email.clone(),
            FieldId::Phone => self.fields.phone.clone(),
        }
    }

    fn field_style(&self, field: FieldId, prop: StyleProp) -> String {
        self.styles.get(&(field, prop)).cloned().unwrap_or_default()
    }

    fn set_field_style(&mut self, field: FieldId, prop: StyleProp, value: &str) {
        if value.is_empty() {
            self.styles.remove(&(field, prop));
        } else {
            self.styles.insert((field, prop), value.to_string());
        }
    }

    fn set_wrapper_class(&mut self, field: FieldId, class: &str, on: bool) {
        if on {
            self.wrapper_classes.insert((field, class.to_string()));
        } else {
            self.wrapper_classes.remove(&(field, class.to_string()));
        }
    }

    fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        self.scheduled.push((delay, task));
    }
}

/// A one-page site: hero, listings, contact, with a nav link per section
#[derive(Debug, Default)]
pub struct SitePage {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub sections: Vec<Section>,
    pub links: Vec<String>,
    pub animated: Vec<(u32, Bounds)>,
    pub classes: HashSet<(Element, String)>,
    pub styles: HashMap<(Element, StyleProp), String>,
    pub scrolled_to: Vec<f64>,
}

impl SitePage {
    pub fn new() -> Self {
        let section = |id: &str, top: f64| Section {
            id: id.to_string(),
            bounds: Bounds { top, height: 800.0 },
        };
        Self {
            viewport_height: 900.0,
            sections: vec![
                section("home", 0.0),
                section("properties", 800.0),
                section("about", 1600.0),
                section("contact", 2400.0),
            ],
            links: ["#home", "#properties", "#about", "#contact"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            animated: vec![
                (1, Bounds { top: 900.0, height: 300.0 }),
                (2, Bounds { top: 2500.0, height: 500.0 }),
            ],
            ..Self::default()
        }
    }

    pub fn active_links(&self) -> Vec<&str> {
        self.links
            .iter()
            .filter(|href| {
                self.classes
                    .contains(&(Element::NavLink((*href).clone()), "active".to_string()))
            })
            .map(String::as_str)
            .collect()
    }

    pub fn style(&self, element: Element, prop: StyleProp) -> Option<&str> {
        self.styles.get(&(element, prop)).map(String::as_str)
    }
}

impl PageSurface for SitePage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn sections(&self) -> Vec<Section> {
        self.sections.clone()
    }

    fn nav_links(&self) -> Vec<String> {
        self.links.clone()
    }

    fn animated_elements(&self) -> Vec<(u32, Bounds)> {
        self.animated.clone()
    }

    fn anchor_target_top(&self, fragment: &str) -> Option<f64> {
        self.sections
            .iter()
            .find(|section| section.id == fragment)
            .map(|section| section.bounds.top)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        self.classes.contains(&(element.clone(), class.to_string()))
    }

    fn set_class(&mut self, element: &Element, class: &str, on: bool) {
        let key = (element.clone(), class.to_string());
        if on {
            self.classes.insert(key);
        } else {
            self.classes.remove(&key);
        }
    }

    fn set_style(&mut self, element: &Element, prop: StyleProp, value: &str) {
        self.styles.insert((element.clone(), prop), value.to_string());
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        self.scrolled_to.push(top);
    }

    fn prevent_default(&mut self) {}
}
