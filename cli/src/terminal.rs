//! Form surface backed by command-line arguments and the terminal.

use std::collections::HashMap;
use std::time::Duration;

use inquiry_engine::dom;
use inquiry_engine::{DeferredTask, FieldId, FormFields, FormSurface, MessageKind, StyleProp};

/// The "form" is the parsed arguments; messages go to stdout or stderr.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    fields: FormFields,
    styles: HashMap<(FieldId, StyleProp), String>,
    pending: Vec<(Duration, DeferredTask)>,
}

impl TerminalSurface {
    pub fn new(fields: FormFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Fields whose blur check left the error border on.
    pub fn flagged_fields(&self) -> Vec<FieldId> {
        FieldId::all()
            .iter()
            .copied()
            .filter(|field| {
                self.styles
                    .get(&(*field, StyleProp::BorderColor))
                    .is_some_and(|color| color == dom::ERROR_BORDER_COLOR)
            })
            .collect()
    }

    /// Deferred work queued so far, in scheduling order.
    pub fn take_pending(&mut self) -> Vec<(Duration, DeferredTask)> {
        std::mem::take(&mut self.pending)
    }
}

impl FormSurface for TerminalSurface {
    fn prevent_default(&mut self) {}

    fn read_fields(&self) -> FormFields {
        self.fields.clone()
    }

    fn reset_fields(&mut self) {
        self.fields = FormFields::default();
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        match kind {
            MessageKind::Success => println!("{text}"),
            MessageKind::Error => eprintln!("{text}"),
        }
    }

    fn hide_message(&mut self) {}

    fn scroll_message_into_view(&mut self) {}

    fn disable_submit(&mut self, label: &str) {
        eprintln!("{label}");
    }

    fn restore_submit(&mut self) {}

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

    fn set_wrapper_class(&mut self, _field: FieldId, _class: &str, _on: bool) {}

    fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        self.pending.push((delay, task));
    }
}
