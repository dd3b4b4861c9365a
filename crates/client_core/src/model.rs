//! View model of a single form: everything a front end needs to draw it.

use shared::domain::FormId;

use crate::form::FieldSpec;

/// Message shown for every failed submission.
pub const GENERIC_FAILURE_ALERT: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub value: String,
}

impl FieldState {
    pub fn from_spec(spec: &FieldSpec) -> Self {
        Self {
            name: spec.name,
            label: spec.label,
            required: spec.required,
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub idle_label: String,
    pub label: String,
    pub disabled: bool,
}

impl SubmitControl {
    pub fn idle(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            idle_label: label.clone(),
            label,
            disabled: false,
        }
    }

    fn restore(&mut self, label: String) {
        self.label = label;
        self.disabled = false;
    }
}

/// Which of the two mutually exclusive views is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Form,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Submitting,
    ResultShown,
    /// Idle with an alert the user has not dismissed yet.
    Error,
}

/// Text slots and style variables filled in by a form's render function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedResult {
    slots: Vec<(&'static str, String)>,
    style_vars: Vec<(&'static str, String)>,
}

impl RenderedResult {
    pub fn with_slot(mut self, name: &'static str, text: impl Into<String>) -> Self {
        self.slots.push((name, text.into()));
        self
    }

    pub fn with_style_var(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.style_vars.push((name, value.into()));
        self
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|(slot, _)| *slot == name)
            .map(|(_, text)| text.as_str())
    }

    pub fn style_var(&self, name: &str) -> Option<&str> {
        self.style_vars
            .iter()
            .find(|(var, _)| *var == name)
            .map(|(_, value)| value.as_str())
    }

    /// Slots in render order.
    pub fn slots(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.slots.iter().map(|(name, text)| (*name, text.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.style_vars.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub(crate) generation: u64,
    pub(crate) restore_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModel {
    pub form: FormId,
    pub fields: Vec<FieldState>,
    pub submit: SubmitControl,
    pub panel: Panel,
    pub result: RenderedResult,
    pub alert: Option<String>,
    /// Field index the front end should focus next frame.
    pub focus_request: Option<usize>,
    /// Set when the result view should be scrolled into view (smoothly).
    pub scroll_request: bool,
    pub(crate) in_flight: Option<InFlight>,
    pub(crate) generation: u64,
}

impl FormModel {
    pub fn new(form: FormId, fields: &[FieldSpec], idle_label: &str) -> Self {
        Self {
            form,
            fields: fields.iter().map(FieldState::from_spec).collect(),
            submit: SubmitControl::idle(idle_label),
            panel: Panel::Form,
            result: RenderedResult::default(),
            alert: None,
            focus_request: None,
            scroll_request: false,
            in_flight: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> UiState {
        if self.in_flight.is_some() {
            UiState::Submitting
        } else if self.alert.is_some() {
            UiState::Error
        } else if self.panel == Panel::Result {
            UiState::ResultShown
        } else {
            UiState::Idle
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn form_visible(&self) -> bool {
        self.panel == Panel::Form
    }

    pub fn result_visible(&self) -> bool {
        self.panel == Panel::Result
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.generation == generation)
    }

    /// Enter `Submitting` and return the new request generation.
    pub(crate) fn start_submission(&mut self, busy_label: &str) -> u64 {
        self.generation += 1;
        let restore_label = std::mem::replace(&mut self.submit.label, busy_label.to_string());
        self.submit.disabled = true;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            restore_label,
        });
        self.generation
    }

    /// Leave `Submitting`, putting the submit control back the way it was.
    pub(crate) fn finish_submission(&mut self) {
        let label = match self.in_flight.take() {
            Some(in_flight) => in_flight.restore_label,
            None => self.submit.idle_label.clone(),
        };
        self.submit.restore(label);
    }
}
