//! Events flowing from the backend worker to the UI thread.

use client_core::FormEvent;
use shared::domain::FormId;

pub enum UiEvent {
    Info(String),
    BackendFailed(String),
    Form(FormEvent),
}

pub fn form_title(form: FormId) -> &'static str {
    match form {
        FormId::Flames => "FLAMES",
        FormId::Zodiac => "Zodiac",
    }
}

/// One-line status bar text for a form event, if it deserves one.
pub fn status_line(event: &FormEvent) -> Option<String> {
    let (form, text) = match event {
        FormEvent::SubmitStarted { form, .. } => (form, "asking the server"),
        FormEvent::SubmitBlocked { form, .. } => (form, "fill in every field first"),
        FormEvent::ResultShown { form, .. } => (form, "result ready"),
        FormEvent::Alert { form, .. } => (form, "request failed"),
        FormEvent::StaleResponseDropped { form, .. } => (form, "discarded a late response"),
        FormEvent::Reset { .. } | FormEvent::Swapped { .. } => return None,
    };
    Some(format!("{}: {text}", form_title(*form)))
}
