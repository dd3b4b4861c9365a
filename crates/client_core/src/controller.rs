//! Generic form controller: submit, reset and swap over a [`FormModel`].

use std::{marker::PhantomData, sync::Arc};

use shared::domain::FormId;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info};

use crate::{
    config::FormSettings,
    error::RequestFailed,
    form::FormKind,
    model::{FormModel, Panel, GENERIC_FAILURE_ALERT},
    transport::ScoringTransport,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SubmitStarted { form: FormId, generation: u64 },
    SubmitBlocked { form: FormId, field: usize },
    ResultShown { form: FormId, generation: u64 },
    Alert { form: FormId, message: String },
    StaleResponseDropped { form: FormId, generation: u64 },
    Reset { form: FormId },
    Swapped { form: FormId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The result view is showing the response.
    Shown,
    /// The request failed; the user was alerted.
    Failed,
    /// A required field was empty; nothing was sent.
    Blocked { field: usize },
    /// Another submission was already in flight.
    Ignored,
    /// A reset invalidated the submission before it finished.
    Superseded,
}

/// Proof that `begin_submit` moved the form into `Submitting`.
pub struct SubmitTicket<K: FormKind> {
    generation: u64,
    request: K::Request,
}

impl<K: FormKind> SubmitTicket<K> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct FormController<K: FormKind> {
    settings: Arc<FormSettings>,
    transport: Arc<dyn ScoringTransport>,
    model: Arc<watch::Sender<FormModel>>,
    events: broadcast::Sender<FormEvent>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: FormKind> Clone for FormController<K> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            transport: self.transport.clone(),
            model: self.model.clone(),
            events: self.events.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: FormKind> FormController<K> {
    pub fn new(settings: FormSettings, transport: Arc<dyn ScoringTransport>) -> Self {
        let model = FormModel::new(K::ID, K::FIELDS, &settings.idle_label);
        let (model, _) = watch::channel(model);
        let (events, _) = broadcast::channel(64);
        Self {
            settings: Arc::new(settings),
            transport,
            model: Arc::new(model),
            events,
            _kind: PhantomData,
        }
    }

    pub fn form_id(&self) -> FormId {
        K::ID
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> FormModel {
        self.model.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<FormModel> {
        self.model.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    /// Returns `false` when `index` is not a field of this form.
    pub fn set_field(&self, index: usize, value: impl Into<String>) -> bool {
        let value = value.into();
        self.model.send_if_modified(|model| match model.fields.get_mut(index) {
            Some(field) if field.value != value => {
                field.value = value;
                true
            }
            _ => false,
        });
        index < K::FIELDS.len()
    }

    /// Full submission: enter `Submitting`, call the endpoint, then show the
    /// result after the reveal delay or alert on failure.
    pub async fn submit(&self) -> SubmitOutcome {
        match self.begin_submit() {
            Ok(ticket) => self.complete_submit(ticket).await,
            Err(outcome) => outcome,
        }
    }

    /// Synchronous half of `submit`. On success the model is already in
    /// `Submitting` when this returns.
    pub fn begin_submit(&self) -> Result<SubmitTicket<K>, SubmitOutcome> {
        let mut decision = Err(SubmitOutcome::Ignored);
        self.model.send_if_modified(|model| {
            if model.is_submitting() {
                return false;
            }
            if let Some(field) = model
                .fields
                .iter()
                .position(|field| field.required && field.value.is_empty())
            {
                model.focus_request = Some(field);
                decision = Err(SubmitOutcome::Blocked { field });
                return true;
            }

            let request = K::build_request(&model.fields);
            let generation = model.start_submission(&self.settings.busy_label);
            decision = Ok(SubmitTicket {
                generation,
                request,
            });
            true
        });

        match &decision {
            Ok(ticket) => {
                debug!(form = %K::ID, generation = ticket.generation, "submission started");
                self.emit(FormEvent::SubmitStarted {
                    form: K::ID,
                    generation: ticket.generation,
                });
            }
            Err(SubmitOutcome::Blocked { field }) => {
                debug!(form = %K::ID, field, "submission blocked by empty required field");
                self.emit(FormEvent::SubmitBlocked {
                    form: K::ID,
                    field: *field,
                });
            }
            Err(_) => debug!(form = %K::ID, "submission ignored while another is in flight"),
        }
        decision
    }

    pub async fn complete_submit(&self, ticket: SubmitTicket<K>) -> SubmitOutcome {
        let generation = ticket.generation;
        match self.request(ticket.request).await {
            Ok(response) => {
                tokio::time::sleep(self.settings.reveal_delay).await;
                self.reveal(generation, &response)
            }
            Err(err) => {
                error!(
                    form = %K::ID,
                    generation,
                    endpoint = %self.settings.endpoint,
                    error = %err,
                    "submission failed"
                );
                self.fail(generation)
            }
        }
    }

    /// Settle a ticket that never reached the transport, as a failure.
    pub fn abort_submit(&self, ticket: SubmitTicket<K>, reason: RequestFailed) -> SubmitOutcome {
        error!(
            form = %K::ID,
            generation = ticket.generation,
            error = %reason,
            "submission aborted before sending"
        );
        self.fail(ticket.generation)
    }

    pub fn reset(&self) {
        self.model.send_modify(|model| {
            if let Some(in_flight) = &model.in_flight {
                debug!(
                    form = %K::ID,
                    generation = in_flight.generation,
                    "reset while submitting; pending response will be dropped"
                );
            }
            model.finish_submission();
            model.panel = Panel::Form;
            for field in &mut model.fields {
                field.value.clear();
            }
            model.alert = None;
            model.focus_request = Some(0);
            model.scroll_request = false;
        });
        self.emit(FormEvent::Reset { form: K::ID });
    }

    /// Exchange the two swappable fields. Returns `false` for forms without
    /// a swap action.
    pub fn swap(&self) -> bool {
        let Some((a, b)) = K::SWAP_PAIR else {
            return false;
        };
        let swapped = self.model.send_if_modified(|model| {
            if a.max(b) >= model.fields.len() {
                return false;
            }
            let first = std::mem::take(&mut model.fields[a].value);
            let second = std::mem::replace(&mut model.fields[b].value, first);
            model.fields[a].value = second;
            true
        });
        if swapped {
            self.emit(FormEvent::Swapped { form: K::ID });
        }
        swapped
    }

    pub fn dismiss_alert(&self) {
        self.model
            .send_if_modified(|model| model.alert.take().is_some());
    }

    pub fn take_focus_request(&self) -> Option<usize> {
        let mut focus = None;
        self.model.send_if_modified(|model| {
            focus = model.focus_request.take();
            false
        });
        focus
    }

    pub fn take_scroll_request(&self) -> bool {
        let mut scroll = false;
        self.model.send_if_modified(|model| {
            scroll = std::mem::take(&mut model.scroll_request);
            false
        });
        scroll
    }

    async fn request(&self, request: K::Request) -> Result<K::Response, RequestFailed> {
        let body =
            serde_json::to_value(&request).map_err(|err| RequestFailed::Encode(err.to_string()))?;
        let raw = self
            .transport
            .post_json(&self.settings.endpoint, body)
            .await?;
        serde_json::from_value(raw).map_err(|err| RequestFailed::Decode(err.to_string()))
    }

    fn reveal(&self, generation: u64, response: &K::Response) -> SubmitOutcome {
        let rendered = K::render(response);
        let applied = self.model.send_if_modified(|model| {
            if !model.is_current(generation) {
                return false;
            }
            model.result = rendered;
            model.panel = Panel::Result;
            model.finish_submission();
            model.scroll_request = true;
            true
        });

        if !applied {
            return self.drop_stale(generation);
        }
        info!(form = %K::ID, generation, "result shown");
        self.emit(FormEvent::ResultShown {
            form: K::ID,
            generation,
        });
        SubmitOutcome::Shown
    }

    fn fail(&self, generation: u64) -> SubmitOutcome {
        let applied = self.model.send_if_modified(|model| {
            if !model.is_current(generation) {
                return false;
            }
            model.finish_submission();
            model.alert = Some(GENERIC_FAILURE_ALERT.to_string());
            true
        });

        if !applied {
            return self.drop_stale(generation);
        }
        self.emit(FormEvent::Alert {
            form: K::ID,
            message: GENERIC_FAILURE_ALERT.to_string(),
        });
        SubmitOutcome::Failed
    }

    fn drop_stale(&self, generation: u64) -> SubmitOutcome {
        debug!(form = %K::ID, generation, "dropping stale submission outcome");
        self.emit(FormEvent::StaleResponseDropped {
            form: K::ID,
            generation,
        });
        SubmitOutcome::Superseded
    }

    fn emit(&self, event: FormEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
