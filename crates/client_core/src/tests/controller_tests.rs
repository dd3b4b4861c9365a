use std::{collections::VecDeque, time::Duration};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::{
    sync::{Mutex, Notify},
    time::{sleep, Instant},
};

use super::*;
use crate::{
    flames::{FlamesForm, MESSAGE_SLOT, TITLE_SLOT},
    model::{SubmitControl, UiState},
    zodiac::{ZodiacForm, SCORE_SLOT, SCORE_STYLE_VAR, SIGN1_LABEL_SLOT, VIBE_SLOT},
};

enum Reply {
    Json(Value),
    Fail(RequestFailed),
}

#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(String, Value)>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    fn replying(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl ScoringTransport for ScriptedTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, RequestFailed> {
        self.calls.lock().await.push((path.to_string(), body));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.replies.lock().await.pop_front() {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Fail(err)) => Err(err),
            None => Err(RequestFailed::Network("no scripted reply".into())),
        }
    }
}

fn friends_reply() -> Reply {
    Reply::Json(json!({"result": "FRIENDS", "message": "A great match!"}))
}

fn flames_with(transport: Arc<ScriptedTransport>) -> FormController<FlamesForm> {
    let controller = FormController::new(FlamesForm::default_settings(), transport);
    controller.set_field(0, "Alex");
    controller.set_field(1, "Sam");
    controller
}

fn drain(rx: &mut broadcast::Receiver<FormEvent>) -> Vec<FormEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn begin_submit_enters_submitting_before_any_network_call() {
    let transport = Arc::new(ScriptedTransport::replying([friends_reply()]));
    let controller = flames_with(transport.clone());

    let ticket = controller.begin_submit().expect("ticket");

    let model = controller.snapshot();
    assert_eq!(model.state(), UiState::Submitting);
    assert_eq!(model.submit.label, "Calculating...");
    assert!(model.submit.disabled);
    assert!(model.form_visible());
    assert!(transport.calls.lock().await.is_empty());

    assert_eq!(controller.complete_submit(ticket).await, SubmitOutcome::Shown);
}

#[tokio::test(start_paused = true)]
async fn flames_result_is_revealed_after_delay() {
    let transport = Arc::new(ScriptedTransport::replying([friends_reply()]));
    let controller = flames_with(transport.clone());

    let handle = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit().await }
    });

    sleep(Duration::from_millis(799)).await;
    let model = controller.snapshot();
    assert_eq!(model.state(), UiState::Submitting);
    assert!(!model.result_visible());

    sleep(Duration::from_millis(2)).await;
    let model = controller.snapshot();
    assert_eq!(model.state(), UiState::ResultShown);
    assert!(model.result_visible());
    assert!(!model.form_visible());
    assert_eq!(model.result.slot(TITLE_SLOT), Some("FRIENDS"));
    assert_eq!(model.result.slot(MESSAGE_SLOT), Some("A great match!"));
    assert_eq!(model.submit.label, "Calculate FLAMES");
    assert!(!model.submit.disabled);
    assert!(model.scroll_request);

    assert_eq!(handle.await.expect("join"), SubmitOutcome::Shown);
    let calls = transport.calls.lock().await;
    assert_eq!(
        calls.as_slice(),
        &[(
            "/calculate".to_string(),
            json!({"name1": "Alex", "name2": "Sam"})
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn zodiac_result_fills_score_label_and_style_var() {
    let transport = Arc::new(ScriptedTransport::replying([Reply::Json(json!({
        "sign1": "Leo",
        "sign2": "Aries",
        "element1": "Fire",
        "element2": "Fire",
        "score": 87,
        "vibe": "Electric",
        "insight": "..."
    }))]));
    let controller = FormController::<ZodiacForm>::new(ZodiacForm::default_settings(), transport.clone());
    controller.set_field(0, "Leo");
    controller.set_field(1, "Aries");

    let started = Instant::now();
    assert_eq!(controller.submit().await, SubmitOutcome::Shown);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(700) && elapsed < Duration::from_millis(702));

    let model = controller.snapshot();
    assert_eq!(model.result.slot(SCORE_SLOT), Some("87%"));
    assert_eq!(model.result.style_var(SCORE_STYLE_VAR), Some("87"));
    assert_eq!(model.result.slot(SIGN1_LABEL_SLOT), Some("Leo · Fire"));
    assert_eq!(model.result.slot(VIBE_SLOT), Some("Electric"));
    assert_eq!(model.submit.label, "Check Compatibility");
    assert_eq!(
        transport.calls.lock().await[0],
        (
            "/zodiac-check".to_string(),
            json!({"sign1": "Leo", "sign2": "Aries"})
        )
    );
}

#[tokio::test(start_paused = true)]
async fn zodiac_fractional_score_is_shown_not_alerted() {
    let transport = Arc::new(ScriptedTransport::replying([Reply::Json(json!({
        "sign1": "Leo",
        "sign2": "Aries",
        "element1": "Fire",
        "element2": "Fire",
        "score": 87.5,
        "vibe": "Electric",
        "insight": "..."
    }))]));
    let controller = FormController::<ZodiacForm>::new(ZodiacForm::default_settings(), transport);
    controller.set_field(0, "Leo");
    controller.set_field(1, "Aries");

    assert_eq!(controller.submit().await, SubmitOutcome::Shown);

    let model = controller.snapshot();
    assert_eq!(model.alert, None);
    assert_eq!(model.result.slot(SCORE_SLOT), Some("87.5%"));
    assert_eq!(model.result.style_var(SCORE_STYLE_VAR), Some("87.5"));
}

#[tokio::test(start_paused = true)]
async fn failures_restore_control_immediately_and_alert_once() {
    let failures = [
        Reply::Fail(RequestFailed::Status(500)),
        Reply::Fail(RequestFailed::Network("connection refused".into())),
        Reply::Json(json!({"result": 7})),
    ];

    for reply in failures {
        let transport = Arc::new(ScriptedTransport::replying([reply]));
        let controller = flames_with(transport);
        let mut events = controller.subscribe_events();

        let started = Instant::now();
        assert_eq!(controller.submit().await, SubmitOutcome::Failed);
        assert_eq!(started.elapsed(), Duration::ZERO);

        let model = controller.snapshot();
        assert_eq!(model.state(), UiState::Error);
        assert_eq!(model.alert.as_deref(), Some(GENERIC_FAILURE_ALERT));
        assert!(model.form_visible());
        assert!(!model.result_visible());
        assert_eq!(model.submit, SubmitControl::idle("Calculate FLAMES"));
        assert_eq!(model.field_value("name1"), Some("Alex"));

        let alerts = drain(&mut events)
            .into_iter()
            .filter(|event| matches!(event, FormEvent::Alert { .. }))
            .count();
        assert_eq!(alerts, 1);
    }
}

#[tokio::test]
async fn dismissing_alert_returns_to_idle() {
    let transport = Arc::new(ScriptedTransport::replying([Reply::Fail(
        RequestFailed::Status(502),
    )]));
    let controller = flames_with(transport);

    controller.submit().await;
    controller.dismiss_alert();

    assert_eq!(controller.snapshot().state(), UiState::Idle);
}

#[tokio::test(start_paused = true)]
async fn reset_after_result_clears_fields_and_focuses_first() {
    let transport = Arc::new(ScriptedTransport::replying([friends_reply()]));
    let controller = flames_with(transport);
    assert_eq!(controller.submit().await, SubmitOutcome::Shown);

    controller.reset();

    let model = controller.snapshot();
    assert_eq!(model.state(), UiState::Idle);
    assert!(model.form_visible());
    assert!(model.fields.iter().all(|field| field.value.is_empty()));
    assert_eq!(controller.take_focus_request(), Some(0));
    assert_eq!(controller.take_focus_request(), None);
}

#[tokio::test]
async fn reset_from_error_returns_to_idle() {
    let transport = Arc::new(ScriptedTransport::replying([Reply::Fail(
        RequestFailed::Status(500),
    )]));
    let controller = flames_with(transport);
    assert_eq!(controller.submit().await, SubmitOutcome::Failed);
    assert_eq!(controller.snapshot().state(), UiState::Error);

    controller.reset();

    let model = controller.snapshot();
    assert_eq!(model.state(), UiState::Idle);
    assert_eq!(model.alert, None);
    assert!(model.form_visible());
    assert!(model.fields.iter().all(|field| field.value.is_empty()));
}

#[tokio::test]
async fn reset_from_idle_clears_typed_values() {
    let controller = flames_with(Arc::new(ScriptedTransport::default()));

    controller.reset();

    let model = controller.snapshot();
    assert_eq!(model.field_value("name1"), Some(""));
    assert_eq!(model.field_value("name2"), Some(""));
    assert_eq!(model.focus_request, Some(0));
}

#[tokio::test(start_paused = true)]
async fn reset_while_submitting_drops_late_response() {
    let gate = Arc::new(Notify::new());
    let transport = Arc::new(ScriptedTransport::replying([friends_reply()]).gated(gate.clone()));
    let controller = flames_with(transport);
    let mut events = controller.subscribe_events();

    let handle = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit().await }
    });
    sleep(Duration::from_millis(1)).await;
    assert!(controller.snapshot().is_submitting());

    controller.reset();
    let model = controller.snapshot();
    assert_eq!(model.state(), UiState::Idle);
    assert!(!model.submit.disabled);

    gate.notify_one();
    assert_eq!(handle.await.expect("join"), SubmitOutcome::Superseded);

    let model = controller.snapshot();
    assert!(model.form_visible());
    assert!(model.result.is_empty());
    assert!(drain(&mut events)
        .iter()
        .all(|event| !matches!(event, FormEvent::ResultShown { .. })));
}

#[tokio::test(start_paused = true)]
async fn second_submit_while_in_flight_is_ignored() {
    let gate = Arc::new(Notify::new());
    let transport = Arc::new(
        ScriptedTransport::replying([friends_reply(), friends_reply()]).gated(gate.clone()),
    );
    let controller = flames_with(transport.clone());

    let handle = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit().await }
    });
    sleep(Duration::from_millis(1)).await;

    assert_eq!(controller.submit().await, SubmitOutcome::Ignored);
    assert_eq!(transport.calls.lock().await.len(), 1);

    gate.notify_one();
    assert_eq!(handle.await.expect("join"), SubmitOutcome::Shown);
}

#[tokio::test]
async fn empty_required_field_blocks_submission() {
    let transport = Arc::new(ScriptedTransport::replying([friends_reply()]));
    let controller = FormController::<FlamesForm>::new(FlamesForm::default_settings(), transport.clone());
    controller.set_field(0, "Alex");

    assert_eq!(
        controller.submit().await,
        SubmitOutcome::Blocked { field: 1 }
    );

    let model = controller.snapshot();
    assert_eq!(model.state(), UiState::Idle);
    assert!(!model.submit.disabled);
    assert_eq!(model.focus_request, Some(1));
    assert!(transport.calls.lock().await.is_empty());
}

#[tokio::test]
async fn swap_exchanges_sign_fields_without_network() {
    let transport = Arc::new(ScriptedTransport::default());
    let controller = FormController::<ZodiacForm>::new(ZodiacForm::default_settings(), transport.clone());
    controller.set_field(0, "Leo");
    controller.set_field(1, "Aries");

    assert!(controller.swap());

    let model = controller.snapshot();
    assert_eq!(model.field_value("sign1"), Some("Aries"));
    assert_eq!(model.field_value("sign2"), Some("Leo"));
    assert!(transport.calls.lock().await.is_empty());
}

#[tokio::test]
async fn flames_form_has_no_swap_action() {
    let controller = flames_with(Arc::new(ScriptedTransport::default()));

    assert!(!controller.swap());
    assert_eq!(controller.snapshot().field_value("name1"), Some("Alex"));
}

#[tokio::test]
async fn set_field_rejects_unknown_index() {
    let controller = flames_with(Arc::new(ScriptedTransport::default()));

    assert!(!controller.set_field(5, "ghost"));
    assert_eq!(controller.snapshot().fields.len(), 2);
}

#[tokio::test]
async fn watchers_see_submitting_state() {
    let transport = Arc::new(ScriptedTransport::replying([friends_reply()]));
    let controller = flames_with(transport);
    let mut rx = controller.watch();

    let _ticket = controller.begin_submit().expect("ticket");

    assert!(rx.has_changed().expect("sender alive"));
    assert!(rx.borrow_and_update().is_submitting());
}

#[tokio::test]
async fn aborted_ticket_alerts_and_restores_control() {
    let transport = Arc::new(ScriptedTransport::default());
    let controller = flames_with(transport.clone());
    let ticket = controller.begin_submit().expect("ticket");

    let outcome = controller.abort_submit(
        ticket,
        RequestFailed::Network("backend worker unavailable".into()),
    );

    assert_eq!(outcome, SubmitOutcome::Failed);
    let model = controller.snapshot();
    assert_eq!(model.state(), UiState::Error);
    assert!(!model.submit.disabled);
    assert!(transport.calls.lock().await.is_empty());
}
