use std::time::Duration;

use client_core::{
    flames::{MESSAGE_SLOT, TITLE_SLOT},
    zodiac::{INSIGHT_SLOT, SCORE_SLOT, SCORE_STYLE_VAR, SIGN1_LABEL_SLOT, SIGN2_LABEL_SLOT, VIBE_SLOT},
    Controllers, FormController, FormKind, FormModel, RequestFailed,
};
use crossbeam_channel::{Receiver, Sender};
use egui::{Align, RichText};
use shared::domain::FormId;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{form_title, status_line, UiEvent},
        orchestration::dispatch_backend_command,
    },
    ui::widgets::{score_ring, sign_picker},
};

pub struct FlamesGuiApp {
    controllers: Controllers,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    active: FormId,
    status: String,
}

impl FlamesGuiApp {
    pub fn new(
        controllers: Controllers,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            controllers,
            cmd_tx,
            ui_rx,
            active: FormId::Flames,
            status: "Starting backend worker...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::BackendFailed(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
                UiEvent::Form(event) => {
                    if let Some(line) = status_line(&event) {
                        self.status = line;
                    }
                }
            }
        }
    }

    fn submit_flames(&mut self) {
        let controller = &self.controllers.flames;
        if let Ok(ticket) = controller.begin_submit() {
            let cmd = BackendCommand::CompleteFlames(ticket);
            if let Some(BackendCommand::CompleteFlames(ticket)) =
                dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
            {
                controller.abort_submit(ticket, RequestFailed::Network(self.status.clone()));
            }
        }
    }

    fn submit_zodiac(&mut self) {
        let controller = &self.controllers.zodiac;
        if let Ok(ticket) = controller.begin_submit() {
            let cmd = BackendCommand::CompleteZodiac(ticket);
            if let Some(BackendCommand::CompleteZodiac(ticket)) =
                dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
            {
                controller.abort_submit(ticket, RequestFailed::Network(self.status.clone()));
            }
        }
    }

    fn show_flames(&mut self, ui: &mut egui::Ui) {
        let controller = self.controllers.flames.clone();
        let model = controller.snapshot();

        ui.heading("🔥 FLAMES");
        ui.label("Friends · Love · Affection · Marriage · Enemies · Siblings");
        ui.add_space(12.0);

        if model.form_visible() {
            if show_text_fields(ui, &controller, &model) {
                self.submit_flames();
            }
        } else {
            let response = ui.label(
                RichText::new(model.result.slot(TITLE_SLOT).unwrap_or_default())
                    .size(36.0)
                    .strong(),
            );
            ui.label(model.result.slot(MESSAGE_SLOT).unwrap_or_default());
            scroll_if_requested(&controller, &response);
            ui.add_space(12.0);
            if ui.button("Try again").clicked() {
                controller.reset();
            }
        }
    }

    fn show_zodiac(&mut self, ui: &mut egui::Ui) {
        let controller = self.controllers.zodiac.clone();
        let model = controller.snapshot();

        ui.heading("✨ Zodiac compatibility");
        ui.add_space(12.0);

        if model.form_visible() {
            let focus = controller.take_focus_request();
            for (index, field) in model.fields.iter().enumerate() {
                ui.label(field.label);
                let (response, picked) =
                    sign_picker(ui, (FormId::Zodiac, field.name), &field.value);
                if let Some(sign) = picked {
                    controller.set_field(index, sign.name());
                }
                if focus == Some(index) {
                    response.request_focus();
                }
                if index == 0 && ui.small_button("⇅ Swap").clicked() {
                    controller.swap();
                }
            }
            ui.add_space(8.0);
            if submit_button(ui, &model) {
                self.submit_zodiac();
            }
        } else {
            let result = &model.result;
            ui.horizontal(|ui| {
                ui.label(RichText::new(result.slot(SIGN1_LABEL_SLOT).unwrap_or_default()).strong());
                ui.label("+");
                ui.label(RichText::new(result.slot(SIGN2_LABEL_SLOT).unwrap_or_default()).strong());
            });
            let score = result
                .style_var(SCORE_STYLE_VAR)
                .and_then(|value| value.parse::<f32>().ok())
                .unwrap_or(0.0);
            let response = score_ring(ui, score, result.slot(SCORE_SLOT).unwrap_or_default());
            scroll_if_requested(&controller, &response);
            ui.label(RichText::new(result.slot(VIBE_SLOT).unwrap_or_default()).italics());
            ui.label(result.slot(INSIGHT_SLOT).unwrap_or_default());
            ui.add_space(12.0);
            if ui.button("Check another pair").clicked() {
                controller.reset();
            }
        }
    }

    fn show_alert<K: FormKind>(ctx: &egui::Context, controller: &FormController<K>) {
        let Some(message) = controller.snapshot().alert else {
            return;
        };
        let modal = egui::Modal::new(egui::Id::new(("alert", K::ID))).show(ctx, |ui| {
            ui.set_width(280.0);
            ui.heading(form_title(K::ID));
            ui.label(message);
            ui.add_space(8.0);
            ui.button("OK").clicked()
        });
        if modal.inner || modal.should_close() {
            controller.dismiss_alert();
        }
    }
}

/// Draws the text inputs plus the submit button. Returns `true` when the
/// user asked to submit, by button or by Enter in the last field.
fn show_text_fields<K: FormKind>(
    ui: &mut egui::Ui,
    controller: &FormController<K>,
    model: &FormModel,
) -> bool {
    let focus = controller.take_focus_request();
    let mut enter_pressed = false;
    for (index, field) in model.fields.iter().enumerate() {
        ui.label(field.label);
        let mut value = field.value.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut value)
                .hint_text(field.label)
                .id_salt((K::ID, field.name)),
        );
        if response.changed() {
            controller.set_field(index, value);
        }
        if focus == Some(index) {
            response.request_focus();
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            enter_pressed = true;
        }
    }
    ui.add_space(8.0);
    let clicked = submit_button(ui, model);
    clicked || (enter_pressed && !model.submit.disabled)
}

fn submit_button(ui: &mut egui::Ui, model: &FormModel) -> bool {
    ui.add_enabled(
        !model.submit.disabled,
        egui::Button::new(model.submit.label.as_str()),
    )
    .clicked()
}

fn scroll_if_requested<K: FormKind>(controller: &FormController<K>, response: &egui::Response) {
    if controller.take_scroll_request() {
        response.scroll_to_me(Some(Align::TOP));
    }
}

impl eframe::App for FlamesGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("form_tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.active, FormId::Flames, "🔥 FLAMES");
                ui.selectable_value(&mut self.active, FormId::Zodiac, "✨ Zodiac");
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.active {
                FormId::Flames => self.show_flames(ui),
                FormId::Zodiac => self.show_zodiac(ui),
            });
        });

        Self::show_alert(ctx, &self.controllers.flames);
        Self::show_alert(ctx, &self.controllers.zodiac);

        let busy = self.controllers.flames.snapshot().is_submitting()
            || self.controllers.zodiac.snapshot().is_submitting();
        ctx.request_repaint_after(Duration::from_millis(if busy { 16 } else { 100 }));
    }
}
