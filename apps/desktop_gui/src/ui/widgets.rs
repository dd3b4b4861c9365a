use std::f32::consts::{FRAC_PI_2, TAU};

use egui::{Align2, FontId, Pos2, Response, Sense, Shape, Stroke, Ui};
use shared::domain::ZodiacSign;

const RING_SIZE: f32 = 132.0;
const RING_STROKE: f32 = 10.0;
const ARC_SEGMENTS: f32 = 96.0;

/// Circular progress gauge filled in proportion to `score` (0-100).
pub fn score_ring(ui: &mut Ui, score: f32, label: &str) -> Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(RING_SIZE, RING_SIZE), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return response;
    }

    let visuals = ui.visuals();
    let painter = ui.painter();
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.5 - RING_STROKE;

    painter.circle_stroke(
        center,
        radius,
        Stroke::new(RING_STROKE, visuals.faint_bg_color),
    );

    let fraction = (score / 100.0).clamp(0.0, 1.0);
    if fraction > 0.0 {
        let steps = ((fraction * ARC_SEGMENTS).ceil() as usize).max(2);
        let points: Vec<Pos2> = (0..=steps)
            .map(|i| {
                let angle = -FRAC_PI_2 + fraction * TAU * (i as f32 / steps as f32);
                center + radius * egui::vec2(angle.cos(), angle.sin())
            })
            .collect();
        painter.add(Shape::line(
            points,
            Stroke::new(RING_STROKE, visuals.selection.bg_fill),
        ));
    }

    painter.text(
        center,
        Align2::CENTER_CENTER,
        label,
        FontId::proportional(26.0),
        visuals.strong_text_color(),
    );
    response
}

/// Drop-down over the twelve signs. Returns the combo response and the sign
/// picked this frame, if any.
pub fn sign_picker(
    ui: &mut Ui,
    id_salt: impl std::hash::Hash,
    current: &str,
) -> (Response, Option<ZodiacSign>) {
    let mut picked = None;
    let selected_text = match current.parse::<ZodiacSign>() {
        Ok(sign) => format!("{} {}", sign.symbol(), sign.name()),
        Err(_) if current.is_empty() => "Choose a sign".to_string(),
        Err(_) => current.to_string(),
    };

    let response = egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected_text)
        .width(180.0)
        .show_ui(ui, |ui| {
            for sign in ZodiacSign::ALL {
                let label = format!("{} {}", sign.symbol(), sign.name());
                if ui
                    .selectable_label(current == sign.name(), label)
                    .clicked()
                {
                    picked = Some(sign);
                }
            }
        })
        .response;

    (response, picked)
}
