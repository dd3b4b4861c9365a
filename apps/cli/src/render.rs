//! Terminal rendering of a form's result view.

use client_core::{
    zodiac::{score_text, SCORE_STYLE_VAR, SIGN1_LABEL_SLOT, SIGN2_LABEL_SLOT},
    FormModel,
};
use serde_json::{json, Map, Value};

const GAUGE_WIDTH: usize = 20;

pub fn to_text(model: &FormModel) -> String {
    let mut out = String::new();
    let result = &model.result;

    if let (Some(sign1), Some(sign2)) = (
        result.slot(SIGN1_LABEL_SLOT),
        result.slot(SIGN2_LABEL_SLOT),
    ) {
        out.push_str(&format!("{sign1}  +  {sign2}\n"));
    }
    if let Some(score) = result.style_var(SCORE_STYLE_VAR).and_then(|v| v.parse::<f64>().ok()) {
        out.push_str(&format!("{}\n", gauge(score)));
    }
    for (name, text) in result.slots() {
        if name == SIGN1_LABEL_SLOT || name == SIGN2_LABEL_SLOT {
            continue;
        }
        out.push_str(&format!("{name}: {text}\n"));
    }
    out
}

pub fn to_json(model: &FormModel) -> Value {
    let slots: Map<String, Value> = model
        .result
        .slots()
        .map(|(name, text)| (name.to_string(), Value::String(text.to_string())))
        .collect();
    json!({
        "form": model.form,
        "result": slots,
    })
}

/// Text stand-in for the circular score gauge.
pub fn gauge(score: f64) -> String {
    let fraction = if score.is_finite() {
        score.clamp(0.0, 100.0) / 100.0
    } else {
        0.0
    };
    let filled = (fraction * GAUGE_WIDTH as f64).round() as usize;
    let score = score_text(score);
    format!(
        "[{}{}] {score}%",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled)
    )
}
