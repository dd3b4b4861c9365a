use shared::{
    domain::FormId,
    protocol::{SignsRequest, ZodiacResult},
};

use crate::{
    form::{value_of, FieldSpec, FormKind},
    model::{FieldState, RenderedResult},
};

pub const SIGN1_LABEL_SLOT: &str = "sign1_label";
pub const SIGN2_LABEL_SLOT: &str = "sign2_label";
pub const SCORE_SLOT: &str = "score";
pub const VIBE_SLOT: &str = "vibe";
pub const INSIGHT_SLOT: &str = "insight";
/// Drives the circular score gauge; holds the bare 0-100 number.
pub const SCORE_STYLE_VAR: &str = "--score";

/// Zodiac-compatibility form posting to `/zodiac-check`.
pub struct ZodiacForm;

impl FormKind for ZodiacForm {
    const ID: FormId = FormId::Zodiac;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("sign1", "Your sign"),
        FieldSpec::required("sign2", "Their sign"),
    ];
    const SWAP_PAIR: Option<(usize, usize)> = Some((0, 1));

    type Request = SignsRequest;
    type Response = ZodiacResult;

    fn build_request(fields: &[FieldState]) -> SignsRequest {
        SignsRequest {
            sign1: value_of(fields, "sign1"),
            sign2: value_of(fields, "sign2"),
        }
    }

    fn render(response: &ZodiacResult) -> RenderedResult {
        RenderedResult::default()
            .with_slot(
                SIGN1_LABEL_SLOT,
                format!("{} · {}", response.sign1, response.element1),
            )
            .with_slot(
                SIGN2_LABEL_SLOT,
                format!("{} · {}", response.sign2, response.element2),
            )
            .with_slot(SCORE_SLOT, format!("{}%", score_text(response.score)))
            .with_slot(VIBE_SLOT, &response.vibe)
            .with_slot(INSIGHT_SLOT, &response.insight)
            .with_style_var(SCORE_STYLE_VAR, score_text(response.score))
    }
}

/// Shortest decimal form of the score: whole numbers print without a
/// fraction (`87.0` renders as `87`), others as written (`87.5`).
pub fn score_text(score: f64) -> String {
    score.to_string()
}

#[cfg(test)]
#[path = "tests/zodiac_tests.rs"]
mod tests;
