use shared::{
    domain::FormId,
    protocol::{FlamesResult, NamesRequest},
};

use crate::{
    form::{value_of, FieldSpec, FormKind},
    model::{FieldState, RenderedResult},
};

pub const TITLE_SLOT: &str = "title";
pub const MESSAGE_SLOT: &str = "message";

/// Name-compatibility form posting to `/calculate`.
pub struct FlamesForm;

impl FormKind for FlamesForm {
    const ID: FormId = FormId::Flames;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name1", "Your name"),
        FieldSpec::required("name2", "Their name"),
    ];

    type Request = NamesRequest;
    type Response = FlamesResult;

    fn build_request(fields: &[FieldState]) -> NamesRequest {
        NamesRequest {
            name1: value_of(fields, "name1"),
            name2: value_of(fields, "name2"),
        }
    }

    fn render(response: &FlamesResult) -> RenderedResult {
        RenderedResult::default()
            .with_slot(TITLE_SLOT, &response.result)
            .with_slot(MESSAGE_SLOT, &response.message)
    }
}
