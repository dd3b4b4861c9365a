use serde::{de::DeserializeOwned, Serialize};
use shared::domain::FormId;

use crate::{
    config::FormSettings,
    model::{FieldState, RenderedResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: true,
        }
    }
}

/// Static description of one form: its fields, wire types and renderer.
///
/// A [`FormController`](crate::controller::FormController) is generic over
/// this; everything that differs between forms lives here or in
/// [`FormSettings`].
pub trait FormKind: Send + Sync + 'static {
    const ID: FormId;
    const FIELDS: &'static [FieldSpec];
    /// Field indices exchanged by `swap`, if the form has a swap action.
    const SWAP_PAIR: Option<(usize, usize)> = None;

    type Request: Serialize + Send;
    type Response: DeserializeOwned + Send;

    fn build_request(fields: &[FieldState]) -> Self::Request;

    fn render(response: &Self::Response) -> RenderedResult;

    fn default_settings() -> FormSettings {
        FormSettings::defaults_for(Self::ID)
    }
}

pub(crate) fn value_of(fields: &[FieldState], name: &str) -> String {
    fields
        .iter()
        .find(|field| field.name == name)
        .map(|field| field.value.clone())
        .unwrap_or_default()
}
