//! Backend commands queued from UI to backend worker.

use client_core::{FlamesForm, SubmitTicket, ZodiacForm};
use shared::domain::FormId;

/// Each command carries a ticket from `begin_submit`, so the form is already
/// in `Submitting` by the time the command is queued.
pub enum BackendCommand {
    CompleteFlames(SubmitTicket<FlamesForm>),
    CompleteZodiac(SubmitTicket<ZodiacForm>),
}

impl BackendCommand {
    pub fn form(&self) -> FormId {
        match self {
            BackendCommand::CompleteFlames(_) => FormId::Flames,
            BackendCommand::CompleteZodiac(_) => FormId::Zodiac,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::CompleteFlames(_) => "complete_flames",
            BackendCommand::CompleteZodiac(_) => "complete_zodiac",
        }
    }
}
