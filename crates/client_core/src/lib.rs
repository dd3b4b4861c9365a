use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

pub mod config;
pub mod controller;
pub mod error;
pub mod flames;
pub mod form;
pub mod model;
pub mod transport;
pub mod zodiac;

pub use config::{load_settings, ClientSettings, FormSettings};
pub use controller::{FormController, FormEvent, SubmitOutcome, SubmitTicket};
pub use error::RequestFailed;
pub use flames::FlamesForm;
pub use form::{FieldSpec, FormKind};
pub use model::{FieldState, FormModel, Panel, RenderedResult, SubmitControl, UiState};
pub use transport::{HttpScoringTransport, MissingScoringTransport, ScoringTransport};
pub use zodiac::ZodiacForm;

/// One controller per form, sharing a transport and nothing else.
#[derive(Clone)]
pub struct Controllers {
    pub flames: FormController<FlamesForm>,
    pub zodiac: FormController<ZodiacForm>,
}

impl Controllers {
    pub fn new(settings: &ClientSettings, transport: Arc<dyn ScoringTransport>) -> Self {
        Self {
            flames: FormController::new(settings.flames.clone(), transport.clone()),
            zodiac: FormController::new(settings.zodiac.clone(), transport),
        }
    }

    /// Build the HTTP transport from `settings` and wire both forms to it.
    ///
    /// An empty server url leaves the forms wired to a transport that fails
    /// every request, so the UI still runs and alerts on submit.
    pub fn connect(settings: &ClientSettings) -> Result<Self> {
        let transport: Arc<dyn ScoringTransport> = if settings.server_url.trim().is_empty() {
            warn!("no scoring server url configured; submissions will fail");
            Arc::new(MissingScoringTransport)
        } else {
            let http = HttpScoringTransport::new(&settings.server_url, settings.request_timeout)?;
            info!(server_url = %http.base_url(), "scoring transport ready");
            Arc::new(http)
        };
        Ok(Self::new(settings, transport))
    }
}
