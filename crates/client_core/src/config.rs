use std::{fs, path::Path, time::Duration};

use shared::{
    domain::FormId,
    protocol::{CALCULATE_PATH, ZODIAC_CHECK_PATH},
};
use tracing::warn;

pub const SETTINGS_FILE: &str = "flames.toml";

/// Runtime parameters of one form controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub endpoint: String,
    pub idle_label: String,
    pub busy_label: String,
    /// Pause between a successful response and revealing it.
    pub reveal_delay: Duration,
}

impl FormSettings {
    pub fn defaults_for(form: FormId) -> Self {
        match form {
            FormId::Flames => Self {
                endpoint: CALCULATE_PATH.into(),
                idle_label: "Calculate FLAMES".into(),
                busy_label: "Calculating...".into(),
                reveal_delay: Duration::from_millis(800),
            },
            FormId::Zodiac => Self {
                endpoint: ZODIAC_CHECK_PATH.into(),
                idle_label: "Check Compatibility".into(),
                busy_label: "Reading Stars...".into(),
                reveal_delay: Duration::from_millis(700),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub request_timeout: Option<Duration>,
    pub flames: FormSettings,
    pub zodiac: FormSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            request_timeout: None,
            flames: FormSettings::defaults_for(FormId::Flames),
            zodiac: FormSettings::defaults_for(FormId::Zodiac),
        }
    }
}

/// Defaults, then `flames.toml` from the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, env);

    settings
}

pub fn apply_file(settings: &mut ClientSettings, raw: &str) {
    let table = match raw.parse::<toml::Table>() {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable settings file");
            return;
        }
    };
    let get = |key: &str| match table.get(key)? {
        toml::Value::String(v) => Some(v.clone()),
        toml::Value::Integer(v) => Some(v.to_string()),
        _ => None,
    };

    if let Some(v) = get("server_url") {
        settings.server_url = v;
    }
    if let Some(v) = get("request_timeout_ms") {
        set_millis(&mut settings.request_timeout, "request_timeout_ms", &v);
    }
    apply_form_keys(&mut settings.flames, "flames", &get);
    apply_form_keys(&mut settings.zodiac, "zodiac", &get);
}

pub fn apply_env(settings: &mut ClientSettings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("FLAMES_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_MS") {
        set_millis(&mut settings.request_timeout, "APP__REQUEST_TIMEOUT_MS", &v);
    }

    if let Some(v) = env("APP__FLAMES_DELAY_MS") {
        set_delay(&mut settings.flames.reveal_delay, "APP__FLAMES_DELAY_MS", &v);
    }
    if let Some(v) = env("APP__ZODIAC_DELAY_MS") {
        set_delay(&mut settings.zodiac.reveal_delay, "APP__ZODIAC_DELAY_MS", &v);
    }
}

fn apply_form_keys(form: &mut FormSettings, prefix: &str, get: &impl Fn(&str) -> Option<String>) {
    if let Some(v) = get(&format!("{prefix}_delay_ms")) {
        set_delay(&mut form.reveal_delay, prefix, &v);
    }
    if let Some(v) = get(&format!("{prefix}_idle_label")) {
        form.idle_label = v;
    }
    if let Some(v) = get(&format!("{prefix}_busy_label")) {
        form.busy_label = v;
    }
}

fn parse_millis(key: &str, raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(err) => {
            warn!(key, value = raw, error = %err, "ignoring non-numeric millisecond setting");
            None
        }
    }
}

fn set_delay(slot: &mut Duration, key: &str, raw: &str) {
    if let Some(delay) = parse_millis(key, raw) {
        *slot = delay;
    }
}

fn set_millis(slot: &mut Option<Duration>, key: &str, raw: &str) {
    if let Some(delay) = parse_millis(key, raw) {
        *slot = Some(delay);
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
