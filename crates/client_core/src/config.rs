use std::{fs, path::Path, time::Duration};

use toml::{Table, Value};
use tracing::warn;
use url::Url;

use crate::{document::DocumentTemplate, error::ConfigError};

pub const SETTINGS_FILE: &str = "sow_form.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: Option<u64>,
    pub support_heading: String,
    pub support_line: String,
}

impl Default for Settings {
    fn default() -> Self {
        let template = DocumentTemplate::default();
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            request_timeout_secs: None,
            support_heading: template.support_heading,
            support_line: template.support_line,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn document_template(&self) -> DocumentTemplate {
        DocumentTemplate {
            support_heading: self.support_heading.clone(),
            support_line: self.support_line.clone(),
        }
    }
}

/// Defaults, then `sow_form.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match raw.parse::<Table>() {
            Ok(table) => apply_file_table(&mut settings, &table),
            Err(err) => {
                warn!(file = %file.display(), error = %err, "ignoring unreadable settings file");
            }
        }
    }

    if let Some(v) = env("SOW_FORM_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    for key in ["SOW_FORM_REQUEST_TIMEOUT_SECS", "APP__REQUEST_TIMEOUT_SECS"] {
        if let Some(v) = env(key) {
            if let Ok(parsed) = v.parse::<u64>() {
                settings.request_timeout_secs = Some(parsed);
            }
        }
    }

    settings
}

/// Each key is applied on its own; a value of the wrong type skips only that key.
fn apply_file_table(settings: &mut Settings, table: &Table) {
    let string_key = |key: &str| match table.get(key) {
        Some(Value::String(value)) => Some(value.clone()),
        Some(other) => {
            warn!(key, value = %other, "expected a string setting");
            None
        }
        None => None,
    };

    if let Some(v) = string_key("server_url") {
        settings.server_url = v;
    }
    if let Some(v) = string_key("support_heading") {
        settings.support_heading = v;
    }
    if let Some(v) = string_key("support_line") {
        settings.support_line = v;
    }

    if let Some(raw) = table.get("request_timeout_secs") {
        let secs = match raw {
            Value::Integer(secs) => u64::try_from(*secs).ok(),
            Value::String(secs) => secs.parse::<u64>().ok(),
            _ => None,
        };
        match secs {
            Some(secs) => settings.request_timeout_secs = Some(secs),
            None => warn!(value = %raw, "invalid request_timeout_secs"),
        }
    }
}

/// Adds `http://` when no scheme is given and drops trailing slashes.
pub fn normalize_server_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let parsed = Url::parse(&candidate).map_err(|source| ConfigError::InvalidServerUrl {
        raw: raw.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            scheme: parsed.scheme().to_string(),
        });
    }

    Ok(candidate)
}
