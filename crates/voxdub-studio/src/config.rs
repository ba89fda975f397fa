//! Service configuration resolved from the process environment.
//!
//! The API key is the only required setting. Its absence is a fatal
//! configuration error surfaced before any request is attempted.

use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Environment variables searched for the API key, in order.
pub const API_KEY_VARS: &[&str] = &["VOXDUB_API_KEY", "GEMINI_API_KEY", "API_KEY"];

/// Overrides the service base URL.
pub const BASE_URL_VAR: &str = "VOXDUB_BASE_URL";
/// Overrides the model used for transcription and translation.
pub const TEXT_MODEL_VAR: &str = "VOXDUB_TEXT_MODEL";
/// Overrides the speech synthesis model.
pub const TTS_MODEL_VAR: &str = "VOXDUB_TTS_MODEL";
/// Overrides the prebuilt synthesis voice.
pub const VOICE_VAR: &str = "VOXDUB_VOICE";
/// Overrides the request timeout, in whole seconds.
pub const TIMEOUT_VAR: &str = "VOXDUB_TIMEOUT_SECS";

/// Default service endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default model for transcription and translation.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
/// Default speech synthesis model.
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
/// Default prebuilt voice.
pub const DEFAULT_VOICE: &str = "Kore";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No API key in any of the searched variables.
    #[error("API key is not configured (set one of {})", API_KEY_VARS.join(", "))]
    MissingApiKey,

    /// A setting is present but unusable.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Secret API credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key for request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(****)")
    }
}

/// Resolved service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Service credential.
    pub api_key: ApiKey,
    /// Service base URL, without a trailing slash.
    pub base_url: String,
    /// Model for transcription and translation.
    pub text_model: String,
    /// Model for speech synthesis.
    pub tts_model: String,
    /// Prebuilt voice name for speech synthesis.
    pub voice: String,
    /// Global per-request timeout.
    pub timeout: Duration,
}

impl Settings {
    /// Settings with defaults for everything but the key.
    pub fn with_api_key(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolves settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolves settings through an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|name| get(name))
            .map(ApiKey::new)
            .ok_or(ConfigError::MissingApiKey)?;

        let mut settings = Self::with_api_key(api_key);

        if let Some(url) = get(BASE_URL_VAR) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    name: BASE_URL_VAR,
                    value: url,
                    reason: "expected an http:// or https:// URL",
                });
            }
            settings.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = get(TEXT_MODEL_VAR) {
            settings.text_model = model;
        }
        if let Some(model) = get(TTS_MODEL_VAR) {
            settings.tts_model = model;
        }
        if let Some(voice) = get(VOICE_VAR) {
            settings.voice = voice;
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => settings.timeout = Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: TIMEOUT_VAR,
                        value: raw,
                        reason: "expected a positive number of seconds",
                    })
                }
            }
        }

        Ok(settings)
    }
}
