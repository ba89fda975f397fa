//! Error types for the studio workflow.

use thiserror::Error;
use voxdub_audio::Base64Error;

use crate::config::{ConfigError, API_KEY_VARS};

/// Result type for studio operations.
pub type StudioResult<T> = Result<T, StudioError>;

/// Failures of a single call to the speech service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, if any.
        message: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not the expected JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The response parsed but carried no usable text or audio.
    #[error("response contained no {0}")]
    EmptyResponse(&'static str),

    /// Synthesized audio was not valid base64.
    #[error("invalid audio payload: {0}")]
    InvalidAudio(#[from] Base64Error),
}

/// Errors surfaced by the studio session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudioError {
    /// Missing or invalid configuration; blocks every service action.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transcription request failed.
    #[error("transcription failed: {0}")]
    Transcription(#[source] ServiceError),

    /// Translation request failed.
    #[error("translation to {language} failed: {source}")]
    Translation {
        /// Target language name.
        language: String,
        /// Underlying failure.
        #[source]
        source: ServiceError,
    },

    /// Speech generation for one translation failed.
    #[error("speech generation for {language} failed: {source}")]
    SpeechGeneration {
        /// Language of the translation being voiced.
        language: String,
        /// Underlying failure.
        #[source]
        source: ServiceError,
    },

    /// The action is already running; its control is disabled.
    #[error("{0} is already in progress")]
    Busy(&'static str),

    /// The action is not available in the current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// Attempted action.
        action: &'static str,
        /// Why it is unavailable.
        state: &'static str,
    },

    /// No translation row with this id.
    #[error("unknown translation #{0}")]
    UnknownTranslation(u64),
}

impl StudioError {
    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            StudioError::Config(_) => "STUDIO_001",
            StudioError::Transcription(_) => "STUDIO_002",
            StudioError::Translation { .. } => "STUDIO_003",
            StudioError::SpeechGeneration { .. } => "STUDIO_004",
            StudioError::Busy(_) => "STUDIO_005",
            StudioError::InvalidTransition { .. } => "STUDIO_006",
            StudioError::UnknownTranslation(_) => "STUDIO_007",
        }
    }

    /// Short human-readable message for the error banner.
    ///
    /// Service failures are reduced to a generic message; the details go to
    /// the log.
    pub fn user_message(&self) -> String {
        match self {
            StudioError::Config(ConfigError::MissingApiKey) => format!(
                "API key is not configured. Set one of {} and try again.",
                API_KEY_VARS.join(", ")
            ),
            StudioError::Config(err) => format!("Configuration problem: {err}."),
            StudioError::Transcription(_) => {
                "Failed to transcribe the audio. Please try again.".to_string()
            }
            StudioError::Translation { language, .. } => {
                format!("Failed to translate the text into {language}. Please try again.")
            }
            StudioError::SpeechGeneration { language, .. } => {
                format!("Failed to generate the {language} voiceover. Please try again.")
            }
            other => other.to_string(),
        }
    }
}
