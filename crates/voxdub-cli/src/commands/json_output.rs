//! JSON output types for machine-readable CLI output.
//!
//! Every command's `--json` report has the same envelope: a success flag,
//! a list of errors, and a command-specific result.

use serde::{Deserialize, Serialize};
use voxdub_studio::StudioError;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Studio errors pass through their own `STUDIO_XXX` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// Language name or code not recognised
    pub const UNKNOWN_LANGUAGE: &str = "CLI_003";
    /// Input is not a readable WAV file
    pub const INVALID_WAV: &str = "CLI_004";
    /// Input is not valid base64
    pub const INVALID_BASE64: &str = "CLI_005";
    /// Configuration could not be resolved
    pub const CONFIG: &str = "CLI_006";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "STUDIO_003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Target language the error belongs to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Underlying cause, for logs and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
            language: None,
            detail: None,
        }
    }

    /// Converts a studio error, keeping the banner text as the message.
    pub fn from_studio(err: &StudioError) -> Self {
        let mut json = Self::new(err.code(), err.user_message());
        if let Some(source) = std::error::Error::source(err) {
            json.detail = Some(source.to_string());
        }
        json
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the language this error belongs to.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Envelope of every `--json` report.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T: Serialize> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Command result (on success, or partial results)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Successful output.
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Failed output with no result.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }

    /// Output with a result and any errors; succeeds only when there are none.
    pub fn partial(result: T, errors: Vec<JsonError>) -> Self {
        Self {
            success: errors.is_empty(),
            errors,
            result: Some(result),
        }
    }

    /// Prints the report as pretty JSON.
    pub fn print(&self) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxdub_studio::{ConfigError, ServiceError};

    #[test]
    fn test_json_error_serialization() {
        let error = JsonError::new(error_codes::FILE_READ, "cannot read")
            .with_file("memo.wav")
            .with_language("French");

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"CLI_001\""));
        assert!(json.contains("\"file\":\"memo.wav\""));
        assert!(json.contains("\"language\":\"French\""));
        assert!(!json.contains("detail"));
    }

    #[test]
    fn test_from_studio_keeps_banner_and_cause() {
        let err = StudioError::Transcription(ServiceError::Api {
            status: 503,
            message: "overloaded".to_string(),
        });
        let json = JsonError::from_studio(&err);
        assert_eq!(json.code, "STUDIO_002");
        assert_eq!(json.message, "Failed to transcribe the audio. Please try again.");
        assert_eq!(
            json.detail.as_deref(),
            Some("service returned HTTP 503: overloaded")
        );
    }

    #[test]
    fn test_from_studio_config() {
        let json = JsonError::from_studio(&StudioError::Config(ConfigError::MissingApiKey));
        assert_eq!(json.code, "STUDIO_001");
        assert!(json.message.contains("VOXDUB_API_KEY"));
    }

    #[test]
    fn test_output_envelope() {
        let ok = CommandOutput::success(3u32);
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["result"], 3);

        let failed: CommandOutput<u32> =
            CommandOutput::failure(vec![JsonError::new("CLI_004", "bad wav")]);
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("result").is_none());

        let partial = CommandOutput::partial(1u32, vec![JsonError::new("STUDIO_004", "x")]);
        assert!(!partial.success);
        assert!(partial.result.is_some());
    }
}
