//! The seam between the session and the external speech service.

use voxdub_audio::digest::FileDigest;

use crate::error::ServiceError;

/// The three calls the workflow makes to the generative speech service.
///
/// Implementations block until the service answers. Each call is a single
/// request with no retry.
pub trait SpeechService {
    /// Transcribes an uploaded recording into English text.
    fn transcribe(&self, audio: &FileDigest) -> Result<String, ServiceError>;

    /// Translates English text into the named language.
    fn translate(&self, text: &str, language: &str) -> Result<String, ServiceError>;

    /// Synthesizes speech for `text`.
    ///
    /// Returns base64-encoded PCM16 mono audio at 24 kHz.
    fn synthesize(&self, text: &str) -> Result<String, ServiceError>;
}
