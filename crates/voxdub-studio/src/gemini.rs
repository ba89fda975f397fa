//! Gemini REST client implementing [`SpeechService`].
//!
//! All three calls go through `models/{model}:generateContent`. Text answers
//! come back as `text` parts; synthesized speech comes back as an
//! `inlineData` part holding base64 PCM16 at 24 kHz.

use serde::Deserialize;
use serde_json::{json, Value};
use voxdub_audio::digest::FileDigest;

use crate::config::Settings;
use crate::error::ServiceError;
use crate::service::SpeechService;

/// Largest response body accepted. Speech for a long paragraph runs to a few MB of base64.
const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

const TRANSCRIBE_PROMPT: &str =
    "Transcribe this audio recording into English text. Respond with the transcription only, without any commentary.";

/// Blocking client for the Gemini `generateContent` endpoint.
///
/// Constructed once per session on first use and reused for every call.
pub struct GeminiClient {
    agent: ureq::Agent,
    settings: Settings,
}

impl GeminiClient {
    /// Creates a client from resolved settings.
    pub fn new(settings: &Settings) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(settings.timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            settings: settings.clone(),
        }
    }

    /// Settings this client was built with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            model
        )
    }

    fn generate(&self, model: &str, body: &Value) -> Result<GenerateResponse, ServiceError> {
        let url = self.endpoint(model);
        log::debug!("POST {url}");

        let mut response = self
            .agent
            .post(&url)
            .header("x-goog-api-key", self.settings.api_key.expose())
            .send_json(body)
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_string()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        log::debug!("{model} answered with {} bytes", text.len());
        serde_json::from_str(&text).map_err(|e| ServiceError::MalformedResponse(e.to_string()))
    }
}

impl SpeechService for GeminiClient {
    fn transcribe(&self, audio: &FileDigest) -> Result<String, ServiceError> {
        let body = transcription_request(audio);
        self.generate(&self.settings.text_model, &body)?
            .text()
            .ok_or(ServiceError::EmptyResponse("transcription text"))
    }

    fn translate(&self, text: &str, language: &str) -> Result<String, ServiceError> {
        let body = translation_request(text, language);
        self.generate(&self.settings.text_model, &body)?
            .text()
            .ok_or(ServiceError::EmptyResponse("translation text"))
    }

    fn synthesize(&self, text: &str) -> Result<String, ServiceError> {
        let body = speech_request(text, &self.settings.voice);
        self.generate(&self.settings.tts_model, &body)?
            .audio_data()
            .map(str::to_string)
            .ok_or(ServiceError::EmptyResponse("audio"))
    }
}

/// Request body for transcribing an upload.
pub fn transcription_request(audio: &FileDigest) -> Value {
    json!({
        "contents": [{
            "parts": [
                { "inlineData": { "mimeType": audio.mime_type, "data": audio.base64 } },
                { "text": TRANSCRIBE_PROMPT }
            ]
        }]
    })
}

/// Request body for translating English text.
pub fn translation_request(text: &str, language: &str) -> Value {
    let prompt = format!(
        "Translate the following English text into {language}. \
         Respond with the translation only, without any commentary.\n\n{text}"
    );
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    })
}

/// Request body for synthesizing speech with a prebuilt voice.
pub fn speech_request(text: &str, voice: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": text }] }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": voice }
                }
            }
        }
    })
}

/// Pulls `error.message` out of an error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

/// The parts of a `generateContent` response this client reads.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// Concatenated text of the first candidate, trimmed; `None` when blank.
    pub fn text(&self) -> Option<String> {
        let joined: String = self.parts().filter_map(|p| p.text.as_deref()).collect();
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Base64 audio of the first inline-data part of the first candidate.
    pub fn audio_data(&self) -> Option<&str> {
        self.parts()
            .filter_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
            .find(|d| !d.is_empty())
    }
}
