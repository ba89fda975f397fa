//! The studio session: view state for transcribe → translate → voiceover.
//!
//! Each service action is split into a `begin_*` transition (checks that the
//! action's control is enabled and marks it in flight) and a `finish_*`
//! transition (applies the outcome). The one-shot methods ([`Session::transcribe`],
//! [`Session::translate`], [`Session::generate_voiceover`]) run both around a
//! blocking service call.
//!
//! Outcomes are applied unconditionally when they land; there is no check
//! that the session still looks the way it did when the request started.
//! Failures keep every result obtained so far.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use voxdub_audio::digest::FileDigest;

use crate::config::{ConfigError, Settings};
use crate::error::{ServiceError, StudioError, StudioResult};
use crate::gemini::GeminiClient;
use crate::language::Language;
use crate::service::SpeechService;
use crate::voiceover::Voiceover;

/// Top-level view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppState {
    /// Nothing transcribed yet.
    Initial,
    /// Transcription request in flight.
    Transcribing,
    /// A transcription is available.
    Transcribed,
    /// Translation request in flight.
    Translating,
    /// The last session-level action failed; see the banner.
    Error,
}

impl AppState {
    /// Lowercase name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Initial => "initial",
            AppState::Transcribing => "transcribing",
            AppState::Transcribed => "transcribed",
            AppState::Translating => "translating",
            AppState::Error => "error",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a translation row. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TranslationId(u64);

impl TranslationId {
    /// Numeric value of the id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TranslationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The selected audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Display name of the file.
    pub name: String,
    /// Contents prepared for the transcription request.
    pub audio: FileDigest,
}

/// One translated version of the transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Row identifier.
    pub id: TranslationId,
    /// Target language.
    pub language: Language,
    /// Translated text.
    pub text: String,
}

/// Voiceover progress for one translation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceoverStatus {
    /// Speech request in flight; the row's generate control is disabled.
    Generating,
    /// Voiceover ready to play or download.
    Ready(Voiceover),
    /// Generation failed; message for this row only.
    Failed(String),
}

/// Payload of an in-flight transcription.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// Audio to transcribe.
    pub audio: FileDigest,
}

/// Payload of an in-flight translation.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// Target language.
    pub language: Language,
    /// English source text.
    pub text: String,
}

/// Payload of an in-flight voiceover.
#[derive(Debug, Clone)]
pub struct VoiceoverRequest {
    /// Row being voiced.
    pub id: TranslationId,
    /// Its language.
    pub language: Language,
    /// Text to speak.
    pub text: String,
}

type Connector<S> = Box<dyn Fn(&Settings) -> S>;

/// Workflow state plus a lazily connected speech service.
pub struct Session<S> {
    settings: Result<Settings, ConfigError>,
    connector: Connector<S>,
    client: Option<S>,
    state: AppState,
    transcribing: bool,
    translating: bool,
    upload: Option<Upload>,
    transcription: Option<String>,
    translations: Vec<Translation>,
    voiceovers: HashMap<TranslationId, VoiceoverStatus>,
    banner: Option<String>,
    next_id: u64,
}

impl Session<GeminiClient> {
    /// A session backed by the Gemini REST client.
    pub fn gemini(settings: Result<Settings, ConfigError>) -> Self {
        Self::new(settings, GeminiClient::new)
    }
}

impl<S: SpeechService> Session<S> {
    /// Creates a session.
    ///
    /// `connect` builds the service client the first time an action needs it.
    /// When `settings` is an error, no client is ever built and every service
    /// action fails with that configuration error.
    pub fn new<F>(settings: Result<Settings, ConfigError>, connect: F) -> Self
    where
        F: Fn(&Settings) -> S + 'static,
    {
        Self {
            settings,
            connector: Box::new(connect),
            client: None,
            state: AppState::Initial,
            transcribing: false,
            translating: false,
            upload: None,
            transcription: None,
            translations: Vec::new(),
            voiceovers: HashMap::new(),
            banner: None,
            next_id: 1,
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Current view state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Error banner text, if one is showing.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Selected file.
    pub fn upload(&self) -> Option<&Upload> {
        self.upload.as_ref()
    }

    /// Current transcription.
    pub fn transcription(&self) -> Option<&str> {
        self.transcription.as_deref()
    }

    /// Translation rows in creation order.
    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    /// Looks up a translation row.
    pub fn translation(&self, id: TranslationId) -> Option<&Translation> {
        self.translations.iter().find(|t| t.id == id)
    }

    /// Voiceover progress for a row, if generation was ever started.
    pub fn voiceover_status(&self, id: TranslationId) -> Option<&VoiceoverStatus> {
        self.voiceovers.get(&id)
    }

    /// The finished voiceover for a row.
    pub fn voiceover(&self, id: TranslationId) -> Option<&Voiceover> {
        match self.voiceovers.get(&id) {
            Some(VoiceoverStatus::Ready(voiceover)) => Some(voiceover),
            _ => None,
        }
    }

    /// Whether the service client has been built.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Whether the transcribe control is enabled.
    pub fn can_transcribe(&self) -> bool {
        self.upload.is_some() && !self.transcribing
    }

    /// Whether the translate control is enabled.
    pub fn can_translate(&self) -> bool {
        self.transcription.is_some() && !self.translating
    }

    /// Whether a row's generate control is enabled.
    pub fn can_generate_voiceover(&self, id: TranslationId) -> bool {
        self.translation(id).is_some()
            && !matches!(self.voiceovers.get(&id), Some(VoiceoverStatus::Generating))
    }

    // ---------------------------------------------------------------------
    // Local transitions
    // ---------------------------------------------------------------------

    /// Selects a new file, discarding results derived from the previous one.
    pub fn select_file(&mut self, upload: Upload) {
        log::info!(
            "selected {} ({} bytes, {})",
            upload.name,
            upload.audio.size,
            upload.audio.mime_type
        );
        self.upload = Some(upload);
        self.transcription = None;
        self.clear_translations();
        self.banner = None;
        self.state = AppState::Initial;
    }

    /// Uses `text` as the transcription without calling the service.
    pub fn load_transcript(&mut self, text: &str) -> StudioResult<()> {
        if self.transcribing {
            return Err(StudioError::Busy("transcription"));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(StudioError::InvalidTransition {
                action: "load a transcript",
                state: "the text is empty",
            });
        }
        self.transcription = Some(text.to_string());
        self.clear_translations();
        self.banner = None;
        self.state = AppState::Transcribed;
        Ok(())
    }

    /// Hides the error banner and leaves the error state.
    pub fn dismiss_error(&mut self) {
        self.banner = None;
        if self.state == AppState::Error {
            self.state = self.settled();
        }
    }

    // ---------------------------------------------------------------------
    // Transcription
    // ---------------------------------------------------------------------

    /// Starts transcribing the selected file.
    pub fn begin_transcription(&mut self) -> StudioResult<TranscriptionRequest> {
        if self.transcribing {
            return Err(StudioError::Busy("transcription"));
        }
        let audio = match &self.upload {
            Some(upload) => upload.audio.clone(),
            None => {
                return Err(StudioError::InvalidTransition {
                    action: "transcribe",
                    state: "no file is selected",
                })
            }
        };
        self.connect()?;
        self.banner = None;
        self.transcribing = true;
        self.state = AppState::Transcribing;
        Ok(TranscriptionRequest { audio })
    }

    /// Applies a transcription outcome.
    ///
    /// Success replaces the transcription and drops translations made from
    /// the old one. Failure keeps everything and raises the banner.
    pub fn finish_transcription(
        &mut self,
        result: Result<String, ServiceError>,
    ) -> StudioResult<String> {
        self.transcribing = false;
        match result {
            Ok(text) => {
                log::info!("transcribed {} characters", text.len());
                self.transcription = Some(text.clone());
                self.clear_translations();
                self.state = self.settled();
                Ok(text)
            }
            Err(source) => Err(self.fail(StudioError::Transcription(source))),
        }
    }

    /// Transcribes the selected file.
    pub fn transcribe(&mut self) -> StudioResult<String> {
        let request = self.begin_transcription()?;
        let result = self.service()?.transcribe(&request.audio);
        self.finish_transcription(result)
    }

    // ---------------------------------------------------------------------
    // Translation
    // ---------------------------------------------------------------------

    /// Starts translating the transcription into `language`.
    pub fn begin_translation(&mut self, language: Language) -> StudioResult<TranslationRequest> {
        if self.translating {
            return Err(StudioError::Busy("translation"));
        }
        let text = match &self.transcription {
            Some(text) => text.clone(),
            None => {
                return Err(StudioError::InvalidTransition {
                    action: "translate",
                    state: "nothing has been transcribed",
                })
            }
        };
        self.connect()?;
        self.banner = None;
        self.translating = true;
        self.state = AppState::Translating;
        Ok(TranslationRequest { language, text })
    }

    /// Applies a translation outcome.
    ///
    /// A second translation into the same language replaces the row's text
    /// (keeping its id) and discards the row's old voiceover.
    pub fn finish_translation(
        &mut self,
        language: Language,
        result: Result<String, ServiceError>,
    ) -> StudioResult<TranslationId> {
        self.translating = false;
        let text = match result {
            Ok(text) => text,
            Err(source) => {
                return Err(self.fail(StudioError::Translation {
                    language: language.name.to_string(),
                    source,
                }))
            }
        };

        let id = match self.translations.iter_mut().find(|t| t.language == language) {
            Some(row) => {
                row.text = text;
                self.voiceovers.remove(&row.id);
                row.id
            }
            None => {
                let id = TranslationId(self.next_id);
                self.next_id += 1;
                self.translations.push(Translation { id, language, text });
                id
            }
        };

        log::info!("translated into {language} as row {id}");
        self.state = self.settled();
        Ok(id)
    }

    /// Translates the transcription into `language`.
    pub fn translate(&mut self, language: Language) -> StudioResult<TranslationId> {
        let request = self.begin_translation(language)?;
        let result = self
            .service()?
            .translate(&request.text, request.language.name);
        self.finish_translation(language, result)
    }

    // ---------------------------------------------------------------------
    // Voiceover
    // ---------------------------------------------------------------------

    /// Starts generating speech for one translation row.
    pub fn begin_voiceover(&mut self, id: TranslationId) -> StudioResult<VoiceoverRequest> {
        let request = match self.translation(id) {
            Some(row) => VoiceoverRequest {
                id,
                language: row.language,
                text: row.text.clone(),
            },
            None => return Err(StudioError::UnknownTranslation(id.get())),
        };
        if matches!(self.voiceovers.get(&id), Some(VoiceoverStatus::Generating)) {
            return Err(StudioError::Busy("voiceover generation"));
        }
        self.connect()?;
        self.voiceovers.insert(id, VoiceoverStatus::Generating);
        Ok(request)
    }

    /// Applies a speech outcome to its row.
    ///
    /// Failures are recorded on the row only; the session state and banner
    /// are untouched. An outcome for a row that no longer exists is dropped.
    pub fn finish_voiceover(
        &mut self,
        id: TranslationId,
        result: Result<String, ServiceError>,
    ) -> StudioResult<()> {
        let language = match self.translation(id) {
            Some(row) => row.language,
            None => {
                log::debug!("dropping voiceover for removed translation {id}");
                return Err(StudioError::UnknownTranslation(id.get()));
            }
        };

        match result.and_then(|audio| Voiceover::from_base64(language, &audio)) {
            Ok(voiceover) => {
                log::info!(
                    "voiceover for {language} ready ({:.1}s)",
                    voiceover.duration_seconds()
                );
                self.voiceovers.insert(id, VoiceoverStatus::Ready(voiceover));
                Ok(())
            }
            Err(source) => {
                let err = StudioError::SpeechGeneration {
                    language: language.name.to_string(),
                    source,
                };
                log::error!("{err}");
                self.voiceovers
                    .insert(id, VoiceoverStatus::Failed(err.user_message()));
                Err(err)
            }
        }
    }

    /// Generates the voiceover for one translation row.
    pub fn generate_voiceover(&mut self, id: TranslationId) -> StudioResult<()> {
        let request = self.begin_voiceover(id)?;
        let result = self.service()?.synthesize(&request.text);
        self.finish_voiceover(id, result)
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    /// Builds the client on first use.
    fn connect(&mut self) -> StudioResult<()> {
        if self.client.is_some() {
            return Ok(());
        }
        match &self.settings {
            Ok(settings) => {
                log::debug!("connecting to {}", settings.base_url);
                self.client = Some((self.connector)(settings));
                Ok(())
            }
            Err(err) => {
                let err = StudioError::Config(err.clone());
                Err(self.fail(err))
            }
        }
    }

    fn service(&self) -> StudioResult<&S> {
        self.client.as_ref().ok_or(StudioError::InvalidTransition {
            action: "call the speech service",
            state: "not connected",
        })
    }

    /// Raises the banner and enters the error state, keeping all results.
    fn fail(&mut self, err: StudioError) -> StudioError {
        log::error!("{err}");
        self.banner = Some(err.user_message());
        self.state = AppState::Error;
        err
    }

    /// View state once no error is showing: an action still in flight wins,
    /// otherwise whether a transcription exists.
    fn settled(&self) -> AppState {
        if self.transcribing {
            AppState::Transcribing
        } else if self.translating {
            AppState::Translating
        } else if self.transcription.is_some() {
            AppState::Transcribed
        } else {
            AppState::Initial
        }
    }

    fn clear_translations(&mut self) {
        self.translations.clear();
        self.voiceovers.clear();
    }
}
