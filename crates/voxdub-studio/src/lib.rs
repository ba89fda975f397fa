//! voxdub Studio
//!
//! The workflow behind voxdub: upload a short English recording, transcribe
//! it, translate the transcription into one or more languages, and voice each
//! translation as a downloadable WAV file.
//!
//! All speech work is delegated to a generative speech service behind the
//! [`SpeechService`] trait; [`GeminiClient`] is the production implementation.
//! [`Session`] holds the view state and enforces which actions are
//! available.
//!
//! # Example
//!
//! ```no_run
//! use voxdub_audio::digest::digest_file;
//! use voxdub_studio::{Language, Session, Settings, Upload};
//!
//! let mut session = Session::gemini(Settings::from_env());
//! let audio = digest_file("memo.m4a".as_ref())?;
//! session.select_file(Upload { name: "memo.m4a".into(), audio });
//!
//! session.transcribe()?;
//! let id = session.translate(Language::find("French").unwrap())?;
//! session.generate_voiceover(id)?;
//!
//! let voiceover = session.voiceover(id).unwrap();
//! voiceover.write_to(".".as_ref())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`config`] - settings resolved from the environment
//! - [`error`] - error taxonomy and banner messages
//! - [`gemini`] - REST client for the speech service
//! - [`language`] - translation targets and download naming
//! - [`service`] - the speech service seam
//! - [`session`] - the view-state machine
//! - [`voiceover`] - generated WAV artifacts

pub mod config;
pub mod error;
pub mod gemini;
pub mod language;
pub mod service;
pub mod session;
pub mod voiceover;

pub use config::{ApiKey, ConfigError, Settings};
pub use error::{ServiceError, StudioError, StudioResult};
pub use gemini::GeminiClient;
pub use language::{voiceover_file_name, Language, LANGUAGES};
pub use service::SpeechService;
pub use session::{AppState, Session, Translation, TranslationId, Upload, VoiceoverStatus};
pub use voiceover::Voiceover;
