//! Session workflow tests against a scripted speech service.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use voxdub_audio::digest::{digest_bytes, FileDigest};
use voxdub_audio::wav::extract_pcm_data;
use voxdub_studio::{
    ApiKey, AppState, ConfigError, Language, ServiceError, Session, Settings, SpeechService,
    StudioError, Upload, VoiceoverStatus,
};

/// Calls observed by the scripted service.
#[derive(Default)]
struct Calls {
    transcribe: Cell<usize>,
    translate: RefCell<Vec<String>>,
    synthesize: RefCell<Vec<String>>,
}

/// Answers each call from a queue of canned results.
struct ScriptedService {
    calls: Rc<Calls>,
    transcripts: RefCell<VecDeque<Result<String, ServiceError>>>,
    translations: RefCell<VecDeque<Result<String, ServiceError>>>,
    speech: RefCell<VecDeque<Result<String, ServiceError>>>,
}

impl SpeechService for ScriptedService {
    fn transcribe(&self, _audio: &FileDigest) -> Result<String, ServiceError> {
        self.calls.transcribe.set(self.calls.transcribe.get() + 1);
        self.transcripts
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ServiceError::EmptyResponse("script")))
    }

    fn translate(&self, text: &str, language: &str) -> Result<String, ServiceError> {
        self.calls
            .translate
            .borrow_mut()
            .push(format!("{language}: {text}"));
        self.translations
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ServiceError::EmptyResponse("script")))
    }

    fn synthesize(&self, text: &str) -> Result<String, ServiceError> {
        self.calls.synthesize.borrow_mut().push(text.to_string());
        self.speech
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ServiceError::EmptyResponse("script")))
    }
}

#[derive(Default)]
struct Script {
    transcripts: Vec<Result<String, ServiceError>>,
    translations: Vec<Result<String, ServiceError>>,
    speech: Vec<Result<String, ServiceError>>,
}

struct Harness {
    session: Session<ScriptedService>,
    calls: Rc<Calls>,
    connects: Rc<Cell<usize>>,
}

fn harness(settings: Result<Settings, ConfigError>, script: Script) -> Harness {
    let calls = Rc::new(Calls::default());
    let connects = Rc::new(Cell::new(0));
    let script = RefCell::new(Some(script));

    let session = {
        let calls = Rc::clone(&calls);
        let connects = Rc::clone(&connects);
        Session::new(settings, move |_settings: &Settings| {
            connects.set(connects.get() + 1);
            let script = script.borrow_mut().take().unwrap_or_default();
            ScriptedService {
                calls: Rc::clone(&calls),
                transcripts: RefCell::new(script.transcripts.into()),
                translations: RefCell::new(script.translations.into()),
                speech: RefCell::new(script.speech.into()),
            }
        })
    };

    Harness {
        session,
        calls,
        connects,
    }
}

fn configured() -> Result<Settings, ConfigError> {
    Ok(Settings::with_api_key(ApiKey::new("test-key")))
}

fn upload() -> Upload {
    Upload {
        name: "memo.wav".to_string(),
        audio: digest_bytes(&[0, 1, 2, 3], Some(Path::new("memo.wav"))),
    }
}

fn lang(name: &str) -> Language {
    Language::find(name).unwrap()
}

fn api_error() -> ServiceError {
    ServiceError::Api {
        status: 503,
        message: "overloaded".to_string(),
    }
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_transcribe_without_credential_never_calls_service() {
    let mut h = harness(Err(ConfigError::MissingApiKey), Script::default());
    h.session.select_file(upload());

    let err = h.session.transcribe().unwrap_err();

    assert_eq!(err, StudioError::Config(ConfigError::MissingApiKey));
    assert_eq!(h.session.state(), AppState::Error);
    assert!(h
        .session
        .banner()
        .unwrap()
        .contains("API key is not configured"));
    assert_eq!(h.connects.get(), 0);
    assert_eq!(h.calls.transcribe.get(), 0);
    assert!(!h.session.is_connected());
}

#[test]
fn test_client_is_built_once_on_first_use() {
    let mut h = harness(
        configured(),
        Script {
            transcripts: vec![Ok("Hello".into())],
            translations: vec![Ok("Hola".into()), Ok("Bonjour".into())],
            ..Script::default()
        },
    );
    h.session.select_file(upload());
    assert_eq!(h.connects.get(), 0);

    h.session.transcribe().unwrap();
    h.session.translate(lang("Spanish")).unwrap();
    h.session.translate(lang("French")).unwrap();

    assert_eq!(h.connects.get(), 1);
}

// =========================================================================
// Happy path
// =========================================================================

#[test]
fn test_full_workflow() {
    let mut h = harness(
        configured(),
        Script {
            transcripts: vec![Ok("Good morning".into())],
            translations: vec![Ok("Buenos días".into())],
            speech: vec![Ok("AAEC/w==".into())],
        },
    );
    assert_eq!(h.session.state(), AppState::Initial);
    assert!(!h.session.can_transcribe());

    h.session.select_file(upload());
    assert!(h.session.can_transcribe());
    assert!(!h.session.can_translate());

    let text = h.session.transcribe().unwrap();
    assert_eq!(text, "Good morning");
    assert_eq!(h.session.state(), AppState::Transcribed);
    assert_eq!(h.session.transcription(), Some("Good morning"));

    let id = h.session.translate(lang("es")).unwrap();
    assert_eq!(h.session.state(), AppState::Transcribed);
    assert_eq!(
        h.calls.translate.borrow().as_slice(),
        &["Spanish: Good morning".to_string()]
    );
    let row = h.session.translation(id).unwrap();
    assert_eq!(row.text, "Buenos días");

    h.session.generate_voiceover(id).unwrap();
    assert_eq!(
        h.calls.synthesize.borrow().as_slice(),
        &["Buenos días".to_string()]
    );
    let voiceover = h.session.voiceover(id).unwrap();
    assert_eq!(voiceover.file_name, "Spanish_voiceover.wav");
    assert_eq!(extract_pcm_data(&voiceover.wav), Some(&[0u8, 1, 2, 255][..]));
    assert_eq!(h.session.banner(), None);
}

#[test]
fn test_retranslating_a_language_replaces_its_row() {
    let mut h = harness(
        configured(),
        Script {
            transcripts: vec![Ok("Hi".into())],
            translations: vec![Ok("Salut".into()), Ok("Bonjour".into())],
            speech: vec![Ok("AAEC".into())],
        },
    );
    h.session.select_file(upload());
    h.session.transcribe().unwrap();

    let first = h.session.translate(lang("French")).unwrap();
    h.session.generate_voiceover(first).unwrap();
    let second = h.session.translate(lang("French")).unwrap();

    assert_eq!(first, second);
    assert_eq!(h.session.translations().len(), 1);
    assert_eq!(h.session.translations()[0].text, "Bonjour");
    assert_eq!(h.session.voiceover_status(first), None);
}

#[test]
fn test_selecting_new_file_discards_results() {
    let mut h = harness(
        configured(),
        Script {
            transcripts: vec![Ok("One".into())],
            translations: vec![Ok("Uno".into())],
            ..Script::default()
        },
    );
    h.session.select_file(upload());
    h.session.transcribe().unwrap();
    h.session.translate(lang("Spanish")).unwrap();

    h.session.select_file(upload());

    assert_eq!(h.session.state(), AppState::Initial);
    assert_eq!(h.session.transcription(), None);
    assert!(h.session.translations().is_empty());
}

#[test]
fn test_load_transcript_skips_transcription() {
    let mut h = harness(
        configured(),
        Script {
            translations: vec![Ok("Hallo".into())],
            ..Script::default()
        },
    );
    h.session.load_transcript("  Hello  ").unwrap();
    assert_eq!(h.session.state(), AppState::Transcribed);
    assert_eq!(h.session.transcription(), Some("Hello"));

    h.session.translate(lang("German")).unwrap();
    assert_eq!(h.calls.transcribe.get(), 0);

    assert!(matches!(
        h.session.load_transcript("   "),
        Err(StudioError::InvalidTransition { .. })
    ));
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn test_transcription_failure_sets_error_state() {
    let mut h = harness(
        configured(),
        Script {
            transcripts: vec![Err(api_error())],
            ..Script::default()
        },
    );
    h.session.select_file(upload());

    let err = h.session.transcribe().unwrap_err();
    assert!(matches!(err, StudioError::Transcription(ServiceError::Api { status: 503, .. })));
    assert_eq!(h.session.state(), AppState::Error);
    let banner = h.session.banner().unwrap();
    assert!(banner.contains("transcribe"));
    assert!(!banner.contains("overloaded"));

    h.session.dismiss_error();
    assert_eq!(h.session.banner(), None);
    assert_eq!(h.session.state(), AppState::Initial);
    assert!(h.session.can_transcribe());
}

#[test]
fn test_translation_failure_keeps_prior_results() {
    let mut h = harness(
        configured(),
        Script {
            transcripts: vec![Ok("Thanks".into())],
            translations: vec![Ok("Gracias".into()), Err(api_error())],
            ..Script::default()
        },
    );
    h.session.select_file(upload());
    h.session.transcribe().unwrap();
    let spanish = h.session.translate(lang("Spanish")).unwrap();

    let err = h.session.translate(lang("Japanese")).unwrap_err();
    assert!(matches!(err, StudioError::Translation { ref language, .. } if language == "Japanese"));
    assert_eq!(h.session.state(), AppState::Error);
    assert!(h.session.banner().unwrap().contains("Japanese"));

    assert_eq!(h.session.transcription(), Some("Thanks"));
    assert_eq!(h.session.translations().len(), 1);
    assert_eq!(h.session.translation(spanish).unwrap().text, "Gracias");

    h.session.dismiss_error();
    assert_eq!(h.session.state(), AppState::Transcribed);
    assert!(h.session.can_translate());
}

#[test]
fn test_voiceover_failure_is_scoped_to_its_row() {
    let mut h = harness(
        configured(),
        Script {
            transcripts: vec![Ok("Welcome".into())],
            translations: vec![Ok("Bienvenido".into()), Ok("Bienvenue".into())],
            speech: vec![Err(api_error()), Ok("AAEC".into())],
        },
    );
    h.session.select_file(upload());
    h.session.transcribe().unwrap();
    let spanish = h.session.translate(lang("Spanish")).unwrap();
    let french = h.session.translate(lang("French")).unwrap();

    let err = h.session.generate_voiceover(spanish).unwrap_err();
    assert!(matches!(err, StudioError::SpeechGeneration { .. }));
    h.session.generate_voiceover(french).unwrap();

    match h.session.voiceover_status(spanish) {
        Some(VoiceoverStatus::Failed(message)) => assert!(message.contains("Spanish")),
        other => panic!("unexpected status: {other:?}"),
    }
    assert!(h.session.voiceover(french).is_some());

    // Session-level state is untouched by a row failure.
    assert_eq!(h.session.state(), AppState::Transcribed);
    assert_eq!(h.session.banner(), None);
}

#[test]
fn test_malformed_audio_fails_the_row() {
    let mut h = harness(
        configured(),
        Script {
            transcripts: vec![Ok("Hi".into())],
            translations: vec![Ok("Ciao".into())],
            speech: vec![Ok("%%%".into())],
        },
    );
    h.session.select_file(upload());
    h.session.transcribe().unwrap();
    let id = h.session.translate(lang("Italian")).unwrap();

    let err = h.session.generate_voiceover(id).unwrap_err();
    assert!(matches!(
        err,
        StudioError::SpeechGeneration {
            source: ServiceError::InvalidAudio(_),
            ..
        }
    ));
    assert!(matches!(
        h.session.voiceover_status(id),
        Some(VoiceoverStatus::Failed(_))
    ));
}

// =========================================================================
// Disabled controls
// =========================================================================

#[test]
fn test_transcribe_requires_a_file() {
    let mut h = harness(configured(), Script::default());
    assert!(matches!(
        h.session.transcribe(),
        Err(StudioError::InvalidTransition { .. })
    ));
    assert_eq!(h.connects.get(), 0);
}

#[test]
fn test_translate_requires_transcription() {
    let mut h = harness(configured(), Script::default());
    h.session.select_file(upload());
    assert!(matches!(
        h.session.translate(lang("Spanish")),
        Err(StudioError::InvalidTransition { .. })
    ));
}

#[test]
fn test_in_flight_actions_reject_duplicates() {
    let mut h = harness(configured(), Script::default());
    h.session.select_file(upload());

    h.session.begin_transcription().unwrap();
    assert_eq!(h.session.state(), AppState::Transcribing);
    assert!(!h.session.can_transcribe());
    assert_eq!(
        h.session.begin_transcription().unwrap_err(),
        StudioError::Busy("transcription")
    );
    h.session.finish_transcription(Ok("Hello".into())).unwrap();

    let request = h.session.begin_translation(lang("Korean")).unwrap();
    assert_eq!(request.text, "Hello");
    assert_eq!(
        h.session.begin_translation(lang("Thai")).unwrap_err(),
        StudioError::Busy("translation")
    );
    let id = h
        .session
        .finish_translation(request.language, Ok("안녕하세요".into()))
        .unwrap();

    h.session.begin_voiceover(id).unwrap();
    assert!(!h.session.can_generate_voiceover(id));
    assert_eq!(
        h.session.begin_voiceover(id).unwrap_err(),
        StudioError::Busy("voiceover generation")
    );
    h.session.finish_voiceover(id, Ok("AAEC".into())).unwrap();
    assert!(h.session.can_generate_voiceover(id));

    // Nothing went through the service: every outcome was supplied directly.
    assert_eq!(h.calls.transcribe.get(), 0);
}

#[test]
fn test_transcription_stays_busy_while_translating() {
    let mut h = harness(configured(), Script::default());
    h.session.select_file(upload());
    h.session.begin_transcription().unwrap();
    h.session.finish_transcription(Ok("Hello".into())).unwrap();

    // Re-transcribe, then translate the current text while that runs.
    h.session.begin_transcription().unwrap();
    let request = h.session.begin_translation(lang("French")).unwrap();
    assert_eq!(h.session.state(), AppState::Translating);
    assert!(!h.session.can_transcribe());
    assert_eq!(
        h.session.begin_transcription().unwrap_err(),
        StudioError::Busy("transcription")
    );
    assert_eq!(
        h.session.load_transcript("typed").unwrap_err(),
        StudioError::Busy("transcription")
    );

    // The translation lands first; the transcription is still pending.
    h.session
        .finish_translation(request.language, Ok("Bonjour".into()))
        .unwrap();
    assert_eq!(h.session.state(), AppState::Transcribing);
    assert!(h.session.can_translate());
    assert!(!h.session.can_transcribe());

    h.session.finish_transcription(Ok("Hello again".into())).unwrap();
    assert_eq!(h.session.state(), AppState::Transcribed);
    assert!(h.session.can_transcribe());
    assert!(h.session.translations().is_empty());
}

#[test]
fn test_unknown_translation() {
    let mut h = harness(configured(), Script::default());
    h.session.load_transcript("Hi").unwrap();
    let request = h.session.begin_translation(lang("Dutch")).unwrap();
    let id = h
        .session
        .finish_translation(request.language, Ok("Hoi".into()))
        .unwrap();

    h.session.begin_voiceover(id).unwrap();
    // The row disappears while its request is in flight; the late result is dropped.
    h.session.load_transcript("Something else").unwrap();
    assert_eq!(
        h.session.finish_voiceover(id, Ok("AAEC".into())).unwrap_err(),
        StudioError::UnknownTranslation(id.get())
    );
    assert_eq!(h.session.voiceover_status(id), None);
}

#[test]
fn test_late_transcription_lands_unconditionally() {
    let mut h = harness(configured(), Script::default());
    h.session.select_file(upload());
    h.session.begin_transcription().unwrap();

    // User picks another file while the first request is still running.
    h.session.select_file(upload());
    assert_eq!(h.session.state(), AppState::Initial);

    h.session.finish_transcription(Ok("stale".into())).unwrap();
    assert_eq!(h.session.transcription(), Some("stale"));
    assert_eq!(h.session.state(), AppState::Transcribed);
}
