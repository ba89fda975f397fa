//! The studio workflow run end to end: transcribe (or load a transcript),
//! translate into each requested language, then optionally voice each
//! translation and write the WAV files.
//!
//! Service failures do not abort the run. They are collected into the
//! report next to whatever succeeded, the same way the session keeps prior
//! results when an action fails.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use voxdub_studio::{
    AppState, Language, Session, SpeechService, StudioError, TranslationId, VoiceoverStatus,
};

use crate::commands::json_output::JsonError;
use crate::input::{load_upload, read_transcript, Source};

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Session state when the run ended.
    pub state: AppState,
    /// Input file.
    pub source: String,
    /// MIME type the recording was uploaded as (audio input only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// English transcription, if one was obtained.
    pub transcription: Option<String>,
    /// Successful translations in request order.
    pub translations: Vec<TranslationReport>,
    /// Every failure met along the way.
    #[serde(skip)]
    pub failures: Vec<JsonError>,
    #[serde(skip)]
    voiceover_dir: Option<PathBuf>,
}

/// One translated row.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationReport {
    /// Row id within the session.
    pub id: u64,
    /// Language name.
    pub language: String,
    /// Language code.
    pub code: String,
    /// Translated text.
    pub text: String,
    /// Written voiceover, when one was generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voiceover: Option<VoiceoverReport>,
    /// Banner message of a failed voiceover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voiceover_error: Option<String>,
}

/// A voiceover written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceoverReport {
    /// Output path.
    pub path: PathBuf,
    /// WAV size in bytes.
    pub bytes: usize,
    /// Playback duration in seconds.
    pub duration_seconds: f64,
}

impl PipelineReport {
    fn new(source: &Source) -> Self {
        Self {
            state: AppState::Initial,
            source: source.path().display().to_string(),
            mime_type: None,
            transcription: None,
            translations: Vec::new(),
            failures: Vec::new(),
            voiceover_dir: None,
        }
    }

    /// True when nothing failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Process exit code: 0 when nothing failed, 1 otherwise.
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        }
    }
}

/// Runs the workflow on `session`.
///
/// `voiceover_dir` enables speech generation; each voiceover is written there
/// under its download name. Only local I/O problems (unreadable input,
/// unwritable output) are returned as errors.
pub fn run<S: SpeechService>(
    session: &mut Session<S>,
    source: &Source,
    languages: &[Language],
    voiceover_dir: Option<&Path>,
) -> Result<PipelineReport> {
    let mut report = PipelineReport::new(source);

    match source {
        Source::Audio(path) => {
            let upload = load_upload(path)?;
            report.mime_type = Some(upload.audio.mime_type.clone());
            session.select_file(upload);
            if let Err(err) = session.transcribe() {
                report.failures.push(JsonError::from_studio(&err));
                return Ok(finish(session, report));
            }
        }
        Source::Transcript(path) => {
            let text = read_transcript(path)?;
            if let Err(err) = session.load_transcript(&text) {
                report
                    .failures
                    .push(JsonError::from_studio(&err).with_file(path.display().to_string()));
                return Ok(finish(session, report));
            }
        }
    }

    let mut rows: Vec<TranslationId> = Vec::new();
    for &language in languages {
        match session.translate(language) {
            Ok(id) => rows.push(id),
            Err(err) => {
                report
                    .failures
                    .push(JsonError::from_studio(&err).with_language(language.name));
                if matches!(err, StudioError::Config(_)) {
                    return Ok(finish(session, report));
                }
                // Keep going with the remaining languages.
                session.dismiss_error();
            }
        }
    }

    if let Some(dir) = voiceover_dir {
        for &id in &rows {
            if let Err(err) = session.generate_voiceover(id) {
                let language = session
                    .translation(id)
                    .map(|row| row.language.name)
                    .unwrap_or_default();
                report
                    .failures
                    .push(JsonError::from_studio(&err).with_language(language));
                if matches!(err, StudioError::Config(_)) {
                    break;
                }
            }
        }
        write_voiceovers(session, dir)?;
        report.voiceover_dir = Some(dir.to_path_buf());
    }

    Ok(finish(session, report))
}

fn write_voiceovers<S: SpeechService>(session: &Session<S>, dir: &Path) -> Result<()> {
    for row in session.translations() {
        if let Some(voiceover) = session.voiceover(row.id) {
            let path = voiceover
                .write_to(dir)
                .with_context(|| format!("Failed to write voiceover into {}", dir.display()))?;
            log::info!("wrote {}", path.display());
        }
    }
    Ok(())
}

/// Copies the session's final view into the report.
fn finish<S: SpeechService>(session: &Session<S>, mut report: PipelineReport) -> PipelineReport {
    report.state = session.state();
    report.transcription = session.transcription().map(str::to_string);
    report.translations = session
        .translations()
        .iter()
        .map(|row| {
            let (voiceover, voiceover_error) = match session.voiceover_status(row.id) {
                Some(VoiceoverStatus::Ready(v)) => (
                    Some(VoiceoverReport {
                        path: match &report.voiceover_dir {
                            Some(dir) => dir.join(&v.file_name),
                            None => PathBuf::from(&v.file_name),
                        },
                        bytes: v.wav.len(),
                        duration_seconds: v.duration_seconds(),
                    }),
                    None,
                ),
                Some(VoiceoverStatus::Failed(message)) => (None, Some(message.clone())),
                Some(VoiceoverStatus::Generating) | None => (None, None),
            };
            TranslationReport {
                id: row.id.get(),
                language: row.language.name.to_string(),
                code: row.language.code.to_string(),
                text: row.text.clone(),
                voiceover,
                voiceover_error,
            }
        })
        .collect();
    report
}

/// Prints a report with colored, human-readable output.
pub fn print_report(report: &PipelineReport) {
    if let Some(text) = &report.transcription {
        println!("{}", "Transcription:".cyan().bold());
        println!("  {}", text);
        println!();
    }

    if !report.translations.is_empty() {
        println!("{}", "Translations:".cyan().bold());
        for row in &report.translations {
            println!("  {} {}", format!("{}:", row.language).bold(), row.text);
            if let Some(v) = &row.voiceover {
                println!(
                    "     {} {} ({} bytes, {:.1}s)",
                    "ok".green(),
                    v.path.display(),
                    v.bytes,
                    v.duration_seconds
                );
            }
            if let Some(message) = &row.voiceover_error {
                println!("     {} {}", "!!".red(), message);
            }
        }
        println!();
    }

    for failure in &report.failures {
        let shown_on_row = report.translations.iter().any(|row| {
            row.voiceover_error.is_some() && failure.language.as_deref() == Some(row.language.as_str())
        });
        if shown_on_row {
            continue;
        }
        match &failure.language {
            Some(language) => eprintln!("{} [{}] {}", "error".red().bold(), language, failure.message),
            None => eprintln!("{} {}", "error".red().bold(), failure.message),
        }
    }
}
