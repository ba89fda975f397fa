//! Voiceover command implementation
//!
//! Runs the whole workflow: transcribe (unless a transcript is given),
//! translate into each language, synthesize speech for every translation
//! and write `<Language>_voiceover.wav` files.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use voxdub_studio::Session;

use super::translate::{emit, language_list, languages_or_report};
use crate::input::{settings, Source};
use crate::pipeline;

/// Run the voiceover command
///
/// # Arguments
/// * `source` - Recording or transcript to start from
/// * `languages` - Target language names or codes
/// * `out_dir` - Directory for the WAV files (created if missing)
/// * `voice` - Prebuilt voice override
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every step succeeded, 1 otherwise
pub fn run(
    source: &Source,
    languages: &[String],
    out_dir: &Path,
    voice: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let languages = match languages_or_report(languages, json_output)? {
        Some(languages) => languages,
        None => return Ok(ExitCode::from(1)),
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    if !json_output {
        println!(
            "{} {} into {}",
            "Voicing".cyan().bold(),
            source.path().display(),
            language_list(&languages)
        );
        println!("  {} {}", "Output:".dimmed(), out_dir.display());
        println!();
    }

    let mut session = Session::gemini(settings(voice));
    let report = pipeline::run(&mut session, source, &languages, Some(out_dir))?;
    emit(&report, json_output)?;
    Ok(report.exit_code())
}
