//! Transcribe command implementation
//!
//! Transcribes one audio recording into English text.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use voxdub_studio::Session;

use super::json_output::{error_codes, CommandOutput, JsonError};
use crate::input::{settings, Source};
use crate::pipeline::{self, PipelineReport};

/// Run the transcribe command
///
/// # Arguments
/// * `input` - Audio recording to transcribe
/// * `output` - Optional file to write the transcript to
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input: &Path, output: Option<&Path>, json_output: bool) -> Result<ExitCode> {
    let mut session = Session::gemini(settings(None));
    let source = Source::Audio(input.to_path_buf());

    if !json_output {
        println!("{} {}", "Transcribing".cyan().bold(), input.display());
    }

    let mut report = pipeline::run(&mut session, &source, &[], None)?;

    if let (Some(path), Some(text)) = (output, report.transcription.as_deref()) {
        if let Err(err) = fs::write(path, format!("{text}\n")) {
            if !json_output {
                return Err(err)
                    .with_context(|| format!("Failed to write transcript: {}", path.display()));
            }
            report.failures.push(
                JsonError::new(error_codes::FILE_WRITE, err.to_string())
                    .with_file(path.display().to_string()),
            );
        }
    }

    if json_output {
        let errors = report.failures.clone();
        CommandOutput::partial(report.clone(), errors).print()?;
    } else {
        print_human(&report, output);
    }

    Ok(report.exit_code())
}

fn print_human(report: &PipelineReport, output: Option<&Path>) {
    if let Some(mime) = &report.mime_type {
        println!("  {} {}", "Uploaded as".dimmed(), mime);
    }
    println!();
    pipeline::print_report(report);
    if let (Some(path), true) = (output, report.transcription.is_some()) {
        println!("{} {}", "Wrote".green(), path.display());
    }
}
