//! Translate command implementation
//!
//! Translates a transcript (or a freshly transcribed recording) into one or
//! more target languages.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use voxdub_studio::{Language, Session};

use super::json_output::{error_codes, CommandOutput, JsonError};
use crate::input::{resolve_languages, settings, Source};
use crate::pipeline::{self, PipelineReport};

/// Run the translate command
///
/// # Arguments
/// * `source` - Recording or transcript to start from
/// * `languages` - Target language names or codes
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every translation succeeded, 1 otherwise
pub fn run(source: &Source, languages: &[String], json_output: bool) -> Result<ExitCode> {
    let languages = match languages_or_report(languages, json_output)? {
        Some(languages) => languages,
        None => return Ok(ExitCode::from(1)),
    };

    if !json_output {
        println!(
            "{} {} into {}",
            "Translating".cyan().bold(),
            source.path().display(),
            language_list(&languages)
        );
        println!();
    }

    let mut session = Session::gemini(settings(None));
    let report = pipeline::run(&mut session, source, &languages, None)?;
    emit(&report, json_output)?;
    Ok(report.exit_code())
}

/// Resolves languages; in JSON mode an unknown one is reported as output.
pub(super) fn languages_or_report(
    names: &[String],
    json_output: bool,
) -> Result<Option<Vec<Language>>> {
    match resolve_languages(names) {
        Ok(languages) => Ok(Some(languages)),
        Err(err) if json_output => {
            let error = JsonError::new(error_codes::UNKNOWN_LANGUAGE, err.to_string());
            CommandOutput::<PipelineReport>::failure(vec![error]).print()?;
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Prints a pipeline report in the requested format.
pub(super) fn emit(report: &PipelineReport, json_output: bool) -> Result<()> {
    if json_output {
        CommandOutput::partial(report.clone(), report.failures.clone()).print()?;
    } else {
        pipeline::print_report(report);
    }
    Ok(())
}

pub(super) fn language_list(languages: &[Language]) -> String {
    languages
        .iter()
        .map(|l| l.name)
        .collect::<Vec<_>>()
        .join(", ")
}
