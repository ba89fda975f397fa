//! Languages command implementation

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use voxdub_studio::LANGUAGES;

use super::json_output::CommandOutput;

/// One supported language.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageEntry {
    /// Code accepted by `--language`
    pub code: &'static str,
    /// Display name, also accepted by `--language`
    pub name: &'static str,
    /// Name of the generated voiceover file
    pub voiceover_file: String,
}

/// All supported languages in display order.
pub fn entries() -> Vec<LanguageEntry> {
    LANGUAGES
        .iter()
        .map(|l| LanguageEntry {
            code: l.code,
            name: l.name,
            voiceover_file: l.voiceover_file_name(),
        })
        .collect()
}

/// Run the languages command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let entries = entries();
    if json_output {
        CommandOutput::success(entries).print()?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Supported languages:".cyan().bold());
    let width = entries.iter().map(|e| e.code.len()).max().unwrap_or(0);
    for entry in &entries {
        let code = format!("{:<width$}", entry.code, width = width);
        println!(
            "  {}  {}  {}",
            code.bold(),
            entry.name,
            entry.voiceover_file.dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}
