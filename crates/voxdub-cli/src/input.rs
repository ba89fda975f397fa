//! Input handling shared by the studio commands.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use voxdub_audio::digest::digest_file;
use voxdub_studio::{ConfigError, Language, Settings, Upload, LANGUAGES};

/// Where the English text for a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An audio recording that is transcribed first.
    Audio(PathBuf),
    /// A text file used as the transcript as-is.
    Transcript(PathBuf),
}

impl Source {
    /// Path of the input file.
    pub fn path(&self) -> &Path {
        match self {
            Source::Audio(path) | Source::Transcript(path) => path,
        }
    }
}

/// Reads an audio file into an upload named after the file.
pub fn load_upload(path: &Path) -> Result<Upload> {
    let audio = digest_file(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Upload { name, audio })
}

/// Reads a transcript text file.
pub fn read_transcript(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript: {}", path.display()))
}

/// Resolves language arguments by name or code, dropping repeats.
pub fn resolve_languages(names: &[String]) -> Result<Vec<Language>> {
    let mut languages: Vec<Language> = Vec::with_capacity(names.len());
    for name in names {
        let language = Language::find(name).with_context(|| {
            format!(
                "Unknown language '{}' (run `voxdub languages` to see the {} supported ones)",
                name,
                LANGUAGES.len()
            )
        })?;
        if !languages.contains(&language) {
            languages.push(language);
        }
    }
    Ok(languages)
}

/// Environment settings with an optional voice override from the command line.
pub fn settings(voice: Option<&str>) -> Result<Settings, ConfigError> {
    let mut settings = Settings::from_env()?;
    if let Some(voice) = voice {
        settings.voice = voice.to_string();
    }
    Ok(settings)
}
