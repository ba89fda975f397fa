//! Generated voiceover artifacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use voxdub_audio::base64::decode_base64;
use voxdub_audio::wav::{duration_seconds, encode_wav, WavFormat, HEADER_LEN};

use crate::error::ServiceError;
use crate::language::Language;

/// A playable WAV voiceover for one translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voiceover {
    /// Language of the voiced translation.
    pub language: Language,
    /// Download name, `<LanguageName>_voiceover.wav`.
    pub file_name: String,
    /// Complete WAV file.
    pub wav: Vec<u8>,
}

impl Voiceover {
    /// Wraps raw speech PCM (24 kHz mono PCM16) in a WAV container.
    pub fn from_pcm(language: Language, pcm: &[u8]) -> Self {
        Self {
            language,
            file_name: language.voiceover_file_name(),
            wav: encode_wav(pcm, &WavFormat::SPEECH),
        }
    }

    /// Decodes the speech service's base64 payload into a voiceover.
    pub fn from_base64(language: Language, audio_base64: &str) -> Result<Self, ServiceError> {
        let pcm = decode_base64(audio_base64)?;
        Ok(Self::from_pcm(language, &pcm))
    }

    /// Length of the PCM payload in bytes.
    pub fn pcm_len(&self) -> usize {
        self.wav.len().saturating_sub(HEADER_LEN)
    }

    /// Playback duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        duration_seconds(&WavFormat::SPEECH, self.pcm_len())
    }

    /// Writes the WAV under `dir` using the download name.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.wav)?;
        Ok(path)
    }
}
