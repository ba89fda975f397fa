//! Inspect command implementation
//!
//! Reads a WAV file's header back and checks that its derived fields agree
//! with each other and with the file.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use voxdub_audio::wav::{duration_seconds, inspect_wav};

use super::json_output::{error_codes, CommandOutput, JsonError};

/// Inspection result details.
#[derive(Debug, Clone, Serialize)]
pub struct InspectResult {
    /// Inspected file
    pub path: String,
    /// File size in bytes
    pub file_bytes: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Byte rate as stored
    pub byte_rate: u32,
    /// Block align as stored
    pub block_align: u16,
    /// RIFF chunk size as stored
    pub riff_size: u32,
    /// Offset of the PCM payload
    pub data_offset: usize,
    /// PCM payload size in bytes
    pub data_bytes: usize,
    /// Whole sample frames
    pub frames: usize,
    /// Playback duration in seconds
    pub duration_seconds: f64,
    /// Header fields that disagree with each other or the file
    pub warnings: Vec<String>,
}

/// Run the inspect command
///
/// # Arguments
/// * `input` - WAV file to inspect
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the file parses, 1 otherwise
pub fn run(input: &Path, json_output: bool) -> Result<ExitCode> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    match inspect_bytes(&input.display().to_string(), &bytes) {
        Ok(result) => {
            if json_output {
                CommandOutput::success(result).print()?;
            } else {
                print_human(&result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) if json_output => {
            CommandOutput::<InspectResult>::failure(vec![error]).print()?;
            Ok(ExitCode::from(1))
        }
        Err(error) => anyhow::bail!("{}: {}", input.display(), error.message),
    }
}

/// Parses `bytes` as a WAV file and builds the report.
pub fn inspect_bytes(path: &str, bytes: &[u8]) -> Result<InspectResult, JsonError> {
    let header = inspect_wav(bytes)
        .map_err(|e| JsonError::new(error_codes::INVALID_WAV, e.to_string()).with_file(path))?;
    let format = header.format;

    let mut warnings = Vec::new();
    if header.byte_rate != format.byte_rate() {
        warnings.push(format!(
            "byte rate is {}, expected {}",
            header.byte_rate,
            format.byte_rate()
        ));
    }
    if header.block_align != format.block_align() {
        warnings.push(format!(
            "block align is {}, expected {}",
            header.block_align,
            format.block_align()
        ));
    }
    let expected_riff = bytes.len().saturating_sub(8);
    if header.riff_size as usize != expected_riff {
        warnings.push(format!(
            "RIFF size is {}, file holds {}",
            header.riff_size, expected_riff
        ));
    }
    if header.block_align > 0 && header.data_len() % header.block_align as usize != 0 {
        warnings.push("data ends with a partial frame".to_string());
    }

    Ok(InspectResult {
        path: path.to_string(),
        file_bytes: bytes.len(),
        sample_rate: format.sample_rate,
        channels: format.channels,
        bits_per_sample: format.bits_per_sample,
        byte_rate: header.byte_rate,
        block_align: header.block_align,
        riff_size: header.riff_size,
        data_offset: header.data.start,
        data_bytes: header.data_len(),
        frames: header.num_frames(),
        duration_seconds: duration_seconds(&format, header.data_len()),
        warnings,
    })
}

fn print_human(result: &InspectResult) {
    println!("{} {}", "WAV".cyan().bold(), result.path);
    println!(
        "  {} {} Hz, {} ch, {}-bit",
        "Format:".dimmed(),
        result.sample_rate,
        result.channels,
        result.bits_per_sample
    );
    println!(
        "  {} byte rate {}, block align {}, RIFF size {}",
        "Header:".dimmed(),
        result.byte_rate,
        result.block_align,
        result.riff_size
    );
    println!(
        "  {} {} bytes at offset {} ({} frames, {:.3}s)",
        "Data:".dimmed(),
        result.data_bytes,
        result.data_offset,
        result.frames,
        result.duration_seconds
    );
    if result.warnings.is_empty() {
        println!("  {} header is consistent", "ok".green());
    }
    for warning in &result.warnings {
        println!("  {} {}", "!!".yellow(), warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use voxdub_audio::wav::{encode_wav, WavFormat};

    #[test]
    fn test_inspect_speech_wav() {
        let wav = encode_wav(&[0u8; 480], &WavFormat::SPEECH);
        let result = inspect_bytes("a.wav", &wav).unwrap();
        assert_eq!(result.sample_rate, 24_000);
        assert_eq!(result.channels, 1);
        assert_eq!(result.bits_per_sample, 16);
        assert_eq!(result.byte_rate, 48_000);
        assert_eq!(result.data_offset, 44);
        assert_eq!(result.data_bytes, 480);
        assert_eq!(result.frames, 240);
        assert_eq!(result.duration_seconds, 0.01);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_inspect_flags_inconsistent_header() {
        let mut wav = encode_wav(&[0u8; 4], &WavFormat::SPEECH);
        wav[28..32].copy_from_slice(&1u32.to_le_bytes());
        let result = inspect_bytes("a.wav", &wav).unwrap();
        assert_eq!(result.warnings, vec!["byte rate is 1, expected 48000".to_string()]);
    }

    #[test]
    fn test_inspect_rejects_non_wav() {
        let err = inspect_bytes("a.mp3", b"ID3\x04 not a wav file at all, far too short").unwrap_err();
        assert_eq!(err.code, error_codes::INVALID_WAV);
        assert_eq!(err.file.as_deref(), Some("a.mp3"));
    }
}
