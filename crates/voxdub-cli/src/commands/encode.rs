//! Encode command implementation
//!
//! Wraps raw PCM (or base64 text holding raw PCM, as the speech service
//! returns it) in a 44-byte WAV header.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use voxdub_audio::base64::decode_base64;
use voxdub_audio::wav::{duration_seconds, encode_wav, WavFormat};

use super::json_output::{error_codes, CommandOutput, JsonError};

/// Input interpretation and target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Input is base64 text rather than raw bytes.
    pub base64: bool,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl EncodeOptions {
    fn format(&self) -> WavFormat {
        WavFormat::new(self.sample_rate, self.channels, self.bits_per_sample)
    }
}

/// Encode result details.
#[derive(Debug, Clone, Serialize)]
pub struct EncodeResult {
    /// Input path
    pub input: String,
    /// Written WAV path
    pub output: String,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// PCM payload size in bytes
    pub pcm_bytes: usize,
    /// WAV file size in bytes
    pub wav_bytes: usize,
    /// Playback duration in seconds
    pub duration_seconds: f64,
}

/// Run the encode command
///
/// # Arguments
/// * `input` - Raw PCM or base64 text file
/// * `output` - WAV path to write
/// * `options` - How to read the input and which format to declare
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &Path,
    output: &Path,
    options: &EncodeOptions,
    json_output: bool,
) -> Result<ExitCode> {
    match encode_file(input, output, options) {
        Ok(result) => {
            if json_output {
                CommandOutput::success(result).print()?;
            } else {
                print_human(&result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) if json_output => {
            CommandOutput::<EncodeResult>::failure(vec![error]).print()?;
            Ok(ExitCode::from(1))
        }
        Err(error) => {
            anyhow::bail!("{}", error.message)
        }
    }
}

/// Reads, encodes and writes one file.
pub fn encode_file(
    input: &Path,
    output: &Path,
    options: &EncodeOptions,
) -> Result<EncodeResult, JsonError> {
    let file = input.display().to_string();
    let raw = fs::read(input).map_err(|e| {
        JsonError::new(
            error_codes::FILE_READ,
            format!("Failed to read {}: {}", file, e),
        )
        .with_file(file.clone())
    })?;

    let pcm = if options.base64 {
        let text = String::from_utf8_lossy(&raw);
        decode_base64(&text).map_err(|e| {
            JsonError::new(error_codes::INVALID_BASE64, e.to_string()).with_file(file.clone())
        })?
    } else {
        raw
    };

    let format = options.format();
    let frame = usize::from(format.block_align());
    if frame > 0 && pcm.len() % frame != 0 {
        log::warn!(
            "{} bytes of PCM is not a whole number of {}-byte frames",
            pcm.len(),
            frame
        );
    }

    let wav = encode_wav(&pcm, &format);
    fs::write(output, &wav).map_err(|e| {
        JsonError::new(
            error_codes::FILE_WRITE,
            format!("Failed to write {}: {}", output.display(), e),
        )
        .with_file(output.display().to_string())
    })?;

    Ok(EncodeResult {
        input: file,
        output: output.display().to_string(),
        sample_rate: format.sample_rate,
        channels: format.channels,
        bits_per_sample: format.bits_per_sample,
        pcm_bytes: pcm.len(),
        wav_bytes: wav.len(),
        duration_seconds: duration_seconds(&format, pcm.len()),
    })
}

fn print_human(result: &EncodeResult) {
    println!("{} {}", "Encoded".cyan().bold(), result.output);
    println!(
        "  {} {} Hz, {} ch, {}-bit",
        "Format:".dimmed(),
        result.sample_rate,
        result.channels,
        result.bits_per_sample
    );
    println!(
        "  {} {} bytes PCM, {} bytes WAV, {:.3}s",
        "Size:".dimmed(),
        result.pcm_bytes,
        result.wav_bytes,
        result.duration_seconds
    );
}
