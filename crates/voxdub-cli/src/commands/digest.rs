//! Digest command implementation
//!
//! Shows how an upload would be sent for transcription: detected MIME type,
//! size and base64 payload.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use voxdub_audio::digest::digest_file;

use super::json_output::{error_codes, CommandOutput, JsonError};

/// Characters of base64 shown without `--full`.
const PREVIEW_CHARS: usize = 64;

/// Digest result details.
#[derive(Debug, Clone, Serialize)]
pub struct DigestResult {
    /// Digested file
    pub path: String,
    /// Detected MIME type
    pub mime_type: String,
    /// File size in bytes
    pub size: usize,
    /// Length of the base64 payload
    pub base64_len: usize,
    /// Base64 payload (whole, or a preview)
    pub base64: String,
    /// Whether `base64` is cut short
    pub truncated: bool,
}

/// Run the digest command
///
/// # Arguments
/// * `input` - File to digest
/// * `full` - Print the whole payload rather than a preview
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input: &Path, full: bool, json_output: bool) -> Result<ExitCode> {
    let digest = match digest_file(input) {
        Ok(digest) => digest,
        Err(err) if json_output => {
            let error = JsonError::new(error_codes::FILE_READ, err.to_string())
                .with_file(input.display().to_string());
            CommandOutput::<DigestResult>::failure(vec![error]).print()?;
            return Ok(ExitCode::from(1));
        }
        Err(err) => return Err(err.into()),
    };

    let base64_len = digest.base64.len();
    let truncated = !full && base64_len > PREVIEW_CHARS;
    let mut base64 = digest.base64;
    if truncated {
        base64.truncate(PREVIEW_CHARS);
    }

    let result = DigestResult {
        path: input.display().to_string(),
        mime_type: digest.mime_type,
        size: digest.size,
        base64_len,
        base64,
        truncated,
    };

    if json_output {
        CommandOutput::success(result).print()?;
    } else {
        print_human(&result);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_human(result: &DigestResult) {
    println!("{} {}", "Upload".cyan().bold(), result.path);
    println!("  {} {}", "MIME:".dimmed(), result.mime_type);
    println!("  {} {} bytes", "Size:".dimmed(), result.size);
    println!("  {} {} chars", "Base64:".dimmed(), result.base64_len);
    if result.truncated {
        println!("  {}...", result.base64);
        println!("  {}", "(use --full for the whole payload)".dimmed());
    } else {
        println!("  {}", result.base64);
    }
}
