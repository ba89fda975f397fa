//! Upload digests: file contents as base64 text plus a MIME type.
//!
//! The whole file is read into memory. That is fine for short voice
//! recordings, which is all the transcription request is meant for.

use std::fs;
use std::path::Path;

use crate::base64::encode_base64;
use crate::error::DigestError;

/// MIME type used when neither the extension nor the content is recognised.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Known audio extensions and their MIME types.
const EXTENSION_MIME: &[(&str, &str)] = &[
    ("wav", "audio/wav"),
    ("wave", "audio/wav"),
    ("mp3", "audio/mpeg"),
    ("m4a", "audio/mp4"),
    ("mp4", "audio/mp4"),
    ("aac", "audio/aac"),
    ("ogg", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("opus", "audio/ogg"),
    ("flac", "audio/flac"),
    ("webm", "audio/webm"),
    ("aiff", "audio/aiff"),
    ("aif", "audio/aiff"),
    ("amr", "audio/amr"),
    ("3gp", "audio/3gpp"),
];

/// An upload prepared for the transcription request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// File contents as standard padded base64.
    pub base64: String,
    /// Detected MIME type.
    pub mime_type: String,
    /// Size of the original file in bytes.
    pub size: usize,
}

/// Looks up a MIME type from a file extension (case-insensitive).
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    EXTENSION_MIME
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// Sniffs a MIME type from leading magic bytes.
pub fn mime_from_magic(bytes: &[u8]) -> Option<&'static str> {
    let starts = |magic: &[u8]| bytes.starts_with(magic);

    if bytes.len() >= 12 && starts(b"RIFF") && &bytes[8..12] == b"WAVE" {
        Some("audio/wav")
    } else if starts(b"ID3") || (bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0)
    {
        // ADTS AAC shares the frame-sync prefix; layer bits 00 mean AAC.
        if bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] & 0x06 == 0 {
            Some("audio/aac")
        } else {
            Some("audio/mpeg")
        }
    } else if starts(b"OggS") {
        Some("audio/ogg")
    } else if starts(b"fLaC") {
        Some("audio/flac")
    } else if starts(&[0x1A, 0x45, 0xDF, 0xA3]) {
        Some("audio/webm")
    } else if bytes.len() >= 8 && &bytes[4..8] == b"ftyp" {
        Some("audio/mp4")
    } else if bytes.len() >= 12 && starts(b"FORM") && matches!(&bytes[8..12], b"AIFF" | b"AIFC")
    {
        Some("audio/aiff")
    } else if starts(b"#!AMR") {
        Some("audio/amr")
    } else {
        None
    }
}

/// Detects the MIME type of an upload: extension first, then content.
pub fn detect_mime_type(path: Option<&Path>, bytes: &[u8]) -> &'static str {
    path.and_then(mime_from_extension)
        .or_else(|| mime_from_magic(bytes))
        .unwrap_or(FALLBACK_MIME)
}

/// Digests in-memory file contents.
///
/// # Arguments
/// * `bytes` - File contents
/// * `file_name` - Original file name, if known, used for MIME detection
pub fn digest_bytes(bytes: &[u8], file_name: Option<&Path>) -> FileDigest {
    FileDigest {
        base64: encode_base64(bytes),
        mime_type: detect_mime_type(file_name, bytes).to_string(),
        size: bytes.len(),
    }
}

/// Reads a file fully and digests it.
pub fn digest_file(path: &Path) -> Result<FileDigest, DigestError> {
    let bytes = fs::read(path).map_err(|source| DigestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let digest = digest_bytes(&bytes, Some(path));
    log::debug!(
        "digested {} ({} bytes, {})",
        path.display(),
        digest.size,
        digest.mime_type
    );
    Ok(digest)
}
