//! Error types for the audio utilities.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a WAV container back.
///
/// Encoding never fails; these only come from [`crate::wav::inspect_wav`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WavError {
    /// Buffer is shorter than the fixed header.
    #[error("WAV data too short: {len} bytes (minimum {min} required)")]
    TooShort {
        /// Actual buffer length.
        len: usize,
        /// Minimum length required.
        min: usize,
    },

    /// A four-character chunk identifier did not match.
    #[error("invalid {expected} marker at offset {offset}: found {found:?}")]
    BadMagic {
        /// Expected identifier.
        expected: &'static str,
        /// Bytes found instead.
        found: [u8; 4],
        /// Byte offset of the identifier.
        offset: usize,
    },

    /// The `fmt ` chunk is smaller than 16 bytes or runs past the end of the buffer.
    #[error("truncated fmt chunk at offset {offset}")]
    TruncatedFormat {
        /// Byte offset of the chunk header.
        offset: usize,
    },

    /// The format code is not integer PCM.
    #[error("unsupported audio format code {code} (only PCM is supported)")]
    UnsupportedFormat {
        /// Audio format code from the header.
        code: u16,
    },

    /// No `fmt ` chunk precedes the `data` chunk.
    #[error("missing fmt chunk")]
    MissingFormat,

    /// No `data` chunk was found.
    #[error("missing data chunk")]
    MissingData,

    /// The `data` chunk claims more bytes than the buffer holds.
    #[error("data chunk claims {declared} bytes but only {available} remain")]
    TruncatedData {
        /// Size declared in the chunk header.
        declared: usize,
        /// Bytes actually available after the header.
        available: usize,
    },
}

/// Errors raised by the strict base64 decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base64Error {
    /// A byte outside the standard alphabet (or misplaced padding).
    #[error("invalid base64 character {ch:?} at offset {offset}")]
    InvalidCharacter {
        /// Offending character.
        ch: char,
        /// Offset into the (trimmed) input.
        offset: usize,
    },

    /// Input length or padding does not form whole quanta.
    #[error("invalid base64 length or padding ({len} characters)")]
    InvalidPadding {
        /// Length of the trimmed input.
        len: usize,
    },
}

/// Errors raised while digesting an upload.
#[derive(Debug, Error)]
pub enum DigestError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
