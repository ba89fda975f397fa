//! Binary format validators for test infrastructure.
//!
//! Parsers written independently of `voxdub-audio` so encoder output can be
//! checked against a second reading of the format.

use std::fmt;

mod wav;

pub use wav::{validate_wav, WavInfo};

/// A file that does not match the format it claims to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// Format being validated ("WAV").
    pub format: &'static str,
    /// What is wrong.
    pub message: String,
    /// Byte offset of the offending field, when known.
    pub offset: Option<usize>,
}

impl FormatError {
    pub fn new(format: &'static str, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
            offset: None,
        }
    }

    /// Pins the error to a byte offset.
    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.format, self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " (byte {offset})")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let err = FormatError::new("WAV", "missing data chunk");
        assert_eq!(err.to_string(), "invalid WAV: missing data chunk");

        let err = FormatError::new("WAV", "bad chunk id").at(36);
        assert_eq!(err.to_string(), "invalid WAV: bad chunk id (byte 36)");
    }
}
