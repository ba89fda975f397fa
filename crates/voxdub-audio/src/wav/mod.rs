//! WAV container encoding and inspection.
//!
//! The encoder wraps raw little-endian PCM samples in the canonical 44-byte
//! RIFF/WAVE header and copies the payload verbatim. It is a total function:
//! the header is computed only from the format and the payload length, and no
//! validation is performed on the samples themselves.

mod format;
mod inspect;
mod writer;

#[cfg(test)]
mod tests;

// Re-export public API
pub use format::WavFormat;
pub use inspect::{extract_pcm_data, inspect_wav, WavHeader};
pub use writer::{
    duration_seconds, encode_wav, pcm16_to_samples, samples_to_pcm16, write_wav, HEADER_LEN,
};
