//! voxdub Audio Utilities
//!
//! This crate holds the self-contained byte-level pieces of the voiceover
//! pipeline:
//!
//! - [`wav`] - wraps raw little-endian PCM16 samples in a 44-byte RIFF/WAVE
//!   header so that any standard player can decode the result, and reads such
//!   headers back
//! - [`base64`] - strict standard-alphabet base64, used to unpack synthesized
//!   speech returned by the speech service
//! - [`digest`] - turns an uploaded audio file into base64 text plus a MIME type
//!   for the transcription request
//!
//! # Example
//!
//! ```
//! use voxdub_audio::base64::decode_base64;
//! use voxdub_audio::wav::{encode_wav, WavFormat};
//!
//! let pcm = decode_base64("AAEC/w==").unwrap();
//! let wav = encode_wav(&pcm, &WavFormat::SPEECH);
//!
//! assert_eq!(wav.len(), 44 + pcm.len());
//! assert_eq!(&wav[0..4], b"RIFF");
//! ```
//!
//! Everything here is synchronous and pure apart from [`digest::digest_file`],
//! which reads the whole file into memory.

pub mod base64;
pub mod digest;
pub mod error;
pub mod wav;

pub use error::{Base64Error, DigestError, WavError};
