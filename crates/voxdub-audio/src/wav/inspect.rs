//! Reading WAV headers back.
//!
//! Used to report on produced voiceovers and to check that headers describe
//! the payload that follows them.

use std::ops::Range;

use super::format::WavFormat;
use super::writer::HEADER_LEN;
use crate::error::WavError;

/// Header information recovered from a WAV buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    /// Channels, sample rate and bit depth.
    pub format: WavFormat,
    /// Byte rate as stored in the header.
    pub byte_rate: u32,
    /// Block align as stored in the header.
    pub block_align: u16,
    /// Value of the RIFF chunk size field.
    pub riff_size: u32,
    /// Byte range of the PCM payload within the buffer.
    pub data: Range<usize>,
}

impl WavHeader {
    /// Length of the PCM payload in bytes.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// Number of whole sample frames in the payload.
    pub fn num_frames(&self) -> usize {
        if self.block_align == 0 {
            0
        } else {
            self.data_len() / self.block_align as usize
        }
    }
}

fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn expect_magic(data: &[u8], offset: usize, expected: &'static str) -> Result<(), WavError> {
    let found = [
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ];
    if &found != expected.as_bytes() {
        return Err(WavError::BadMagic {
            expected,
            found,
            offset,
        });
    }
    Ok(())
}

/// Parses a RIFF/WAVE buffer and locates its PCM payload.
///
/// Chunks other than `fmt ` and `data` are skipped (chunks are word-aligned).
///
/// # Arguments
/// * `wav_data` - Complete WAV file bytes
///
/// # Returns
/// The parsed header, or the first structural problem found
pub fn inspect_wav(wav_data: &[u8]) -> Result<WavHeader, WavError> {
    if wav_data.len() < HEADER_LEN {
        return Err(WavError::TooShort {
            len: wav_data.len(),
            min: HEADER_LEN,
        });
    }

    expect_magic(wav_data, 0, "RIFF")?;
    expect_magic(wav_data, 8, "WAVE")?;
    let riff_size = read_u32(wav_data, 4);

    let mut fmt: Option<(WavFormat, u32, u16)> = None;
    let mut pos = 12;

    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = read_u32(wav_data, pos + 4) as usize;

        if chunk_id == b"fmt " {
            if chunk_size < 16 || pos + 8 + 16 > wav_data.len() {
                return Err(WavError::TruncatedFormat { offset: pos });
            }
            let body = pos + 8;
            let code = read_u16(wav_data, body);
            if code != 1 {
                return Err(WavError::UnsupportedFormat { code });
            }
            let format = WavFormat {
                channels: read_u16(wav_data, body + 2),
                sample_rate: read_u32(wav_data, body + 4),
                bits_per_sample: read_u16(wav_data, body + 14),
            };
            fmt = Some((
                format,
                read_u32(wav_data, body + 8),
                read_u16(wav_data, body + 12),
            ));
        } else if chunk_id == b"data" {
            let (format, byte_rate, block_align) = fmt.ok_or(WavError::MissingFormat)?;
            let start = pos + 8;
            let available = wav_data.len() - start;
            if chunk_size > available {
                return Err(WavError::TruncatedData {
                    declared: chunk_size,
                    available,
                });
            }
            return Ok(WavHeader {
                format,
                byte_rate,
                block_align,
                riff_size,
                data: start..start + chunk_size,
            });
        }

        // Move to next chunk (chunks are word-aligned)
        pos = pos.saturating_add(8 + chunk_size + (chunk_size & 1));
    }

    if fmt.is_none() {
        return Err(WavError::MissingFormat);
    }
    Err(WavError::MissingData)
}

/// Extracts the PCM payload from a WAV buffer.
///
/// # Returns
/// PCM data if found, or None if the buffer is not a readable PCM WAV
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    inspect_wav(wav_data)
        .ok()
        .map(|header| &wav_data[header.data])
}
