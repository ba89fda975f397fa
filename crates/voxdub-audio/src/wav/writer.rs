//! Core WAV writing and PCM conversion functions.

use std::io::{self, Write};

use super::format::WavFormat;

/// Size of the canonical RIFF/WAVE header written by this module.
pub const HEADER_LEN: usize = 44;

/// Builds the 44-byte header describing `data_len` bytes of PCM in `format`.
fn header(format: &WavFormat, data_len: usize) -> [u8; HEADER_LEN] {
    let data_size = data_len as u32;
    // Total file size minus the 8-byte RIFF preamble
    let chunk_size = data_size.wrapping_add(36);

    let mut h = [0u8; HEADER_LEN];

    // RIFF header
    h[0..4].copy_from_slice(b"RIFF");
    h[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    h[8..12].copy_from_slice(b"WAVE");

    // fmt chunk
    h[12..16].copy_from_slice(b"fmt ");
    h[16..20].copy_from_slice(&16u32.to_le_bytes()); // Chunk size (16 for PCM)
    h[20..22].copy_from_slice(&1u16.to_le_bytes()); // Audio format (1 = PCM)
    h[22..24].copy_from_slice(&format.channels.to_le_bytes());
    h[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    h[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    h[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    h[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    h[36..40].copy_from_slice(b"data");
    h[40..44].copy_from_slice(&data_size.to_le_bytes());

    h
}

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `pcm_data` - Raw PCM samples as bytes, copied verbatim
///
/// # Returns
/// Result indicating success or I/O error
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    writer.write_all(&header(format, pcm_data.len()))?;
    writer.write_all(pcm_data)?;
    Ok(())
}

/// Wraps raw PCM bytes in a WAV container.
///
/// The result is always exactly `44 + pcm_data.len()` bytes long. A payload
/// that is not a whole number of frames is not rejected; the data chunk size
/// is simply the payload length.
///
/// # Arguments
/// * `pcm_data` - Interleaved little-endian PCM samples
/// * `format` - WAV format parameters
///
/// # Returns
/// Complete WAV file as bytes
pub fn encode_wav(pcm_data: &[u8], format: &WavFormat) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm_data.len());
    buffer.extend_from_slice(&header(format, pcm_data.len()));
    buffer.extend_from_slice(pcm_data);
    buffer
}

/// Converts 16-bit samples to little-endian PCM bytes.
pub fn samples_to_pcm16(samples: &[i16]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        pcm.extend_from_slice(&sample.to_le_bytes());
    }
    pcm
}

/// Converts little-endian PCM bytes back to 16-bit samples.
///
/// A trailing odd byte is ignored.
pub fn pcm16_to_samples(pcm: &[u8]) -> Vec<i16> {
    pcm.chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Playback duration of `data_len` payload bytes in `format`.
///
/// Returns 0.0 for a degenerate format with a zero byte rate.
pub fn duration_seconds(format: &WavFormat, data_len: usize) -> f64 {
    let byte_rate = format.byte_rate();
    if byte_rate == 0 {
        return 0.0;
    }
    data_len as f64 / f64::from(byte_rate)
}
