//! Strict validator for canonical 44-byte-header PCM WAV files.
//!
//! Unlike the inspector in `voxdub-audio`, this reads the fixed canonical
//! layout field by field and rejects anything that deviates from it.

use super::FormatError;

const FORMAT: &str = "WAV";
const HEADER_LEN: usize = 44;

fn invalid(message: impl Into<String>) -> FormatError {
    FormatError::new(FORMAT, message)
}

/// Every field of a canonical WAV header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    /// RIFF chunk size (file length minus 8).
    pub riff_size: u32,
    /// Audio format code (1 = PCM).
    pub audio_format: u16,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Byte rate as stored.
    pub byte_rate: u32,
    /// Block alignment as stored.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Declared data size in bytes.
    pub data_size: u32,
}

impl WavInfo {
    /// Whole frames declared by the data chunk.
    pub fn num_frames(&self) -> usize {
        if self.block_align == 0 {
            0
        } else {
            self.data_size as usize / self.block_align as usize
        }
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn tag(&mut self, expected: &[u8; 4]) -> Result<(), FormatError> {
        let found = &self.data[self.pos..self.pos + 4];
        if found != expected {
            return Err(invalid(format!(
                "expected {:?}, found {:?}",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(found)
            ))
            .at(self.pos));
        }
        self.pos += 4;
        Ok(())
    }

    fn u16(&mut self) -> u16 {
        let v = u16::from_le_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        v
    }

    fn u32(&mut self) -> u32 {
        let b = &self.data[self.pos..self.pos + 4];
        self.pos += 4;
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }
}

/// Validates a canonical PCM WAV file and returns its header fields.
///
/// Checks, in order: minimum length, `RIFF`/`WAVE`/`fmt `/`data` tags at
/// their canonical offsets, a 16-byte PCM fmt chunk, derived fields
/// (byte rate and block align), the RIFF size against the file length, and
/// the declared data size against the bytes present.
pub fn validate_wav(data: &[u8]) -> Result<WavInfo, FormatError> {
    if data.len() < HEADER_LEN {
        return Err(invalid(format!(
            "file too short: {} bytes, header needs {}",
            data.len(),
            HEADER_LEN
        )));
    }

    let mut c = Cursor { data, pos: 0 };
    c.tag(b"RIFF")?;
    let riff_size = c.u32();
    c.tag(b"WAVE")?;
    c.tag(b"fmt ")?;
    let fmt_size = c.u32();
    if fmt_size != 16 {
        return Err(
            invalid(format!("fmt chunk is {fmt_size} bytes, expected 16"))
                .at(16),
        );
    }
    let audio_format = c.u16();
    let channels = c.u16();
    let sample_rate = c.u32();
    let byte_rate = c.u32();
    let block_align = c.u16();
    let bits_per_sample = c.u16();
    c.tag(b"data")?;
    let data_size = c.u32();

    if audio_format != 1 {
        return Err(invalid(format!("audio format {audio_format} is not PCM")).at(20));
    }

    let expected_block_align = (u32::from(channels) * u32::from(bits_per_sample) / 8) as u16;
    if block_align != expected_block_align {
        return Err(
            invalid(format!("block align {block_align}, expected {expected_block_align}"))
                .at(32),
        );
    }

    let expected_byte_rate =
        (u64::from(sample_rate) * u64::from(channels) * u64::from(bits_per_sample) / 8) as u32;
    if byte_rate != expected_byte_rate {
        return Err(
            invalid(format!("byte rate {byte_rate}, expected {expected_byte_rate}"))
                .at(28),
        );
    }

    let payload = data.len() - HEADER_LEN;
    if data_size as usize != payload {
        return Err(
            invalid(format!("data size {data_size}, but {payload} bytes follow the header"))
                .at(40),
        );
    }

    if riff_size as usize != data.len() - 8 {
        return Err(
            invalid(format!("RIFF size {riff_size}, file is {} bytes", data.len()))
                .at(4),
        );
    }

    Ok(WavInfo {
        riff_size,
        audio_format,
        channels,
        sample_rate,
        byte_rate,
        block_align,
        bits_per_sample,
        data_size,
    })
}
