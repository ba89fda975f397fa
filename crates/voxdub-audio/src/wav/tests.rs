//! Tests for the WAV module.

use pretty_assertions::assert_eq;

use super::format::WavFormat;
use super::inspect::{extract_pcm_data, inspect_wav};
use super::writer::{
    duration_seconds, encode_wav, pcm16_to_samples, samples_to_pcm16, write_wav, HEADER_LEN,
};
use crate::error::WavError;

fn le_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn le_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

// =========================================================================
// WavFormat tests
// =========================================================================

#[test]
fn test_wav_format_constructors() {
    let mono = WavFormat::mono(44100);
    assert_eq!(mono.channels, 1);
    assert_eq!(mono.sample_rate, 44100);
    assert_eq!(mono.bits_per_sample, 16);

    let stereo = WavFormat::stereo(48000);
    assert_eq!(stereo.channels, 2);
    assert_eq!(stereo.sample_rate, 48000);

    assert_eq!(WavFormat::default(), WavFormat::SPEECH);
    assert_eq!(WavFormat::SPEECH, WavFormat::new(24000, 1, 16));
}

#[test]
fn test_block_align_and_byte_rate() {
    let mono = WavFormat::mono(44100);
    assert_eq!(mono.block_align(), 2);
    assert_eq!(mono.byte_rate(), 88200);

    let stereo = WavFormat::stereo(44100);
    assert_eq!(stereo.block_align(), 4);
    assert_eq!(stereo.byte_rate(), 176400);

    // 8-bit, 6 channels
    let surround = WavFormat::new(48000, 6, 8);
    assert_eq!(surround.block_align(), 6);
    assert_eq!(surround.byte_rate(), 288000);
}

#[test]
fn test_byte_rate_does_not_overflow_for_large_rates() {
    // 192 kHz, 8 channels, 32-bit: 6_144_000 bytes/sec, intermediate product exceeds u32
    let format = WavFormat::new(192_000, 8, 32);
    assert_eq!(format.byte_rate(), 6_144_000);
}

// =========================================================================
// Header layout tests
// =========================================================================

#[test]
fn test_speech_scenario_header() {
    let wav = encode_wav(&[0x00, 0x01, 0x02, 0x03], &WavFormat::SPEECH);

    assert_eq!(wav.len(), 48);
    assert_eq!(le_u32(&wav, 40), 4);
    assert_eq!(le_u32(&wav, 28), 48000);
    assert_eq!(le_u16(&wav, 34), 16);
    assert_eq!(&wav[44..], &[0x00, 0x01, 0x02, 0x03]);
}

#[test]
fn test_full_header_layout() {
    let pcm = samples_to_pcm16(&[1, -1, 300, -300, 0, 7]);
    let wav = encode_wav(&pcm, &WavFormat::stereo(22050));

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(le_u32(&wav, 4), 36 + pcm.len() as u32);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(le_u32(&wav, 16), 16);
    assert_eq!(le_u16(&wav, 20), 1);
    assert_eq!(le_u16(&wav, 22), 2);
    assert_eq!(le_u32(&wav, 24), 22050);
    assert_eq!(le_u32(&wav, 28), 22050 * 2 * 2);
    assert_eq!(le_u16(&wav, 32), 4);
    assert_eq!(le_u16(&wav, 34), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(le_u32(&wav, 40), pcm.len() as u32);
    assert_eq!(&wav[HEADER_LEN..], pcm.as_slice());
}

#[test]
fn test_header_is_little_endian() {
    // 0x00015F90 = 90000
    let wav = encode_wav(&[], &WavFormat::mono(90000));
    assert_eq!(&wav[24..28], &[0x90, 0x5F, 0x01, 0x00]);
}

#[test]
fn test_empty_payload_is_header_only() {
    let wav = encode_wav(&[], &WavFormat::SPEECH);
    assert_eq!(wav.len(), HEADER_LEN);
    assert_eq!(le_u32(&wav, 4), 36);
    assert_eq!(le_u32(&wav, 40), 0);
}

#[test]
fn test_partial_frame_is_not_rejected() {
    // Three bytes of stereo PCM is not a whole frame; size is still the payload length.
    let wav = encode_wav(&[9, 8, 7], &WavFormat::stereo(8000));
    assert_eq!(wav.len(), 47);
    assert_eq!(le_u32(&wav, 40), 3);
    assert_eq!(le_u32(&wav, 4), 39);
}

#[test]
fn test_write_wav_matches_encode_wav() {
    let pcm = samples_to_pcm16(&[100, 200, -300]);
    let format = WavFormat::mono(16000);

    let mut streamed = Vec::new();
    write_wav(&mut streamed, &format, &pcm).unwrap();

    assert_eq!(streamed, encode_wav(&pcm, &format));
}

#[test]
fn test_encoding_is_deterministic() {
    let pcm = samples_to_pcm16(&[5; 64]);
    assert_eq!(
        encode_wav(&pcm, &WavFormat::SPEECH),
        encode_wav(&pcm, &WavFormat::SPEECH)
    );
}

// =========================================================================
// PCM conversion tests
// =========================================================================

#[test]
fn test_samples_to_pcm16_little_endian() {
    let pcm = samples_to_pcm16(&[0x0102, -2]);
    assert_eq!(pcm, vec![0x02, 0x01, 0xFE, 0xFF]);
}

#[test]
fn test_pcm16_to_samples_ignores_trailing_byte() {
    let samples = pcm16_to_samples(&[0x02, 0x01, 0xFE, 0xFF, 0x55]);
    assert_eq!(samples, vec![0x0102, -2]);
}

#[test]
fn test_duration_seconds() {
    assert_eq!(duration_seconds(&WavFormat::SPEECH, 48000), 1.0);
    assert_eq!(duration_seconds(&WavFormat::stereo(44100), 88200), 0.5);
    assert_eq!(duration_seconds(&WavFormat::new(0, 1, 16), 100), 0.0);
}

// =========================================================================
// Inspection tests
// =========================================================================

#[test]
fn test_inspect_round_trip() {
    let pcm = samples_to_pcm16(&[1, 2, 3, 4, 5, 6]);
    let format = WavFormat::stereo(32000);
    let wav = encode_wav(&pcm, &format);

    let header = inspect_wav(&wav).unwrap();
    assert_eq!(header.format, format);
    assert_eq!(header.byte_rate, format.byte_rate());
    assert_eq!(header.block_align, 4);
    assert_eq!(header.riff_size, 36 + pcm.len() as u32);
    assert_eq!(header.data, HEADER_LEN..HEADER_LEN + pcm.len());
    assert_eq!(header.num_frames(), 3);
    assert_eq!(extract_pcm_data(&wav), Some(pcm.as_slice()));
}

#[test]
fn test_inspect_skips_unknown_chunks() {
    let pcm = samples_to_pcm16(&[42, -42]);
    let wav = encode_wav(&pcm, &WavFormat::mono(8000));

    // Splice an odd-sized LIST chunk (padded to even) between fmt and data.
    let mut spliced = wav[..36].to_vec();
    spliced.extend_from_slice(b"LIST");
    spliced.extend_from_slice(&3u32.to_le_bytes());
    spliced.extend_from_slice(&[b'a', b'b', b'c', 0]);
    spliced.extend_from_slice(&wav[36..]);

    assert_eq!(extract_pcm_data(&spliced), Some(pcm.as_slice()));
}

#[test]
fn test_inspect_too_short() {
    let err = inspect_wav(&[0u8; 10]).unwrap_err();
    assert_eq!(err, WavError::TooShort { len: 10, min: 44 });
}

#[test]
fn test_inspect_bad_magic() {
    let mut wav = encode_wav(&[0; 4], &WavFormat::SPEECH);
    wav[8..12].copy_from_slice(b"AVI ");
    match inspect_wav(&wav).unwrap_err() {
        WavError::BadMagic {
            expected, offset, ..
        } => {
            assert_eq!(expected, "WAVE");
            assert_eq!(offset, 8);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_inspect_rejects_non_pcm() {
    let mut wav = encode_wav(&[0; 4], &WavFormat::SPEECH);
    wav[20..22].copy_from_slice(&3u16.to_le_bytes());
    assert_eq!(
        inspect_wav(&wav).unwrap_err(),
        WavError::UnsupportedFormat { code: 3 }
    );
}

#[test]
fn test_inspect_truncated_data() {
    let mut wav = encode_wav(&[0; 4], &WavFormat::SPEECH);
    wav[40..44].copy_from_slice(&100u32.to_le_bytes());
    assert_eq!(
        inspect_wav(&wav).unwrap_err(),
        WavError::TruncatedData {
            declared: 100,
            available: 4
        }
    );
    assert_eq!(extract_pcm_data(&wav), None);
}

#[test]
fn test_inspect_missing_data_chunk() {
    let mut wav = encode_wav(&[0; 8], &WavFormat::SPEECH);
    wav[36..40].copy_from_slice(b"junk");
    assert_eq!(inspect_wav(&wav).unwrap_err(), WavError::MissingData);
}
