//! Strict standard-alphabet base64.
//!
//! Synthesized speech arrives from the speech service as base64 text, and
//! uploads are sent to it the same way. Only the standard alphabet with
//! mandatory padding is accepted; URL-safe or unpadded variants are errors.

use ::base64::engine::general_purpose::STANDARD;
use ::base64::{DecodeError, Engine as _};

use crate::error::Base64Error;

/// Decodes standard base64 text into raw bytes.
///
/// Leading and trailing ASCII whitespace is ignored; anything else outside
/// the alphabet, including interior whitespace, is an error.
///
/// # Example
///
/// ```
/// use voxdub_audio::base64::decode_base64;
///
/// assert_eq!(decode_base64("AAEC").unwrap(), vec![0x00, 0x01, 0x02]);
/// assert!(decode_base64("AA-C").is_err());
/// ```
pub fn decode_base64(text: &str) -> Result<Vec<u8>, Base64Error> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    STANDARD.decode(trimmed).map_err(|err| match err {
        DecodeError::InvalidByte(offset, byte) | DecodeError::InvalidLastSymbol(offset, byte) => {
            Base64Error::InvalidCharacter {
                ch: char::from(byte),
                offset,
            }
        }
        _ => Base64Error::InvalidPadding { len: trimmed.len() },
    })
}

/// Encodes bytes as standard padded base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_vector() {
        assert_eq!(decode_base64("AAEC").unwrap(), vec![0x00, 0x01, 0x02]);
    }

    #[test]
    fn test_decode_padding() {
        assert_eq!(decode_base64("AA==").unwrap(), vec![0x00]);
        assert_eq!(decode_base64("AAA=").unwrap(), vec![0x00, 0x00]);
        assert_eq!(decode_base64("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_trims_outer_whitespace() {
        assert_eq!(decode_base64("  AAEC\n").unwrap(), vec![0x00, 0x01, 0x02]);
    }

    #[test]
    fn test_decode_rejects_url_safe_alphabet() {
        let err = decode_base64("_-8=").unwrap_err();
        assert!(matches!(err, Base64Error::InvalidCharacter { ch: '_', offset: 0 }));
    }

    #[test]
    fn test_decode_rejects_interior_whitespace() {
        assert!(decode_base64("AA EC").is_err());
        assert!(decode_base64("AA\nEC==").is_err());
    }

    #[test]
    fn test_decode_rejects_missing_padding() {
        assert!(decode_base64("AAE").is_err());
        assert!(decode_base64("A").is_err());
    }

    #[test]
    fn test_encode_inverse() {
        let bytes = [0u8, 1, 2, 250, 251, 252, 253];
        let text = encode_base64(&bytes);
        assert_eq!(text, "AAEC+vv8/Q==");
        assert_eq!(decode_base64(&text).unwrap(), bytes.to_vec());
    }
}
