//! WebSphere `{xor}` credential obfuscation.
//!
//! WebSphere-style stores keep credentials as the literal marker `{xor}`
//! followed by the base64 encoding of the plaintext XOR-ed with a fixed
//! single-byte key. This is obfuscation, not encryption.

use base64::prelude::*;
use thiserror::Error;

const MARKER: &str = "{xor}";
const KEY: u8 = 0x5f;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("credential does not start with the {{xor}} marker")]
    InvalidFormat,
    #[error("credential payload is not valid base64")]
    InvalidEncoding(#[from] base64::DecodeError),
}

/// Recovers the plaintext from a `{xor}`-obfuscated credential.
///
/// Known quirk, preserved for compatibility: a payload byte equal to the
/// key XORs to zero and is dropped instead of being emitted as a NUL
/// character. Such bytes cannot round-trip.
///
/// # Errors
///
/// `InvalidFormat` if the marker is missing, `InvalidEncoding` if the
/// payload is not strict standard base64. Both are terminal; malformed
/// input is never decoded leniently.
pub fn decode(credential: &str) -> Result<String, DecodeError> {
    let payload = credential
        .strip_prefix(MARKER)
        .ok_or(DecodeError::InvalidFormat)?;
    let raw = BASE64_STANDARD.decode(payload)?;

    // Each surviving byte is one 8-bit character code, not UTF-8.
    Ok(raw
        .iter()
        .map(|&byte| byte ^ KEY)
        .filter(|&byte| byte != 0)
        .map(char::from)
        .collect())
}

/// Obfuscates a plaintext as a `{xor}` credential, the inverse of
/// [`decode`].
#[must_use]
pub fn encode(plaintext: &str) -> String {
    let xored: Vec<u8> = plaintext.bytes().map(|byte| byte ^ KEY).collect();
    format!("{MARKER}{}", BASE64_STANDARD.encode(xored))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decodes_known_credential() {
        // The stock WebSphere example credential.
        assert_eq!(decode("{xor}Lz4sLCgwLTs=").unwrap(), "password");
    }

    #[test]
    fn empty_payload_decodes_to_empty_string() {
        assert_eq!(decode("{xor}").unwrap(), "");
    }

    #[test]
    fn missing_marker_is_rejected() {
        assert!(matches!(
            decode("no-prefix-here"),
            Err(DecodeError::InvalidFormat)
        ));
    }

    #[test]
    fn marker_is_case_sensitive() {
        assert!(matches!(
            decode("{XOR}Lz4sLCgwLTs="),
            Err(DecodeError::InvalidFormat)
        ));
    }

    #[test]
    fn invalid_base64_is_rejected() {
        assert!(matches!(
            decode("{xor}!!!invalid!!!"),
            Err(DecodeError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn malformed_padding_is_rejected() {
        assert!(matches!(
            decode("{xor}Lz4sLCgwLTs"),
            Err(DecodeError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn key_byte_in_payload_is_dropped() {
        // [0x5f, 0x2f]: the first byte XORs to zero and must vanish,
        // the second decodes to 'p'.
        assert_eq!(decode("{xor}Xy8=").unwrap(), "p");
    }

    #[test]
    fn round_trip() {
        let plaintext = "s3cr3t-Passw0rd!";
        assert_eq!(decode(&encode(plaintext)).unwrap(), plaintext);
    }

    #[test]
    fn encodes_known_credential() {
        assert_eq!(encode("password"), "{xor}Lz4sLCgwLTs=");
    }
}
