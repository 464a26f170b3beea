//! Reversible byte/text transforms used throughout the import pipeline.
//!
//! All decoders report malformed input as [`FailureReason::InvalidFormat`]
//! with the decoder's own error chained. The one exception is
//! [`subrange`], whose negative-length rejection is a programming-contract
//! violation and panics instead of returning an `ImportError`.

use base64::prelude::{BASE64_STANDARD, Engine};

use crate::error::{FailureReason, ImportError};

/// UTF-8 encode a string. The empty string maps to the empty sequence.
pub fn bytes_from_utf8(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Decode bytes as UTF-8 text.
pub fn utf8_from_bytes(bytes: &[u8]) -> Result<String, ImportError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        ImportError::with_source(FailureReason::InvalidFormat, "data is not valid UTF-8", e)
    })
}

/// Standard base64 with padding.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

/// Decode standard base64. Non-alphabet characters and bad padding are
/// structural defects.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, ImportError> {
    BASE64_STANDARD.decode(text).map_err(|e| {
        ImportError::with_source(FailureReason::InvalidFormat, "data is not valid base64", e)
    })
}

/// Lower-case hex, two digits per byte, no separators.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Exact inverse of [`to_hex`].
pub fn from_hex(text: &str) -> Result<Vec<u8>, ImportError> {
    hex::decode(text).map_err(|e| {
        ImportError::with_source(FailureReason::InvalidFormat, "data is not valid hex", e)
    })
}

/// Bounds-safe byte-range extraction.
///
/// `start` and `start + length` are clamped to the available length, so
/// zero-length and out-of-range requests yield an empty slice and overflow
/// past the end yields the remainder. A negative `start` is out of range.
///
/// # Panics
///
/// Panics if `length` is negative — that is a caller bug, not an input
/// defect, and is deliberately not representable as an [`ImportError`].
pub fn subrange(bytes: &[u8], start: i64, length: i64) -> &[u8] {
    assert!(length >= 0, "length must be nonnegative");

    let len = bytes.len() as i64;
    if start < 0 || start >= len {
        return &[];
    }
    let end = start.saturating_add(length).min(len);
    &bytes[start as usize..end as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_STRING: &str = "All your base are belong to us";
    const TEST_HEX: &str = "416c6c20796f75722062617365206172652062656c6f6e6720746f207573";

    #[test]
    fn bytes_from_utf8_converts_string() {
        assert_eq!(bytes_from_utf8(""), Vec::<u8>::new());
        assert_eq!(bytes_from_utf8(TEST_STRING), TEST_STRING.as_bytes());
    }

    #[test]
    fn utf8_from_bytes_returns_string() {
        assert_eq!(utf8_from_bytes(&[]).unwrap(), "");
        assert_eq!(utf8_from_bytes(TEST_STRING.as_bytes()).unwrap(), TEST_STRING);
    }

    #[test]
    fn utf8_from_bytes_rejects_invalid_sequences() {
        let err = utf8_from_bytes(&[0xFF, 0xFE]).unwrap_err();
        assert_eq!(err.reason(), FailureReason::InvalidFormat);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn utf8_roundtrip() {
        let text = "pässwörd — ユーザー";
        assert_eq!(utf8_from_bytes(&bytes_from_utf8(text)).unwrap(), text);
    }

    #[test]
    fn decode_base64_decodes_standard_alphabet() {
        assert_eq!(decode_base64("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_base64("YQ==").unwrap(), vec![0x61]);
        assert_eq!(decode_base64("YWI=").unwrap(), vec![0x61, 0x62]);
        assert_eq!(decode_base64("YWJj").unwrap(), vec![0x61, 0x62, 0x63]);
        assert_eq!(decode_base64("YWJjZA==").unwrap(), vec![0x61, 0x62, 0x63, 0x64]);
    }

    #[test]
    fn decode_base64_rejects_malformed_input() {
        for bad in ["!!!!", "YQ", "Y Q = ="] {
            let err = decode_base64(bad).unwrap_err();
            assert_eq!(err.reason(), FailureReason::InvalidFormat);
        }
    }

    #[test]
    fn base64_roundtrip() {
        let data: Vec<u8> = (0u8..=255).collect();
        assert_eq!(decode_base64(&encode_base64(&data)).unwrap(), data);
    }

    #[test]
    fn to_hex_is_lowercase_two_digits_per_byte() {
        assert_eq!(to_hex(&[]), "");
        assert_eq!(to_hex(TEST_STRING.as_bytes()), TEST_HEX);
    }

    #[test]
    fn from_hex_inverts_to_hex() {
        let bytes = from_hex(TEST_HEX).unwrap();
        assert_eq!(bytes, TEST_STRING.as_bytes());
        assert_eq!(to_hex(&bytes), TEST_HEX);
    }

    #[test]
    fn from_hex_rejects_malformed_input() {
        for bad in ["0", "zz", "0g"] {
            let err = from_hex(bad).unwrap_err();
            assert_eq!(err.reason(), FailureReason::InvalidFormat);
        }
    }

    #[test]
    fn subrange_clamps_to_available_length() {
        let array = b"0123456789abcdef";
        let check = |start: i64, length: i64, expected: &str| {
            assert_eq!(
                subrange(array, start, length),
                expected.as_bytes(),
                "subrange({start}, {length})"
            );
        };

        // At 0, no overflow.
        check(0, 1, "0");
        check(0, 3, "012");
        check(0, 15, "0123456789abcde");
        check(0, 16, "0123456789abcdef");

        // In the middle, no overflow.
        check(1, 1, "1");
        check(3, 2, "34");
        check(8, 3, "89a");
        check(15, 1, "f");

        // Zero length.
        check(0, 0, "");
        check(9, 0, "");
        check(15, 0, "");

        // Overflow past the end yields the remainder.
        check(0, 17, "0123456789abcdef");
        check(0, 12345, "0123456789abcdef");
        check(0, i64::MAX, "0123456789abcdef");
        check(1, 16, "123456789abcdef");
        check(8, 67890, "89abcdef");
        check(15, i64::MAX, "f");

        // Beyond the end.
        check(16, 0, "");
        check(16, i64::MAX, "");
        check(12345, 56789, "");
        check(i64::MAX, i64::MAX, "");

        // Negative start is out of range.
        check(-1, 5, "");
        check(i64::MIN, 5, "");
    }

    #[test]
    #[should_panic(expected = "length must be nonnegative")]
    fn subrange_panics_on_negative_length() {
        subrange(&[], 0, -1337);
    }
}
