//! Vault blob layout and format-version metadata.
//!
//! A vault export, once base64-decoded, is laid out as
//! `[format tag: 4 bytes][salt: 32 bytes][ciphertext: remainder]`.
//! The format tag selects both the key-derivation parameter set and the
//! marker expected at the front of the decrypted plaintext.

use vaultlift_core::{ImportError, codec};

pub const TAG_LEN: usize = 4;
pub const SALT_LEN: usize = 32;

const LEGACY_TAG: &[u8; TAG_LEN] = b"VLT1";
const CURRENT_TAG: &[u8; TAG_LEN] = b"VLT2";

const LEGACY_ITERATIONS: u32 = 10_240;
const CURRENT_ITERATIONS: u32 = 200_000;

/// Known vault-export format versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// First-generation exports: PBKDF2-SHA1, uncompressed JSON body.
    Legacy,
    /// Current exports: PBKDF2-SHA256, zlib-deflated JSON body.
    Current,
}

impl FormatTag {
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            t if t == LEGACY_TAG.as_slice() => Some(Self::Legacy),
            t if t == CURRENT_TAG.as_slice() => Some(Self::Current),
            _ => None,
        }
    }

    /// The marker expected at the front of correctly decrypted plaintext.
    /// It equals the header tag, so a version mismatch between header and
    /// payload also fails the marker check.
    pub fn marker(self) -> &'static [u8] {
        match self {
            Self::Legacy => LEGACY_TAG,
            Self::Current => CURRENT_TAG,
        }
    }

    /// The key-derivation parameter set this format version uses.
    pub fn kdf_params(self) -> KdfParams {
        match self {
            Self::Legacy => KdfParams::Pbkdf2Sha1 {
                iterations: LEGACY_ITERATIONS,
            },
            Self::Current => KdfParams::Pbkdf2Sha256 {
                iterations: CURRENT_ITERATIONS,
            },
        }
    }

    /// Whether the plaintext body (after the marker) is zlib-deflated.
    pub fn compressed(self) -> bool {
        matches!(self, Self::Current)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Current => "current",
        }
    }
}

/// A `(digest, iteration count)` pair for PBKDF2. Closed enumeration —
/// one variant per historical export generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfParams {
    Pbkdf2Sha1 { iterations: u32 },
    Pbkdf2Sha256 { iterations: u32 },
}

/// Parsed vault front-matter. Does not depend on the password, so it can
/// be reused across retry attempts.
#[derive(Debug, Clone)]
pub struct VaultHeader {
    pub tag: FormatTag,
    pub salt: [u8; SALT_LEN],
}

impl VaultHeader {
    /// Split a decoded blob into its header and the remaining ciphertext.
    pub fn parse(blob: &[u8]) -> Result<(Self, &[u8]), ImportError> {
        let salt_bytes = codec::subrange(blob, TAG_LEN as i64, SALT_LEN as i64);
        if salt_bytes.len() < SALT_LEN {
            return Err(ImportError::invalid_format(format!(
                "vault blob too short: {} bytes, expected at least {}",
                blob.len(),
                TAG_LEN + SALT_LEN
            )));
        }

        let tag = FormatTag::from_bytes(codec::subrange(blob, 0, TAG_LEN as i64))
            .ok_or_else(|| ImportError::invalid_format("unrecognized vault format tag"))?;

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(salt_bytes);

        let ciphertext = codec::subrange(blob, (TAG_LEN + SALT_LEN) as i64, i64::MAX);
        Ok((Self { tag, salt }, ciphertext))
    }
}
