//! Key derivation and payload decryption.
//!
//! A master password plus the header salt is stretched with PBKDF2 into a
//! 48-byte block: 32 bytes of AES-256 key followed by a 16-byte CBC IV.
//! Derivation is a pure function and never fails — a wrong password is
//! only detected after decryption, when the plaintext fails the marker
//! check.

use std::io::Read;

use aes::cipher::{BlockDecryptMut, KeyIvInit, block_padding::Pkcs7};
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::Sha256;
use zeroize::Zeroizing;

use vaultlift_core::{FailureReason, ImportError};

use crate::types::{FormatTag, KdfParams, TAG_LEN};

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;
const OKM_LEN: usize = KEY_LEN + IV_LEN;

/// Derived key + IV for one import attempt. Zeroized on drop, never
/// persisted, never logged.
pub struct KeyMaterial {
    data: Zeroizing<[u8; OKM_LEN]>,
}

impl KeyMaterial {
    /// The 32-byte AES-256 key.
    pub fn key(&self) -> &[u8] {
        &self.data[..KEY_LEN]
    }

    /// The 16-byte CBC initialization vector.
    pub fn iv(&self) -> &[u8] {
        &self.data[KEY_LEN..]
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial([redacted])")
    }
}

/// Derive key material from a master password and the header salt, using
/// the parameter set selected by the vault's format tag.
///
/// Deterministic: identical inputs always yield identical output.
pub fn derive_key_material(password: &str, salt: &[u8], kdf: &KdfParams) -> KeyMaterial {
    let mut data = Zeroizing::new([0u8; OKM_LEN]);
    match kdf {
        KdfParams::Pbkdf2Sha1 { iterations } => {
            pbkdf2_hmac::<Sha1>(password.as_bytes(), salt, *iterations, &mut *data);
        }
        KdfParams::Pbkdf2Sha256 { iterations } => {
            pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, *iterations, &mut *data);
        }
    }
    KeyMaterial { data }
}

/// Decrypt the vault ciphertext and validate the plaintext marker.
///
/// Returns the plaintext body with the marker stripped. A ciphertext whose
/// length is not a positive multiple of the block size is a structural
/// defect (`InvalidFormat`); a padding or marker failure is a content
/// defect and always reports `IncorrectPassword` — wrong password and
/// corrupted ciphertext are deliberately not distinguished here.
pub fn decrypt_payload(
    material: &KeyMaterial,
    ciphertext: &[u8],
    tag: FormatTag,
) -> Result<Zeroizing<Vec<u8>>, ImportError> {
    if ciphertext.is_empty() {
        return Err(ImportError::invalid_format("vault contains no ciphertext"));
    }
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(ImportError::invalid_format(format!(
            "ciphertext length {} is not a multiple of the cipher block size",
            ciphertext.len()
        )));
    }

    let cipher = Aes256CbcDec::new(material.key().into(), material.iv().into());
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| {
            ImportError::incorrect_password(
                "vault decryption failed: wrong master password or corrupted data",
            )
        })?;

    if plaintext.len() < TAG_LEN || &plaintext[..TAG_LEN] != tag.marker() {
        return Err(ImportError::incorrect_password(
            "decrypted payload failed the marker check: wrong master password or corrupted data",
        ));
    }

    Ok(Zeroizing::new(plaintext[TAG_LEN..].to_vec()))
}

/// Inflate the zlib-deflated body of a current-format vault.
///
/// The marker has already vouched for the key at this point, so a broken
/// stream is corrupt data, not a password problem.
pub fn decompress_body(body: &[u8]) -> Result<Zeroizing<Vec<u8>>, ImportError> {
    let mut inflated = Zeroizing::new(Vec::new());
    flate2::read::ZlibDecoder::new(body)
        .read_to_end(&mut *inflated)
        .map_err(|e| {
            ImportError::with_source(
                FailureReason::InvalidFormat,
                "vault payload is not a valid compressed stream",
                e,
            )
        })?;
    Ok(inflated)
}

/// Encrypt a plaintext (marker included) with the given key material.
///
/// Only used by tests to build fixtures; the importer never re-encrypts.
#[cfg(test)]
pub(crate) fn encrypt_payload(material: &KeyMaterial, plaintext: &[u8]) -> Vec<u8> {
    use aes::cipher::BlockEncryptMut;

    type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

    let cipher = Aes256CbcEnc::new(material.key().into(), material.iv().into());
    cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Zlib-deflate a body. Test-only inverse of [`decompress_body`].
#[cfg(test)]
pub(crate) fn deflate_body(body: &[u8]) -> Vec<u8> {
    use std::io::Write;

    let mut encoder =
        flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(body).expect("write to Vec cannot fail");
    encoder.finish().expect("write to Vec cannot fail")
}
