//! The orchestrating importer.
//!
//! Sequences codec → key derivation → decryption → extraction, and maps
//! every failure onto one of the three import reasons. No retries happen
//! here: an `IncorrectPassword` outcome is expected to be retried by the
//! caller with a new password.

use serde_json::Value;
use tracing::debug;

use vaultlift_core::{CredentialRecord, ImportError, codec};

use crate::crypto;
use crate::document::{self, first_string};
use crate::storage::ProfileStore;
use crate::types::VaultHeader;

// Key-paths probed per credential entry. Older exports nested display
// metadata under "meta", hence the fallbacks.
const TITLE_PATHS: &[&str] = &["title", "meta.title"];
const URL_PATHS: &[&str] = &["url", "meta.url"];
const USERNAME_PATHS: &[&str] = &["login"];
const PASSWORD_PATHS: &[&str] = &["password"];
const NOTES_PATHS: &[&str] = &["note"];

/// Import a vault export from its raw stored bytes.
///
/// `profile_bytes` is the stored form: base64 text of the binary vault
/// blob, with surrounding ASCII whitespace tolerated.
pub fn import_vault(
    profile_bytes: &[u8],
    master_password: &str,
) -> Result<Vec<CredentialRecord>, ImportError> {
    let text = codec::utf8_from_bytes(profile_bytes)?;
    let blob = codec::decode_base64(text.trim())?;

    let (header, ciphertext) = VaultHeader::parse(&blob)?;
    debug!(
        tag = header.tag.as_str(),
        ciphertext_len = ciphertext.len(),
        "parsed vault header"
    );

    let kdf = header.tag.kdf_params();
    let material = crypto::derive_key_material(master_password, &header.salt, &kdf);
    let body = crypto::decrypt_payload(&material, ciphertext, header.tag)?;
    let body = if header.tag.compressed() {
        crypto::decompress_body(&body)?
    } else {
        body
    };
    debug!(body_len = body.len(), "decrypted vault payload");

    let doc = document::parse_document(&body)?;
    let records = records_from_document(&doc);
    debug!(records = records.len(), "extracted credential records");
    Ok(records)
}

/// Fetch a profile's vault through the storage collaborator and import it.
pub fn import_profile(
    store: &impl ProfileStore,
    profile: &str,
    master_password: &str,
) -> Result<Vec<CredentialRecord>, ImportError> {
    let Some(bytes) = store.fetch_profile(profile)? else {
        return Err(ImportError::profile_not_found(format!(
            "no vault data for profile '{profile}'"
        )));
    };
    import_vault(&bytes, master_password)
}

/// The credential list is the `"credentials"` array of the root object, or
/// the root itself when the root is an array (older exports). A document
/// with neither is an empty vault, not an error.
fn records_from_document(doc: &Value) -> Vec<CredentialRecord> {
    let entries = doc
        .get("credentials")
        .and_then(Value::as_array)
        .or_else(|| doc.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    entries.iter().map(record_from_entry).collect()
}

fn record_from_entry(entry: &Value) -> CredentialRecord {
    CredentialRecord {
        title: first_string(entry, TITLE_PATHS),
        url: first_string(entry, URL_PATHS),
        username: first_string(entry, USERNAME_PATHS),
        password: first_string(entry, PASSWORD_PATHS),
        notes: first_string(entry, NOTES_PATHS),
    }
}
