//! Dotted key-path extraction from the decrypted document.
//!
//! "Field absent" and "parse error" are different things: a document that
//! does not parse is `InvalidFormat`, while a path that does not resolve
//! to a string leaf is plain absence (`None`) — the importer probes
//! optional fields pervasively and must not treat a miss as a failure.

use serde_json::Value;

use vaultlift_core::{FailureReason, ImportError};

/// Parse decrypted plaintext as a JSON document.
pub fn parse_document(bytes: &[u8]) -> Result<Value, ImportError> {
    serde_json::from_slice(bytes).map_err(|e| {
        ImportError::with_source(
            FailureReason::InvalidFormat,
            "vault payload is not a valid document",
            e,
        )
    })
}

/// Resolve a `.`-separated key-path to a string leaf.
///
/// Walks one segment at a time; any step where the current node is not an
/// object containing that segment, or a final node that is not a string,
/// yields `None`.
pub fn get_string<'a>(node: &'a Value, path: &str) -> Option<&'a str> {
    let mut current = node;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    current.as_str()
}

/// Resolve the first of several key-paths that yields a string leaf.
///
/// Used for fields whose location drifted across export versions.
pub fn first_string(node: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| get_string(node, path))
        .map(str::to_owned)
}
