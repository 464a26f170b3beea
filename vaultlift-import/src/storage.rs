//! Byte-producing storage collaborator.
//!
//! The importer only needs one thing from the outside world: "given a
//! profile identifier, return the raw encoded vault bytes or report that
//! there are none". Everything else (account APIs, remote fetch) can sit
//! behind the same trait.

use std::io;
use std::path::PathBuf;

use tracing::debug;

use vaultlift_core::{FailureReason, ImportError};

/// Name of the encoded vault file inside a profile directory.
pub const SETTINGS_FILE: &str = "settings.vault";

pub trait ProfileStore {
    /// Fetch the raw encoded vault bytes for a profile.
    ///
    /// `Ok(None)` means no vault exists for that profile — the importer
    /// turns this into `ProfileNotFound`.
    fn fetch_profile(&self, profile: &str) -> Result<Option<Vec<u8>>, ImportError>;
}

/// Reads vault exports from a local profile directory tree:
/// `<root>/<profile>/settings.vault`.
#[derive(Debug, Clone)]
pub struct FsProfileStore {
    root: PathBuf,
}

impl FsProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn settings_path(&self, profile: &str) -> PathBuf {
        self.root.join(profile).join(SETTINGS_FILE)
    }
}

impl ProfileStore for FsProfileStore {
    fn fetch_profile(&self, profile: &str) -> Result<Option<Vec<u8>>, ImportError> {
        let path = self.settings_path(profile);
        match std::fs::read(&path) {
            Ok(bytes) => {
                debug!(profile = %profile, len = bytes.len(), "read vault export");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(profile = %profile, path = %path.display(), "no vault export");
                Ok(None)
            }
            Err(e) => Err(ImportError::with_source(
                FailureReason::ProfileNotFound,
                format!("cannot read vault export for profile '{profile}'"),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn with_tmp_store(f: impl FnOnce(&FsProfileStore, &std::path::Path)) {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp = std::env::temp_dir()
            .join(format!("vaultlift-store-test-{}-{n}", std::process::id()));
        std::fs::create_dir_all(&tmp).unwrap();
        f(&FsProfileStore::new(&tmp), &tmp);
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn fetch_returns_file_contents() {
        with_tmp_store(|store, root| {
            let dir = root.join("alice");
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join(SETTINGS_FILE), b"encoded vault").unwrap();

            let bytes = store.fetch_profile("alice").unwrap();
            assert_eq!(bytes.as_deref(), Some(&b"encoded vault"[..]));
        });
    }

    #[test]
    fn fetch_missing_profile_returns_none() {
        with_tmp_store(|store, _root| {
            assert!(store.fetch_profile("nobody").unwrap().is_none());
        });
    }

    #[test]
    fn fetch_profile_without_settings_file_returns_none() {
        with_tmp_store(|store, root| {
            std::fs::create_dir_all(root.join("bob")).unwrap();
            assert!(store.fetch_profile("bob").unwrap().is_none());
        });
    }
}
