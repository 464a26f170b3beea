//! Recovery of stored credentials from encrypted vault exports.
//!
//! Derives a decryption key from the user's master password, decrypts the
//! vault payload, and parses the decrypted structured content into
//! [`CredentialRecord`]s.
//!
//! # Architecture
//!
//! - **`types`**: vault blob layout — format tag, salt, KDF parameter sets
//! - **`crypto`**: key derivation (PBKDF2-SHA1/SHA256) and AES-256-CBC
//!   decryption with marker validation
//! - **`document`**: dotted key-path extraction from the decrypted JSON tree
//! - **`vault`**: the orchestrating importer
//! - **`storage`**: byte-producing profile store collaborator
//!
//! # Usage
//!
//! ```rust,ignore
//! use vaultlift_import::{import_profile, FsProfileStore};
//!
//! let store = FsProfileStore::new("/path/to/profiles");
//! let records = import_profile(&store, "alice", "master password")?;
//! ```
//!
//! Failures carry one of exactly three reasons; only
//! [`FailureReason::IncorrectPassword`] warrants a retry with a new
//! password.

pub mod crypto;
pub mod document;
pub mod storage;
pub mod types;
pub mod vault;

pub use storage::{FsProfileStore, ProfileStore};
pub use types::{FormatTag, KdfParams, VaultHeader};
pub use vault::{import_profile, import_vault};
pub use vaultlift_core::{CredentialRecord, FailureReason, ImportError};
