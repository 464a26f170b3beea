//! Error taxonomy for vault imports.
//!
//! Every failure an import can surface maps onto one of exactly three
//! reasons. Callers branch on [`ImportError::reason`]: only
//! `IncorrectPassword` is worth a retry (with a new password); the other
//! two are terminal for that profile.

use std::error::Error as StdError;

/// Why an import failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// No vault data exists at the given location.
    ProfileNotFound,
    /// Structural defect: bad header, bad base64/hex, ciphertext of the
    /// wrong length, or an unparsable document after decryption.
    InvalidFormat,
    /// Decryption completed structurally but the content failed the
    /// padding/marker check. Wrong password and corrupted ciphertext are
    /// indistinguishable here and both report this reason.
    IncorrectPassword,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfileNotFound => "profile not found",
            Self::InvalidFormat => "invalid format",
            Self::IncorrectPassword => "incorrect password",
        }
    }
}

/// Terminal import failure: a closed reason, a human-readable message, and
/// (where one exists) the underlying low-level cause, chained rather than
/// swallowed.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ImportError {
    reason: FailureReason,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ImportError {
    pub fn new(reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        reason: FailureReason,
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            reason,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn profile_not_found(message: impl Into<String>) -> Self {
        Self::new(FailureReason::ProfileNotFound, message)
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(FailureReason::InvalidFormat, message)
    }

    pub fn incorrect_password(message: impl Into<String>) -> Self {
        Self::new(FailureReason::IncorrectPassword, message)
    }

    pub fn reason(&self) -> FailureReason {
        self.reason
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
