pub mod codec;
pub mod error;
pub mod record;

pub use error::{FailureReason, ImportError};
pub use record::CredentialRecord;
