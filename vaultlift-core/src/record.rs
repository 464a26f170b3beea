//! The credential record an import produces.

/// A single recovered credential.
///
/// Every field is optional: older export versions omit some of them, and
/// the importer probes each one defensively rather than failing. Records
/// keep document order and duplicates are preserved.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    pub title: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub notes: Option<String>,
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("title", &self.title)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("notes", &self.notes)
            .finish()
    }
}
