// src/application/ports/directory.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

/// The attributes read from a directory entry after a successful bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub dn: String,
    pub email: String,
    pub common_name: String,
}

#[async_trait]
pub trait DirectoryAuthenticator: Send + Sync {
    /// Look up `login` in the directory and bind as the matching entry with
    /// `password`.
    async fn authenticate(&self, login: &str, password: &str) -> ApplicationResult<DirectoryEntry>;
}
