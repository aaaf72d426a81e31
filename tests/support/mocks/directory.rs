// tests/support/mocks/directory.rs
use async_trait::async_trait;
use poker_auth::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::directory::{DirectoryAuthenticator, DirectoryEntry},
};
use std::collections::HashMap;

/// 事前登録したエントリだけを認証するディレクトリ
#[derive(Default)]
pub struct StubDirectory {
    entries: HashMap<String, (String, DirectoryEntry)>,
}

impl StubDirectory {
    pub fn with_user(mut self, login: &str, password: &str, email: &str, cn: &str) -> Self {
        self.entries.insert(
            login.to_string(),
            (
                password.to_string(),
                DirectoryEntry {
                    dn: format!("uid={login},ou=people,dc=example,dc=com"),
                    email: email.to_string(),
                    common_name: cn.to_string(),
                },
            ),
        );
        self
    }
}

#[async_trait]
impl DirectoryAuthenticator for StubDirectory {
    async fn authenticate(&self, login: &str, password: &str) -> ApplicationResult<DirectoryEntry> {
        match self.entries.get(login) {
            Some((expected, entry)) if expected == password => Ok(entry.clone()),
            Some(_) => Err(ApplicationError::unauthorized("directory bind rejected")),
            None => Err(ApplicationError::unauthorized("directory user not found")),
        }
    }
}

/// 接続できないディレクトリ
pub struct UnreachableDirectory;

#[async_trait]
impl DirectoryAuthenticator for UnreachableDirectory {
    async fn authenticate(&self, _login: &str, _password: &str) -> ApplicationResult<DirectoryEntry> {
        Err(ApplicationError::infrastructure(
            "failed connecting to ldap server at ldap://127.0.0.1:1",
        ))
    }
}
