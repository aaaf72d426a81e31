// src/infrastructure/directory.rs
use crate::application::{
    ApplicationError, ApplicationResult,
    ports::directory::{DirectoryAuthenticator, DirectoryEntry},
};
use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry};

/// Connection and lookup settings for the LDAP directory.
#[derive(Debug, Clone)]
pub struct LdapSettings {
    pub url: String,
    pub use_tls: bool,
    pub bind_name: String,
    pub bind_password: String,
    pub base_dn: String,
    /// Search filter; every `%s` is replaced by the escaped login.
    pub filter: String,
    pub mail_attr: String,
    pub cn_attr: String,
}

pub struct LdapDirectory {
    settings: LdapSettings,
}

impl LdapDirectory {
    pub fn new(settings: LdapSettings) -> Self {
        Self { settings }
    }

    async fn connect(&self) -> ApplicationResult<Ldap> {
        let conn_settings = LdapConnSettings::new()
            .set_starttls(self.settings.use_tls)
            .set_no_tls_verify(self.settings.use_tls);

        let (conn, ldap) = LdapConnAsync::with_settings(conn_settings, &self.settings.url)
            .await
            .map_err(|err| connection_error(&self.settings.url, err))?;

        tokio::spawn(async move {
            if let Err(err) = conn.drive().await {
                tracing::warn!(error = %err, "ldap connection closed with error");
            }
        });

        Ok(ldap)
    }

    async fn lookup(
        &self,
        ldap: &mut Ldap,
        login: &str,
        password: &str,
    ) -> ApplicationResult<DirectoryEntry> {
        if !self.settings.bind_name.is_empty() {
            ldap.simple_bind(&self.settings.bind_name, &self.settings.bind_password)
                .await
                .and_then(|res| res.success())
                .map_err(|err| {
                    ApplicationError::infrastructure(format!("ldap service bind failed: {err}"))
                })?;
        }

        let filter = build_filter(&self.settings.filter, login);
        let attrs = vec![
            "dn",
            self.settings.mail_attr.as_str(),
            self.settings.cn_attr.as_str(),
        ];
        let (entries, _) = ldap
            .search(&self.settings.base_dn, Scope::Subtree, &filter, attrs)
            .await
            .and_then(|res| res.success())
            .map_err(|err| ApplicationError::infrastructure(format!("ldap search failed: {err}")))?;

        let [entry] = <[_; 1]>::try_from(entries).map_err(|entries| {
            tracing::warn!(
                login,
                matches = entries.len(),
                "ldap search did not return exactly one entry"
            );
            ApplicationError::unauthorized("directory user not found")
        })?;
        let entry = SearchEntry::construct(entry);

        let email = first_attr(&entry, &self.settings.mail_attr).ok_or_else(|| {
            ApplicationError::unauthorized(format!(
                "directory entry has no '{}' attribute",
                self.settings.mail_attr
            ))
        })?;
        let common_name = first_attr(&entry, &self.settings.cn_attr).unwrap_or_default();

        ldap.simple_bind(&entry.dn, password)
            .await
            .and_then(|res| res.success())
            .map_err(|err| {
                tracing::warn!(login, error = %err, "ldap user bind rejected");
                ApplicationError::unauthorized("directory bind rejected")
            })?;

        Ok(DirectoryEntry {
            dn: entry.dn,
            email,
            common_name,
        })
    }
}

#[async_trait]
impl DirectoryAuthenticator for LdapDirectory {
    async fn authenticate(&self, login: &str, password: &str) -> ApplicationResult<DirectoryEntry> {
        // An empty password turns the user bind into an anonymous bind.
        if password.is_empty() {
            return Err(ApplicationError::unauthorized("password is required"));
        }

        let mut ldap = self.connect().await?;
        let result = self.lookup(&mut ldap, login, password).await;

        if let Err(err) = ldap.unbind().await {
            tracing::debug!(error = %err, "ldap unbind failed");
        }

        result
    }
}

fn connection_error(url: &str, err: LdapError) -> ApplicationError {
    ApplicationError::infrastructure(format!("failed connecting to ldap server at {url}: {err}"))
}

fn build_filter(template: &str, login: &str) -> String {
    template.replace("%s", &ldap3::ldap_escape(login))
}

fn first_attr(entry: &SearchEntry, name: &str) -> Option<String> {
    entry
        .attrs
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first().cloned())
}
