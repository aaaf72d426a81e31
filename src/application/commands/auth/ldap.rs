use super::{AuthCommandService, codes};
use crate::{
    application::{
        dto::{SessionGrant, SessionLifetime},
        error::{ApplicationError, ApplicationResult},
        policy::AuthMethod,
        ports::directory::DirectoryEntry,
    },
    domain::user::{Email, NewRegisteredUser, User, UserName},
};

pub struct LdapLoginCommand {
    pub login: String,
    pub password: String,
}

impl AuthCommandService {
    /// Authenticate against the directory, provisioning a verified local
    /// account the first time a directory user signs in.
    pub async fn ldap_login(&self, command: LdapLoginCommand) -> ApplicationResult<SessionGrant> {
        if self.policy.method != AuthMethod::Ldap {
            return Err(ApplicationError::disabled(codes::LDAP_LOGIN_DISABLED));
        }
        let directory = self
            .directory
            .as_ref()
            .ok_or_else(|| ApplicationError::disabled(codes::LDAP_LOGIN_DISABLED))?;

        let login = command.login.trim().to_lowercase();
        // An empty password would turn the user bind into an anonymous bind.
        if login.is_empty() || command.password.is_empty() {
            return Err(ApplicationError::unauthorized(codes::INVALID_LOGIN));
        }

        let entry = directory
            .authenticate(&login, &command.password)
            .await
            .map_err(|err| {
                match &err {
                    ApplicationError::Infrastructure(msg) => {
                        tracing::error!(error = %msg, login = %login, "directory lookup failed");
                    }
                    other => {
                        tracing::warn!(error = %other, login = %login, "directory authentication rejected");
                    }
                }
                ApplicationError::unauthorized(codes::INVALID_LOGIN)
            })?;

        let user = self.find_or_provision_directory_user(entry).await?;
        self.issue_session(user, SessionLifetime::Registered)
    }

    async fn find_or_provision_directory_user(
        &self,
        entry: DirectoryEntry,
    ) -> ApplicationResult<User> {
        let email = Email::new(entry.email.as_str()).map_err(|err| {
            tracing::warn!(dn = %entry.dn, error = %err, "directory entry has no usable email");
            ApplicationError::unauthorized(codes::INVALID_LOGIN)
        })?;

        if let Some(user) = self.user_repo.find_by_email(&email).await? {
            return Ok(user);
        }

        let name = UserName::new(entry.common_name.as_str())
            .or_else(|_| UserName::new(email.as_str()))?;

        tracing::info!(email = %email, dn = %entry.dn, "provisioning directory user");
        let new_user = NewRegisteredUser::from_directory(name, email, self.clock.now());
        let user = self.user_repo.insert_registered(new_user).await?;

        Ok(user)
    }
}
