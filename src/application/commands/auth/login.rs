use super::{AuthCommandService, codes};
use crate::{
    application::{
        dto::{SessionGrant, SessionLifetime},
        error::{ApplicationError, ApplicationResult},
        policy::AuthMethod,
    },
    domain::user::{Email, User},
};

pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl AuthCommandService {
    pub async fn login(&self, command: LoginCommand) -> ApplicationResult<SessionGrant> {
        if self.policy.method != AuthMethod::Normal {
            return Err(ApplicationError::disabled(codes::LOCAL_LOGIN_DISABLED));
        }

        let user = self
            .find_and_authenticate_user(command.email, &command.password)
            .await?;

        tracing::info!(user_id = %user.id, "user logged in");
        self.issue_session(user, SessionLifetime::Registered)
    }

    async fn find_and_authenticate_user(
        &self,
        email: String,
        password: &str,
    ) -> ApplicationResult<User> {
        let email =
            Email::new(email).map_err(|_| ApplicationError::unauthorized(codes::INVALID_LOGIN))?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized(codes::INVALID_LOGIN))?;

        // Directory-provisioned accounts have no local password to check.
        let expected_hash = user
            .password_hash
            .as_ref()
            .ok_or_else(|| ApplicationError::unauthorized(codes::INVALID_LOGIN))?;

        self.password_hasher
            .verify(password, expected_hash.as_str())
            .await
            .map_err(|err| match err {
                ApplicationError::Unauthorized(_) => {
                    ApplicationError::unauthorized(codes::INVALID_LOGIN)
                }
                other => other,
            })?;

        Ok(user)
    }
}
