use super::{AuthCommandService, codes, validation::validate_password_pair};
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::user::{AccountToken, Email, PasswordHash, User, UserId},
};
use uuid::Uuid;

pub struct ForgotPasswordCommand {
    pub email: String,
}

pub struct ResetPasswordCommand {
    pub reset_id: String,
    pub password1: String,
    pub password2: String,
}

pub struct UpdatePasswordCommand {
    pub user_id: UserId,
    pub password1: String,
    pub password2: String,
}

impl AuthCommandService {
    /// Start a password reset. Always succeeds so callers cannot probe which
    /// addresses have accounts.
    pub async fn forgot_password(&self, command: ForgotPasswordCommand) -> ApplicationResult<()> {
        let Ok(email) = Email::new(command.email) else {
            tracing::debug!("password reset requested for malformed email");
            return Ok(());
        };

        match self.create_reset_request(&email).await {
            Ok(Some((user, reset_id))) => {
                if let Err(err) = self
                    .email_sender
                    .send_forgot_password(user.name.as_str(), email.as_str(), reset_id)
                    .await
                {
                    tracing::warn!(error = %err, user_id = %user.id, "failed to send password reset email");
                }
            }
            Ok(None) => tracing::debug!("password reset requested for unknown email"),
            Err(err) => tracing::error!(error = %err, "failed to create password reset request"),
        }

        Ok(())
    }

    pub async fn reset_password(&self, command: ResetPasswordCommand) -> ApplicationResult<()> {
        let password = validate_password_pair(command.password1, &command.password2)?;
        let reset_id = Uuid::parse_str(command.reset_id.trim())
            .map_err(|_| ApplicationError::invalid_token(codes::INVALID_RESET_ID))?;

        let password_hash = self.hash_password(&password).await?;
        let now = self.clock.now();

        let user = self
            .user_repo
            .redeem_password_reset(reset_id, password_hash, now)
            .await?
            .ok_or_else(|| ApplicationError::invalid_token(codes::INVALID_RESET_ID))?;

        tracing::info!(user_id = %user.id, "password reset");
        self.notify_password_change(&user, PasswordChange::Reset).await;
        Ok(())
    }

    pub async fn update_password(&self, command: UpdatePasswordCommand) -> ApplicationResult<()> {
        let password = validate_password_pair(command.password1, &command.password2)?;
        let password_hash = self.hash_password(&password).await?;

        let user = self
            .user_repo
            .update_password(command.user_id, password_hash, self.clock.now())
            .await?;

        tracing::info!(user_id = %user.id, "password updated");
        self.notify_password_change(&user, PasswordChange::Update).await;
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum PasswordChange {
    Reset,
    Update,
}

impl AuthCommandService {
    async fn create_reset_request(&self, email: &Email) -> ApplicationResult<Option<(User, Uuid)>> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            return Ok(None);
        };

        let token = AccountToken::password_reset(user.id, self.clock.now());
        let reset_id = token.id;
        self.token_repo.insert(token).await?;

        Ok(Some((user, reset_id)))
    }

    async fn hash_password(&self, password: &str) -> ApplicationResult<PasswordHash> {
        let hashed = self.password_hasher.hash(password).await?;
        Ok(PasswordHash::new(hashed)?)
    }

    async fn notify_password_change(&self, user: &User, change: PasswordChange) {
        let Some(email) = &user.email else {
            return;
        };

        let result = match change {
            PasswordChange::Reset => {
                self.email_sender
                    .send_password_reset(user.name.as_str(), email.as_str())
                    .await
            }
            PasswordChange::Update => {
                self.email_sender
                    .send_password_update(user.name.as_str(), email.as_str())
                    .await
            }
        };

        if let Err(err) = result {
            tracing::warn!(error = %err, user_id = %user.id, "failed to send password change email");
        }
    }
}
