use super::{AuthCommandService, codes, validation::validate_account};
use crate::{
    application::{
        dto::{SessionGrant, SessionLifetime},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{AccountToken, NewRegisteredUser, PasswordHash, User, UserId},
};

pub struct RegisterUserCommand {
    pub name: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

impl AuthCommandService {
    /// Register an account. When `active_user` is a guest session, the guest
    /// is upgraded in place so its history follows the new account.
    pub async fn register(
        &self,
        active_user: Option<UserId>,
        command: RegisterUserCommand,
    ) -> ApplicationResult<SessionGrant> {
        self.ensure_registration_allowed()?;

        let account = validate_account(
            command.name,
            command.email,
            command.password1,
            &command.password2,
        )?;

        if self.user_repo.find_by_email(&account.email).await?.is_some() {
            return Err(ApplicationError::conflict(codes::EMAIL_ALREADY_REGISTERED));
        }

        let hashed = self.password_hasher.hash(&account.password).await?;
        let password_hash = PasswordHash::new(hashed)?;
        let now = self.clock.now();
        let new_user =
            NewRegisteredUser::with_password(account.name, account.email, password_hash, now);

        let guest_id = self.active_guest(active_user).await?.map(|guest| guest.id);
        if let Some(guest_id) = guest_id {
            tracing::info!(user_id = %guest_id, "upgrading guest to registered user");
        }

        let verification = AccountToken::verification(guest_id.unwrap_or(new_user.id), now);
        let verify_id = verification.id;
        let user = self
            .user_repo
            .register(new_user, guest_id, verification)
            .await?;

        let grant = self.issue_session(user.clone(), SessionLifetime::Registered)?;

        if let Some(email) = &user.email {
            if let Err(err) = self
                .email_sender
                .send_welcome(user.name.as_str(), email.as_str(), verify_id)
                .await
            {
                tracing::warn!(error = %err, user_id = %user.id, "failed to send welcome email");
            }
        }

        tracing::info!(user_id = %user.id, "user registered");
        Ok(grant)
    }

    async fn active_guest(&self, active_user: Option<UserId>) -> ApplicationResult<Option<User>> {
        let Some(id) = active_user else {
            return Ok(None);
        };

        let user = self.user_repo.find_by_id(id).await?;
        Ok(user.filter(User::is_guest))
    }
}
