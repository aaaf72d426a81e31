use crate::{
    application::{
        dto::{SessionGrant, SessionLifetime},
        error::{ApplicationError, ApplicationResult},
        policy::AuthPolicy,
        ports::{
            directory::DirectoryAuthenticator,
            email::EmailSender,
            security::{PasswordHasher, SessionCodec},
            time::Clock,
        },
    },
    domain::user::{AccountTokenRepository, User, UserRepository},
};
use std::sync::Arc;

/// Error codes returned to clients in the response envelope.
pub mod codes {
    pub const INVALID_LOGIN: &str = "INVALID_LOGIN";
    pub const LOCAL_LOGIN_DISABLED: &str = "LOCAL_LOGIN_DISABLED";
    pub const LDAP_LOGIN_DISABLED: &str = "LDAP_LOGIN_DISABLED";
    pub const GUESTS_USERS_DISABLED: &str = "GUESTS_USERS_DISABLED";
    pub const USER_REGISTRATION_DISABLED: &str = "USER_REGISTRATION_DISABLED";
    pub const EMAIL_ALREADY_REGISTERED: &str = "EMAIL_ALREADY_REGISTERED";
    pub const INVALID_RESET_ID: &str = "INVALID_RESET_ID";
    pub const INVALID_VERIFY_ID: &str = "INVALID_VERIFY_ID";
    pub const INVALID_USER: &str = "INVALID_USER";
}

pub struct AuthCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) token_repo: Arc<dyn AccountTokenRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) session_codec: Arc<dyn SessionCodec>,
    pub(super) directory: Option<Arc<dyn DirectoryAuthenticator>>,
    pub(super) email_sender: Arc<dyn EmailSender>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) policy: AuthPolicy,
}

impl AuthCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_repo: Arc<dyn AccountTokenRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        session_codec: Arc<dyn SessionCodec>,
        directory: Option<Arc<dyn DirectoryAuthenticator>>,
        email_sender: Arc<dyn EmailSender>,
        clock: Arc<dyn Clock>,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            password_hasher,
            session_codec,
            directory,
            email_sender,
            clock,
            policy,
        }
    }

    pub fn ensure_guests_allowed(&self) -> ApplicationResult<()> {
        if self.policy.allow_guests {
            Ok(())
        } else {
            Err(ApplicationError::disabled(codes::GUESTS_USERS_DISABLED))
        }
    }

    pub fn ensure_registration_allowed(&self) -> ApplicationResult<()> {
        if self.policy.allow_registration {
            Ok(())
        } else {
            Err(ApplicationError::disabled(codes::USER_REGISTRATION_DISABLED))
        }
    }

    pub(super) fn issue_session(
        &self,
        user: User,
        lifetime: SessionLifetime,
    ) -> ApplicationResult<SessionGrant> {
        let token = self.session_codec.encode(user.id)?;
        Ok(SessionGrant {
            user: user.into(),
            token,
            lifetime,
        })
    }
}
