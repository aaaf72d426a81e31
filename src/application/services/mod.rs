use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::auth::{AuthCommandService, codes},
        dto::UserDto,
        error::ApplicationError,
        policy::AuthPolicy,
        ports::{
            directory::DirectoryAuthenticator,
            email::EmailSender,
            security::{PasswordHasher, SessionCodec},
            time::Clock,
        },
        queries::users::UserQueryService,
    },
    domain::user::{AccountTokenRepository, UserId, UserRepository},
};

pub struct ApplicationServices {
    pub auth_commands: Arc<AuthCommandService>,
    pub user_queries: Arc<UserQueryService>,
    session_codec: Arc<dyn SessionCodec>,
}

impl ApplicationServices {
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
        let auth_commands = Arc::new(AuthCommandService::new(
            Arc::clone(&user_repo),
            token_repo,
            password_hasher,
            Arc::clone(&session_codec),
            directory,
            email_sender,
            clock,
            policy,
        ));
        let user_queries = Arc::new(UserQueryService::new(Arc::clone(&user_repo)));

        Self {
            auth_commands,
            user_queries,
            session_codec,
        }
    }

    /// Decode a session cookie value without touching the database. Returns
    /// `None` for missing or tampered cookies.
    pub fn resolve_session(&self, token: &str) -> Option<UserId> {
        self.session_codec.decode(token).ok()
    }

    /// Decode a session cookie value and load the user it names.
    pub async fn authenticate_session(&self, token: &str) -> ApplicationResult<UserDto> {
        let user_id = self
            .session_codec
            .decode(token)
            .map_err(|_| ApplicationError::unauthorized(codes::INVALID_USER))?;

        self.user_queries.get_user(user_id).await
    }
}
