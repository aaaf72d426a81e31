use super::AuthCommandService;
use crate::{
    application::{
        dto::{SessionGrant, SessionLifetime},
        error::ApplicationResult,
    },
    domain::user::{NewGuestUser, UserName},
};

pub struct CreateGuestCommand {
    pub name: String,
}

impl AuthCommandService {
    pub async fn create_guest(&self, command: CreateGuestCommand) -> ApplicationResult<SessionGrant> {
        self.ensure_guests_allowed()?;

        let name = UserName::new(command.name)?;
        let user = self
            .user_repo
            .insert_guest(NewGuestUser::new(name, self.clock.now()))
            .await?;

        tracing::info!(user_id = %user.id, "guest user created");
        self.issue_session(user, SessionLifetime::Guest)
    }
}
