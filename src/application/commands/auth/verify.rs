use super::{AuthCommandService, codes};
use crate::application::error::{ApplicationError, ApplicationResult};
use uuid::Uuid;

pub struct VerifyAccountCommand {
    pub verify_id: String,
}

impl AuthCommandService {
    pub async fn verify_account(&self, command: VerifyAccountCommand) -> ApplicationResult<()> {
        let verify_id = Uuid::parse_str(command.verify_id.trim())
            .map_err(|_| ApplicationError::invalid_token(codes::INVALID_VERIFY_ID))?;
        let now = self.clock.now();

        let user = self
            .user_repo
            .redeem_verification(verify_id, now)
            .await?
            .ok_or_else(|| ApplicationError::invalid_token(codes::INVALID_VERIFY_ID))?;

        tracing::info!(user_id = %user.id, "account verified");
        Ok(())
    }
}
