// src/application/queries/users.rs
use crate::{
    application::{
        commands::auth::codes,
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{UserId, UserRepository},
};
use std::sync::Arc;

pub struct UserQueryService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserQueryService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn get_user(&self, id: UserId) -> ApplicationResult<UserDto> {
        self.user_repo
            .find_by_id(id)
            .await?
            .map(UserDto::from)
            .ok_or_else(|| ApplicationError::unauthorized(codes::INVALID_USER))
    }
}
