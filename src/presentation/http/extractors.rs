// src/presentation/http/extractors.rs
use crate::{
    application::{commands::auth::codes, dto::UserDto, error::ApplicationError},
    domain::user::UserId,
    presentation::http::state::HttpState,
};
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::{HeaderValue, request::Parts},
};

use super::error::HttpError;

/// The user named by a valid session cookie. Requests without one are
/// rejected with 401 and told to drop their cookies.
#[derive(Debug, Clone)]
pub struct SessionUser(pub UserDto);

/// The user id from the session cookie, if it decodes. Never rejects; a
/// cookie that fails to decode leaves `clear_cookies` filled so the handler
/// can drop it.
#[derive(Debug, Clone, Default)]
pub struct MaybeSession {
    pub user_id: Option<UserId>,
    pub clear_cookies: Vec<HeaderValue>,
}

/// JSON body whose rejections use the error envelope.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(HttpError))]
pub struct JsonBody<T>(pub T);

fn app_state(parts: &Parts) -> Result<HttpState, HttpError> {
    parts.extensions.get::<HttpState>().cloned().ok_or_else(|| {
        HttpError::from_error(ApplicationError::Infrastructure(
            "application state missing".into(),
        ))
    })
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts)?;

        let token = app_state.cookies.read_session(&parts.headers).ok_or_else(|| {
            HttpError::from_error(ApplicationError::unauthorized(codes::INVALID_USER))
        })?;

        match app_state.services.authenticate_session(&token).await {
            Ok(user) => Ok(Self(user)),
            Err(err @ ApplicationError::Unauthorized(_)) => {
                tracing::debug!(error = %err, "rejecting stale session cookie");
                Err(HttpError::from_error(err).with_cookies(app_state.cookies.clear_cookies()))
            }
            Err(err) => Err(HttpError::from_error(err)),
        }
    }
}

impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts)?;

        let Some(token) = app_state.cookies.read_session(&parts.headers) else {
            return Ok(Self::default());
        };

        match app_state.services.resolve_session(&token) {
            Some(user_id) => Ok(Self {
                user_id: Some(user_id),
                clear_cookies: Vec::new(),
            }),
            None => {
                tracing::debug!("ignoring undecodable session cookie");
                Ok(Self {
                    user_id: None,
                    clear_cookies: app_state.cookies.clear_cookies(),
                })
            }
        }
    }
}
