// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::auth::{
        CreateGuestCommand, ForgotPasswordCommand, LdapLoginCommand, LoginCommand,
        RegisterUserCommand, ResetPasswordCommand, UpdatePasswordCommand, VerifyAccountCommand,
    },
    dto::{SessionGrant, UserDto},
    error::ApplicationError,
};
use crate::domain::user::UserId;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{JsonBody, MaybeSession, SessionUser};
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::state::HttpState;
use axum::Extension;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub warrior_email: String,
    pub warrior_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestRequest {
    pub warrior_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub warrior_name: String,
    pub warrior_email: String,
    pub warrior_password1: String,
    pub warrior_password2: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub warrior_email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub reset_id: String,
    pub warrior_password1: String,
    pub warrior_password2: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub warrior_password1: String,
    pub warrior_password2: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAccountRequest {
    pub verify_id: String,
}

/// Wrap a grant in the success envelope and set its session cookie.
fn with_session(state: &HttpState, grant: SessionGrant) -> HttpResult<ApiResponse<UserDto>> {
    let cookie = state
        .cookies
        .session_cookie(&grant.token, grant.lifetime)
        .map_err(|err| {
            tracing::error!(error = %err, "failed to build session cookie");
            HttpError::internal()
        })?;

    Ok(ApiResponse::ok(grant.user).with_cookie(cookie))
}

#[utoipa::path(
    post,
    path = "/api/auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set.", body = crate::presentation::http::response::UserResponse),
        (status = 400, description = "Local login disabled.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Invalid credentials.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> HttpResult<ApiResponse<UserDto>> {
    let command = LoginCommand {
        email: payload.warrior_email,
        password: payload.warrior_password,
    };

    let grant = state
        .services
        .auth_commands
        .login(command)
        .await
        .into_http()?;

    with_session(&state, grant)
}

#[utoipa::path(
    post,
    path = "/api/auth/ldap",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in through the directory; session cookie set.", body = crate::presentation::http::response::UserResponse),
        (status = 400, description = "Directory login disabled.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Invalid credentials.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn ldap_login(
    Extension(state): Extension<HttpState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> HttpResult<ApiResponse<UserDto>> {
    let command = LdapLoginCommand {
        login: payload.warrior_email,
        password: payload.warrior_password,
    };

    let grant = state
        .services
        .auth_commands
        .ldap_login(command)
        .await
        .into_http()?;

    with_session(&state, grant)
}

#[utoipa::path(
    delete,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookies cleared.", body = crate::presentation::http::response::EmptyResponse)
    ),
    tag = "Auth"
)]
pub async fn logout(Extension(state): Extension<HttpState>) -> ApiResponse<()> {
    ApiResponse::empty().with_cookies(state.cookies.clear_cookies())
}

#[utoipa::path(
    post,
    path = "/api/auth/guest",
    request_body = GuestRequest,
    responses(
        (status = 200, description = "Guest created; session cookie set.", body = crate::presentation::http::response::UserResponse),
        (status = 400, description = "Guests disabled or invalid name.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Persistence failure.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn create_guest(
    Extension(state): Extension<HttpState>,
    payload: Result<JsonBody<GuestRequest>, HttpError>,
) -> HttpResult<ApiResponse<UserDto>> {
    state.services.auth_commands.ensure_guests_allowed().into_http()?;
    let JsonBody(payload) = payload?;

    let grant = state
        .services
        .auth_commands
        .create_guest(CreateGuestCommand {
            name: payload.warrior_name,
        })
        .await
        .into_http()?;

    with_session(&state, grant)
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account registered; session cookie set.", body = crate::presentation::http::response::UserResponse),
        (status = 400, description = "Registration disabled, invalid input or email taken.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Persistence failure.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    Extension(state): Extension<HttpState>,
    session: MaybeSession,
    payload: Result<JsonBody<RegisterRequest>, HttpError>,
) -> HttpResult<ApiResponse<UserDto>> {
    let MaybeSession {
        user_id,
        clear_cookies,
    } = session;

    register_user(&state, user_id, payload)
        .await
        .map_err(|err| err.with_cookies(clear_cookies))
}

async fn register_user(
    state: &HttpState,
    active_user: Option<UserId>,
    payload: Result<JsonBody<RegisterRequest>, HttpError>,
) -> HttpResult<ApiResponse<UserDto>> {
    state
        .services
        .auth_commands
        .ensure_registration_allowed()
        .into_http()?;
    let JsonBody(payload) = payload?;

    let command = RegisterUserCommand {
        name: payload.warrior_name,
        email: payload.warrior_email,
        password1: payload.warrior_password1,
        password2: payload.warrior_password2,
    };

    let grant = state
        .services
        .auth_commands
        .register(active_user, command)
        .await
        .into_http()?;

    with_session(state, grant)
}

#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset email sent when the account exists.", body = crate::presentation::http::response::EmptyResponse)
    ),
    tag = "Auth"
)]
pub async fn forgot_password(
    Extension(state): Extension<HttpState>,
    JsonBody(payload): JsonBody<ForgotPasswordRequest>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .auth_commands
        .forgot_password(ForgotPasswordCommand {
            email: payload.warrior_email,
        })
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}

#[utoipa::path(
    patch,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset.", body = crate::presentation::http::response::EmptyResponse),
        (status = 400, description = "Invalid passwords.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Unknown or expired reset id, or persistence failure.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn reset_password(
    Extension(state): Extension<HttpState>,
    JsonBody(payload): JsonBody<ResetPasswordRequest>,
) -> HttpResult<ApiResponse<()>> {
    let command = ResetPasswordCommand {
        reset_id: payload.reset_id,
        password1: payload.warrior_password1,
        password2: payload.warrior_password2,
    };

    state
        .services
        .auth_commands
        .reset_password(command)
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}

#[utoipa::path(
    patch,
    path = "/api/auth/update-password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated.", body = crate::presentation::http::response::EmptyResponse),
        (status = 400, description = "Invalid passwords.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "No valid session.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn update_password(
    Extension(state): Extension<HttpState>,
    SessionUser(user): SessionUser,
    JsonBody(payload): JsonBody<UpdatePasswordRequest>,
) -> HttpResult<ApiResponse<()>> {
    let user_id = UserId::new(user.id)
        .map_err(ApplicationError::from)
        .into_http()?;

    let command = UpdatePasswordCommand {
        user_id,
        password1: payload.warrior_password1,
        password2: payload.warrior_password2,
    };

    state
        .services
        .auth_commands
        .update_password(command)
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}

#[utoipa::path(
    patch,
    path = "/api/auth/verify",
    request_body = VerifyAccountRequest,
    responses(
        (status = 200, description = "Account verified.", body = crate::presentation::http::response::EmptyResponse),
        (status = 500, description = "Unknown verify id or persistence failure.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn verify_account(
    Extension(state): Extension<HttpState>,
    JsonBody(payload): JsonBody<VerifyAccountRequest>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .auth_commands
        .verify_account(VerifyAccountCommand {
            verify_id: payload.verify_id,
        })
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}
