// src/presentation/http/response.rs
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

/// Success envelope: `{"success": true, "error": "", "data": ...}`.
#[derive(Debug)]
pub struct ApiResponse<T> {
    data: Option<T>,
    cookies: Vec<HeaderValue>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            cookies: Vec::new(),
        }
    }

    pub fn with_cookie(mut self, cookie: HeaderValue) -> Self {
        self.cookies.push(cookie);
        self
    }

    pub fn with_cookies(mut self, cookies: Vec<HeaderValue>) -> Self {
        self.cookies.extend(cookies);
        self
    }
}

impl ApiResponse<()> {
    /// A success envelope with an empty `data` object.
    pub fn empty() -> Self {
        Self {
            data: None,
            cookies: Vec::new(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match self.data {
            Some(data) => match serde_json::to_value(data) {
                Ok(value) => value,
                Err(err) => {
                    tracing::error!(error = %err, "failed to serialize response body");
                    return super::error::HttpError::internal().into_response();
                }
            },
            None => json!({}),
        };

        let mut response = (
            StatusCode::OK,
            Json(Envelope {
                success: true,
                error: "",
                data,
            }),
        )
            .into_response();
        for cookie in self.cookies {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
        response
    }
}

#[derive(Serialize)]
struct Envelope {
    success: bool,
    error: &'static str,
    data: Value,
}

/// Documentation shape of the success envelope around a user.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub error: String,
    pub data: crate::application::dto::UserDto,
}

/// Documentation shape of a success envelope without payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmptyResponse {
    pub success: bool,
    pub error: String,
    #[schema(value_type = Object)]
    pub data: Value,
}
