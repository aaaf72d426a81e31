// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::auth,
    middleware::rate_limit::auth_rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, patch, post},
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: HttpState, path_prefix: &str, allowed_origins: &[String]) -> Router {
    build_router_with_rate_limiter(state, path_prefix, allowed_origins, true)
}

pub fn build_router_with_rate_limiter(
    state: HttpState,
    path_prefix: &str,
    allowed_origins: &[String],
    rate_limit: bool,
) -> Router {
    // Credentialed CORS cannot use a wildcard origin.
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) if origin != "*" => Some(value),
            _ => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let mut credentials = Router::new()
        .route("/auth", post(auth::login))
        .route("/auth/ldap", post(auth::ldap_login))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", patch(auth::reset_password));

    if rate_limit {
        if let Some(layer) = auth_rate_limit_layer() {
            credentials = credentials.layer(layer);
        }
    }

    let api = Router::new()
        .merge(credentials)
        .route("/auth/logout", delete(auth::logout))
        .route("/auth/guest", post(auth::create_guest))
        .route("/auth/register", post(auth::register))
        .route("/auth/update-password", patch(auth::update_password))
        .route("/auth/verify", patch(auth::verify_account));

    let app = Router::new()
        .merge(openapi::docs_router(path_prefix))
        .route("/health", get(health))
        .nest("/api", api);

    let app = if path_prefix.is_empty() {
        app
    } else {
        Router::new().nest(path_prefix, app)
    };

    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
