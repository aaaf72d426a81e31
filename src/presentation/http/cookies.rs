// src/presentation/http/cookies.rs
use crate::application::dto::SessionLifetime;
use axum::http::{HeaderMap, HeaderValue, header::InvalidHeaderValue};
use chrono::Duration;
use headers::{Cookie, HeaderMapExt};

const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Attributes shared by every cookie the service sets or clears.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub session_name: String,
    pub frontend_name: String,
    pub path: String,
    pub domain: String,
    pub secure: bool,
    pub guest_max_age: Duration,
    pub registered_max_age: Duration,
}

impl CookieSettings {
    /// `path_prefix` is either empty or `/something` without a trailing slash.
    pub fn new(
        session_name: impl Into<String>,
        frontend_name: impl Into<String>,
        path_prefix: &str,
        domain: impl Into<String>,
        secure: bool,
        guest_max_age: Duration,
        registered_max_age: Duration,
    ) -> Self {
        Self {
            session_name: session_name.into(),
            frontend_name: frontend_name.into(),
            path: format!("{path_prefix}/"),
            domain: domain.into(),
            secure,
            guest_max_age,
            registered_max_age,
        }
    }

    pub fn max_age(&self, lifetime: SessionLifetime) -> Duration {
        match lifetime {
            SessionLifetime::Guest => self.guest_max_age,
            SessionLifetime::Registered => self.registered_max_age,
        }
    }

    /// `Set-Cookie` value carrying a freshly issued session token.
    pub fn session_cookie(
        &self,
        token: &str,
        lifetime: SessionLifetime,
    ) -> Result<HeaderValue, InvalidHeaderValue> {
        let max_age = self.max_age(lifetime).num_seconds();
        let mut cookie = format!("{}={token}; Max-Age={max_age}", self.session_name);
        self.push_attributes(&mut cookie, true);
        HeaderValue::from_str(&cookie)
    }

    /// `Set-Cookie` values that remove both the session cookie and the
    /// frontend's own cookie.
    ///
    /// The frontend writes its cookie host-only, so its removal carries just
    /// the path; a `Domain` attribute would target a different cookie.
    pub fn clear_cookies(&self) -> Vec<HeaderValue> {
        let mut session = format!("{}=; Max-Age=0; Expires={EXPIRED}", self.session_name);
        self.push_attributes(&mut session, true);
        let frontend = format!(
            "{}=; Max-Age=0; Expires={EXPIRED}; Path={}",
            self.frontend_name, self.path
        );

        [session, frontend]
            .iter()
            .filter_map(|cookie| HeaderValue::from_str(cookie).ok())
            .collect()
    }

    pub fn read_session(&self, headers: &HeaderMap) -> Option<String> {
        let cookie = headers.typed_get::<Cookie>()?;
        cookie
            .get(&self.session_name)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }

    fn push_attributes(&self, cookie: &mut String, http_only: bool) {
        cookie.push_str("; Path=");
        cookie.push_str(&self.path);
        if !self.domain.is_empty() {
            cookie.push_str("; Domain=");
            cookie.push_str(&self.domain);
        }
        if http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=Strict");
    }
}
