// tests/support/helpers.rs
use super::mocks;
use axum::body::{self, Body};
use axum::http::{HeaderMap, Method, Request, Response, StatusCode, header};
use chrono::Duration;
use poker_auth::application::{
    policy::AuthPolicy,
    ports::{
        directory::DirectoryAuthenticator,
        email::EmailSender,
        security::{PasswordHasher, SessionCodec},
        time::Clock,
    },
    services::ApplicationServices,
};
use poker_auth::domain::user::{
    AccountTokenRepository, Email, PasswordHash, User, UserId, UserName, UserRepository, UserType,
};
use poker_auth::infrastructure::security::session_codec::HmacSessionCodec;
use poker_auth::presentation::http::{
    cookies::CookieSettings, routes::build_router_with_rate_limiter, state::HttpState,
};
use serde_json::Value;
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "warriorId";
pub const FRONTEND_COOKIE: &str = "warrior";

/// テスト用アプリケーション一式
pub struct TestApp {
    pub router: axum::Router,
    pub users: Arc<mocks::InMemoryUserRepo>,
    pub tokens: Arc<mocks::InMemoryTokenRepo>,
    pub emails: Arc<mocks::CapturingEmailSender>,
    pub clock: Arc<mocks::FixedClock>,
    pub codec: Arc<HmacSessionCodec>,
}

#[derive(Default)]
pub struct TestAppBuilder {
    policy: AuthPolicy,
    directory: Option<Arc<dyn DirectoryAuthenticator>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    email_sender: Option<Arc<dyn EmailSender>>,
    path_prefix: String,
}

impl TestAppBuilder {
    pub fn policy(mut self, policy: AuthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn directory(mut self, directory: Arc<dyn DirectoryAuthenticator>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// メモリ上のリポジトリの代わりに任意のリポジトリを使う
    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn email_sender(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.email_sender = Some(sender);
        self
    }

    pub fn path_prefix(mut self, prefix: &str) -> Self {
        self.path_prefix = prefix.to_string();
        self
    }

    pub fn build(self) -> TestApp {
        let tokens = Arc::new(mocks::InMemoryTokenRepo::default());
        let users = Arc::new(mocks::InMemoryUserRepo::new(Arc::clone(&tokens)));
        let emails = Arc::new(mocks::CapturingEmailSender::default());
        let clock = Arc::new(mocks::FixedClock::new());
        let codec = Arc::new(mocks::test_session_codec(
            SESSION_COOKIE,
            Arc::clone(&clock) as Arc<dyn Clock>,
        ));

        let user_repo: Arc<dyn UserRepository> = self
            .user_repo
            .unwrap_or_else(|| Arc::clone(&users) as Arc<dyn UserRepository>);
        let token_repo: Arc<dyn AccountTokenRepository> = Arc::clone(&tokens) as _;
        let password_hasher: Arc<dyn PasswordHasher> = Arc::new(mocks::PlainPasswordHasher);
        let session_codec: Arc<dyn SessionCodec> = Arc::clone(&codec) as _;
        let email_sender: Arc<dyn EmailSender> = self
            .email_sender
            .unwrap_or_else(|| Arc::clone(&emails) as Arc<dyn EmailSender>);

        let services = Arc::new(ApplicationServices::new(
            user_repo,
            token_repo,
            password_hasher,
            session_codec,
            self.directory,
            email_sender,
            Arc::clone(&clock) as Arc<dyn Clock>,
            self.policy,
        ));

        let cookies = CookieSettings::new(
            SESSION_COOKIE,
            FRONTEND_COOKIE,
            &self.path_prefix,
            "",
            true,
            Duration::days(365),
            Duration::days(30),
        );

        let state = HttpState {
            services,
            cookies: Arc::new(cookies),
        };
        let origins = vec!["http://localhost:8080".to_string()];
        let router = build_router_with_rate_limiter(state, &self.path_prefix, &origins, false);

        TestApp {
            router,
            users,
            tokens,
            emails,
            clock,
            codec,
        }
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder::default()
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    /// 登録済みユーザーを直接リポジトリに追加する
    pub fn seed_registered(&self, name: &str, email: &str, password: &str) -> User {
        let now = mocks::fixed_now();
        let user = User {
            id: UserId::generate(),
            name: UserName::new(name).unwrap(),
            email: Some(Email::new(email).unwrap()),
            password_hash: Some(PasswordHash::new(mocks::plain_hash(password)).unwrap()),
            user_type: UserType::Registered,
            verified: false,
            created_at: now,
            updated_at: now,
        };
        self.users.put(user.clone());
        user
    }

    pub fn seed_guest(&self, name: &str) -> User {
        let now = mocks::fixed_now();
        let user = User {
            id: UserId::generate(),
            name: UserName::new(name).unwrap(),
            email: None,
            password_hash: None,
            user_type: UserType::Guest,
            verified: false,
            created_at: now,
            updated_at: now,
        };
        self.users.put(user.clone());
        user
    }

    /// `Cookie` ヘッダー値（セッション cookie のみ）
    pub fn cookie_for(&self, id: UserId) -> String {
        format!("{SESSION_COOKIE}={}", self.codec.encode(id).unwrap())
    }
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request_with_cookie(
    method: Method,
    uri: &str,
    body: Value,
    cookie: &str,
) -> Request<Body> {
    let mut req = json_request(method, uri, body);
    req.headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    req
}

/// レスポンスのステータス・ヘッダー・JSON ボディを取り出す
pub async fn read_json(resp: Response<Body>) -> (StatusCode, HeaderMap, Value) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
    let value = serde_json::from_slice(&bytes).expect("response body is JSON");
    (status, headers, value)
}

pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// `Set-Cookie` ヘッダーから指定 cookie の値を取り出す
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(headers).into_iter().find_map(|cookie| {
        cookie
            .split(';')
            .next()
            .and_then(|pair| pair.strip_prefix(&prefix))
            .map(str::to_string)
    })
}

/// エラーエンベロープのステータスとエラーコードを検証する
pub async fn assert_error_response(resp: Response<Body>, expected_status: StatusCode, expected_error: &str) {
    let (status, _, value) = read_json(resp).await;
    assert_eq!(status, expected_status, "unexpected status, body: {value}");
    assert_eq!(value["success"], false);
    assert_eq!(value["error"], expected_error);
    assert!(value["data"].as_object().is_some_and(|data| data.is_empty()));
}
