use anyhow::Result;
use chrono::Duration;
use poker_auth::application::{
    ports::{
        directory::DirectoryAuthenticator,
        email::EmailSender,
        security::{PasswordHasher, SessionCodec},
        time::Clock,
    },
    services::ApplicationServices,
};
use poker_auth::config::AppConfig;
use poker_auth::domain::user::{AccountTokenRepository, UserRepository};
use poker_auth::infrastructure::{
    database,
    directory::LdapDirectory,
    email::LogEmailSender,
    repositories::{PostgresAccountTokenRepository, PostgresUserRepository},
    security::{password::Argon2PasswordHasher, session_codec::HmacSessionCodec},
    time::SystemClock,
};
use poker_auth::presentation::http::{
    cookies::CookieSettings, routes::build_router, state::HttpState,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let token_repo: Arc<dyn AccountTokenRepository> =
        Arc::new(PostgresAccountTokenRepository::new(pool));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);

    let guest_max_age = Duration::days(config.guest_session_days());
    let registered_max_age = Duration::days(config.registered_session_days());
    let session_codec: Arc<dyn SessionCodec> = Arc::new(HmacSessionCodec::new(
        config.secure_cookie_name(),
        config.cookie_hashkey(),
        guest_max_age.max(registered_max_age),
        Arc::clone(&clock),
    )?);

    let directory: Option<Arc<dyn DirectoryAuthenticator>> = config.ldap().map(|settings| {
        tracing::info!(url = %settings.url, "directory login enabled");
        Arc::new(LdapDirectory::new(settings.clone())) as Arc<dyn DirectoryAuthenticator>
    });
    let email_sender: Arc<dyn EmailSender> = Arc::new(LogEmailSender::new(config.app_url()));

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        token_repo,
        password_hasher,
        session_codec,
        directory,
        email_sender,
        clock,
        config.policy(),
    ));

    let cookies = CookieSettings::new(
        config.secure_cookie_name(),
        config.frontend_cookie_name(),
        config.path_prefix(),
        config.app_domain(),
        config.secure_cookie(),
        guest_max_age,
        registered_max_age,
    );

    let state = HttpState {
        services,
        cookies: Arc::new(cookies),
    };

    let app = build_router(state, config.path_prefix(), config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(
        auth_method = %config.policy().method,
        allow_guests = config.policy().allow_guests,
        allow_registration = config.policy().allow_registration,
        "listening on {address}"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
