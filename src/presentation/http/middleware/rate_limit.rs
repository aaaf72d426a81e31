// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::sync::OnceLock;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Seconds between quota refills for a single client address.
const REPLENISH_SECONDS: u64 = 2;
const BURST_SIZE: u32 = 10;

pub type AuthRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Per-IP limiter for the credential endpoints. The client address comes from
/// forwarding headers or the connection info, so the server must be started
/// with `into_make_service_with_connect_info`.
pub fn auth_rate_limit_layer() -> Option<AuthRateLimitLayer> {
    static RATE_LIMITER: OnceLock<Option<AuthRateLimitLayer>> = OnceLock::new();

    RATE_LIMITER
        .get_or_init(|| {
            let mut builder = GovernorConfigBuilder::default();
            builder.per_second(REPLENISH_SECONDS);
            builder.burst_size(BURST_SIZE);
            let Some(config) = builder.key_extractor(SmartIpKeyExtractor).finish() else {
                tracing::error!("invalid rate limit configuration; limiter disabled");
                return None;
            };

            Some(GovernorLayer::new(config))
        })
        .clone()
}
