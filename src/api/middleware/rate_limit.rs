//! Per-IP rate limiting using the token bucket algorithm.
//!
//! Both layers key on the socket peer address, so the router must be served
//! with `into_make_service_with_connect_info::<SocketAddr>()`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::PeerIpKeyExtractor,
};

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Token bucket refill rate and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst: u32,
}

/// Resource endpoints: 2 requests per second, bursts of 100.
pub const API: RateLimit = RateLimit {
    per_second: 2,
    burst: 100,
};

/// `/auth` endpoints, where every request may hash a password: 1 request per
/// second, bursts of 10.
pub const AUTH: RateLimit = RateLimit {
    per_second: 1,
    burst: 10,
};

/// Creates a rate limiter for the resource endpoints.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> RateLimitLayer {
    build(API)
}

/// Creates the stricter limiter for login, registration and account routes.
pub fn secure_layer() -> RateLimitLayer {
    build(AUTH)
}

fn build(limit: RateLimit) -> RateLimitLayer {
    let config = GovernorConfigBuilder::default()
        .per_second(limit.per_second)
        .burst_size(limit.burst)
        .finish()
        .unwrap_or_else(|| {
            tracing::warn!(?limit, "invalid rate limit, falling back to governor defaults");
            GovernorConfig::default()
        });

    GovernorLayer::new(Arc::new(config))
}
