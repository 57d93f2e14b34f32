//! HTTP gateway for ReportSmith.
//!
//! Serves the embedded web UI and the v1 report API. Each request runs the
//! pipeline end to end; the only shared state is the immutable agent.

pub mod api_v1;
pub mod frontend;

use axum::extract::{ConnectInfo, DefaultBodyLimit};
use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::Json,
    routing::get,
};
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use reportsmith_agent::ResearchAgent;
use reportsmith_config::{AppConfig, GatewayConfig};
use reportsmith_core::invoker::AgentInvoker;
use reportsmith_pipeline::ReportPipeline;

/// Request body limit.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the full router: frontend, `/health` and the `/v1` API.
///
/// Layers applied:
/// - CORS restricted to the gateway's own origin
/// - Request body size limit (1 MB)
/// - In-memory rate limiting per client
/// - HTTP trace logging
pub fn build_router(api_state: api_v1::SharedApiState, gateway: &GatewayConfig) -> Router {
    let rate_limiter = Arc::new(RateLimiter::new(
        gateway.rate_limit_per_minute,
        Duration::from_secs(60),
    ));

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));
    if let Ok(origin) = HeaderValue::from_str(&format!("http://{}:{}", gateway.host, gateway.port)) {
        cors = cors.allow_origin(AllowOrigin::exact(origin));
    }

    Router::new()
        .route("/health", get(health_handler))
        .nest("/v1", api_v1::v1_router(api_state))
        .merge(frontend::frontend_router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(move |req, next| {
            let limiter = rate_limiter.clone();
            rate_limit_middleware(limiter, req, next)
        }))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// The provider and agent are built once and shared by every request.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let provider = reportsmith_providers::build_from_config(&config)?;
    let agent = ResearchAgent::from_config(provider.clone(), &config)?;
    let invoker: Arc<dyn AgentInvoker> = Arc::new(agent);

    let api_state = Arc::new(api_v1::ApiV1State {
        pipeline: ReportPipeline::new(invoker),
        provider: provider.name().to_string(),
        model: config.model.clone(),
    });

    let app = build_router(api_state, &config.gateway);

    info!(
        addr = %addr,
        provider = %config.provider,
        model = %config.model,
        tools = config.agent.enable_tools,
        "Gateway starting"
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

// --- Rate Limiter ---

/// Simple in-memory sliding-window rate limiter.
///
/// Tracks request timestamps per client key (peer IP).
/// Thread-safe via `std::sync::Mutex` (non-async, held briefly).
struct RateLimiter {
    max_requests: usize,
    window: Duration,
    clients: std::sync::Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: std::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Check if the client is within rate limits. Returns `true` if allowed.
    fn check(&self, client_key: &str) -> bool {
        let now = Instant::now();
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());

        // Evict stale clients once the map grows large.
        if clients.len() > 10_000 {
            clients.retain(|_, timestamps| {
                timestamps
                    .last()
                    .is_some_and(|t| now.duration_since(*t) < self.window)
            });
        }

        let timestamps = clients.entry(client_key.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < self.window);

        if timestamps.len() >= self.max_requests {
            return false;
        }

        timestamps.push(now);
        true
    }
}

/// Answers 429 once a client exceeds its budget. Only API calls count;
/// `/health` and static assets are exempt.
async fn rate_limit_middleware(
    limiter: Arc<RateLimiter>,
    req: axum::extract::Request,
    next: Next,
) -> Result<axum::response::Response, StatusCode> {
    if !req.uri().path().starts_with("/v1/") {
        return Ok(next.run(req).await);
    }

    let client_key = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    if !limiter.check(&client_key) {
        warn!(client = %client_key, "Rate limit exceeded");
        return Err(StatusCode::TOO_MANY_REQUESTS);
    }

    Ok(next.run(req).await)
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
