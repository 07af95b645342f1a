use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::knowledge::store::KnowledgeBase;
use crate::matching::engine::diagnose;
use crate::matching::DiagnosisRequest;
use crate::utils::validation::validate_request;

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_BODY_SIZE: usize = 64 * 1024; // 64KB
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state
pub struct AppState {
    pub knowledge: KnowledgeBase,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created, the knowledge
/// base cannot be loaded, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Build the routes and per-request protections around a knowledge base.
///
/// Rate limiting is added separately by [`create_router`] because it keys on
/// the peer address, which only exists for real connections.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/diagnose", post(diagnose_handler))
        .route("/api/diseases", get(diseases_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(REQUEST_TIMEOUT_SECS),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(knowledge: KnowledgeBase) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { knowledge });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    Ok(build_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let knowledge = KnowledgeBase::load(args.knowledge_base.as_deref())?;
    tracing::info!("Loaded knowledge base with {} diseases", knowledge.len());

    let app = create_router(knowledge)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting symptom-solver web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

/// API endpoint for forward and backward diagnosis
async fn diagnose_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DiagnosisRequest>,
) -> Response {
    let start_time = std::time::Instant::now();

    if let Err(e) = validate_request(&request) {
        return (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                e.error_type(),
                &e.to_string(),
                None,
            )),
        )
            .into_response();
    }

    match diagnose(&state.knowledge, &request) {
        Ok(results) => {
            tracing::debug!(
                "Diagnosed {} symptoms in {} mode: {} results in {:?}",
                request.symptoms.len(),
                request.mode,
                results.len(),
                start_time.elapsed()
            );
            Json(serde_json::json!({ "results": results })).into_response()
        }
        // Unknown goals already come back as a `NotFound` result
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                e.error_type(),
                &e.to_string(),
                None,
            )),
        )
            .into_response(),
    }
}

/// Return list of diseases in the knowledge base
async fn diseases_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let diseases = state.knowledge.diseases();

    Json(serde_json::json!({
        "count": diseases.len(),
        "diseases": diseases,
    }))
}
