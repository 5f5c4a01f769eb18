use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tokio::{net::TcpListener, sync::Semaphore};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use whois_parser::{config::Config, errors::WhoisError, metrics, WhoisParser, WhoisRecord};

#[derive(Clone)]
pub struct AppState {
    parser: WhoisParser,
    parse_semaphore: Arc<Semaphore>,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            parser: WhoisParser::new(),
            parse_semaphore: Arc::new(Semaphore::new(config.concurrent_parses)),
            config,
        }
    }
}

#[derive(Serialize)]
struct DebugResponse {
    record: WhoisRecord,
    analysis: Vec<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "whois_parser=info,tower_http=debug".into()),
        )
        .init();

    let config = Arc::new(Config::load().map_err(WhoisError::ConfigError)?);
    info!("Configuration loaded successfully");

    metrics::init_metrics();

    let app = build_router(AppState::new(config.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Whois parser listening on {}", addr);
    info!("Health check: http://{}/health", addr);
    info!("Metrics: http://{}/metrics", addr);
    info!(
        "Accepting raw whois text up to {} bytes, {} concurrent parses",
        config.max_input_size, config.concurrent_parses
    );

    // Graceful shutdown handling
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, gracefully shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let transport_limit = transport_body_limit(state.config.max_input_size);

    Router::new()
        .route("/parse", post(parse_handler))
        .route("/parse/debug", post(parse_debug_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics::metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(transport_limit))
                .into_inner(),
        )
        .with_state(state)
}

// Bodies up to twice the input limit reach validation and get an exact size
// in the error; larger ones are cut off while buffering.
fn transport_body_limit(max_input_size: usize) -> usize {
    max_input_size.saturating_mul(2)
}

async fn parse_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, WhoisError> {
    let (record, _) = run_parse(&state, body, false).await?;

    let json = record.to_json_pretty().map_err(track_error)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
}

async fn parse_debug_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DebugResponse>, WhoisError> {
    let (record, analysis) = run_parse(&state, body, true).await?;
    Ok(Json(DebugResponse { record, analysis }))
}

// Validates, then parses on the blocking pool under the concurrency limit
async fn run_parse(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
    with_analysis: bool,
) -> Result<(WhoisRecord, Vec<String>), WhoisError> {
    let start_time = Instant::now();
    metrics::increment_requests();

    let body = read_body(body, transport_body_limit(state.config.max_input_size))
        .map_err(track_error)?;
    whois_parser::validate_input(&body, state.config.max_input_size).map_err(track_error)?;

    let _permit = state
        .parse_semaphore
        .acquire()
        .await
        .map_err(|_| track_error(WhoisError::Internal("Semaphore error".to_string())))?;

    let parser = state.parser;
    let (record, analysis) = tokio::task::spawn_blocking(move || {
        if with_analysis {
            parser.parse_with_analysis(&body)
        } else {
            (parser.parse(&body), Vec::new())
        }
    })
    .await
    .map_err(|e| track_error(e.into()))?;

    if record.is_rate_limited {
        metrics::increment_rate_limited();
    }
    metrics::record_parse(start_time.elapsed(), record.found_fields());

    Ok((record, analysis))
}

fn read_body(body: Result<Bytes, BytesRejection>, transport_limit: usize) -> Result<String, WhoisError> {
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            WhoisError::BodyTooLarge {
                limit: transport_limit,
            }
        } else {
            WhoisError::InvalidInput(rejection.body_text())
        }
    })?;

    std::str::from_utf8(&bytes)
        .map(str::to_owned)
        .map_err(|_| WhoisError::InvalidUtf8)
}

fn track_error(error: WhoisError) -> WhoisError {
    metrics::increment_errors(error.kind());
    error
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.config.start_time.elapsed().as_secs(),
    })
}
