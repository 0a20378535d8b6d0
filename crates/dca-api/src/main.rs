//! DCA 시세/추천 API 서버.
//!
//! 설정을 로드하고 게이트웨이를 구성한 뒤 Axum 서버를 시작합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use dca_api::{create_api_router, metrics_layer, setup_metrics_recorder, AppState};
use dca_core::{init_logging, AppConfig, CorsConfig, LogConfig};
use dca_data::{HttpMarketProvider, MarketDataGateway};

/// 게이트웨이 재시도 예산 위에 더하는 요청 타임아웃 여유분.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// CORS 레이어 생성.
///
/// 설정된 origin 중 파싱 가능한 것만 허용합니다. 하나도 없으면 모든 origin을 허용합니다.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        warn!("No valid CORS origins configured, allowing any origin");
        AllowOrigin::any()
    } else {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// 전체 라우터 생성.
///
/// 요청 타임아웃은 게이트웨이 재시도 예산보다 길어야 합니다.
fn create_router(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    cors: &CorsConfig,
    request_timeout: Duration,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_api_router().with_state(state))
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors_layer(cors))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default()?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("logging init failed: {}", e))?;

    info!("Starting DCA API server...");

    let metrics_handle = setup_metrics_recorder()?;

    let provider = HttpMarketProvider::new(&config.provider)?;
    info!(base_url = provider.base_url(), "Market data provider configured");

    let gateway = MarketDataGateway::new(Arc::new(provider), &config.gateway)
        .with_attempt_timeout(config.provider.timeout());
    info!(
        cache_ttl_secs = config.gateway.cache_ttl_secs,
        min_interval_ms = config.gateway.min_interval_ms,
        max_retries = config.gateway.max_retries,
        "Market data gateway ready"
    );

    let state = Arc::new(AppState::new(Arc::new(gateway)));
    let request_timeout = config.gateway.max_elapsed() + REQUEST_TIMEOUT_MARGIN;
    let app = create_router(state, metrics_handle, &config.cors, request_timeout);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "API server listening");
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기 (Ctrl+C 또는 SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
