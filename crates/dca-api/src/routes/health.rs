//! 헬스 체크 endpoint.
//!
//! 로드밸런서나 오케스트레이션 시스템에서 사용하는 liveness/readiness 확인.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use dca_data::GatewayStats;
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

/// 상세 헬스 체크 응답.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 전체 서비스 상태
    pub status: String,
    pub version: String,
    /// 서버 업타임(초)
    pub uptime_secs: i64,
    /// 현재 시간 (ISO 8601)
    pub timestamp: String,
    /// 게이트웨이 상태 (캐시 크기 포함)
    pub gateway: GatewayStats,
    pub saved_strategies: usize,
}

/// 간단한 헬스 체크 (liveness probe용).
///
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness probe용).
///
/// GET /health/ready
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        gateway: state.gateway.stats().await,
        saved_strategies: state.strategies.len().await,
    })
}

/// 헬스 체크 라우터.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(health_ready))
}
