//! DCA REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (자산 목록, 차트, DCA 분석, 전략 저장, 토큰 시세)
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`store`]: 메모리 전략 저장소
//! - [`routes`]: REST API 엔드포인트
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어

pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ApiErrorResponse, ApiResult};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use routes::create_api_router;
pub use state::AppState;
pub use store::StrategyStore;
