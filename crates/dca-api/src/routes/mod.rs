//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/` - 서비스 이름
//! - `/health`, `/health/ready` - 헬스 체크
//! - `/assets`, `/assets/{symbol}/chart` - 자산 목록 및 차트
//! - `/dca/analyze` - DCA 추천
//! - `/strategies` - 전략 저장/조회
//! - `/token/price/{token_id}` - 토큰 시세
//! - `/cache`, `/cache/{symbol}` - 캐시 무효화

pub mod assets;
pub mod cache;
pub mod dca;
pub mod health;
pub mod strategies;
pub mod token;

pub use assets::{assets_router, ChartQuery};
pub use cache::{cache_router, InvalidateResponse};
pub use dca::dca_router;
pub use health::{health_router, HealthResponse};
pub use strategies::strategies_router;
pub use token::token_router;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// GET /
async fn root() -> Json<Value> {
    Json(json!({ "message": "DCA AI Strategy API" }))
}

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .merge(health_router())
        .merge(assets_router())
        .merge(dca_router())
        .merge(strategies_router())
        .merge(token_router())
        .merge(cache_router())
}
