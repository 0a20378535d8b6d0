//! 전략 저장/조회 endpoint.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use dca_core::{DcaStrategy, SavedStrategy};
use std::sync::Arc;
use tracing::info;

use super::dca::recommend;
use crate::error::ApiResult;
use crate::state::AppState;

/// 전략을 분석한 뒤 추천과 함께 저장합니다.
///
/// POST /strategies
pub async fn save_strategy(
    State(state): State<Arc<AppState>>,
    Json(strategy): Json<DcaStrategy>,
) -> ApiResult<Json<SavedStrategy>> {
    let recommendation = recommend(&state, &strategy).await?;
    let saved = state
        .strategies
        .save(strategy, recommendation, Utc::now())
        .await;

    info!(id = %saved.id, asset = %saved.strategy.asset, "전략 저장");
    Ok(Json(saved))
}

/// 저장된 전략 목록 (저장 순서).
///
/// GET /strategies
pub async fn list_strategies(State(state): State<Arc<AppState>>) -> Json<Vec<SavedStrategy>> {
    Json(state.strategies.list().await)
}

/// 전략 라우터.
pub fn strategies_router() -> Router<Arc<AppState>> {
    Router::new().route("/strategies", get(list_strategies).post(save_strategy))
}
