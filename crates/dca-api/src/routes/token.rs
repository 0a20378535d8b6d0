//! 토큰 시세 endpoint.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use dca_core::TokenPrice;
use std::sync::Arc;

use crate::error::{not_found, ApiResult};
use crate::state::AppState;

/// 업스트림 토큰 시세를 그대로 반환합니다.
///
/// 재시도가 모두 실패하면 신뢰도 0의 폴백 시세를 반환합니다.
/// GET /token/price/{token_id}
pub async fn get_token_price(
    State(state): State<Arc<AppState>>,
    Path(token_id): Path<String>,
) -> ApiResult<Json<TokenPrice>> {
    state
        .gateway
        .token_price(&token_id)
        .await
        .into_result()
        .map(Json)
        .map_err(not_found)
}

/// 토큰 시세 라우터.
pub fn token_router() -> Router<Arc<AppState>> {
    Router::new().route("/token/price/{token_id}", get(get_token_price))
}
