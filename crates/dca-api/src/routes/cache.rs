//! 캐시 관리 endpoint.

use axum::{
    extract::{Path, State},
    routing::delete,
    Json, Router,
};
use dca_core::{find_asset, CoreError};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{core_error, ApiResult};
use crate::state::AppState;

/// 캐시 무효화 결과.
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// 제거된 항목 수
    pub removed: usize,
}

/// 전체 캐시 무효화.
///
/// DELETE /cache
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<InvalidateResponse> {
    let removed = state.gateway.invalidate_all().await;
    Json(InvalidateResponse {
        symbol: None,
        removed,
    })
}

/// 심볼 캐시 무효화.
///
/// DELETE /cache/{symbol}
pub async fn clear_symbol_cache(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<InvalidateResponse>> {
    let asset =
        find_asset(&symbol).ok_or_else(|| core_error(CoreError::UnsupportedAsset(symbol)))?;
    let removed = state.gateway.invalidate(asset.symbol).await;

    Ok(Json(InvalidateResponse {
        symbol: Some(asset.symbol.to_string()),
        removed: usize::from(removed),
    }))
}

/// 캐시 라우터.
pub fn cache_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cache", delete(clear_cache))
        .route("/cache/{symbol}", delete(clear_symbol_cache))
}
