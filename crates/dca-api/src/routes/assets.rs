//! 자산 목록 및 차트 endpoint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use dca_core::{assemble_chart, find_asset, AssetSnapshot, ChartPoint, ChartRange, CoreError};
use dca_data::DataError;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::error::{core_error, not_found, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 차트 조회 쿼리.
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// 1D | 1W | 1M | 3M | 1Y (그 외는 1M)
    pub range: Option<String>,
}

/// 지원 자산 목록과 현재 시세.
///
/// GET /assets
pub async fn list_assets(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AssetSnapshot>>> {
    match state.gateway.asset_snapshots().await {
        Ok(snapshots) => Ok(Json(snapshots)),
        Err(DataError::NotFound(reasons)) => {
            error!(reasons = %reasons, "모든 자산 시세 조회 실패");
            let symbols: Vec<&str> = reasons
                .split("; ")
                .filter_map(|reason| reason.split(':').next())
                .collect();
            let details = json!({ "symbols": symbols });
            Err(
                ApiErrorResponse::with_details("UPSTREAM_UNAVAILABLE", reasons, details)
                    .with_status(StatusCode::INTERNAL_SERVER_ERROR),
            )
        }
        Err(e) => Err(ApiErrorResponse::new("UPSTREAM_ERROR", e.to_string())
            .with_status(StatusCode::INTERNAL_SERVER_ERROR)),
    }
}

/// 자산 차트 (가격 + SMA50/SMA200).
///
/// GET /assets/{symbol}/chart?range=1M
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<Json<Vec<ChartPoint>>> {
    let asset = find_asset(&symbol)
        .ok_or_else(|| core_error(CoreError::UnsupportedAsset(symbol.clone())))?;
    let range = query
        .range
        .as_deref()
        .map(ChartRange::parse_or_default)
        .unwrap_or_default();

    let series = state
        .gateway
        .get_or_fetch(asset.symbol)
        .await
        .into_result()
        .map_err(not_found)?;

    Ok(Json(assemble_chart(&series, range)))
}

/// 자산 라우터.
pub fn assets_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets", get(list_assets))
        .route("/assets/{symbol}/chart", get(get_chart))
}
