//! DCA 분석 endpoint.

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use dca_core::{analyze, find_asset, CoreError, DcaRecommendation, DcaStrategy};
use std::sync::Arc;
use tracing::info;

use crate::error::{analysis_error, core_error, not_found, ApiResult};
use crate::state::AppState;

/// 전략 입력을 검증하고 1년 시계열로 추천을 계산합니다.
pub(crate) async fn recommend(
    state: &AppState,
    strategy: &DcaStrategy,
) -> ApiResult<DcaRecommendation> {
    let asset = find_asset(&strategy.asset)
        .ok_or_else(|| core_error(CoreError::UnsupportedAsset(strategy.asset.clone())))?;

    if !strategy.amount.is_finite() || strategy.amount <= 0.0 {
        return Err(core_error(CoreError::InvalidInput(format!(
            "amount must be positive, got {}",
            strategy.amount
        ))));
    }

    let outcome = state.gateway.get_or_fetch(asset.symbol).await;
    let source = outcome.label();
    let series = outcome.into_result().map_err(not_found)?;

    let recommendation = analyze(strategy, &series, Utc::now()).map_err(analysis_error)?;

    info!(
        asset = %strategy.asset,
        source = source,
        sentiment = %recommendation.sentiment,
        "DCA 추천 생성"
    );
    Ok(recommendation)
}

/// DCA 전략 분석.
///
/// POST /dca/analyze
pub async fn analyze_strategy(
    State(state): State<Arc<AppState>>,
    Json(strategy): Json<DcaStrategy>,
) -> ApiResult<Json<DcaRecommendation>> {
    recommend(&state, &strategy).await.map(Json)
}

/// DCA 분석 라우터.
pub fn dca_router() -> Router<Arc<AppState>> {
    Router::new().route("/dca/analyze", post(analyze_strategy))
}
