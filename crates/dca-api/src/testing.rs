//! 라우트 테스트용 Provider와 상태.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use dca_core::{GatewayConfig, PricePoint, TokenPrice};
use dca_data::{DataError, MarketDataGateway, MarketDataProvider, Result};
use std::sync::Arc;

use crate::state::AppState;

/// 고정 응답을 돌려주는 Provider.
pub struct StubProvider {
    pub history: Result<Vec<PricePoint>>,
    pub price: Result<TokenPrice>,
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_history(&self, _token_id: &str, _days: u32) -> Result<Vec<PricePoint>> {
        self.history.clone()
    }

    async fn fetch_price(&self, _token_id: &str) -> Result<TokenPrice> {
        self.price.clone()
    }
}

/// 하루 단위 시계열.
pub fn daily_series(closes: impl IntoIterator<Item = f64>) -> Vec<PricePoint> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .into_iter()
        .enumerate()
        .map(|(i, c)| PricePoint::new(start + Duration::days(i as i64), c, Some(1_000.0)))
        .collect()
}

/// 완만한 1년 상승 추세 (current > sma50 > sma200).
pub fn uptrend() -> Vec<PricePoint> {
    daily_series((0..365).map(|i| 60_000.0 + i as f64 * 10.0))
}

pub fn quote(price: f64) -> TokenPrice {
    TokenPrice {
        price,
        timestamp: 1_700_000_000,
        symbol: "BTC".to_string(),
        confidence: 0.97,
    }
}

/// 대기 없이 동작하는 게이트웨이 설정.
fn fast_gateway_config() -> GatewayConfig {
    GatewayConfig {
        min_interval_ms: 0,
        jitter_min_ms: 0,
        jitter_max_ms: 0,
        base_delay_ms: 1,
        max_delay_ms: 1,
        ..GatewayConfig::default()
    }
}

pub fn create_test_state(provider: StubProvider) -> Arc<AppState> {
    let gateway = MarketDataGateway::new(Arc::new(provider), &fast_gateway_config());
    Arc::new(AppState::new(Arc::new(gateway)))
}

/// 정상 응답 Provider 상태.
pub fn healthy_state() -> Arc<AppState> {
    create_test_state(StubProvider {
        history: Ok(uptrend()),
        price: Ok(quote(64_000.0)),
    })
}

/// 모든 조회가 404인 Provider 상태.
pub fn not_found_state() -> Arc<AppState> {
    create_test_state(StubProvider {
        history: Err(DataError::NotFound("no data".to_string())),
        price: Err(DataError::NotFound("no data".to_string())),
    })
}
