//! 합성 폴백 데이터.
//!
//! 업스트림 재시도가 모두 실패했을 때 응답을 채우기 위한 데이터를 생성합니다.
//! 자산별 기준가에 ±5% 난수 변동을 적용합니다.

use chrono::{Duration, Utc};
use dca_core::{baseline_price, find_asset_by_token, PricePoint, TokenPrice, DEFAULT_BASELINE_PRICE};
use rand::Rng;

/// 기준가 대비 최대 변동폭.
pub const PRICE_SPREAD: f64 = 0.05;
/// 전일 종가 = 현재가 × 이 값.
pub const PREVIOUS_CLOSE_RATIO: f64 = 0.99;
/// 합성 거래량.
pub const PLACEHOLDER_VOLUME: f64 = 1_000_000.0;

fn jittered(baseline: f64) -> f64 {
    baseline * (1.0 + rand::thread_rng().gen_range(-PRICE_SPREAD..=PRICE_SPREAD))
}

/// 두 포인트(어제, 지금)로 구성된 합성 시계열.
pub fn synthesize(symbol: &str) -> Vec<PricePoint> {
    let now = Utc::now();
    let current = jittered(baseline_price(symbol));

    vec![
        PricePoint::new(
            now - Duration::days(1),
            current * PREVIOUS_CLOSE_RATIO,
            Some(PLACEHOLDER_VOLUME),
        ),
        PricePoint::new(now, current, Some(PLACEHOLDER_VOLUME)),
    ]
}

/// 토큰 시세 폴백. 신뢰도는 0입니다.
pub fn synthesize_quote(token_id: &str) -> TokenPrice {
    let (symbol, baseline) = match find_asset_by_token(token_id) {
        Some(asset) => (asset.symbol.to_string(), asset.baseline_price),
        None => (token_id.to_uppercase(), DEFAULT_BASELINE_PRICE),
    };

    TokenPrice {
        price: jittered(baseline),
        timestamp: Utc::now().timestamp(),
        symbol,
        confidence: 0.0,
    }
}
