//! 시장 데이터 타입.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 단일 가격 포인트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 시점 (UTC)
    pub timestamp: DateTime<Utc>,
    /// 종가
    pub close: f64,
    /// 거래량 (업스트림이 제공하지 않으면 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl PricePoint {
    /// 새 가격 포인트 생성.
    pub fn new(timestamp: DateTime<Utc>, close: f64, volume: Option<f64>) -> Self {
        Self {
            timestamp,
            close,
            volume,
        }
    }
}

/// 업스트림 토큰 시세.
///
/// `confidence`는 Provider가 내려주는 시세 신뢰도이며,
/// DCA 추천의 `confidence`와는 무관합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub price: f64,
    /// Unix timestamp (초)
    pub timestamp: i64,
    pub symbol: String,
    pub confidence: f64,
}

/// 자산 목록 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    /// 전일 대비 변동률 (%)
    pub change_24h: f64,
    pub volume_24h: f64,
}

impl AssetSnapshot {
    /// 시계열의 마지막 두 포인트로 스냅샷 생성.
    ///
    /// 포인트가 2개 미만이거나 전일 종가가 0이면 `None`.
    pub fn from_series(symbol: &str, name: &str, points: &[PricePoint]) -> Option<Self> {
        let [.., previous, latest] = points else {
            return None;
        };
        let change_24h = change_pct(latest.close, previous.close)?;

        Some(Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price: latest.close,
            change_24h,
            volume_24h: latest.volume.unwrap_or(0.0),
        })
    }
}

/// 변동률 계산 (%). `previous`가 0이면 `None`.
pub fn change_pct(latest: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((latest - previous) / previous * 100.0)
}
