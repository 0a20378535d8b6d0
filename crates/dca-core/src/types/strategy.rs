//! DCA 전략 및 추천 타입.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 적립 주기.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// 다음 적립일까지의 간격.
    pub fn interval(&self) -> Duration {
        match self {
            Frequency::Daily => Duration::days(1),
            Frequency::Weekly => Duration::days(7),
            Frequency::Monthly => Duration::days(30),
        }
    }
}

fn default_ai_enhanced() -> bool {
    true
}

/// 사용자가 제출한 DCA 전략 (그대로 저장/반환됨).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcaStrategy {
    /// 자산 심볼 (예: "BTC-USD")
    pub asset: String,
    /// 회당 투자 금액
    pub amount: f64,
    pub frequency: Frequency,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_ai_enhanced")]
    pub ai_enhanced: bool,
}

/// DCA 추천 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcaRecommendation {
    pub asset: String,
    /// 권장 매수 가격 (현재가 대비 5% 조정)
    pub optimal_entry_price: f64,
    /// 시장 심리 ("看涨" | "看跌" | "中性")
    pub sentiment: String,
    /// 휴리스틱 신뢰도 (0.5 ~ 0.8)
    pub confidence: f64,
    pub next_dca_date: DateTime<Utc>,
    /// 변동성 보정 후 권장 금액
    pub suggested_amount: f64,
    pub market_conditions: Vec<String>,
}

/// 저장된 전략.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedStrategy {
    /// "strategy_{n}" 형식의 순번 ID
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub strategy: DcaStrategy,
    pub recommendation: DcaRecommendation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_interval() {
        assert_eq!(Frequency::Daily.interval(), Duration::days(1));
        assert_eq!(Frequency::Weekly.interval(), Duration::days(7));
        assert_eq!(Frequency::Monthly.interval(), Duration::days(30));
    }

    #[test]
    fn test_strategy_deserialize_defaults() {
        let json = r#"{
            "asset": "BTC-USD",
            "amount": 100,
            "frequency": "weekly",
            "start_date": "2024-01-01T00:00:00Z"
        }"#;
        let strategy: DcaStrategy = serde_json::from_str(json).unwrap();

        assert_eq!(strategy.frequency, Frequency::Weekly);
        assert!(strategy.ai_enhanced);
        assert!(strategy.end_date.is_none());
    }

    #[test]
    fn test_strategy_rejects_unknown_frequency() {
        let json = r#"{
            "asset": "BTC-USD",
            "amount": 100,
            "frequency": "hourly",
            "start_date": "2024-01-01T00:00:00Z"
        }"#;
        assert!(serde_json::from_str::<DcaStrategy>(json).is_err());
    }
}
