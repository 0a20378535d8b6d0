//! DCA 추천 휴리스틱.
//!
//! 1년 종가 시계열에서 현재가, SMA50/SMA200, 연환산 변동성을 계산하고
//! 이를 바탕으로 시장 심리와 권장 적립 금액을 산출합니다.

use chrono::{DateTime, Utc};

use crate::chart::{LONG_WINDOW, SHORT_WINDOW};
use crate::error::AnalysisError;
use crate::indicators::{annualized_volatility, trailing_mean};
use crate::types::{DcaRecommendation, DcaStrategy, PricePoint};

/// 고변동성 판단 임계값.
pub const HIGH_VOLATILITY: f64 = 0.5;
/// 현재가 대비 권장 매수가 비율.
pub const ENTRY_DISCOUNT: f64 = 0.95;

pub const SENTIMENT_BULLISH: &str = "看涨";
pub const SENTIMENT_BEARISH: &str = "看跌";
pub const SENTIMENT_NEUTRAL: &str = "中性";

pub const CONDITION_ABOVE_SMA50: &str = "价格高于50日均线";
pub const CONDITION_ABOVE_SMA200: &str = "价格高于200日均线";
pub const CONDITION_HIGH_VOLATILITY: &str = "市场波动性较高";

/// 분석 시점의 시장 지표.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub current_price: f64,
    /// 포인트가 50개 미만이면 None
    pub sma50: Option<f64>,
    /// 포인트가 200개 미만이면 None
    pub sma200: Option<f64>,
    pub volatility: Option<f64>,
}

impl MarketSnapshot {
    /// 시간순 정렬된 가격 시계열에서 지표를 계산합니다.
    pub fn from_series(asset: &str, points: &[PricePoint]) -> Result<Self, AnalysisError> {
        let mut sorted: Vec<&PricePoint> = points.iter().collect();
        sorted.sort_by_key(|p| p.timestamp);
        let closes: Vec<f64> = sorted.iter().map(|p| p.close).collect();

        let current_price = *closes
            .last()
            .ok_or_else(|| AnalysisError::EmptySeries(asset.to_string()))?;

        Ok(Self {
            current_price,
            sma50: trailing_mean(&closes, SHORT_WINDOW),
            sma200: trailing_mean(&closes, LONG_WINDOW),
            volatility: annualized_volatility(&closes),
        })
    }

    fn above(&self, average: Option<f64>) -> bool {
        average.is_some_and(|avg| self.current_price > avg)
    }

    fn below(&self, average: Option<f64>) -> bool {
        average.is_some_and(|avg| self.current_price < avg)
    }

    /// 시장 상태 설명 목록.
    pub fn conditions(&self) -> Vec<String> {
        let mut conditions = Vec::new();
        if self.above(self.sma50) {
            conditions.push(CONDITION_ABOVE_SMA50.to_string());
        }
        if self.above(self.sma200) {
            conditions.push(CONDITION_ABOVE_SMA200.to_string());
        }
        if self.volatility.is_some_and(|v| v > HIGH_VOLATILITY) {
            conditions.push(CONDITION_HIGH_VOLATILITY.to_string());
        }
        conditions
    }

    /// (심리, 신뢰도)
    pub fn sentiment(&self) -> (&'static str, f64) {
        if self.above(self.sma50) && self.above(self.sma200) {
            (SENTIMENT_BULLISH, 0.8)
        } else if self.below(self.sma50) && self.below(self.sma200) {
            (SENTIMENT_BEARISH, 0.7)
        } else {
            (SENTIMENT_NEUTRAL, 0.5)
        }
    }

    /// 변동성이 낮을수록 금액을 늘리고 높을수록 줄입니다 (0.5x ~ 1.5x).
    pub fn amount_multiplier(&self) -> f64 {
        // 변동성을 계산할 수 없으면 조정 없이 1.0x (NaN을 clamp하면 상한 1.5x가 됨).
        let volatility = self.volatility.unwrap_or(HIGH_VOLATILITY);
        (1.0 + (HIGH_VOLATILITY - volatility)).clamp(0.5, 1.5)
    }
}

/// DCA 전략에 대한 추천을 생성합니다.
pub fn analyze(
    strategy: &DcaStrategy,
    points: &[PricePoint],
    now: DateTime<Utc>,
) -> Result<DcaRecommendation, AnalysisError> {
    let snapshot = MarketSnapshot::from_series(&strategy.asset, points)?;
    let (sentiment, confidence) = snapshot.sentiment();

    Ok(DcaRecommendation {
        asset: strategy.asset.clone(),
        optimal_entry_price: snapshot.current_price * ENTRY_DISCOUNT,
        sentiment: sentiment.to_string(),
        confidence,
        next_dca_date: now + strategy.frequency.interval(),
        suggested_amount: strategy.amount * snapshot.amount_multiplier(),
        market_conditions: snapshot.conditions(),
    })
}
