//! 차트 시계열 조립.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::indicators::sma;
use crate::types::{ChartRange, PricePoint};

/// 단기 이동평균 기간.
pub const SHORT_WINDOW: usize = 50;
/// 장기 이동평균 기간.
pub const LONG_WINDOW: usize = 200;

/// 차트의 한 포인트.
///
/// 이동평균을 계산할 데이터가 부족한 구간은 0입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// YYYY-MM-DD
    pub date: String,
    pub price: f64,
    pub sma50: f64,
    pub sma200: f64,
}

/// 가격 시계열을 정렬하고 `range`만큼 잘라낸 뒤 SMA50/SMA200을 붙입니다.
///
/// 이동평균은 잘라낸 구간 안에서만 계산되므로 1M 범위에서는 sma50이 항상 0입니다.
pub fn assemble_chart(points: &[PricePoint], range: ChartRange) -> Vec<ChartPoint> {
    let mut sorted: Vec<&PricePoint> = points.iter().collect();
    sorted.sort_by_key(|p| p.timestamp);

    let Some(latest) = sorted.last().map(|p| p.timestamp) else {
        return Vec::new();
    };
    let cutoff = latest - Duration::days(range.days());
    let window: Vec<&PricePoint> = sorted.into_iter().filter(|p| p.timestamp >= cutoff).collect();

    let closes: Vec<f64> = window.iter().map(|p| p.close).collect();
    let short = sma(&closes, SHORT_WINDOW);
    let long = sma(&closes, LONG_WINDOW);

    window
        .iter()
        .zip(short)
        .zip(long)
        .map(|((point, sma50), sma200)| ChartPoint {
            date: point.timestamp.format("%Y-%m-%d").to_string(),
            price: point.close,
            sma50,
            sma200,
        })
        .collect()
}
