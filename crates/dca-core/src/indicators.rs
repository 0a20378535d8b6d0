//! 이동평균 및 변동성 지표.
//!
//! - SMA (Simple Moving Average): 시점별 정렬된 후행 이동평균
//! - 연환산 변동성: 일간 수익률 표준편차 × √252

/// 연환산에 사용하는 연간 거래일 수.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// 시점별 단순 이동평균 (SMA) 계산.
///
/// SMA = (P(i-n+1) + ... + P(i)) / n
///
/// 결과 길이는 입력과 같습니다. 해당 시점까지의 포인트가 `window`개
/// 미만이면 값은 0(데이터 부족 표시)입니다. `window`가 0이면 전부 0입니다.
pub fn sma(prices: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return vec![0.0; prices.len()];
    }

    let mut result = Vec::with_capacity(prices.len());
    let mut sum = 0.0;

    for (i, price) in prices.iter().enumerate() {
        sum += price;
        if i >= window {
            sum -= prices[i - window];
        }

        if i + 1 >= window {
            result.push(sum / window as f64);
        } else {
            result.push(0.0);
        }
    }

    result
}

/// 마지막 시점의 후행 평균. 포인트가 `window`개 미만이면 `None`.
pub fn trailing_mean(prices: &[f64], window: usize) -> Option<f64> {
    if window == 0 || prices.len() < window {
        return None;
    }
    let tail = &prices[prices.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// 일간 수익률.
///
/// 이전 가격이 0인 구간은 건너뜁니다.
pub fn pct_changes(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// 연환산 변동성 (표본 표준편차 × √252).
///
/// 수익률이 2개 미만이면 `None`.
pub fn annualized_volatility(prices: &[f64]) -> Option<f64> {
    let returns = pct_changes(prices);
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_points() -> Vec<f64> {
        (1..=10).map(|v| v as f64 * 10.0).collect()
    }

    #[test]
    fn test_sma_insufficient_history_is_zero() {
        let result = sma(&ten_points(), 50);
        assert_eq!(result.len(), 10);
        assert!(result.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_sma_window_three() {
        let prices = ten_points();
        let result = sma(&prices, 3);

        assert_eq!(result[0], 0.0);
        assert_eq!(result[1], 0.0);
        for i in 2..prices.len() {
            let expected = (prices[i - 2] + prices[i - 1] + prices[i]) / 3.0;
            assert!((result[i] - expected).abs() < 1e-9, "index {}", i);
        }
    }

    #[test]
    fn test_sma_zero_window() {
        assert_eq!(sma(&[1.0, 2.0], 0), vec![0.0, 0.0]);
    }

    #[test]
    fn test_trailing_mean() {
        let prices = ten_points();
        assert_eq!(trailing_mean(&prices, 2), Some(95.0));
        assert_eq!(trailing_mean(&prices, 11), None);
    }

    #[test]
    fn test_volatility_flat_series_is_zero() {
        let vol = annualized_volatility(&[100.0, 100.0, 100.0, 100.0]).unwrap();
        assert_eq!(vol, 0.0);
    }

    #[test]
    fn test_volatility_needs_two_returns() {
        assert!(annualized_volatility(&[100.0, 101.0]).is_none());
        assert!(annualized_volatility(&[100.0, 101.0, 99.0]).is_some());
    }
}
