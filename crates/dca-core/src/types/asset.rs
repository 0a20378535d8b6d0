//! 지원 자산 레지스트리.
//!
//! 사용자에게 노출되는 거래 심볼(예: "BTC-USD")과 업스트림 Provider의
//! 토큰 ID(예: "bitcoin")를 매핑합니다. 폴백 데이터 생성에 쓰이는
//! 기준 가격도 함께 보관합니다.

use serde::Serialize;

/// 레지스트리에 없는 심볼의 폴백 기준 가격.
pub const DEFAULT_BASELINE_PRICE: f64 = 100.0;

/// 지원 자산 정보.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssetInfo {
    /// 거래 심볼 (예: "BTC-USD")
    pub symbol: &'static str,
    /// 표시 이름
    pub name: &'static str,
    /// 업스트림 토큰 ID
    pub token_id: &'static str,
    /// 폴백 기준 가격 (USD)
    pub baseline_price: f64,
}

/// 지원 자산 목록 (목록 조회 순서와 동일).
pub static SUPPORTED_ASSETS: [AssetInfo; 4] = [
    AssetInfo {
        symbol: "BTC-USD",
        name: "Bitcoin",
        token_id: "bitcoin",
        baseline_price: 65000.0,
    },
    AssetInfo {
        symbol: "ETH-USD",
        name: "Ethereum",
        token_id: "ethereum",
        baseline_price: 3500.0,
    },
    AssetInfo {
        symbol: "SOL-USD",
        name: "Solana",
        token_id: "solana",
        baseline_price: 150.0,
    },
    AssetInfo {
        symbol: "BNB-USD",
        name: "BNB",
        token_id: "binancecoin",
        baseline_price: 600.0,
    },
];

/// 심볼로 자산 조회 (대소문자 무시).
pub fn find_asset(symbol: &str) -> Option<&'static AssetInfo> {
    SUPPORTED_ASSETS
        .iter()
        .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
}

/// 토큰 ID로 자산 조회.
pub fn find_asset_by_token(token_id: &str) -> Option<&'static AssetInfo> {
    SUPPORTED_ASSETS
        .iter()
        .find(|a| a.token_id.eq_ignore_ascii_case(token_id))
}

/// 심볼의 폴백 기준 가격. 모르는 심볼은 [`DEFAULT_BASELINE_PRICE`].
pub fn baseline_price(symbol: &str) -> f64 {
    find_asset(symbol)
        .map(|a| a.baseline_price)
        .unwrap_or(DEFAULT_BASELINE_PRICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_asset_case_insensitive() {
        let asset = find_asset("btc-usd").unwrap();
        assert_eq!(asset.token_id, "bitcoin");
        assert!(find_asset("DOGE-USD").is_none());
    }

    #[test]
    fn test_find_asset_by_token() {
        assert_eq!(find_asset_by_token("binancecoin").unwrap().symbol, "BNB-USD");
        assert!(find_asset_by_token("dogecoin").is_none());
    }

    #[test]
    fn test_baseline_price() {
        assert_eq!(baseline_price("BTC-USD"), 65000.0);
        assert_eq!(baseline_price("UNKNOWN"), DEFAULT_BASELINE_PRICE);
    }
}
