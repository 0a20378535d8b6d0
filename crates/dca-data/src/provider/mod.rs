//! 업스트림 시세 Provider.

mod http;

pub use http::HttpMarketProvider;

use async_trait::async_trait;
use dca_core::{PricePoint, TokenPrice};

use crate::error::Result;

/// 시세 데이터 Provider trait.
///
/// 구현체는 한 번의 요청만 수행합니다. 재시도, 간격 제한, 캐시는 게이트웨이가 담당합니다.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 일봉 종가 시계열 조회 (시간순).
    async fn fetch_history(&self, token_id: &str, days: u32) -> Result<Vec<PricePoint>>;

    /// 현재 토큰 시세 조회.
    async fn fetch_price(&self, token_id: &str) -> Result<TokenPrice>;
}
