//! 애플리케이션 상태.
//!
//! 모든 핸들러가 `Arc<AppState>`로 공유합니다.

use chrono::{DateTime, Utc};
use dca_data::MarketDataGateway;
use std::sync::Arc;

use crate::store::StrategyStore;

/// 애플리케이션 공유 상태.
pub struct AppState {
    /// 시세 데이터 게이트웨이 (캐시, Rate Limit, 재시도, 폴백)
    pub gateway: Arc<MarketDataGateway>,

    /// 저장된 DCA 전략
    pub strategies: StrategyStore,

    /// 서버 시작 시간
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    pub fn new(gateway: Arc<MarketDataGateway>) -> Self {
        Self {
            gateway,
            strategies: StrategyStore::new(),
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
