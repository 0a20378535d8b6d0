//! 외부 시세 데이터 수집 게이트웨이.
//!
//! 이 crate는 다음을 제공합니다:
//! - 업스트림 시세 Provider 추상화 및 HTTP 구현
//! - 심볼별 요청 간격 제한 (지터 포함)
//! - 지수 백오프 재시도
//! - TTL 응답 캐시
//! - 재시도 소진 시 합성 폴백 데이터

pub mod cache;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod outcome;
pub mod provider;
pub mod rate_limit;
pub mod retry;

pub use cache::ResponseCache;
pub use error::{DataError, Result};
pub use gateway::{GatewayStats, MarketDataGateway};
pub use outcome::FetchOutcome;
pub use provider::{HttpMarketProvider, MarketDataProvider};
pub use rate_limit::SymbolRateLimiter;
pub use retry::RetryConfig;
