//! 시세 데이터 게이트웨이.
//!
//! Provider 호출을 다음 단계로 감쌉니다:
//!
//! ```text
//! get_or_fetch ─ 캐시 적중 ─────────────────────────────▶ Cached
//!      │
//!      └─ fetch ─ acquire(rate limit) ─ provider 호출 ─ 성공 ─▶ Fresh (캐시 저장)
//!                      ▲                   │
//!                      └── backoff 대기 ◀── 일시 오류
//!                                          ├─ 404 ─────────▶ NotFound
//!                                          └─ 재시도 소진 ─▶ Fallback (캐시 안 함)
//! ```

use dca_core::{
    find_asset, AssetSnapshot, GatewayConfig, PricePoint, TokenPrice, SUPPORTED_ASSETS,
};
use futures::future::join_all;
use metrics::counter;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;
use crate::error::{DataError, Result};
use crate::fallback;
use crate::outcome::FetchOutcome;
use crate::provider::MarketDataProvider;
use crate::rate_limit::SymbolRateLimiter;
use crate::retry::RetryConfig;

/// 업스트림 단일 호출 타임아웃 기본값.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// 게이트웨이 상태 요약.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayStats {
    pub provider: String,
    pub cached_symbols: usize,
    pub cache_ttl_secs: u64,
}

/// 시세 데이터 게이트웨이.
///
/// 애플리케이션 상태에서 `Arc`로 공유됩니다. 캐시와 Rate Limit 테이블은
/// 게이트웨이 인스턴스가 소유합니다.
pub struct MarketDataGateway {
    provider: Arc<dyn MarketDataProvider>,
    limiter: SymbolRateLimiter,
    retry: RetryConfig,
    cache: ResponseCache<Vec<PricePoint>>,
    history_days: u32,
    attempt_timeout: Duration,
}

impl MarketDataGateway {
    /// 새 게이트웨이 생성.
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: &GatewayConfig) -> Self {
        Self {
            provider,
            limiter: SymbolRateLimiter::new(config.min_interval(), config.jitter_range()),
            retry: RetryConfig::from(config),
            cache: ResponseCache::new(config.cache_ttl()),
            history_days: config.history_days,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// 업스트림 단일 호출 타임아웃 설정.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// 캐시를 거치는 1년 시계열 조회.
    pub async fn get_or_fetch(&self, symbol: &str) -> FetchOutcome<Vec<PricePoint>> {
        let (key, _) = resolve(symbol);

        if let Some(series) = self.cache.get(&key).await {
            debug!(symbol = %key, "캐시 적중");
            return record(FetchOutcome::Cached(series));
        }

        let outcome = self.fetch(&key, self.retry.max_retries).await;
        if let FetchOutcome::Fresh(series) = &outcome {
            self.cache.insert(&key, series.clone()).await;
        }
        outcome
    }

    /// 캐시를 거치지 않는 재시도 수집.
    ///
    /// 재시도를 모두 소진해도 오류를 반환하지 않고 폴백 데이터를 돌려줍니다.
    pub async fn fetch(&self, symbol: &str, max_retries: u32) -> FetchOutcome<Vec<PricePoint>> {
        let (key, token_id) = resolve(symbol);
        let days = self.history_days;

        let result = self
            .call_with_retry(&key, max_retries, || {
                self.provider.fetch_history(&token_id, days)
            })
            .await;

        let outcome = match result {
            Ok(series) => {
                info!(symbol = %key, points = series.len(), "시세 히스토리 수집 완료");
                FetchOutcome::Fresh(series)
            }
            Err(DataError::NotFound(reason)) => {
                warn!(symbol = %key, reason = %reason, "업스트림에 데이터 없음");
                FetchOutcome::NotFound(format!("{}: {}", key, reason))
            }
            Err(e) => {
                warn!(symbol = %key, error = %e, "수집 실패, 폴백 데이터 사용");
                FetchOutcome::Fallback(fallback::synthesize(&key))
            }
        };
        record(outcome)
    }

    /// 토큰 시세 조회 (캐시 없음).
    pub async fn token_price(&self, token_id: &str) -> FetchOutcome<TokenPrice> {
        let result = self
            .call_with_retry(token_id, self.retry.max_retries, || {
                self.provider.fetch_price(token_id)
            })
            .await;

        let outcome = match result {
            Ok(quote) => FetchOutcome::Fresh(quote),
            Err(DataError::NotFound(reason)) => {
                warn!(token_id = token_id, reason = %reason, "업스트림에 시세 없음");
                FetchOutcome::NotFound(format!("{}: {}", token_id, reason))
            }
            Err(e) => {
                warn!(token_id = token_id, error = %e, "시세 조회 실패, 폴백 시세 사용");
                FetchOutcome::Fallback(fallback::synthesize_quote(token_id))
            }
        };
        record(outcome)
    }

    /// 지원 자산 전체의 스냅샷.
    ///
    /// 일부 심볼만 `NotFound`이면 해당 심볼은 폴백 데이터로 대체합니다.
    /// 모든 심볼이 `NotFound`이면 사유를 모아 오류로 반환합니다.
    pub async fn asset_snapshots(&self) -> Result<Vec<AssetSnapshot>> {
        let outcomes = join_all(
            SUPPORTED_ASSETS
                .iter()
                .map(|asset| self.get_or_fetch(asset.symbol)),
        )
        .await;

        let mut reasons = Vec::new();
        let mut snapshots = Vec::with_capacity(outcomes.len());

        for (asset, outcome) in SUPPORTED_ASSETS.iter().zip(outcomes) {
            let series = match outcome.into_result() {
                Ok(series) => series,
                Err(reason) => {
                    reasons.push(reason);
                    fallback::synthesize(asset.symbol)
                }
            };

            let snapshot = AssetSnapshot::from_series(asset.symbol, asset.name, &series)
                .or_else(|| {
                    AssetSnapshot::from_series(
                        asset.symbol,
                        asset.name,
                        &fallback::synthesize(asset.symbol),
                    )
                });
            snapshots.extend(snapshot);
        }

        if reasons.len() == SUPPORTED_ASSETS.len() {
            return Err(DataError::NotFound(reasons.join("; ")));
        }
        Ok(snapshots)
    }

    /// 심볼 캐시 제거.
    pub async fn invalidate(&self, symbol: &str) -> bool {
        let (key, _) = resolve(symbol);
        let removed = self.cache.invalidate(&key).await;
        info!(symbol = %key, removed = removed, "캐시 무효화");
        removed
    }

    /// 전체 캐시 제거.
    pub async fn invalidate_all(&self) -> usize {
        let removed = self.cache.invalidate_all().await;
        info!(removed = removed, "전체 캐시 무효화");
        removed
    }

    pub async fn stats(&self) -> GatewayStats {
        GatewayStats {
            provider: self.provider.name().to_string(),
            cached_symbols: self.cache.len().await,
            cache_ttl_secs: self.cache.ttl().as_secs(),
        }
    }

    /// Rate limit과 지수 백오프를 적용해 `op`를 호출합니다.
    ///
    /// 재시도 불가 오류나 마지막 오류를 그대로 반환합니다.
    async fn call_with_retry<T, F, Fut>(&self, key: &str, max_retries: u32, op: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let policy = RetryConfig {
            max_retries: max_retries.max(1),
            ..self.retry.clone()
        };
        let started = Instant::now();
        let deadline = started + policy.max_elapsed;
        let mut attempt = 0;
        let mut last_error: Option<DataError> = None;

        loop {
            // Rate Limit 대기도 예산에 포함됩니다.
            let acquired = tokio::time::timeout_at(deadline, self.limiter.acquire(key)).await;
            let remaining = deadline.saturating_duration_since(Instant::now());
            if acquired.is_err() || remaining.is_zero() {
                let error = last_error.unwrap_or_else(|| {
                    DataError::Timeout(format!(
                        "{} budget {:?} exhausted",
                        key, policy.max_elapsed
                    ))
                });
                warn!(symbol = key, attempts = attempt, error = %error, "재시도 예산 소진");
                return Err(error);
            }

            attempt += 1;
            let attempt_timeout = self.attempt_timeout.min(remaining);
            let result = match tokio::time::timeout(attempt_timeout, op()).await {
                Ok(result) => result,
                Err(_) => Err(DataError::Timeout(format!(
                    "{} after {:?}",
                    key, attempt_timeout
                ))),
            };

            let error = match result {
                Ok(value) => {
                    counter!("gateway_upstream_attempts_total", "result" => "ok").increment(1);
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => {
                    let label = if e.is_not_found() { "not_found" } else { "error" };
                    counter!("gateway_upstream_attempts_total", "result" => label).increment(1);
                    return Err(e);
                }
                Err(e) => {
                    counter!("gateway_upstream_attempts_total", "result" => "error").increment(1);
                    e
                }
            };

            match policy.next_delay(attempt, started.elapsed()) {
                Some(delay) => {
                    debug!(
                        symbol = key,
                        attempt = attempt,
                        max_retries = policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "업스트림 호출 재시도 예정"
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(error);
                }
                None => {
                    warn!(
                        symbol = key,
                        attempts = attempt,
                        error = %error,
                        "업스트림 호출 최종 실패"
                    );
                    return Err(error);
                }
            }
        }
    }
}

/// 심볼을 (캐시 키, 토큰 ID)로 변환합니다.
///
/// 레지스트리에 없는 심볼은 소문자 심볼을 토큰 ID로 사용합니다.
fn resolve(symbol: &str) -> (String, String) {
    match find_asset(symbol) {
        Some(asset) => (asset.symbol.to_string(), asset.token_id.to_string()),
        None => (symbol.to_string(), symbol.to_lowercase()),
    }
}

fn record<T>(outcome: FetchOutcome<T>) -> FetchOutcome<T> {
    counter!("gateway_fetch_total", "outcome" => outcome.label()).increment(1);
    outcome
}
