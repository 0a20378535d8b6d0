//! 게이트웨이 통합 테스트.
//!
//! 호출 횟수를 세는 스크립트형 Provider와 일시정지된 tokio 시간을 사용합니다.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use dca_core::{GatewayConfig, PricePoint, TokenPrice};
use dca_data::{DataError, FetchOutcome, MarketDataGateway, MarketDataProvider, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// 토큰별로 응답을 스크립트할 수 있는 Provider.
///
/// 스크립트가 비면 `default` 응답을 사용합니다.
struct ScriptedProvider {
    default: Result<Vec<PricePoint>>,
    scripts: Mutex<HashMap<String, VecDeque<Result<Vec<PricePoint>>>>>,
    history_calls: AtomicUsize,
    price_calls: AtomicUsize,
    call_times: Mutex<Vec<Instant>>,
}

impl ScriptedProvider {
    fn new(default: Result<Vec<PricePoint>>) -> Arc<Self> {
        Arc::new(Self {
            default,
            scripts: Mutex::new(HashMap::new()),
            history_calls: AtomicUsize::new(0),
            price_calls: AtomicUsize::new(0),
            call_times: Mutex::new(Vec::new()),
        })
    }

    fn script(
        self: Arc<Self>,
        token_id: &str,
        responses: Vec<Result<Vec<PricePoint>>>,
    ) -> Arc<Self> {
        self.scripts
            .lock()
            .unwrap()
            .insert(token_id.to_string(), responses.into());
        self
    }

    fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_history(&self, token_id: &str, _days: u32) -> Result<Vec<PricePoint>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.call_times.lock().unwrap().push(Instant::now());

        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(token_id)
            .and_then(|queue| queue.pop_front());
        scripted.unwrap_or_else(|| self.default.clone())
    }

    async fn fetch_price(&self, token_id: &str) -> Result<TokenPrice> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        match &self.default {
            Ok(series) => Ok(TokenPrice {
                price: series.last().map(|p| p.close).unwrap_or_default(),
                timestamp: 1_700_000_000,
                symbol: token_id.to_uppercase(),
                confidence: 0.9,
            }),
            Err(e) => Err(e.clone()),
        }
    }
}

fn series(closes: &[f64]) -> Vec<PricePoint> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, c)| PricePoint::new(start + ChronoDuration::days(i as i64), *c, Some(10.0)))
        .collect()
}

fn unavailable() -> DataError {
    DataError::UpstreamStatus {
        status: 503,
        message: "unavailable".to_string(),
    }
}

fn gateway(provider: Arc<ScriptedProvider>) -> MarketDataGateway {
    MarketDataGateway::new(provider, &GatewayConfig::default())
}

#[tokio::test(start_paused = true)]
async fn test_cache_hit_then_refetch_after_ttl() {
    let provider = ScriptedProvider::new(Ok(series(&[100.0, 110.0])));
    let gateway = gateway(provider.clone());

    assert!(matches!(gateway.get_or_fetch("BTC-USD").await, FetchOutcome::Fresh(_)));
    assert!(matches!(gateway.get_or_fetch("BTC-USD").await, FetchOutcome::Cached(_)));
    assert_eq!(provider.history_calls(), 1);

    tokio::time::advance(Duration::from_secs(301)).await;

    assert!(matches!(gateway.get_or_fetch("BTC-USD").await, FetchOutcome::Fresh(_)));
    assert_eq!(provider.history_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_symbol_lookup_is_case_insensitive() {
    let provider = ScriptedProvider::new(Ok(series(&[1.0, 2.0])));
    let gateway = gateway(provider.clone());

    gateway.get_or_fetch("eth-usd").await;
    assert!(matches!(gateway.get_or_fetch("ETH-USD").await, FetchOutcome::Cached(_)));
    assert_eq!(provider.history_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_return_fallback() {
    let provider = ScriptedProvider::new(Err(unavailable()));
    let gateway = gateway(provider.clone());
    let max_retries = gateway.retry_config().max_retries as usize;

    let outcome = gateway.get_or_fetch("BTC-USD").await;

    assert_eq!(provider.history_calls(), max_retries);
    let FetchOutcome::Fallback(points) = outcome else {
        panic!("expected fallback");
    };
    assert_eq!(points.len(), 2);
    assert!(points[1].close >= 65000.0 * 0.95 && points[1].close <= 65000.0 * 1.05);
    assert!(points[0].timestamp < points[1].timestamp);
}

#[tokio::test(start_paused = true)]
async fn test_fallback_is_not_cached() {
    let provider = ScriptedProvider::new(Ok(series(&[100.0, 101.0])))
        .script("solana", vec![Err(unavailable()), Err(unavailable()), Err(unavailable())]);
    let gateway = gateway(provider.clone());

    assert!(gateway.get_or_fetch("SOL-USD").await.is_fallback());
    assert!(matches!(gateway.get_or_fetch("SOL-USD").await, FetchOutcome::Fresh(_)));
    assert_eq!(provider.history_calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_then_success() {
    let provider = ScriptedProvider::new(Ok(series(&[100.0, 101.0])))
        .script("bitcoin", vec![Err(DataError::Timeout("slow".into()))]);
    let gateway = gateway(provider.clone());

    assert!(matches!(gateway.fetch("BTC-USD", 3).await, FetchOutcome::Fresh(_)));
    assert_eq!(provider.history_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_not_found_is_not_retried() {
    let provider = ScriptedProvider::new(Err(DataError::NotFound("/history/bitcoin".into())));
    let gateway = gateway(provider.clone());

    let outcome = gateway.get_or_fetch("BTC-USD").await;

    assert!(outcome.is_not_found());
    assert_eq!(provider.history_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_upstream_calls_respect_min_interval() {
    let provider = ScriptedProvider::new(Err(unavailable()));
    let gateway = gateway(provider.clone());

    gateway.fetch("ETH-USD", 3).await;

    let times = provider.call_times.lock().unwrap().clone();
    assert_eq!(times.len(), 3);
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_secs(2));
    }
}

#[tokio::test(start_paused = true)]
async fn test_retry_budget_bounds_attempts() {
    let provider = ScriptedProvider::new(Err(unavailable()));
    let config = GatewayConfig {
        max_retries: 50,
        ..GatewayConfig::default()
    };
    let gateway = MarketDataGateway::new(provider.clone(), &config);
    let started = Instant::now();

    assert!(gateway.fetch("BNB-USD", 50).await.is_fallback());

    assert!(provider.history_calls() < 50);
    assert!(started.elapsed() <= Duration::from_secs(30));
}

/// 응답하지 않는 업스트림.
struct HangingProvider;

#[async_trait]
impl MarketDataProvider for HangingProvider {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn fetch_history(&self, _token_id: &str, _days: u32) -> Result<Vec<PricePoint>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(unavailable())
    }

    async fn fetch_price(&self, _token_id: &str) -> Result<TokenPrice> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(unavailable())
    }
}

#[tokio::test(start_paused = true)]
async fn test_hanging_upstream_falls_back_within_budget() {
    let gateway = MarketDataGateway::new(Arc::new(HangingProvider), &GatewayConfig::default());
    let started = Instant::now();

    let outcome = gateway.get_or_fetch("BTC-USD").await;

    assert!(outcome.is_fallback());
    assert!(started.elapsed() <= Duration::from_secs(30));

    let started = Instant::now();
    let quote = gateway.token_price("bitcoin").await;

    assert!(quote.is_fallback());
    assert!(started.elapsed() <= Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn test_asset_snapshots_change_24h() {
    let provider = ScriptedProvider::new(Ok(series(&[100.0, 90.0, 99.0])));
    let gateway = gateway(provider);

    let snapshots = gateway.asset_snapshots().await.unwrap();

    assert_eq!(snapshots.len(), 4);
    for snapshot in &snapshots {
        assert_eq!(snapshot.current_price, 99.0);
        assert!((snapshot.change_24h - 10.0).abs() < 1e-9);
        assert_eq!(snapshot.volume_24h, 10.0);
    }
}

#[tokio::test(start_paused = true)]
async fn test_partial_not_found_uses_fallback() {
    let provider = ScriptedProvider::new(Ok(series(&[100.0, 101.0])))
        .script("solana", vec![Err(DataError::NotFound("/history/solana".into()))]);
    let gateway = gateway(provider);

    let snapshots = gateway.asset_snapshots().await.unwrap();

    let sol = snapshots.iter().find(|s| s.symbol == "SOL-USD").unwrap();
    assert!(sol.current_price >= 150.0 * 0.95 && sol.current_price <= 150.0 * 1.05);
    assert_eq!(sol.volume_24h, 1_000_000.0);
}

#[tokio::test(start_paused = true)]
async fn test_all_not_found_is_an_error() {
    let provider = ScriptedProvider::new(Err(DataError::NotFound("gone".into())));
    let gateway = gateway(provider);

    let err = gateway.asset_snapshots().await.unwrap_err();

    let DataError::NotFound(reasons) = err else {
        panic!("expected NotFound");
    };
    assert_eq!(reasons.split("; ").count(), 4);
    assert!(reasons.contains("BTC-USD"));
}

#[tokio::test(start_paused = true)]
async fn test_invalidate() {
    let provider = ScriptedProvider::new(Ok(series(&[1.0, 2.0])));
    let gateway = gateway(provider.clone());

    gateway.get_or_fetch("BTC-USD").await;
    gateway.get_or_fetch("ETH-USD").await;
    assert_eq!(gateway.stats().await.cached_symbols, 2);

    assert!(gateway.invalidate("btc-usd").await);
    assert_eq!(gateway.invalidate_all().await, 1);
    assert_eq!(gateway.stats().await.cached_symbols, 0);

    gateway.get_or_fetch("BTC-USD").await;
    assert_eq!(provider.history_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_token_price_paths() {
    let ok = ScriptedProvider::new(Ok(series(&[1.0, 42.0])));
    let outcome = gateway(ok).token_price("bitcoin").await;
    assert_eq!(outcome.data().map(|q| q.price), Some(42.0));

    let missing = ScriptedProvider::new(Err(DataError::NotFound("/price/nope".into())));
    assert!(gateway(missing).token_price("nope").await.is_not_found());

    let failing = ScriptedProvider::new(Err(unavailable()));
    let failing_gateway = gateway(failing.clone());
    let FetchOutcome::Fallback(quote) = failing_gateway.token_price("ethereum").await else {
        panic!("expected fallback");
    };
    assert_eq!(quote.confidence, 0.0);
    assert_eq!(quote.symbol, "ETH-USD");
    assert_eq!(failing.price_calls.load(Ordering::SeqCst), 3);
}
