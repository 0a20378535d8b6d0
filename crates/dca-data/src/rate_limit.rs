//! 심볼별 요청 간격 제한.
//!
//! 같은 심볼에 대한 업스트림 요청 사이에 최소 간격을 보장합니다.
//! 대기가 필요한 경우 요청이 한꺼번에 몰리지 않도록 지터를 더합니다.

use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// 기본 최소 요청 간격.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(2);

/// 심볼별 Rate Limiter.
///
/// 슬롯은 잠금 안에서 예약한 뒤 잠금 밖에서 대기하므로,
/// 같은 심볼의 동시 호출자들은 시간상 직렬화됩니다.
#[derive(Clone)]
pub struct SymbolRateLimiter {
    min_interval: Duration,
    jitter: (Duration, Duration),
    last_request: Arc<Mutex<HashMap<String, Instant>>>,
}

impl SymbolRateLimiter {
    /// 새 Rate Limiter 생성.
    pub fn new(min_interval: Duration, jitter: (Duration, Duration)) -> Self {
        Self {
            min_interval,
            jitter,
            last_request: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// 기본 설정 (2초 간격, 0.1~1.0초 지터).
    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_MIN_INTERVAL,
            (Duration::from_millis(100), Duration::from_millis(1000)),
        )
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// 요청 슬롯을 얻을 때까지 대기합니다.
    ///
    /// 실제로 대기한 시간을 반환합니다.
    pub async fn acquire(&self, symbol: &str) -> Duration {
        let now = Instant::now();
        let scheduled = {
            let mut last_request = self.last_request.lock().await;
            let scheduled = match last_request.get(symbol) {
                Some(last) if *last + self.min_interval > now => {
                    *last + self.min_interval + self.sample_jitter()
                }
                _ => now,
            };
            last_request.insert(symbol.to_string(), scheduled);
            scheduled
        };

        let wait = scheduled.saturating_duration_since(now);
        if !wait.is_zero() {
            debug!(symbol = symbol, wait_ms = wait.as_millis() as u64, "Rate limit 대기");
            tokio::time::sleep_until(scheduled).await;
        }
        wait
    }

    /// 마지막으로 기록된 요청 시점.
    pub async fn last_request(&self, symbol: &str) -> Option<Instant> {
        self.last_request.lock().await.get(symbol).copied()
    }

    fn sample_jitter(&self) -> Duration {
        let (lo, hi) = self.jitter;
        if hi <= lo {
            return lo;
        }
        let secs = rand::thread_rng().gen_range(lo.as_secs_f64()..hi.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

impl Default for SymbolRateLimiter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
