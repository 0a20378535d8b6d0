//! 지수 백오프 재시도 정책.

use dca_core::GatewayConfig;
use std::time::Duration;

/// 재시도 설정.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// 최대 시도 횟수 (첫 시도 포함)
    pub max_retries: u32,
    /// 첫 재시도 전 대기 시간
    pub base_delay: Duration,
    /// 단일 대기의 상한
    pub max_delay: Duration,
    /// 전체 시간 예산
    pub max_elapsed: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(8),
            max_elapsed: Duration::from_secs(30),
        }
    }
}

impl From<&GatewayConfig> for RetryConfig {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            max_retries: config.max_retries.max(1),
            base_delay: config.base_delay(),
            max_delay: config.max_delay(),
            max_elapsed: config.max_elapsed(),
        }
    }
}

impl RetryConfig {
    /// `attempt`번째 시도가 실패한 뒤의 대기 시간 (1, 2, 4, ... × base, 상한 적용).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << exp)
            .min(self.max_delay)
    }

    /// 다음 시도 전 대기 시간.
    ///
    /// 시도 횟수를 다 썼거나 대기 후 시간 예산을 넘으면 `None`.
    pub fn next_delay(&self, attempt: u32, elapsed: Duration) -> Option<Duration> {
        if attempt >= self.max_retries {
            return None;
        }
        let delay = self.backoff(attempt);
        if elapsed + delay > self.max_elapsed {
            return None;
        }
        Some(delay)
    }
}
