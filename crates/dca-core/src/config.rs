//! 설정 관리.
//!
//! 기본값 → `config/default.toml`(선택) → `DCA__` 접두사 환경 변수 순으로 적용됩니다.
//! 예: `DCA__SERVER__PORT=8000`, `DCA__GATEWAY__CACHE_TTL_SECS=60`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 업스트림 시세 제공자 설정
    pub provider: ProviderConfig,
    /// 데이터 게이트웨이 설정
    pub gateway: GatewayConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// CORS 설정
    pub cors: CorsConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 업스트림 시세 제공자 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// 요청당 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 데이터 게이트웨이 설정 (레이트 리밋, 재시도, 캐시).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// 캐시 TTL (초)
    pub cache_ttl_secs: u64,
    /// 심볼별 최소 요청 간격 (밀리초)
    pub min_interval_ms: u64,
    /// 대기 시 추가되는 지터 하한 (밀리초)
    pub jitter_min_ms: u64,
    /// 대기 시 추가되는 지터 상한 (밀리초)
    pub jitter_max_ms: u64,
    /// 최대 시도 횟수
    pub max_retries: u32,
    /// 백오프 기본 지연 (밀리초)
    pub base_delay_ms: u64,
    /// 백오프 최대 지연 (밀리초)
    pub max_delay_ms: u64,
    /// 재시도 전체 시간 예산 (초)
    pub max_elapsed_secs: u64,
    /// 조회할 히스토리 일수
    pub history_days: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 300,
            min_interval_ms: 2_000,
            jitter_min_ms: 100,
            jitter_max_ms: 1_000,
            max_retries: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 8_000,
            max_elapsed_secs: 30,
            history_days: 365,
        }
    }
}

impl GatewayConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn jitter_range(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.jitter_min_ms),
            Duration::from_millis(self.jitter_max_ms),
        )
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn max_elapsed(&self) -> Duration {
        Duration::from_secs(self.max_elapsed_secs)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// CORS 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// 허용 origin 목록 (환경 변수에서는 쉼표로 구분)
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 건너뜁니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("DCA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}
