//! 데이터 수집 오류 타입.

use thiserror::Error;

/// 업스트림 데이터 수집 오류.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    /// 네트워크 오류
    #[error("Network error: {0}")]
    Network(String),

    /// 요청 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 2xx가 아닌 응답 (404 제외)
    #[error("Upstream returned {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// 구조적으로 잘못된 응답 본문
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// 해당 식별자에 대한 데이터 없음 (업스트림 404)
    #[error("No data: {0}")]
    NotFound(String),

    /// Provider 초기화 실패
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataError {
    /// 재시도 가능한 오류인지 확인.
    ///
    /// `NotFound`는 재시도해도 결과가 같으므로 즉시 종료합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DataError::Network(_)
                | DataError::Timeout(_)
                | DataError::UpstreamStatus { .. }
                | DataError::InvalidPayload(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_decode() {
            DataError::InvalidPayload(err.to_string())
        } else {
            DataError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::InvalidPayload(err.to_string())
    }
}

/// 데이터 수집 작업을 위한 Result 타입.
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(DataError::Network("reset".into()).is_retryable());
        assert!(DataError::Timeout("10s".into()).is_retryable());
        assert!(DataError::UpstreamStatus {
            status: 503,
            message: "busy".into()
        }
        .is_retryable());
        assert!(DataError::InvalidPayload("missing price".into()).is_retryable());

        assert!(!DataError::NotFound("bitcoin".into()).is_retryable());
        assert!(!DataError::Config("bad url".into()).is_retryable());
    }
}
