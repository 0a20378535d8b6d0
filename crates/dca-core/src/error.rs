//! DCA 시스템의 에러 타입.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 지원하지 않는 자산
    #[error("지원하지 않는 자산: {0}")]
    UnsupportedAsset(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 분석 에러
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// DCA 분석 에러.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// 가격 데이터가 비어 있음
    #[error("가격 데이터가 없습니다: {0}")]
    EmptySeries(String),
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
