//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//!
//! ```json
//! {
//!   "code": "UNSUPPORTED_ASSET",
//!   "message": "지원하지 않는 자산: DOGE-USD",
//!   "timestamp": 1738300800
//! }
//! ```

use axum::{http::StatusCode, Json};
use dca_core::{AnalysisError, CoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 통합 API 에러 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_INPUT", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    pub timestamp: i64,
}

impl ApiErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }

    /// 상태 코드와 함께 핸들러 에러로 변환.
    pub fn with_status(self, status: StatusCode) -> (StatusCode, Json<ApiErrorResponse>) {
        (status, Json(self))
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

impl From<CoreError> for ApiErrorResponse {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::Config(_) => "CONFIG_ERROR",
            CoreError::UnsupportedAsset(_) => "UNSUPPORTED_ASSET",
            CoreError::InvalidInput(_) => "INVALID_INPUT",
            CoreError::Analysis(_) => "ANALYSIS_ERROR",
        };
        Self::new(code, err.to_string())
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 도메인 에러를 HTTP 상태 코드와 함께 변환.
pub fn core_error(err: CoreError) -> (StatusCode, Json<ApiErrorResponse>) {
    let status = match &err {
        CoreError::UnsupportedAsset(_) | CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        CoreError::Config(_) | CoreError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    ApiErrorResponse::from(err).with_status(status)
}

/// 분석 실패 (500).
pub fn analysis_error(err: AnalysisError) -> (StatusCode, Json<ApiErrorResponse>) {
    core_error(CoreError::from(err))
}

/// 업스트림에 데이터가 없음 (404).
pub fn not_found(reason: impl Into<String>) -> (StatusCode, Json<ApiErrorResponse>) {
    ApiErrorResponse::new("NOT_FOUND", reason).with_status(StatusCode::NOT_FOUND)
}
