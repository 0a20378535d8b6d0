//! 게이트웨이 조회 결과.

/// 모든 게이트웨이 조회의 결과.
///
/// 어떤 경로(신규 수집, 캐시, 폴백)로 데이터를 얻었는지 호출자가 구분할 수 있습니다.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// 업스트림에서 새로 수집
    Fresh(T),
    /// TTL 이내 캐시 적중
    Cached(T),
    /// 재시도 소진 후 합성 데이터
    Fallback(T),
    /// 업스트림에 해당 식별자 데이터 없음
    NotFound(String),
}

impl<T> FetchOutcome<T> {
    /// 데이터 참조. `NotFound`이면 `None`.
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchOutcome::Fresh(v) | FetchOutcome::Cached(v) | FetchOutcome::Fallback(v) => {
                Some(v)
            }
            FetchOutcome::NotFound(_) => None,
        }
    }

    /// 데이터 소유권 반환. `NotFound`이면 사유를 `Err`로 반환.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            FetchOutcome::Fresh(v) | FetchOutcome::Cached(v) | FetchOutcome::Fallback(v) => Ok(v),
            FetchOutcome::NotFound(reason) => Err(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Fresh(v) => FetchOutcome::Fresh(f(v)),
            FetchOutcome::Cached(v) => FetchOutcome::Cached(f(v)),
            FetchOutcome::Fallback(v) => FetchOutcome::Fallback(f(v)),
            FetchOutcome::NotFound(reason) => FetchOutcome::NotFound(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FetchOutcome::Fallback(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchOutcome::NotFound(_))
    }

    /// 메트릭/로그 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Fresh(_) => "fresh",
            FetchOutcome::Cached(_) => "cached",
            FetchOutcome::Fallback(_) => "fallback",
            FetchOutcome::NotFound(_) => "not_found",
        }
    }
}
