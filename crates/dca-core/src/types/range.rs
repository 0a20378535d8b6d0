//! 차트 조회 기간.

use std::fmt;

/// 차트 조회 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartRange {
    /// 1일
    OneDay,
    /// 1주
    OneWeek,
    /// 1개월 (기본값)
    #[default]
    OneMonth,
    /// 3개월
    ThreeMonths,
    /// 1년
    OneYear,
}

impl ChartRange {
    /// 쿼리 문자열 파싱. 지원하지 않는 값은 기본값(1M)으로 대체합니다.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "1D" => Self::OneDay,
            "1W" => Self::OneWeek,
            "1M" => Self::OneMonth,
            "3M" => Self::ThreeMonths,
            "1Y" => Self::OneYear,
            _ => Self::default(),
        }
    }

    /// 기간 길이 (일).
    pub fn days(&self) -> i64 {
        match self {
            Self::OneDay => 1,
            Self::OneWeek => 7,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::OneYear => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::OneYear => "1Y",
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
