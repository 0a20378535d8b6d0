//! # DCA Core
//!
//! DCA(적립식 투자) 백엔드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 지원 자산 레지스트리 (심볼 ↔ 토큰 ID 매핑)
//! - 가격 포인트 및 토큰 시세
//! - DCA 전략 / 추천 타입
//! - 이동평균 및 변동성 지표
//! - 차트 시계열 조립
//! - DCA 추천 휴리스틱
//! - 설정 관리
//! - 로깅 인프라

pub mod analysis;
pub mod chart;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod types;

pub use analysis::{analyze, MarketSnapshot};
pub use chart::{assemble_chart, ChartPoint};
pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;
