//! 공용 타입 정의.

pub mod asset;
pub mod market;
pub mod range;
pub mod strategy;

pub use asset::*;
pub use market::*;
pub use range::*;
pub use strategy::*;
