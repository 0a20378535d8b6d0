//! 메모리 전략 저장소.
//!
//! 프로세스 수명 동안만 유지되며 크기 제한이 없습니다.

use chrono::{DateTime, Utc};
use dca_core::{DcaRecommendation, DcaStrategy, SavedStrategy};
use std::sync::Arc;
use tokio::sync::RwLock;

/// 저장된 전략 목록 (삽입 순서 유지).
#[derive(Clone, Default)]
pub struct StrategyStore {
    strategies: Arc<RwLock<Vec<SavedStrategy>>>,
}

impl StrategyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 전략을 저장하고 `strategy_{n}` ID를 부여합니다.
    ///
    /// ID는 쓰기 잠금 안에서 결정되므로 동시 저장 시에도 중복되지 않습니다.
    pub async fn save(
        &self,
        strategy: DcaStrategy,
        recommendation: DcaRecommendation,
        created_at: DateTime<Utc>,
    ) -> SavedStrategy {
        let mut strategies = self.strategies.write().await;
        let saved = SavedStrategy {
            id: format!("strategy_{}", strategies.len() + 1),
            created_at,
            strategy,
            recommendation,
        };
        strategies.push(saved.clone());
        saved
    }

    pub async fn list(&self) -> Vec<SavedStrategy> {
        self.strategies.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.strategies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dca_core::Frequency;

    fn sample() -> (DcaStrategy, DcaRecommendation) {
        let now = Utc::now();
        let strategy = DcaStrategy {
            asset: "ETH-USD".to_string(),
            amount: 50.0,
            frequency: Frequency::Daily,
            start_date: now,
            end_date: None,
            ai_enhanced: false,
        };
        let recommendation = DcaRecommendation {
            asset: "ETH-USD".to_string(),
            optimal_entry_price: 3325.0,
            sentiment: "中性".to_string(),
            confidence: 0.5,
            next_dca_date: now,
            suggested_amount: 50.0,
            market_conditions: vec![],
        };
        (strategy, recommendation)
    }

    #[tokio::test]
    async fn test_sequential_ids() {
        let store = StrategyStore::new();
        assert!(store.is_empty().await);

        let (s, r) = sample();
        let first = store.save(s.clone(), r.clone(), Utc::now()).await;
        let second = store.save(s, r, Utc::now()).await;

        assert_eq!(first.id, "strategy_1");
        assert_eq!(second.id, "strategy_2");

        let ids: Vec<String> = store.list().await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["strategy_1", "strategy_2"]);
    }

    #[tokio::test]
    async fn test_concurrent_saves_get_unique_ids() {
        let store = StrategyStore::new();
        let (s, r) = sample();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let (s, r) = (s.clone(), r.clone());
                tokio::spawn(async move { store.save(s, r, Utc::now()).await.id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}
