//! 심볼 단위 TTL 응답 캐시.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// 기본 캐시 TTL.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    fetched_at: Instant,
}

/// 키당 최대 하나의 항목을 가지는 TTL 캐시.
///
/// 만료된 항목은 조회 시 무시되고 다음 `insert`에서 교체됩니다.
#[derive(Clone)]
pub struct ResponseCache<T> {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, CacheEntry<T>>>>,
}

impl<T: Clone> ResponseCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// TTL 이내의 항목 조회.
    pub async fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: &str, value: T) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// 항목 제거. 제거된 항목이 있으면 `true`.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// 전체 제거. 제거된 항목 수를 반환.
    pub async fn invalidate_all(&self) -> usize {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        count
    }

    /// 유효한(TTL 이내) 항목 수.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries
            .values()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T: Clone> Default for ResponseCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
