use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use crate::models::{DistanceModel, SearchParams};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Two-tier cache for search results
///
/// L1 is in-process, L2 is an optional Redis shared across instances.
/// Without Redis the manager runs on L1 alone.
pub struct CacheManager {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a cache manager, connecting to Redis when a URL is given
    ///
    /// A failed Redis connection is logged and the manager falls back to L1.
    pub async fn new(redis_url: Option<&str>, l1_size: u64, ttl_secs: u64) -> Self {
        let redis = match redis_url {
            Some(url) => match Self::connect(url).await {
                Ok(conn) => Some(Arc::new(tokio::sync::Mutex::new(conn))),
                Err(e) => {
                    tracing::warn!("Failed to connect to Redis ({}), using in-process cache only", e);
                    None
                }
            },
            None => None,
        };

        Self {
            redis,
            l1_cache: Self::build_l1(l1_size, ttl_secs),
            ttl_secs,
        }
    }

    /// In-process cache only
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        Self {
            redis: None,
            l1_cache: Self::build_l1(l1_size, ttl_secs),
            ttl_secs,
        }
    }

    async fn connect(redis_url: &str) -> Result<ConnectionManager, CacheError> {
        let client = redis::Client::open(redis_url)?;
        Ok(ConnectionManager::new(client).await?)
    }

    fn build_l1(l1_size: u64, ttl_secs: u64) -> moka::future::Cache<String, Vec<u8>> {
        moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build()
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: DeserializeOwned,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if let Some(l2) = &self.redis {
            let mut conn = l2.lock().await;
            let value: Option<String> = redis::cmd("GET")
                .arg(key)
                .query_async(&mut *conn)
                .await?;
            drop(conn);

            if let Some(json) = value {
                tracing::trace!("L2 cache hit: {}", key);

                let bytes = json.as_bytes().to_vec();
                self.l1_cache.insert(key.to_string(), bytes).await;

                return Ok(serde_json::from_str(&json)?);
            }
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in every available tier
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache
            .insert(key.to_string(), json.as_bytes().to_vec())
            .await;

        if let Some(l2) = &self.redis {
            let mut conn = l2.lock().await;
            let _: () = redis::cmd("SETEX")
                .arg(key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.l1_cache.entry_count(),
            l2_enabled: self.redis.is_some(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
    pub l2_enabled: bool,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a search
    ///
    /// Filter sets are sorted and deduplicated so equivalent requests share
    /// a key. Origin and radius are keyed on their exact values, since cached
    /// results carry distances measured from that origin.
    pub fn search(params: &SearchParams, model: DistanceModel) -> String {
        let mut networks: Vec<&str> = params.networks.iter().map(|n| n.as_str()).collect();
        networks.sort_unstable();
        networks.dedup();

        let limit = params
            .limit
            .map(|l| l.to_string())
            .unwrap_or_else(|| "all".to_string());

        format!(
            "search:{}:{:?}:{:?}:{:?}:{}:{}:{}:{}",
            model.as_str(),
            params.origin.latitude,
            params.origin.longitude,
            params.radius_km,
            networks.join(","),
            canonical_set(&params.services),
            canonical_set(&params.available_cash),
            limit
        )
    }
}

fn canonical_set(values: &[String]) -> String {
    let mut values: Vec<&str> = values.iter().map(String::as_str).collect();
    values.sort_unstable();
    values.dedup();
    values.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, Network};

    fn params() -> SearchParams {
        SearchParams::new(Coordinates::new(49.2331, 28.4682), 5.0, vec![Network::Visa])
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_set_get_redis() {
        let cache = CacheManager::new(Some("redis://127.0.0.1:6379"), 1000, 60).await;
        assert!(cache.stats().l2_enabled);

        cache.set("test_key", &"test_value").await.unwrap();
        let result: String = cache.get("test_key").await.unwrap();
        assert_eq!(result, "test_value");
    }

    #[tokio::test]
    async fn test_in_memory_set_get() {
        let cache = CacheManager::in_memory(100, 60);

        assert!(matches!(
            cache.get::<Vec<u32>>("missing").await,
            Err(CacheError::CacheMiss(_))
        ));

        cache.set("numbers", &vec![1u32, 2, 3]).await.unwrap();
        let numbers: Vec<u32> = cache.get("numbers").await.unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(!cache.stats().l2_enabled);
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back() {
        let cache = CacheManager::new(Some("not a redis url"), 100, 60).await;
        assert!(!cache.stats().l2_enabled);
    }

    #[test]
    fn test_search_key_is_canonical() {
        let a = params()
            .with_services(vec!["Cash Deposit".to_string(), "Cash Withdrawal".to_string()]);
        let mut b = params()
            .with_services(vec!["Cash Withdrawal".to_string(), "Cash Deposit".to_string()]);
        b.networks = vec![Network::Visa, Network::Visa];

        assert_eq!(
            CacheKey::search(&a, DistanceModel::Planar),
            CacheKey::search(&b, DistanceModel::Planar)
        );
    }

    #[test]
    fn test_search_key_distinguishes_filters() {
        let plain = CacheKey::search(&params(), DistanceModel::Planar);

        assert_ne!(plain, CacheKey::search(&params().with_limit(3), DistanceModel::Planar));
        assert_ne!(plain, CacheKey::search(&params(), DistanceModel::Haversine));
        assert_ne!(
            plain,
            CacheKey::search(&params().with_available_cash(vec!["50 UAH".to_string()]), DistanceModel::Planar)
        );
        assert_eq!(plain, "search:planar:49.2331:28.4682:5.0:VISA:::all");
    }

    #[test]
    fn test_search_key_keeps_full_origin_precision() {
        let a = SearchParams::new(Coordinates::new(49.2331004, 28.4682), 1.5, vec![Network::Visa]);
        let b = SearchParams::new(Coordinates::new(49.2330996, 28.4682), 1.5, vec![Network::Visa]);

        assert_ne!(
            CacheKey::search(&a, DistanceModel::Planar),
            CacheKey::search(&b, DistanceModel::Planar)
        );

        let wider = SearchParams { radius_km: 1.5000001, ..a.clone() };
        assert_ne!(
            CacheKey::search(&a, DistanceModel::Planar),
            CacheKey::search(&wider, DistanceModel::Planar)
        );
    }
}
