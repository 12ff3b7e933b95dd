use std::future::Future;

use tokio::sync::RwLock;

use crate::types::dto::permission::PermissionResponse;
use crate::types::dto::role::RoleResponse;
use crate::types::dto::settings::AiSettingsResponse;
use crate::types::dto::user::UserResponse;

/// Read-through cache slot for one entity family
///
/// Populated lazily on the first full-collection read, cleared wholesale on
/// any write to that family. Population and invalidation are individually
/// atomic; a reader racing a writer observes either the pre- or post-write
/// snapshot, never a mixture. Paginated reads never consult this cache.
pub struct EntityCache<T> {
    name: &'static str,
    slot: RwLock<Option<T>>,
}

impl<T: Clone> EntityCache<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached value, or run the loader and cache its result
    pub async fn get_or_load<F, E>(&self, loader: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.slot.read().await.as_ref() {
            tracing::trace!(cache = self.name, "cache hit");
            return Ok(cached.clone());
        }

        tracing::trace!(cache = self.name, "cache miss");
        let loaded = loader.await?;
        *self.slot.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    /// Drop the cached value for this family
    pub async fn invalidate(&self) {
        tracing::debug!(cache = self.name, "cache invalidated");
        *self.slot.write().await = None;
    }

    /// Whether a snapshot is currently cached
    pub async fn is_populated(&self) -> bool {
        self.slot.read().await.is_some()
    }
}

/// One cache slot per entity family, shared by every service instance
///
/// The settings slot holds the single active settings row rather than a
/// list; the full settings listing is never cached.
pub struct ListCaches {
    pub users: EntityCache<Vec<UserResponse>>,
    pub roles: EntityCache<Vec<RoleResponse>>,
    pub permissions: EntityCache<Vec<PermissionResponse>>,
    pub settings: EntityCache<AiSettingsResponse>,
}

impl ListCaches {
    pub fn new() -> Self {
        Self {
            users: EntityCache::new("users"),
            roles: EntityCache::new("roles"),
            permissions: EntityCache::new("permissions"),
            settings: EntityCache::new("settings"),
        }
    }
}

impl Default for ListCaches {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[tokio::test]
    async fn test_get_or_load_populates_on_first_read() {
        let cache: EntityCache<Vec<i32>> = EntityCache::new("test");

        assert!(!cache.is_populated().await);

        let value = cache
            .get_or_load(async { Ok::<_, Infallible>(vec![1, 2, 3]) })
            .await
            .unwrap();

        assert_eq!(value, vec![1, 2, 3]);
        assert!(cache.is_populated().await);
    }

    #[tokio::test]
    async fn test_get_or_load_returns_cached_snapshot() {
        let cache: EntityCache<Vec<i32>> = EntityCache::new("test");

        cache
            .get_or_load(async { Ok::<_, Infallible>(vec![1]) })
            .await
            .unwrap();

        // Second loader must not replace the cached value
        let value = cache
            .get_or_load(async { Ok::<_, Infallible>(vec![99]) })
            .await
            .unwrap();

        assert_eq!(value, vec![1]);
    }

    #[tokio::test]
    async fn test_invalidate_clears_the_slot() {
        let cache: EntityCache<Vec<i32>> = EntityCache::new("test");

        cache
            .get_or_load(async { Ok::<_, Infallible>(vec![1]) })
            .await
            .unwrap();
        cache.invalidate().await;

        assert!(!cache.is_populated().await);

        let value = cache
            .get_or_load(async { Ok::<_, Infallible>(vec![2]) })
            .await
            .unwrap();
        assert_eq!(value, vec![2]);
    }

    #[tokio::test]
    async fn test_failed_loader_leaves_cache_empty() {
        let cache: EntityCache<Vec<i32>> = EntityCache::new("test");

        let result = cache.get_or_load(async { Err::<Vec<i32>, _>("boom") }).await;

        assert!(result.is_err());
        assert!(!cache.is_populated().await);
    }
}
