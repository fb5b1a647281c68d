//! 缓存层
//!
//! 缓存后端以插件形式注册（进程启动时通过 `ctor` 自动登记），
//! 运行时根据 `cache.type` 选择实现，Redis 不可用时回退到 Moka。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// 缓存读取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 未命中
    NotFound,
    /// 后端异常，无法确定是否存在
    ExistsButNoValue,
}

/// 对象缓存接口，值以 JSON 字符串保存
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// 读取并反序列化，反序列化失败时移除脏数据
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(json) => match serde_json::from_str::<T>(&json) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::debug!("Dropping undecodable cache entry '{}': {}", key, e);
                    self.remove(key).await;
                    CacheResult::NotFound
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    /// 序列化后写入
    pub async fn insert_json<T: Serialize>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(json) => self.insert_raw(key, json, ttl).await,
            Err(e) => tracing::warn!("Failed to serialize cache entry '{}': {}", key, e),
        }
    }
}

/// 声明缓存插件，在进程启动时登记到插件表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache =
                            <$ty>::new().map_err($crate::errors::SchoolError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::object_cache::moka::MokaCacheWrapper;
    use super::*;
    use std::sync::Arc;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Entry {
        id: i64,
        name: String,
    }

    #[tokio::test]
    async fn test_json_helpers_round_trip() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(16, 60));
        let entry = Entry {
            id: 7,
            name: "north".to_string(),
        };
        cache.insert_json("branch:7".to_string(), &entry, 60).await;

        assert_eq!(cache.get_json::<Entry>("branch:7").await, CacheResult::Found(entry));
        assert_eq!(
            cache.get_json::<Entry>("branch:8").await,
            CacheResult::NotFound
        );
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_removed() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(16, 60));
        cache
            .insert_raw("branch:1".to_string(), "not json".to_string(), 60)
            .await;

        assert_eq!(
            cache.get_json::<Entry>("branch:1").await,
            CacheResult::NotFound
        );
        assert_eq!(cache.get_raw("branch:1").await, CacheResult::NotFound);
    }

    #[test]
    fn test_plugins_are_registered() {
        assert!(register::get_object_cache_plugin("moka").is_some());
        assert!(register::get_object_cache_plugin("redis").is_some());
    }
}
