use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const FALLBACK_CACHE: &str = "moka";
const SUPER_ADMIN_USERNAME: &str = "superadmin";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(backend: &str) -> Option<Arc<dyn ObjectCache>> {
    let Some(constructor) = get_object_cache_plugin(backend) else {
        warn!("Cache backend '{}' not found in registry", backend);
        return None;
    };
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", backend);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", backend, e);
            None
        }
    }
}

/// 按配置创建缓存，失败时回退到进程内缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();
    warn!("Attempting to create {} cache backend", cache_type);

    if let Some(cache) = build_cache(cache_type).await {
        return Ok(cache);
    }
    if cache_type != FALLBACK_CACHE {
        warn!("Falling back to in-memory cache");
        if let Some(cache) = build_cache(FALLBACK_CACHE).await {
            return Ok(cache);
        }
    }
    Err(SchoolError::cache_connection(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
    const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
    const DIGITS: &[u8] = b"23456789";
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%";

    let mut rng = rand::rng();
    let mut pick = |set: &[u8]| set[rng.random_range(0..set.len())] as char;
    // 前三位保证通过密码策略
    let mut password: String = [UPPER, LOWER, DIGITS].into_iter().map(&mut pick).collect();
    password.extend((3..length).map(|_| pick(CHARSET)));
    password
}

/// 空数据库时创建平台超级管理员
async fn seed_super_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} user(s), skipping seed", count);
            return;
        }
        Ok(_) => info!("No users found in database, creating super admin account..."),
        Err(e) => {
            warn!("Failed to count users: {}, skipping seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            let generated = generate_random_password(16);
            warn!("==========================================================");
            warn!("  ADMIN_PASSWORD not set, generated super admin password:");
            warn!("  {}", generated);
            warn!("  It will not be shown again");
            warn!("==========================================================");
            generated
        });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash super admin password: {}, skipping seed", e);
            return;
        }
    };

    let request = CreateUserRequest {
        username: SUPER_ADMIN_USERNAME.to_string(),
        email: "superadmin@localhost".to_string(),
        password: password_hash,
        role: UserRole::SuperAdmin,
        tenant_id: None,
        display_name: Some("Platform Administrator".to_string()),
    };

    match storage.create_user(request).await {
        Ok(user) => info!(
            "Super admin account created (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create super admin account: {}", e),
    }
}

/// 启动前准备存储与缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // redis 的 TLS 连接需要进程级加密提供者，重复安装时忽略
    let _ = rustls::crypto::ring::default_provider().install_default();

    debug!(
        "Registered cache backends: {:?}",
        crate::cache::register::registered_object_cache_plugins()
    );

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_super_admin(&storage).await;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password_simple;

    #[test]
    fn test_generated_password_passes_policy() {
        for _ in 0..20 {
            let password = generate_random_password(16);
            assert_eq!(password.chars().count(), 16);
            assert!(validate_password_simple(&password).is_ok(), "{password}");
        }
    }
}
