//! 密码哈希与验证（Argon2id）
//! 哈希计算在阻塞线程池上执行，并受信号量限制并发数

use crate::error::AppError;
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// 默认哈希并发上限
pub const DEFAULT_HASH_CONCURRENCY: usize = 8;

/// 密码哈希器
///
/// 内存硬哈希开销大，登录风暴下无界并发会耗尽资源，
/// 因此所有 hash/verify 调用共享一个信号量。
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    permits: Arc<Semaphore>,
}

impl PasswordHasher {
    /// 使用默认参数创建（OWASP 推荐）
    pub fn new() -> Self {
        Self::with_concurrency(DEFAULT_HASH_CONCURRENCY)
    }

    /// 指定并发上限创建
    pub fn with_concurrency(max_concurrent: usize) -> Self {
        // OWASP 推荐参数（2024）
        // m=64MiB, t=3 iterations, p=4 lanes
        let params = Params::new(65536, 3, 4, None).expect("Invalid Argon2 params");

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Self {
            argon2,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// 哈希密码
    pub async fn hash(&self, password: &str) -> Result<String, AppError> {
        let _permit = self.permits.clone().acquire_owned().await.map_err(|_| {
            tracing::error!("Password hashing semaphore closed");
            AppError::Internal
        })?;

        let argon2 = self.argon2.clone();
        let password = password.to_string();

        let hash = tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
        })
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {:?}", e);
            AppError::Internal
        })?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            AppError::Internal
        })?;

        Ok(hash)
    }

    /// 验证密码
    ///
    /// 对格式非法的哈希不报错，直接返回 false（失败即拒绝）。
    pub async fn verify(&self, password: &str, hash: &str) -> bool {
        let _permit = match self.permits.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                tracing::error!("Password hashing semaphore closed");
                return false;
            }
        };

        let argon2 = self.argon2.clone();
        let password = password.to_string();
        let hash = hash.to_string();

        let result = tokio::task::spawn_blocking(move || {
            let parsed_hash = match PasswordHash::new(&hash) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::debug!("Failed to parse password hash: {:?}", e);
                    return false;
                }
            };

            argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .await;

        match result {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Password verification task failed: {:?}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
