//! 启动引导
//! 确保系统中始终存在一个可登录的管理员账号

use chrono::Utc;
use secrecy::ExposeSecret;
use std::sync::Arc;

use crate::{
    auth::password::PasswordHasher,
    config::AdminConfig,
    error::AppError,
    models::{role::Role, user::NewUser},
    repository::CredentialStore,
};

/// 确保引导管理员存在
///
/// 幂等：已有同邮箱账号时直接跳过，不覆盖已改过的密码。
pub async fn ensure_admin(
    store: &Arc<dyn CredentialStore>,
    hasher: &PasswordHasher,
    admin: &AdminConfig,
) -> Result<(), AppError> {
    if store.find_by_email(&admin.email).await?.is_some() {
        tracing::debug!(email = %admin.email, "Bootstrap admin already exists, skipping");
        return Ok(());
    }

    let password_hash = hasher.hash(admin.password.expose_secret()).await?;

    let user = store
        .insert(NewUser {
            first_name: "System".to_string(),
            last_name: "Admin".to_string(),
            email: admin.email.clone(),
            password_hash,
            role: Role::Admin,
            department: "Management".to_string(),
            salary: 0,
            joined_at: Utc::now(),
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Bootstrap admin created");

    Ok(())
}
