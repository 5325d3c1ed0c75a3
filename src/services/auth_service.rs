//! 认证服务：登录、注册、令牌验证
//! 自身无可变状态，单实例通过 Arc 被所有请求共享

use crate::{
    auth::password::PasswordHasher,
    auth::token::TokenCodec,
    error::AppError,
    models::auth::LoginResponse,
    models::role::Role,
    models::user::{Identity, NewUser, RegisterRequest, UserResponse},
    repository::CredentialStore,
};
use chrono::Utc;
use std::sync::Arc;

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenCodec>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<TokenCodec>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// 用户登录
    ///
    /// 步骤顺序严格：查找 -> 验证密码 -> 签发令牌，
    /// 任何一步失败立即短路，绝不签发令牌。
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = match self.store.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login rejected: unknown email");
                return Err(AppError::NotFound);
            }
        };

        if !self.hasher.verify(password, &user.password_hash).await {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.sign(user.id, Utc::now())?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            user: UserResponse::from(user),
            token,
        })
    }

    /// 注册新员工
    ///
    /// 自助注册角色由服务端固定为 employee，客户端载荷中的角色字段被忽略，
    /// 防止注册人自选提升角色。
    pub async fn register(&self, req: RegisterRequest) -> Result<UserResponse, AppError> {
        if self.store.find_by_email(&req.email).await?.is_some() {
            tracing::debug!("Registration rejected: email already exists");
            return Err(AppError::Conflict);
        }

        let password_hash = self.hasher.hash(&req.password).await?;

        let user = self
            .store
            .insert(NewUser {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                password_hash,
                role: Role::Employee,
                department: req.department,
                salary: req.salary,
                joined_at: req.joined_at,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(UserResponse::from(user))
    }

    /// 验证会话令牌并解析当前身份
    ///
    /// 所有失败类型对外统一为未认证；具体原因仅进日志。
    pub async fn authenticate(&self, raw_token: &str) -> Result<Identity, AppError> {
        let claims = self.tokens.verify(raw_token).map_err(|e| {
            tracing::debug!(kind = ?e, "Session token rejected");
            AppError::Unauthorized
        })?;

        let subject_id = claims.subject_id().map_err(|_| AppError::Unauthorized)?;

        let user = self
            .store
            .find_by_id(subject_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        // 改密后旧令牌全部失效：签发时间早于改密时间即拒绝
        if let Some(changed_at) = user.password_changed_at {
            if claims.iat < changed_at.timestamp() {
                tracing::debug!(user_id = %user.id, "Token predates password change");
                return Err(AppError::Unauthorized);
            }
        }

        Ok(Identity::from(&user))
    }
}
