//! 数据访问层

pub mod user_repo;

pub use user_repo::UserRepository;

use crate::{
    error::AppError,
    models::user::{NewUser, User},
};
use uuid::Uuid;

/// 凭证存储契约
///
/// 认证服务只通过此接口访问用户记录，
/// 测试中可用内存实现替换数据库。
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// 按邮箱查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 按 ID 查找用户
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// 插入新用户
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError>;
}
