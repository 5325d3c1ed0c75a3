//! 用户名录服务

use crate::{
    error::AppError,
    models::role::Role,
    models::user::{EmployeeUpdateRequest, UpdateUserRequest, UserResponse},
    repository::{CredentialStore, UserRepository},
};
use uuid::Uuid;

pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// 列出所有用户；结果为空时返回 NotFound
    pub async fn find_all(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.repo.list().await?;
        if users.is_empty() {
            return Err(AppError::NotFound);
        }

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 按角色列出用户
    pub async fn find_all_by_role(&self, role: Role) -> Result<Vec<UserResponse>, AppError> {
        let users = self.repo.list_by_role(role).await?;
        if users.is_empty() {
            return Err(AppError::NotFound);
        }

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 按 ID 查找用户
    pub async fn find_by_id(&self, id: Uuid) -> Result<UserResponse, AppError> {
        let user = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        Ok(UserResponse::from(user))
    }

    /// 更新用户记录（管理员）
    pub async fn update_record(
        &self,
        id: Uuid,
        req: &UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let user = self.repo.update(id, req).await?.ok_or(AppError::NotFound)?;

        tracing::info!(user_id = %id, "User record updated");

        Ok(UserResponse::from(user))
    }

    /// 员工更新自己的记录（受限字段）
    pub async fn update_self(
        &self,
        id: Uuid,
        req: &EmployeeUpdateRequest,
    ) -> Result<UserResponse, AppError> {
        let user = self
            .repo
            .update_self(id, req)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(user_id = %id, "Employee updated own record");

        Ok(UserResponse::from(user))
    }

    /// 删除用户
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
