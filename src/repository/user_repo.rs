//! 用户仓库（数据库访问层）

use crate::{
    error::AppError,
    models::role::Role,
    models::user::{DepartmentCount, EmployeeUpdateRequest, NewUser, UpdateUserRequest, User},
    repository::CredentialStore,
};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出所有用户
    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.db)
            .await?;

        Ok(users)
    }

    /// 按角色列出用户
    pub async fn list_by_role(&self, role: Role) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = $1 ORDER BY created_at DESC",
        )
        .bind(role)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    /// 更新用户记录（管理员）
    pub async fn update(&self, id: Uuid, req: &UpdateUserRequest) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                role = COALESCE($5, role),
                department = COALESCE($6, department),
                salary = COALESCE($7, salary),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(req.role)
        .bind(&req.department)
        .bind(req.salary)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// 员工自助更新（受限字段）
    pub async fn update_self(
        &self,
        id: Uuid,
        req: &EmployeeUpdateRequest,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                department = COALESCE($4, department),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.department)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// 删除用户
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 统计某角色的用户数量
    pub async fn count_by_role(&self, role: Role) -> Result<i64, AppError> {
        let count: i64 = sqlx::query("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.db)
            .await?
            .get(0);

        Ok(count)
    }

    /// 按部门统计某角色的用户数量
    pub async fn count_by_department(&self, role: Role) -> Result<Vec<DepartmentCount>, AppError> {
        let counts = sqlx::query_as::<_, DepartmentCount>(
            r#"
            SELECT department, COUNT(*) AS count
            FROM users
            WHERE role = $1
            GROUP BY department
            ORDER BY department
            "#,
        )
        .bind(role)
        .fetch_all(&self.db)
        .await?;

        Ok(counts)
    }
}

#[async_trait::async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, role, department, salary, joined_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .bind(&new_user.department)
        .bind(new_user.salary)
        .bind(new_user.joined_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            // 邮箱唯一索引冲突（注册前置检查存在竞争窗口）
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict,
            _ => AppError::Database(e),
        })?;

        Ok(user)
    }
}
