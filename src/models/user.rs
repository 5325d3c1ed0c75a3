//! 用户域模型

use crate::models::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 用户记录（含密码哈希，仅限仓库层与认证层使用）
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department: String,
    pub salary: i64,
    pub joined_at: DateTime<Utc>,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新用户插入数据（哈希已生成）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department: String,
    pub salary: i64,
    pub joined_at: DateTime<Utc>,
}

/// 已认证身份（由会话中间件写入请求扩展）
/// 不包含密码哈希，随请求结束丢弃
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub password_changed_at: Option<DateTime<Utc>>,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            password_changed_at: user.password_changed_at,
        }
    }
}

/// 注册请求
/// role 字段仅为兼容客户端载荷；服务端强制写入 employee
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 50, message = "First name must be 2-50 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, max = 50, message = "Last name must be 2-50 characters"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: Option<Role>,
    #[validate(length(min = 2, max = 100, message = "Department must be 2-100 characters"))]
    pub department: String,
    #[validate(range(min = 1, message = "Salary must be positive"))]
    pub salary: i64,
    pub joined_at: DateTime<Utc>,
}

/// 管理员更新用户请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 50))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<Role>,
    #[validate(length(min = 2, max = 100))]
    pub department: Option<String>,
    #[validate(range(min = 1))]
    pub salary: Option<i64>,
}

/// 员工自助更新请求（不允许改角色与薪资）
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdateRequest {
    #[validate(length(min = 2, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 50))]
    pub last_name: Option<String>,
    #[validate(length(min = 2, max = 100))]
    pub department: Option<String>,
}

/// 用户响应（不含敏感字段）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub salary: i64,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            department: user.department,
            salary: user.salary,
            joined_at: user.joined_at,
            created_at: user.created_at,
        }
    }
}

/// 员工统计数据
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAnalytics {
    pub total_employees: i64,
    pub department_counts: Vec<DepartmentCount>,
}

/// 按部门统计
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}
