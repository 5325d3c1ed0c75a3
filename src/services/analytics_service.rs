//! 员工统计服务

use crate::{
    error::AppError,
    models::role::Role,
    models::user::EmployeeAnalytics,
    repository::UserRepository,
};

pub struct AnalyticsService {
    repo: UserRepository,
}

impl AnalyticsService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// 员工总数与各部门人数
    pub async fn employee_analytics(&self) -> Result<EmployeeAnalytics, AppError> {
        let total_employees = self.repo.count_by_role(Role::Employee).await?;
        let department_counts = self.repo.count_by_department(Role::Employee).await?;

        Ok(EmployeeAnalytics {
            total_employees,
            department_counts,
        })
    }
}
