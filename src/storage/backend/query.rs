//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::{debug, error};

use super::{SeaOrmStorage, retry};
use crate::errors::{ActivityError, Result};
use crate::storage::models::{ActivityKey, ActivityRecord};

use migration::entities::student_activity;

use super::converters::model_to_record;

/// SUM(sum_clicks) 聚合查询结果
#[derive(Debug, FromQueryResult)]
struct ClickSum {
    total_clicks: Option<i64>,
}

impl SeaOrmStorage {
    /// 按条件查询，结果按 id 升序
    async fn find_all(&self, operation: &str, condition: Condition) -> Result<Vec<ActivityRecord>> {
        let db = &self.db;

        let models = retry::with_retry(operation, self.retry_config, || {
            let condition = condition.clone();
            async move {
                student_activity::Entity::find()
                    .filter(condition)
                    .order_by_asc(student_activity::Column::Id)
                    .all(db)
                    .await
            }
        })
        .await
        .map_err(|e| {
            error!("查询失败（重试后仍失败）{}: {}", operation, e);
            ActivityError::database_operation(format!("{} 失败: {}", operation, e))
        })?;

        debug!("{} returned {} records", operation, models.len());
        Ok(models.into_iter().map(model_to_record).collect())
    }

    /// 按条件求和，无匹配行时为 0
    async fn sum_where(&self, operation: &str, condition: Condition) -> Result<i64> {
        let db = &self.db;

        let result = retry::with_retry(operation, self.retry_config, || {
            let condition = condition.clone();
            async move {
                student_activity::Entity::find()
                    .select_only()
                    .column_as(student_activity::Column::SumClicks.sum(), "total_clicks")
                    .filter(condition)
                    .into_model::<ClickSum>()
                    .one(db)
                    .await
            }
        })
        .await
        .map_err(|e| {
            error!("聚合查询失败 {}: {}", operation, e);
            ActivityError::database_operation(format!("{} 失败: {}", operation, e))
        })?;

        Ok(result.and_then(|row| row.total_clicks).unwrap_or(0))
    }

    pub async fn get(&self, id: i64) -> Result<Option<ActivityRecord>> {
        let db = &self.db;

        let result = retry::with_retry(&format!("get({})", id), self.retry_config, || async {
            student_activity::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| {
            error!("查询活动记录失败（重试后仍失败）: {}", e);
            ActivityError::database_operation(format!("查询活动记录失败: {}", e))
        })?;

        Ok(result.map(model_to_record))
    }

    pub async fn load_all(&self) -> Result<Vec<ActivityRecord>> {
        self.find_all("list_all", Condition::all()).await
    }

    pub async fn find_by_student(&self, student_id: i64) -> Result<Vec<ActivityRecord>> {
        self.find_all(
            "list_by_student",
            Condition::all().add(student_activity::Column::StudentId.eq(student_id)),
        )
        .await
    }

    pub async fn find_by_course(
        &self,
        course_code: &str,
        module_code: &str,
    ) -> Result<Vec<ActivityRecord>> {
        self.find_all(
            "list_by_course",
            Condition::all()
                .add(student_activity::Column::CourseCode.eq(course_code))
                .add(student_activity::Column::ModuleCode.eq(module_code)),
        )
        .await
    }

    pub async fn find_by_student_and_course(
        &self,
        student_id: i64,
        course_code: &str,
        module_code: &str,
    ) -> Result<Vec<ActivityRecord>> {
        self.find_all(
            "list_by_student_and_course",
            Condition::all()
                .add(student_activity::Column::StudentId.eq(student_id))
                .add(student_activity::Column::CourseCode.eq(course_code))
                .add(student_activity::Column::ModuleCode.eq(module_code)),
        )
        .await
    }

    pub async fn find_by_student_and_date(
        &self,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        self.find_all(
            "list_by_student_and_date",
            Condition::all()
                .add(student_activity::Column::StudentId.eq(student_id))
                .add(student_activity::Column::Date.eq(date)),
        )
        .await
    }

    pub async fn find_by_student_and_date_range(
        &self,
        student_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        self.find_all(
            "list_by_student_and_date_range",
            Condition::all()
                .add(student_activity::Column::StudentId.eq(student_id))
                .add(student_activity::Column::Date.gte(start))
                .add(student_activity::Column::Date.lte(end)),
        )
        .await
    }

    pub async fn find_by_course_and_date_range(
        &self,
        course_code: &str,
        module_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        self.find_all(
            "list_by_course_and_date_range",
            Condition::all()
                .add(student_activity::Column::CourseCode.eq(course_code))
                .add(student_activity::Column::ModuleCode.eq(module_code))
                .add(student_activity::Column::Date.gte(start))
                .add(student_activity::Column::Date.lte(end)),
        )
        .await
    }

    pub async fn find_one_by_key(&self, key: &ActivityKey) -> Result<Option<ActivityRecord>> {
        let db = &self.db;

        let result = retry::with_retry(&format!("find_by_key({})", key), self.retry_config, || {
            student_activity::Entity::find()
                .filter(student_activity::Column::StudentId.eq(key.student_id))
                .filter(student_activity::Column::CourseCode.eq(key.course_code.as_str()))
                .filter(student_activity::Column::ModuleCode.eq(key.module_code.as_str()))
                .filter(student_activity::Column::Date.eq(key.date))
                .one(db)
        })
        .await
        .map_err(|e| {
            error!("按唯一键查询失败 {}: {}", key, e);
            ActivityError::database_operation(format!("按唯一键查询失败: {}", e))
        })?;

        Ok(result.map(model_to_record))
    }

    pub async fn total_clicks_by_student(&self, student_id: i64) -> Result<i64> {
        self.sum_where(
            "sum_clicks_by_student",
            Condition::all().add(student_activity::Column::StudentId.eq(student_id)),
        )
        .await
    }

    pub async fn total_clicks_by_student_and_course(
        &self,
        student_id: i64,
        course_code: &str,
        module_code: &str,
    ) -> Result<i64> {
        self.sum_where(
            "sum_clicks_by_student_and_course",
            Condition::all()
                .add(student_activity::Column::StudentId.eq(student_id))
                .add(student_activity::Column::CourseCode.eq(course_code))
                .add(student_activity::Column::ModuleCode.eq(module_code)),
        )
        .await
    }

    /// 连通性检查
    pub async fn health_check(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| ActivityError::database_connection(format!("数据库连接检查失败: {}", e)))
    }
}
