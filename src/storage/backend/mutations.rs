//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait, ExprTrait,
    QueryFilter, SqlErr, UpdateMany, sea_query::Expr,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{changes_to_update_model, model_to_record, new_activity_to_active_model};
use super::retry;
use crate::errors::{ActivityError, Result};
use crate::storage::models::{ActivityChanges, ActivityRecord, NewActivity};

use migration::entities::student_activity;

/// 写操作错误转换：唯一约束冲突 -> DuplicateKey，其余 -> DatabaseOperation
fn map_write_error(err: DbErr, operation: &str, subject: &dyn std::fmt::Display) -> ActivityError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ActivityError::duplicate_key(format!("Activity already exists: {}", subject))
        }
        _ => ActivityError::database_operation(format!("{} 失败: {}", operation, err)),
    }
}

impl SeaOrmStorage {
    pub async fn create(&self, activity: NewActivity) -> Result<ActivityRecord> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("insert({})", activity.key),
            self.retry_config,
            || {
                let active_model = new_activity_to_active_model(&activity);
                async move { active_model.insert(db).await }
            },
        )
        .await
        .map_err(|e| map_write_error(e, "插入活动记录", &activity.key))?;

        debug!("Activity inserted: id={} {}", model.id, activity.key);
        Ok(model_to_record(model))
    }

    /// 只写入 `changes` 中给出的列
    pub async fn apply_changes(&self, id: i64, changes: ActivityChanges) -> Result<ActivityRecord> {
        if changes.is_empty() {
            return self.get(id).await?.ok_or_else(|| {
                ActivityError::not_found(format!("Activity not found with id: {}", id))
            });
        }

        let db = &self.db;
        let result = retry::with_retry(&format!("update({})", id), self.retry_config, || {
            let active_model = changes_to_update_model(id, &changes);
            async move { active_model.update(db).await }
        })
        .await;

        match result {
            Ok(model) => {
                debug!("Activity updated: id={} {:?}", id, changes);
                Ok(model_to_record(model))
            }
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => Err(
                ActivityError::not_found(format!("Activity not found with id: {}", id)),
            ),
            Err(e) => Err(map_write_error(e, "更新活动记录", &format!("id={}", id))),
        }
    }

    /// 原子累加：UPDATE ... SET sum_clicks = sum_clicks + delta
    /// WHERE id = ? AND sum_clicks + delta BETWEEN 0 AND i32::MAX
    pub async fn increment_by_id(&self, id: i64, delta: i32) -> Result<ActivityRecord> {
        let db = &self.db;
        let backend = db.get_database_backend();

        let result = retry::with_retry(
            &format!("add_clicks({}, {})", id, delta),
            self.retry_config,
            || guarded_increment(backend, id, delta).exec(db),
        )
        .await
        .map_err(|e| ActivityError::database_operation(format!("累加点击数失败: {}", e)))?;

        if result.rows_affected == 0 {
            // 区分记录不存在和结果越界
            return match self.get(id).await? {
                Some(current) => Err(ActivityError::invalid_state(format!(
                    "Adding {} clicks to activity {} (currently {}) would leave sum_clicks out of range",
                    delta, id, current.sum_clicks
                ))),
                None => Err(ActivityError::not_found(format!(
                    "Activity not found with id: {}",
                    id
                ))),
            };
        }

        self.get(id)
            .await?
            .ok_or_else(|| ActivityError::not_found(format!("Activity not found with id: {}", id)))
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(&format!("remove({})", id), self.retry_config, || {
            student_activity::Entity::delete_by_id(id).exec(db)
        })
        .await
        .map_err(|e| ActivityError::database_operation(format!("删除活动记录失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(ActivityError::not_found(format!(
                "Activity not found with id: {}",
                id
            )));
        }

        info!("Activity deleted: {}", id);
        Ok(())
    }
}

/// 构造带范围条件的累加语句
///
/// 条件里的加法先转成 64 位整数再比较，避免 int4 相加在 Postgres 上直接溢出报错。
/// MySQL 的 CAST 不接受 BIGINT，使用 SIGNED。
fn guarded_increment(backend: DbBackend, id: i64, delta: i32) -> UpdateMany<student_activity::Entity> {
    let wide_type = match backend {
        DbBackend::MySql => "SIGNED",
        _ => "BIGINT",
    };
    let widened_sum = Expr::col(student_activity::Column::SumClicks)
        .cast_as(wide_type)
        .add(i64::from(delta));

    student_activity::Entity::update_many()
        .col_expr(
            student_activity::Column::SumClicks,
            Expr::col(student_activity::Column::SumClicks).add(delta),
        )
        .filter(student_activity::Column::Id.eq(id))
        .filter(widened_sum.clone().gte(0i64))
        .filter(widened_sum.lte(i64::from(i32::MAX)))
}
