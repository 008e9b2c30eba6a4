use async_trait::async_trait;
use chrono::NaiveDate;

use super::models::{ActivityChanges, ActivityKey, ActivityRecord, NewActivity};
use crate::errors::Result;

/// 活动记录存储接口
///
/// 唯一性约束 (student_id, course_code, module_code, date) 由实现方在存储边界保证，
/// 违反时返回 `ActivityError::DuplicateKey`。
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// 插入新记录，键已存在时返回 DuplicateKey
    async fn insert(&self, activity: NewActivity) -> Result<ActivityRecord>;

    async fn get_by_id(&self, id: i64) -> Result<Option<ActivityRecord>>;

    /// 全部记录，按 id 升序
    async fn list_all(&self) -> Result<Vec<ActivityRecord>>;

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<ActivityRecord>>;

    async fn list_by_course(
        &self,
        course_code: &str,
        module_code: &str,
    ) -> Result<Vec<ActivityRecord>>;

    async fn list_by_student_and_course(
        &self,
        student_id: i64,
        course_code: &str,
        module_code: &str,
    ) -> Result<Vec<ActivityRecord>>;

    async fn list_by_student_and_date(
        &self,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<ActivityRecord>>;

    /// 日期区间两端均包含
    async fn list_by_student_and_date_range(
        &self,
        student_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>>;

    /// 日期区间两端均包含
    async fn list_by_course_and_date_range(
        &self,
        course_code: &str,
        module_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>>;

    async fn find_by_key(&self, key: &ActivityKey) -> Result<Option<ActivityRecord>>;

    /// 按 id 写入 `changes` 中给出的字段，未给出的字段保持存储中的当前值
    ///
    /// 记录不存在返回 NotFound；新日期与同组合的其他记录冲突返回 DuplicateKey。
    async fn update(&self, id: i64, changes: ActivityChanges) -> Result<ActivityRecord>;

    /// 原子地执行 sum_clicks = sum_clicks + delta
    ///
    /// 记录不存在返回 NotFound；结果为负返回 InvalidState 且不修改存储。
    async fn add_clicks(&self, id: i64, delta: i32) -> Result<ActivityRecord>;

    async fn delete_by_id(&self, id: i64) -> Result<()>;

    async fn sum_clicks_by_student(&self, student_id: i64) -> Result<i64>;

    async fn sum_clicks_by_student_and_course(
        &self,
        student_id: i64,
        course_code: &str,
        module_code: &str,
    ) -> Result<i64>;

    /// 连通性检查
    async fn ping(&self) -> Result<()>;

    fn backend_name(&self) -> &str;
}
