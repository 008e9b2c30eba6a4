//! Activity API 类型定义
//!
//! 对外 JSON 字段统一使用 camelCase。

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::{ActivityPatch, CreateActivityRequest};
use crate::storage::{ActivityKey, ActivityRecord};

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 校验失败时放在 `data` 中：字段名 -> 错误信息
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub validation_errors: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: i64,
    pub student_id: i64,
    pub course_code: String,
    pub module_code: String,
    pub date: NaiveDate,
    pub sum_clicks: i32,
}

impl From<ActivityRecord> for ActivityResponse {
    fn from(record: ActivityRecord) -> Self {
        Self {
            id: record.id,
            student_id: record.student_id,
            course_code: record.course_code,
            module_code: record.module_code,
            date: record.date,
            sum_clicks: record.sum_clicks,
        }
    }
}

/// POST /activities 请求体
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostNewActivity {
    pub student_id: i64,
    pub course_code: String,
    pub module_code: String,
    pub date: NaiveDate,
    pub sum_clicks: i32,
}

impl From<PostNewActivity> for CreateActivityRequest {
    fn from(body: PostNewActivity) -> Self {
        Self {
            student_id: body.student_id,
            course_code: body.course_code,
            module_code: body.module_code,
            date: body.date,
            sum_clicks: body.sum_clicks,
        }
    }
}

/// PUT /activities/{id} 请求体，缺省字段保持不变
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivity {
    pub date: Option<NaiveDate>,
    pub sum_clicks: Option<i32>,
}

impl From<UpdateActivity> for ActivityPatch {
    fn from(body: UpdateActivity) -> Self {
        Self {
            date: body.date,
            sum_clicks: body.sum_clicks,
        }
    }
}

fn default_clicks() -> i32 {
    1
}

/// POST /activities/increment 查询参数
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct IncrementQuery {
    pub student_id: i64,
    pub course_code: String,
    pub module_code: String,
    pub date: NaiveDate,
    #[serde(default = "default_clicks")]
    pub clicks: i32,
}

impl IncrementQuery {
    pub fn key(&self) -> ActivityKey {
        ActivityKey::new(
            self.student_id,
            self.course_code.clone(),
            self.module_code.clone(),
            self.date,
        )
    }
}

/// 日期区间查询参数（两端包含）
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
