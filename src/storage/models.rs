use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 学生在某课程模块某天的点击汇总记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: i64,
    pub student_id: i64,
    pub course_code: String,
    pub module_code: String,
    pub date: NaiveDate,
    pub sum_clicks: i32,
}

impl ActivityRecord {
    pub fn key(&self) -> ActivityKey {
        ActivityKey {
            student_id: self.student_id,
            course_code: self.course_code.clone(),
            module_code: self.module_code.clone(),
            date: self.date,
        }
    }
}

/// 唯一键：(student_id, course_code, module_code, date)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityKey {
    pub student_id: i64,
    pub course_code: String,
    pub module_code: String,
    pub date: NaiveDate,
}

impl ActivityKey {
    pub fn new(
        student_id: i64,
        course_code: impl Into<String>,
        module_code: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            student_id,
            course_code: course_code.into(),
            module_code: module_code.into(),
            date,
        }
    }
}

impl fmt::Display for ActivityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "student={} course={}/{} date={}",
            self.student_id, self.course_code, self.module_code, self.date
        )
    }
}

/// 待插入的记录（id 由存储层分配）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub key: ActivityKey,
    pub sum_clicks: i32,
}

/// 部分更新：只有 `Some` 的字段会写入存储
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityChanges {
    pub date: Option<NaiveDate>,
    pub sum_clicks: Option<i32>,
}

impl ActivityChanges {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.sum_clicks.is_none()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
