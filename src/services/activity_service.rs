//! Activity aggregation service
//!
//! Business logic for student activity records, shared by the HTTP handlers
//! and anything else that needs to create, query or increment click totals.
//! The service holds no mutable state; every call goes to the store.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::try_get_config;
use crate::errors::{ActivityError, Result};
use crate::services::validation::{validate_course, validate_sum_clicks};
use crate::storage::{ActivityChanges, ActivityKey, ActivityRecord, ActivityStore, NewActivity};

/// increment 在插入冲突后的默认重试次数
pub const DEFAULT_INCREMENT_MAX_RETRIES: u32 = 3;

// ============ Request DTOs ============

/// Request to create a new activity record
#[derive(Debug, Clone)]
pub struct CreateActivityRequest {
    pub student_id: i64,
    pub course_code: String,
    pub module_code: String,
    pub date: NaiveDate,
    pub sum_clicks: i32,
}

/// Partial update; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ActivityPatch {
    pub date: Option<NaiveDate>,
    pub sum_clicks: Option<i32>,
}

// ============ Service ============

pub struct ActivityService {
    store: Arc<dyn ActivityStore>,
    increment_max_retries: u32,
}

impl ActivityService {
    /// Create a new ActivityService, reading the retry cap from config when available
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        let increment_max_retries = try_get_config()
            .map(|c| c.activity.increment_max_retries)
            .unwrap_or(DEFAULT_INCREMENT_MAX_RETRIES);
        Self::with_max_retries(store, increment_max_retries)
    }

    pub fn with_max_retries(store: Arc<dyn ActivityStore>, increment_max_retries: u32) -> Self {
        Self {
            store,
            increment_max_retries,
        }
    }

    pub fn increment_max_retries(&self) -> u32 {
        self.increment_max_retries
    }

    pub fn store(&self) -> &Arc<dyn ActivityStore> {
        &self.store
    }

    // ============ CRUD ============

    pub async fn create(&self, req: CreateActivityRequest) -> Result<ActivityRecord> {
        validate_course(&req.course_code, &req.module_code)?;
        validate_sum_clicks(req.sum_clicks)?;

        let activity = NewActivity {
            key: ActivityKey::new(req.student_id, req.course_code, req.module_code, req.date),
            sum_clicks: req.sum_clicks,
        };

        let record = self.store.insert(activity).await?;
        info!(
            "ActivityService: created activity {} ({}) with {} clicks",
            record.id,
            record.key(),
            record.sum_clicks
        );
        Ok(record)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ActivityRecord> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| ActivityError::not_found(format!("Activity not found with id: {}", id)))
    }

    pub async fn list_all(&self) -> Result<Vec<ActivityRecord>> {
        self.store.list_all().await
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<ActivityRecord>> {
        self.store.list_by_student(student_id).await
    }

    pub async fn list_by_course(
        &self,
        course_code: &str,
        module_code: &str,
    ) -> Result<Vec<ActivityRecord>> {
        self.store.list_by_course(course_code, module_code).await
    }

    pub async fn list_by_student_and_course(
        &self,
        student_id: i64,
        course_code: &str,
        module_code: &str,
    ) -> Result<Vec<ActivityRecord>> {
        self.store
            .list_by_student_and_course(student_id, course_code, module_code)
            .await
    }

    pub async fn list_by_student_and_date(
        &self,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        self.store.list_by_student_and_date(student_id, date).await
    }

    /// 区间两端包含；start > end 时返回空列表
    pub async fn list_by_student_and_date_range(
        &self,
        student_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        if start > end {
            debug!(
                "ActivityService: empty date range {}..{} for student {}",
                start, end, student_id
            );
            return Ok(Vec::new());
        }
        self.store
            .list_by_student_and_date_range(student_id, start, end)
            .await
    }

    /// 区间两端包含；start > end 时返回空列表
    pub async fn list_by_course_and_date_range(
        &self,
        course_code: &str,
        module_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        if start > end {
            return Ok(Vec::new());
        }
        self.store
            .list_by_course_and_date_range(course_code, module_code, start, end)
            .await
    }

    pub async fn update(&self, id: i64, patch: ActivityPatch) -> Result<ActivityRecord> {
        if let Some(sum_clicks) = patch.sum_clicks {
            validate_sum_clicks(sum_clicks)?;
        }

        // 只写入请求中给出的字段，避免覆盖并发的 increment
        let changes = ActivityChanges {
            date: patch.date,
            sum_clicks: patch.sum_clicks,
        };
        let updated = self.store.update(id, changes).await?;
        info!(
            "ActivityService: updated activity {} (date={}, sum_clicks={})",
            updated.id, updated.date, updated.sum_clicks
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_by_id(id).await?;
        info!("ActivityService: deleted activity {}", id);
        Ok(())
    }

    // ============ Aggregates ============

    pub async fn total_clicks_by_student(&self, student_id: i64) -> Result<i64> {
        self.store.sum_clicks_by_student(student_id).await
    }

    pub async fn total_clicks_by_student_and_course(
        &self,
        student_id: i64,
        course_code: &str,
        module_code: &str,
    ) -> Result<i64> {
        self.store
            .sum_clicks_by_student_and_course(student_id, course_code, module_code)
            .await
    }

    // ============ Increment ============

    /// Add `delta` clicks to the record identified by `key`, creating it when absent.
    ///
    /// Losing an insert race (DuplicateKey) or having the record deleted between
    /// read and write (NotFound) restarts the lookup, at most
    /// `increment_max_retries` times. Negative totals and i32 overflow are
    /// rejected with InvalidState.
    pub async fn increment_clicks(&self, key: ActivityKey, delta: i32) -> Result<ActivityRecord> {
        validate_course(&key.course_code, &key.module_code)?;

        let mut attempt: u32 = 0;
        loop {
            match self.try_increment(&key, delta).await {
                Ok(record) => {
                    info!(
                        "ActivityService: incremented {} by {} -> {}",
                        key, delta, record.sum_clicks
                    );
                    return Ok(record);
                }
                Err(ActivityError::DuplicateKey(_)) | Err(ActivityError::NotFound(_))
                    if attempt < self.increment_max_retries =>
                {
                    attempt += 1;
                    warn!(
                        "ActivityService: increment conflict on {} (attempt {}/{}), retrying",
                        key,
                        attempt,
                        self.increment_max_retries + 1
                    );
                }
                Err(ActivityError::DuplicateKey(_)) | Err(ActivityError::NotFound(_)) => {
                    warn!(
                        "ActivityService: increment on {} gave up after {} attempts",
                        key,
                        attempt + 1
                    );
                    return Err(ActivityError::transient_conflict(format!(
                        "Concurrent modification of {} did not settle after {} attempts",
                        key,
                        attempt + 1
                    )));
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// 单次尝试：查找 -> 原子累加，或不存在时插入
    async fn try_increment(&self, key: &ActivityKey, delta: i32) -> Result<ActivityRecord> {
        match self.store.find_by_key(key).await? {
            Some(existing) => {
                match existing.sum_clicks.checked_add(delta) {
                    Some(total) if total >= 0 => {}
                    Some(total) => {
                        return Err(ActivityError::invalid_state(format!(
                            "Incrementing {} by {} would make sum clicks negative ({})",
                            key, delta, total
                        )));
                    }
                    None => {
                        return Err(ActivityError::invalid_state(format!(
                            "Incrementing {} by {} overflows sum clicks",
                            key, delta
                        )));
                    }
                }
                self.store.add_clicks(existing.id, delta).await
            }
            None => {
                if delta < 0 {
                    return Err(ActivityError::invalid_state(format!(
                        "Cannot create {} with negative clicks ({})",
                        key, delta
                    )));
                }
                self.store
                    .insert(NewActivity {
                        key: key.clone(),
                        sum_clicks: delta,
                    })
                    .await
            }
        }
    }
}
