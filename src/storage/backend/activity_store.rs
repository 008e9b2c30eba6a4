//! ActivityStore implementation for SeaOrmStorage

use async_trait::async_trait;
use chrono::NaiveDate;

use super::SeaOrmStorage;
use crate::errors::Result;
use crate::storage::models::{ActivityChanges, ActivityKey, ActivityRecord, NewActivity};
use crate::storage::traits::ActivityStore;

#[async_trait]
impl ActivityStore for SeaOrmStorage {
    async fn insert(&self, activity: NewActivity) -> Result<ActivityRecord> {
        self.create(activity).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ActivityRecord>> {
        self.get(id).await
    }

    async fn list_all(&self) -> Result<Vec<ActivityRecord>> {
        self.load_all().await
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<ActivityRecord>> {
        self.find_by_student(student_id).await
    }

    async fn list_by_course(
        &self,
        course_code: &str,
        module_code: &str,
    ) -> Result<Vec<ActivityRecord>> {
        self.find_by_course(course_code, module_code).await
    }

    async fn list_by_student_and_course(
        &self,
        student_id: i64,
        course_code: &str,
        module_code: &str,
    ) -> Result<Vec<ActivityRecord>> {
        self.find_by_student_and_course(student_id, course_code, module_code)
            .await
    }

    async fn list_by_student_and_date(
        &self,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        self.find_by_student_and_date(student_id, date).await
    }

    async fn list_by_student_and_date_range(
        &self,
        student_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        self.find_by_student_and_date_range(student_id, start, end)
            .await
    }

    async fn list_by_course_and_date_range(
        &self,
        course_code: &str,
        module_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        self.find_by_course_and_date_range(course_code, module_code, start, end)
            .await
    }

    async fn find_by_key(&self, key: &ActivityKey) -> Result<Option<ActivityRecord>> {
        self.find_one_by_key(key).await
    }

    async fn update(&self, id: i64, changes: ActivityChanges) -> Result<ActivityRecord> {
        self.apply_changes(id, changes).await
    }

    async fn add_clicks(&self, id: i64, delta: i32) -> Result<ActivityRecord> {
        self.increment_by_id(id, delta).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.remove(id).await
    }

    async fn sum_clicks_by_student(&self, student_id: i64) -> Result<i64> {
        self.total_clicks_by_student(student_id).await
    }

    async fn sum_clicks_by_student_and_course(
        &self,
        student_id: i64,
        course_code: &str,
        module_code: &str,
    ) -> Result<i64> {
        self.total_clicks_by_student_and_course(student_id, course_code, module_code)
            .await
    }

    async fn ping(&self) -> Result<()> {
        self.health_check().await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
