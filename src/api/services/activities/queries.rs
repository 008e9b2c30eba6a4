//! Activity API 过滤查询与聚合

use actix_web::{Responder, Result as ActixResult, web};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::trace;

use crate::services::ActivityService;

use super::activity_crud::into_responses;
use super::helpers::api_result;
use super::types::DateRangeQuery;

pub async fn list_by_student(
    path: web::Path<i64>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let student_id = path.into_inner();
    trace!("Activity API: list activities for student {}", student_id);
    Ok(api_result(
        service.list_by_student(student_id).await.map(into_responses),
    ))
}

pub async fn list_by_student_and_date(
    path: web::Path<(i64, NaiveDate)>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let (student_id, date) = path.into_inner();
    trace!(
        "Activity API: list activities for student {} on {}",
        student_id, date
    );
    Ok(api_result(
        service
            .list_by_student_and_date(student_id, date)
            .await
            .map(into_responses),
    ))
}

pub async fn list_by_student_and_date_range(
    path: web::Path<i64>,
    query: web::Query<DateRangeQuery>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let student_id = path.into_inner();
    trace!(
        "Activity API: list activities for student {} between {} and {}",
        student_id, query.start_date, query.end_date
    );
    Ok(api_result(
        service
            .list_by_student_and_date_range(student_id, query.start_date, query.end_date)
            .await
            .map(into_responses),
    ))
}

pub async fn total_clicks_by_student(
    path: web::Path<i64>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let student_id = path.into_inner();
    Ok(api_result(service.total_clicks_by_student(student_id).await))
}

pub async fn list_by_student_and_course(
    path: web::Path<(i64, String, String)>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let (student_id, course_code, module_code) = path.into_inner();
    trace!(
        "Activity API: list activities for student {} in {}/{}",
        student_id, course_code, module_code
    );
    Ok(api_result(
        service
            .list_by_student_and_course(student_id, &course_code, &module_code)
            .await
            .map(into_responses),
    ))
}

pub async fn total_clicks_by_student_and_course(
    path: web::Path<(i64, String, String)>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let (student_id, course_code, module_code) = path.into_inner();
    Ok(api_result(
        service
            .total_clicks_by_student_and_course(student_id, &course_code, &module_code)
            .await,
    ))
}

pub async fn list_by_course(
    path: web::Path<(String, String)>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let (course_code, module_code) = path.into_inner();
    trace!(
        "Activity API: list activities for course {}/{}",
        course_code, module_code
    );
    Ok(api_result(
        service
            .list_by_course(&course_code, &module_code)
            .await
            .map(into_responses),
    ))
}

pub async fn list_by_course_and_date_range(
    path: web::Path<(String, String)>,
    query: web::Query<DateRangeQuery>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let (course_code, module_code) = path.into_inner();
    Ok(api_result(
        service
            .list_by_course_and_date_range(
                &course_code,
                &module_code,
                query.start_date,
                query.end_date,
            )
            .await
            .map(into_responses),
    ))
}
