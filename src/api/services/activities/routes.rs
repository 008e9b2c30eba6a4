//! Activity API 路由配置

use actix_web::web;

use super::activity_crud::{
    delete_activity, get_activity, get_all_activities, increment_clicks, post_activity,
    update_activity,
};
use super::helpers::{json_config, path_config, query_config};
use super::queries::{
    list_by_course, list_by_course_and_date_range, list_by_student, list_by_student_and_course,
    list_by_student_and_date, list_by_student_and_date_range, total_clicks_by_student,
    total_clicks_by_student_and_course,
};

/// 活动记录路由 `/activities`
///
/// 包含：
/// - GET/POST /activities - 列表 / 创建
/// - POST /activities/increment - 累加点击
/// - GET/PUT/DELETE /activities/{id} - 单条操作
/// - GET /activities/student/... - 按学生过滤与汇总
/// - GET /activities/course/... - 按课程过滤
pub fn activity_routes() -> actix_web::Scope {
    web::scope("/activities")
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .route("", web::get().to(get_all_activities))
        .route("", web::post().to(post_activity))
        .route("/increment", web::post().to(increment_clicks))
        // Student filters
        .route(
            "/student/{student_id}/total-clicks",
            web::get().to(total_clicks_by_student),
        )
        .route(
            "/student/{student_id}/date-range",
            web::get().to(list_by_student_and_date_range),
        )
        .route(
            "/student/{student_id}/date/{date}",
            web::get().to(list_by_student_and_date),
        )
        .route(
            "/student/{student_id}/course/{course_code}/{module_code}/total-clicks",
            web::get().to(total_clicks_by_student_and_course),
        )
        .route(
            "/student/{student_id}/course/{course_code}/{module_code}",
            web::get().to(list_by_student_and_course),
        )
        .route("/student/{student_id}", web::get().to(list_by_student))
        // Course filters
        .route(
            "/course/{course_code}/{module_code}/date-range",
            web::get().to(list_by_course_and_date_range),
        )
        .route(
            "/course/{course_code}/{module_code}",
            web::get().to(list_by_course),
        )
        // Single record operations
        .route("/{id}", web::get().to(get_activity))
        .route("/{id}", web::put().to(update_activity))
        .route("/{id}", web::delete().to(delete_activity))
}
