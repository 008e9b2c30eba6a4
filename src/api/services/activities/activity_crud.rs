//! Activity API CRUD 操作

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::ActivityService;

use super::helpers::{api_result, created_response, error_from_activity};
use super::types::{ActivityResponse, IncrementQuery, PostNewActivity, UpdateActivity};

/// 创建活动记录
pub async fn post_activity(
    body: web::Json<PostNewActivity>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let body = body.into_inner();
    trace!(
        "Activity API: create request for student {} {}/{}",
        body.student_id, body.course_code, body.module_code
    );

    Ok(match service.create(body.into()).await {
        Ok(record) => created_response(ActivityResponse::from(record)),
        Err(e) => error_from_activity(&e),
    })
}

/// 获取全部活动记录
pub async fn get_all_activities(
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    trace!("Activity API: request to list all activities");
    Ok(api_result(service.list_all().await.map(into_responses)))
}

/// 获取单条活动记录
pub async fn get_activity(
    path: web::Path<i64>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    trace!("Activity API: request to get activity {}", id);
    Ok(api_result(
        service.get_by_id(id).await.map(ActivityResponse::from),
    ))
}

/// 部分更新（date / sumClicks）
pub async fn update_activity(
    path: web::Path<i64>,
    body: web::Json<UpdateActivity>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    trace!("Activity API: update request for activity {}", id);
    Ok(api_result(
        service
            .update(id, body.into_inner().into())
            .await
            .map(ActivityResponse::from),
    ))
}

/// 删除活动记录，成功返回 204
pub async fn delete_activity(
    path: web::Path<i64>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    trace!("Activity API: delete request for activity {}", id);
    Ok(match service.delete(id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_from_activity(&e),
    })
}

/// 累加点击数（记录不存在时创建）
pub async fn increment_clicks(
    query: web::Query<IncrementQuery>,
    service: web::Data<Arc<ActivityService>>,
) -> ActixResult<impl Responder> {
    let query = query.into_inner();
    let key = query.key();
    trace!("Activity API: increment {} by {}", key, query.clicks);
    Ok(api_result(
        service
            .increment_clicks(key, query.clicks)
            .await
            .map(ActivityResponse::from),
    ))
}

pub(super) fn into_responses(records: Vec<crate::storage::ActivityRecord>) -> Vec<ActivityResponse> {
    records.into_iter().map(ActivityResponse::from).collect()
}
