//! Activity API 帮助函数

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::{error, warn};

use crate::errors::ActivityError;

use super::error_code::ErrorCode;
use super::types::{ApiResponse, ValidationErrors};

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建 201 Created 响应
pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 ActivityError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
///
/// 5xx 记 error，4xx 记 warn。字段校验失败时 `data.validationErrors` 带上出错字段。
pub fn error_from_activity(err: &ActivityError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("Activity API: {} ({})", err, err.code());
    } else {
        warn!("Activity API: {}", err);
    }

    match err.field() {
        Some(field) => {
            let mut errors = ValidationErrors::default();
            errors
                .validation_errors
                .insert(field.to_string(), err.message().to_string());
            json_response(status, ErrorCode::from(err), err.message(), Some(errors))
        }
        None => error_response(status, ErrorCode::from(err), err.message()),
    }
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 ActivityError。
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<ActivityError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            let err: ActivityError = e.into();
            error_from_activity(&err)
        }
    }
}

fn bad_request<E>(cause: E, message: String) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    warn!("Activity API: rejected request: {}", message);
    InternalError::from_response(
        cause,
        error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message),
    )
    .into()
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid request body: {}", err);
    bad_request(err, message)
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid query parameters: {}", err);
    bad_request(err, message)
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid path parameters: {}", err);
    bad_request(err, message)
}

/// 提取器配置：解析失败统一返回 400 + BadRequest 信封
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
