//! Activity API 服务模块
//!
//! 学生活动点击记录的 HTTP 端点：CRUD、过滤查询、汇总和点击累加。

mod activity_crud;
pub mod error_code;
mod helpers;
mod queries;
pub mod routes;
mod types;

pub use types::*;

pub use helpers::{
    api_result, error_from_activity, error_response, json_config, path_config, query_config,
    success_response,
};

pub use error_code::ErrorCode;

pub use routes::activity_routes;
