use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    /// 输入校验失败，`field` 为出错的请求字段（camelCase）
    Validation {
        field: Option<String>,
        message: String,
    },
    NotFound(String),
    DuplicateKey(String),
    InvalidState(String),
    TransientConflict(String),
}

impl ActivityError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ActivityError::DatabaseConfig(_) => "E001",
            ActivityError::DatabaseConnection(_) => "E002",
            ActivityError::DatabaseOperation(_) => "E003",
            ActivityError::Validation { .. } => "E004",
            ActivityError::NotFound(_) => "E005",
            ActivityError::DuplicateKey(_) => "E006",
            ActivityError::InvalidState(_) => "E007",
            ActivityError::TransientConflict(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ActivityError::DatabaseConfig(_) => "Database Configuration Error",
            ActivityError::DatabaseConnection(_) => "Database Connection Error",
            ActivityError::DatabaseOperation(_) => "Database Operation Error",
            ActivityError::Validation { .. } => "Validation Error",
            ActivityError::NotFound(_) => "Resource Not Found",
            ActivityError::DuplicateKey(_) => "Duplicate Key",
            ActivityError::InvalidState(_) => "Invalid State",
            ActivityError::TransientConflict(_) => "Transient Conflict",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ActivityError::DatabaseConfig(msg)
            | ActivityError::DatabaseConnection(msg)
            | ActivityError::DatabaseOperation(msg)
            | ActivityError::NotFound(msg)
            | ActivityError::DuplicateKey(msg)
            | ActivityError::InvalidState(msg)
            | ActivityError::TransientConflict(msg) => msg,
            ActivityError::Validation { message, .. } => message,
        }
    }

    /// 校验失败对应的请求字段
    pub fn field(&self) -> Option<&str> {
        match self {
            ActivityError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            ActivityError::Validation { .. } => StatusCode::BAD_REQUEST,
            ActivityError::NotFound(_) => StatusCode::NOT_FOUND,
            ActivityError::DuplicateKey(_) => StatusCode::CONFLICT,
            ActivityError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ActivityError::TransientConflict(_) => StatusCode::SERVICE_UNAVAILABLE,
            ActivityError::DatabaseConfig(_)
            | ActivityError::DatabaseConnection(_)
            | ActivityError::DatabaseOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式启动失败）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ActivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ActivityError {}

// 便捷的构造函数
impl ActivityError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ActivityError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ActivityError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ActivityError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ActivityError::Validation {
            field: None,
            message: msg.into(),
        }
    }

    pub fn invalid_field<F: Into<String>, T: Into<String>>(field: F, msg: T) -> Self {
        ActivityError::Validation {
            field: Some(field.into()),
            message: msg.into(),
        }
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ActivityError::NotFound(msg.into())
    }

    pub fn duplicate_key<T: Into<String>>(msg: T) -> Self {
        ActivityError::DuplicateKey(msg.into())
    }

    pub fn invalid_state<T: Into<String>>(msg: T) -> Self {
        ActivityError::InvalidState(msg.into())
    }

    pub fn transient_conflict<T: Into<String>>(msg: T) -> Self {
        ActivityError::TransientConflict(msg.into())
    }
}

// 唯一约束冲突单独识别为 DuplicateKey，其余数据库错误归为 DatabaseOperation
impl From<sea_orm::DbErr> for ActivityError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                ActivityError::DuplicateKey(msg)
            }
            _ => ActivityError::DatabaseOperation(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ActivityError>;
