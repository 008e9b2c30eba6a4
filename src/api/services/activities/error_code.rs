//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::ActivityError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 活动记录错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    ServiceUnavailable = 1030,

    // 活动记录错误 3000-3099
    ActivityNotFound = 3000,
    ActivityAlreadyExists = 3001,
    ActivityInvalidState = 3002,
    ActivityConflict = 3003,
    ActivityValidationFailed = 3004,
    ActivityDatabaseError = 3005,
}

impl From<&ActivityError> for ErrorCode {
    fn from(err: &ActivityError) -> Self {
        match err {
            ActivityError::NotFound(_) => ErrorCode::ActivityNotFound,
            ActivityError::DuplicateKey(_) => ErrorCode::ActivityAlreadyExists,
            ActivityError::InvalidState(_) => ErrorCode::ActivityInvalidState,
            ActivityError::TransientConflict(_) => ErrorCode::ActivityConflict,
            ActivityError::Validation { .. } => ErrorCode::ActivityValidationFailed,
            ActivityError::DatabaseConfig(_)
            | ActivityError::DatabaseConnection(_)
            | ActivityError::DatabaseOperation(_) => ErrorCode::ActivityDatabaseError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::ActivityAlreadyExists).unwrap();
        assert_eq!(json, "3001");

        let parsed: ErrorCode = serde_json::from_str("1000").unwrap();
        assert_eq!(parsed, ErrorCode::BadRequest);
    }

    #[test]
    fn test_from_activity_error() {
        assert_eq!(
            ErrorCode::from(&ActivityError::not_found("x")),
            ErrorCode::ActivityNotFound
        );
        assert_eq!(
            ErrorCode::from(&ActivityError::transient_conflict("x")),
            ErrorCode::ActivityConflict
        );
        assert_eq!(
            ErrorCode::from(&ActivityError::database_operation("x")),
            ErrorCode::ActivityDatabaseError
        );
    }
}
