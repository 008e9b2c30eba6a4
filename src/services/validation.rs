//! 输入校验
//!
//! 校验在触达存储之前完成，失败统一返回 `ActivityError::Validation`。

use crate::errors::ActivityError;

/// course_code / module_code 最大长度（与表结构 varchar(50) 一致）
pub const MAX_CODE_LENGTH: usize = 50;

/// 校验课程或模块代码：非空白且不超过最大长度
///
/// `field` 是请求中的字段名，`label` 用于错误消息。
pub fn validate_code(field: &str, label: &str, value: &str) -> Result<(), ActivityError> {
    if value.trim().is_empty() {
        return Err(ActivityError::invalid_field(
            field,
            format!("{} is required", label),
        ));
    }

    if value.chars().count() > MAX_CODE_LENGTH {
        return Err(ActivityError::invalid_field(
            field,
            format!("{} must not exceed {} characters", label, MAX_CODE_LENGTH),
        ));
    }

    Ok(())
}

pub fn validate_sum_clicks(sum_clicks: i32) -> Result<(), ActivityError> {
    if sum_clicks < 0 {
        return Err(ActivityError::invalid_field(
            "sumClicks",
            format!(
                "Sum clicks must be non-negative, got {}",
                sum_clicks
            ),
        ));
    }
    Ok(())
}

/// 校验完整的课程/模块组合
pub fn validate_course(course_code: &str, module_code: &str) -> Result<(), ActivityError> {
    validate_code("courseCode", "Course code", course_code)?;
    validate_code("moduleCode", "Module code", module_code)
}
