use crate::storage::models::{ActivityChanges, ActivityRecord, NewActivity};
use migration::entities::student_activity;

/// 将 Sea-ORM Model 转换为 ActivityRecord
pub fn model_to_record(model: student_activity::Model) -> ActivityRecord {
    ActivityRecord {
        id: model.id,
        student_id: model.student_id,
        course_code: model.course_code,
        module_code: model.module_code,
        date: model.date,
        sum_clicks: model.sum_clicks,
    }
}

/// 将 NewActivity 转换为 ActiveModel（id 由数据库分配）
pub fn new_activity_to_active_model(activity: &NewActivity) -> student_activity::ActiveModel {
    use sea_orm::ActiveValue::*;

    student_activity::ActiveModel {
        id: NotSet,
        student_id: Set(activity.key.student_id),
        course_code: Set(activity.key.course_code.clone()),
        module_code: Set(activity.key.module_code.clone()),
        date: Set(activity.key.date),
        sum_clicks: Set(activity.sum_clicks),
    }
}

/// 部分更新用的 ActiveModel：只把给出的字段标记为 Set
///
/// 其余列为 NotSet，不会出现在 UPDATE 语句中。
pub fn changes_to_update_model(id: i64, changes: &ActivityChanges) -> student_activity::ActiveModel {
    use sea_orm::ActiveValue::*;

    student_activity::ActiveModel {
        id: Unchanged(id),
        date: changes.date.map_or(NotSet, Set),
        sum_clicks: changes.sum_clicks.map_or(NotSet, Set),
        ..Default::default()
    }
}
