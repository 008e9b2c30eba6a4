pub mod student_activity;

pub use student_activity::Entity as StudentActivityEntity;
