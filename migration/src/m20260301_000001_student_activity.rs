use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 student_activity 表
        manager
            .create_table(
                Table::create()
                    .table(StudentActivity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentActivity::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentActivity::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentActivity::CourseCode)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentActivity::ModuleCode)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentActivity::Date).date().not_null())
                    .col(
                        ColumnDef::new(StudentActivity::SumClicks)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一键：(student_id, course_code, module_code, date)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_student_activity_key")
                    .table(StudentActivity::Table)
                    .col(StudentActivity::StudentId)
                    .col(StudentActivity::CourseCode)
                    .col(StudentActivity::ModuleCode)
                    .col(StudentActivity::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_activity_student")
                    .table(StudentActivity::Table)
                    .col(StudentActivity::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_activity_course")
                    .table(StudentActivity::Table)
                    .col(StudentActivity::CourseCode)
                    .col(StudentActivity::ModuleCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_activity_course")
                    .table(StudentActivity::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_activity_student")
                    .table(StudentActivity::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("uq_student_activity_key")
                    .table(StudentActivity::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StudentActivity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StudentActivity {
    #[sea_orm(iden = "student_activity")]
    Table,
    Id,
    StudentId,
    CourseCode,
    ModuleCode,
    Date,
    SumClicks,
}
