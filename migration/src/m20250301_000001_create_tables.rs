use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建院系表
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Departments::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Departments::NameAr).string().not_null())
                    .col(ColumnDef::new(Departments::NameEn).string().not_null())
                    .col(ColumnDef::new(Departments::Capacity).integer().not_null())
                    .col(ColumnDef::new(Departments::Program).string().not_null())
                    .col(
                        ColumnDef::new(Departments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Departments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::NameAr).string().not_null())
                    .col(ColumnDef::new(Courses::NameEn).string().not_null())
                    .col(ColumnDef::new(Courses::DescriptionAr).text().not_null())
                    .col(ColumnDef::new(Courses::DescriptionEn).text().not_null())
                    .col(ColumnDef::new(Courses::CreditHours).integer().not_null())
                    .col(ColumnDef::new(Courses::CourseType).string().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程-院系关联表
        manager
            .create_table(
                Table::create()
                    .table(CourseDepartments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseDepartments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseDepartments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseDepartments::DepartmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseDepartments::Table, CourseDepartments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseDepartments::Table, CourseDepartments::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程-先修课程关联表
        manager
            .create_table(
                Table::create()
                    .table(CoursePrerequisites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoursePrerequisites::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CoursePrerequisites::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoursePrerequisites::PrerequisiteId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CoursePrerequisites::Table, CoursePrerequisites::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                CoursePrerequisites::Table,
                                CoursePrerequisites::PrerequisiteId,
                            )
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 关联行唯一索引：同一对端点只允许一行
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_departments_pair")
                    .table(CourseDepartments::Table)
                    .col(CourseDepartments::CourseId)
                    .col(CourseDepartments::DepartmentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_departments_department")
                    .table(CourseDepartments::Table)
                    .col(CourseDepartments::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_prerequisites_pair")
                    .table(CoursePrerequisites::Table)
                    .col(CoursePrerequisites::CourseId)
                    .col(CoursePrerequisites::PrerequisiteId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_prerequisites_prerequisite")
                    .table(CoursePrerequisites::Table)
                    .col(CoursePrerequisites::PrerequisiteId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按依赖关系逆序删除表
        manager
            .drop_table(Table::drop().table(CoursePrerequisites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseDepartments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Departments {
    #[sea_orm(iden = "departments")]
    Table,
    Id,
    Code,
    NameAr,
    NameEn,
    Capacity,
    Program,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Code,
    NameAr,
    NameEn,
    DescriptionAr,
    DescriptionEn,
    CreditHours,
    CourseType,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseDepartments {
    #[sea_orm(iden = "course_departments")]
    Table,
    Id,
    CourseId,
    DepartmentId,
}

#[derive(DeriveIden)]
enum CoursePrerequisites {
    #[sea_orm(iden = "course_prerequisites")]
    Table,
    Id,
    CourseId,
    PrerequisiteId,
}
