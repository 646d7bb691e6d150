//! 课程-先修课程关联实体
//!
//! 两端都指向 courses 表，因此不实现 `Related<courses::Entity>`，
//! 查询时按 ID 批量解析。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_prerequisites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub prerequisite_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::PrerequisiteId",
        to = "super::courses::Column::Id",
        on_delete = "Cascade"
    )]
    Prerequisite,
}

impl ActiveModelBehavior for ActiveModel {}
