//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name_ar: String,
    pub name_en: String,
    #[sea_orm(column_type = "Text")]
    pub description_ar: String,
    #[sea_orm(column_type = "Text")]
    pub description_en: String,
    pub credit_hours: i32,
    pub course_type: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_departments::Entity")]
    CourseDepartments,
}

impl Related<super::course_departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseDepartments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::common::LocalizedText;
        use crate::models::courses::entities::{Course, CourseType};

        Course {
            id: self.id,
            code: self.code,
            name: LocalizedText {
                ar: self.name_ar,
                en: self.name_en,
            },
            description: LocalizedText {
                ar: self.description_ar,
                en: self.description_en,
            },
            credit_hours: self.credit_hours,
            course_type: self
                .course_type
                .parse::<CourseType>()
                .unwrap_or(CourseType::Compulsory),
        }
    }
}
