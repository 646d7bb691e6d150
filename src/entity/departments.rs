//! 院系实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name_ar: String,
    pub name_en: String,
    pub capacity: i32,
    pub program: String,
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
    pub fn into_department(self) -> crate::models::departments::entities::Department {
        use crate::models::common::LocalizedText;
        use crate::models::departments::entities::{Department, Program};

        Department {
            id: self.id,
            code: self.code,
            name: LocalizedText {
                ar: self.name_ar,
                en: self.name_en,
            },
            capacity: self.capacity,
            program: self.program.parse::<Program>().unwrap_or(Program::General),
        }
    }
}
