//! 预导入模块，方便使用

pub use super::course_departments::{
    ActiveModel as CourseDepartmentActiveModel, Entity as CourseDepartments,
    Model as CourseDepartmentModel,
};
pub use super::course_prerequisites::{
    ActiveModel as CoursePrerequisiteActiveModel, Entity as CoursePrerequisites,
    Model as CoursePrerequisiteModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::departments::{
    ActiveModel as DepartmentActiveModel, Entity as Departments, Model as DepartmentModel,
};
