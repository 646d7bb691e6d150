pub mod courses;
pub mod departments;
pub mod integrity;
pub mod system;

pub use courses::CourseService;
pub use departments::DepartmentService;
pub use system::SystemService;
