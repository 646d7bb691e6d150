/// 业务错误码
///
/// 随错误信封一起返回给调用方，HTTP 状态码由服务层决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    InternalServerError = 1500,

    // 课程相关
    CourseNotFound = 2000,
    CourseAlreadyExists = 2001,
    CourseCodeInvalid = 2002,
    CourseUpdateConflict = 2003,
    CourseReferenceMissing = 2004,
    CourseSelfPrerequisite = 2005,
    PrerequisiteAlreadyLinked = 2006,
    PrerequisiteInvalid = 2007,

    // 院系相关
    DepartmentNotFound = 3000,
    DepartmentAlreadyExists = 3001,
    DepartmentCodeInvalid = 3002,
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn test_codes_are_grouped_by_domain() {
        assert_eq!(ErrorCode::BadRequest as i32, 1000);
        assert_eq!(ErrorCode::InternalServerError as i32, 1500);
        assert_eq!(ErrorCode::CourseNotFound as i32, 2000);
        assert_eq!(ErrorCode::PrerequisiteInvalid as i32, 2007);
        assert_eq!(ErrorCode::DepartmentNotFound as i32, 3000);
    }
}
