//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_sis_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SisError {
            $($variant(String),)*
        }

        impl SisError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SisError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SisError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SisError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SisError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SisError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_sis_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Duplicate("E004", "Duplicate Key Error"),
}

impl SisError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SisError {}

// 唯一约束冲突单独归类，便于服务层转换为 "already exists" 错误
impl From<sea_orm::DbErr> for SisError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => SisError::Duplicate(msg),
            _ => SisError::DatabaseOperation(err.to_string()),
        }
    }
}

impl SisError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, SisError::Duplicate(_))
    }
}

pub type Result<T> = std::result::Result<T, SisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SisError::database_config("test").code(), "E001");
        assert_eq!(SisError::database_operation("test").code(), "E003");
        assert_eq!(SisError::duplicate("test").code(), "E004");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SisError::database_connection("test").error_type(),
            "Database Connection Error"
        );
        assert_eq!(SisError::duplicate("test").error_type(), "Duplicate Key Error");
    }

    #[test]
    fn test_error_message() {
        let err = SisError::database_operation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = SisError::duplicate("courses.code");
        let formatted = err.format_simple();
        assert!(formatted.contains("Duplicate Key Error"));
        assert!(formatted.contains("courses.code"));
    }

    #[test]
    fn test_db_err_conversion() {
        let err: SisError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(!err.is_duplicate());
        assert_eq!(err.code(), "E003");
    }
}
