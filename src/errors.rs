//! 统一错误处理模块
//!
//! 使用宏生成错误类型，每个变体带有错误代码、类型名称和详情。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() / error_type() / message()
/// - snake_case 便捷构造函数
macro_rules! define_deanery_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DeaneryError {
            $($variant(String),)*
        }

        impl DeaneryError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(DeaneryError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DeaneryError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(DeaneryError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl DeaneryError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DeaneryError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_deanery_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    InvalidInput("E006", "Invalid Input"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    FileOperation("E010", "File Operation Error"),
}

impl DeaneryError {
    /// 是否属于调用方输入错误（4xx）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DeaneryError::Validation(_)
                | DeaneryError::NotFound(_)
                | DeaneryError::InvalidInput(_)
                | DeaneryError::DateParse(_)
                | DeaneryError::Authentication(_)
        )
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for DeaneryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DeaneryError {}

impl From<sea_orm::DbErr> for DeaneryError {
    fn from(err: sea_orm::DbErr) -> Self {
        DeaneryError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for DeaneryError {
    fn from(err: std::io::Error) -> Self {
        DeaneryError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DeaneryError {
    fn from(err: serde_json::Error) -> Self {
        DeaneryError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for DeaneryError {
    fn from(err: chrono::ParseError) -> Self {
        DeaneryError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeaneryError>;
