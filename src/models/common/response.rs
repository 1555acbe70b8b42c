use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::DeaneryError;
use crate::models::ErrorCode;

/// 所有接口共用的响应外壳
///
/// `code` 为 0 表示成功，其余取值见 [`ErrorCode`]。`data` 为空时不输出该字段。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn envelope(code: ErrorCode, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::envelope(ErrorCode::Success, Some(data), message)
    }

    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Success as i32
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::envelope(ErrorCode::Success, None, message)
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::envelope(code, None, message)
    }

    /// 业务错误对应的 HTTP 状态码与响应体
    ///
    /// `not_found` 是资源自己的错误码，例如投票不存在时为 `VoteNotFound`。
    /// 非调用方错误一律按 500 处理，消息只保留错误类型与详情。
    pub fn from_error(err: &DeaneryError, not_found: ErrorCode) -> (StatusCode, Self) {
        let (status, code) = match err {
            DeaneryError::NotFound(_) => (StatusCode::NOT_FOUND, not_found),
            DeaneryError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed),
            DeaneryError::InvalidInput(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidInput),
            DeaneryError::DateParse(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
            DeaneryError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
            _ => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::error_empty(ErrorCode::InternalServerError, err.format_simple()),
                );
            }
        };
        (status, Self::error_empty(code, err.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_data_is_omitted() {
        let body = serde_json::to_value(ApiResponse::success_empty("Vote deleted")).unwrap();
        assert_eq!(body["code"], 0);
        assert_eq!(body["message"], "Vote deleted");
        assert!(body.get("data").is_none());
        assert!(body["timestamp"].is_string());

        let body = serde_json::to_value(ApiResponse::success(vec![1, 2], "ok")).unwrap();
        assert_eq!(body["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_from_error_codes() {
        let (status, body) =
            ApiResponse::from_error(&DeaneryError::not_found("Vote 7"), ErrorCode::VoteNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, ErrorCode::VoteNotFound as i32);
        assert_eq!(body.message, "Vote 7");
        assert!(!body.is_success());

        let (status, body) = ApiResponse::from_error(
            &DeaneryError::invalid_input("Start date is after end date"),
            ErrorCode::VoteNotFound,
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, 1007);

        let (status, body) = ApiResponse::from_error(
            &DeaneryError::database_operation("disk I/O error"),
            ErrorCode::VoteNotFound,
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, 1005);
        assert!(body.message.contains("Database Operation Error"));
    }
}
