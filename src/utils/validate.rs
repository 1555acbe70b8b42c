//! 请求体校验
//!
//! 每个输入类型实现 [`Validate`]，返回列出全部违规字段的 [`ValidationReport`]，
//! 而不是遇到第一个错误就返回。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use ts_rs::TS;

use crate::errors::{DeaneryError, Result};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static EDEBO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8}$").expect("Invalid edebo id regex"));

pub const MIN_GRADE: i32 = 0;
pub const MAX_GRADE: i32 = 100;
pub const MAX_ORDER_NUMBER_LEN: usize = 20;

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// 校验结果
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn error_message(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(DeaneryError::validation(self.error_message()))
        }
    }
}

pub trait Validate {
    fn validate(&self) -> ValidationReport;

    /// 校验失败时转换为 `Validation` 错误
    fn check(&self) -> Result<()> {
        self.validate().into_result()
    }
}

pub fn validate_username(username: &str) -> std::result::Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_edebo_id(edebo_id: &str) -> std::result::Result<(), &'static str> {
    if !EDEBO_RE.is_match(edebo_id) {
        return Err("EDEBO id must be exactly 8 digits");
    }
    Ok(())
}

pub fn validate_order_number(order_number: &str) -> std::result::Result<(), &'static str> {
    let len = order_number.chars().count();
    if len == 0 || len > MAX_ORDER_NUMBER_LEN {
        return Err("Order number length must be between 1 and 20 characters");
    }
    Ok(())
}

pub fn validate_grade(grade: i32) -> std::result::Result<(), &'static str> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err("Grade must be between 0 and 100");
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> std::result::Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username() {
        assert!(validate_username("j.doe").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("dean@univ.edu").is_ok());
        assert!(validate_email("dean@univ").is_err());
    }

    #[test]
    fn test_edebo_id() {
        assert!(validate_edebo_id("12345678").is_ok());
        assert!(validate_edebo_id("1234567").is_err());
        assert!(validate_edebo_id("1234567a").is_err());
        assert!(validate_edebo_id("123456789").is_err());
    }

    #[test]
    fn test_order_number() {
        assert!(validate_order_number("ORD-1").is_ok());
        assert!(validate_order_number("").is_err());
        assert!(validate_order_number(&"x".repeat(21)).is_err());
    }

    #[test]
    fn test_grade_bounds() {
        assert!(validate_grade(0).is_ok());
        assert!(validate_grade(100).is_ok());
        assert!(validate_grade(-1).is_err());
        assert!(validate_grade(101).is_err());
    }

    #[test]
    fn test_report_collects_every_field() {
        let mut report = ValidationReport::new();
        report.add("name", "Must not be empty");
        report.add("groups", "At least one group is required");
        assert!(!report.is_valid());
        assert!(report.has_field("name"));
        assert!(report.has_field("groups"));

        let err = report.into_result().unwrap_err();
        assert_eq!(err.code(), "E004");
        assert!(err.message().contains("name"));
        assert!(err.message().contains("groups"));
    }

    #[test]
    fn test_empty_report_is_ok() {
        assert!(ValidationReport::new().into_result().is_ok());
    }
}
