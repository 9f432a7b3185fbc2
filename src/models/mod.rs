// 请求数据结构及其校验规则，控制台和 HTTP 接口共用

pub mod event;
pub mod journey;
pub mod location;
pub mod photo;
pub mod tag;
pub mod user;

pub use event::{EventCreation, EventUpdate};
pub use journey::{JourneyCreation, JourneyUpdate};
pub use location::{LocationCreation, LocationUpdate};
pub use photo::{PhotoDescriptionUpdate, PhotoUpload};
pub use tag::TagCreation;
pub use user::{UserLogin, UserRegistration};

use crate::error::{AppError, AppResult};

pub trait Validate {
    /// 返回所有违反的规则，消息以 `"; "` 连接
    fn validate(&self) -> AppResult<()>;
}

/// 校验错误收集器
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// 必填字段：不能为空白，长度在 `min..=max` 之间
    pub fn required(&mut self, label: &str, value: &str, min: usize, max: usize) {
        if value.trim().is_empty() {
            self.push(format!("{label} must not be blank"));
            return;
        }
        self.length(label, value, min, max);
    }

    pub fn length(&mut self, label: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min || len > max {
            if min == 0 {
                self.push(format!("{label} must be at most {max} characters"));
            } else {
                self.push(format!("{label} must be between {min} and {max} characters"));
            }
        }
    }

    /// 可选字段只检查上限
    pub fn max_length(&mut self, label: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.length(label, value, 0, max);
        }
    }

    pub fn into_result(self) -> AppResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0))
        }
    }
}

/// 去掉首尾空白，空字符串视为 None
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_field_reports_single_message() {
        let mut v = Violations::new();
        v.required("Tag name", "   ", 2, 50);
        let err = v.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Tag name must not be blank");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut v = Violations::new();
        v.required("Location name", "Київ", 2, 4);
        assert!(v.into_result().is_ok());
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  Lviv ")), Some("Lviv"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
