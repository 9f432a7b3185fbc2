use serde::Deserialize;

use super::{Validate, Violations};
use crate::error::AppResult;
use crate::utils::is_valid_email_format;

#[derive(Debug, Clone, Deserialize)]
pub struct UserRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Validate for UserRegistration {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        v.required("Username", &self.username, 3, 50);
        if self.email.trim().is_empty() {
            v.push("Email must not be blank");
        } else {
            if !is_valid_email_format(&self.email) {
                v.push("Email format is invalid");
            }
            v.length("Email", &self.email, 0, 100);
        }
        v.required("Password", &self.password, 6, 255);
        v.into_result()
    }
}

/// 登录标识可以是用户名或邮箱
#[derive(Debug, Clone, Deserialize)]
pub struct UserLogin {
    pub identifier: String,
    pub password: String,
}

impl Validate for UserLogin {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        v.required("Username or email", &self.identifier, 3, 100);
        v.required("Password", &self.password, 6, 255);
        v.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn registration_collects_every_violation() {
        let dto = UserRegistration {
            username: "ab".into(),
            email: "not-an-email".into(),
            password: "123".into(),
        };
        match dto.validate() {
            Err(AppError::Validation(messages)) => assert_eq!(messages.len(), 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn valid_login_passes() {
        let dto = UserLogin {
            identifier: "anna@example.com".into(),
            password: "secret1".into(),
        };
        assert!(dto.validate().is_ok());
    }
}
