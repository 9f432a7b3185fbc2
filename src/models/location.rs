use serde::Deserialize;

use super::{Validate, Violations};
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize)]
pub struct LocationCreation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for LocationCreation {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        v.required("Location name", &self.name, 2, 100);
        v.max_length("Location description", self.description.as_deref(), 255);
        v.into_result()
    }
}

/// 空白名称保留原名，空白描述清空描述
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for LocationUpdate {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            v.length("Location name", name, 2, 100);
        }
        v.max_length("Location description", self.description.as_deref(), 255);
        v.into_result()
    }
}
