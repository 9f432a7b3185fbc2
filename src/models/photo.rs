use serde::Deserialize;

use super::{Validate, Violations};
use crate::error::AppResult;

/// 从本地路径上传照片
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUpload {
    pub journey_id: Option<i64>,
    pub source_path: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for PhotoUpload {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        if self.journey_id.is_none() {
            v.push("Journey ID must not be empty");
        }
        if self.source_path.trim().is_empty() {
            v.push("Photo file path must not be blank");
        }
        v.max_length("Photo description", self.description.as_deref(), 500);
        v.into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoDescriptionUpdate {
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for PhotoDescriptionUpdate {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        v.max_length("Photo description", self.description.as_deref(), 500);
        v.into_result()
    }
}
