use serde::Deserialize;

use super::{Validate, Violations};
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize)]
pub struct TagCreation {
    pub name: String,
}

impl Validate for TagCreation {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        v.required("Tag name", &self.name, 2, 50);
        v.into_result()
    }
}
