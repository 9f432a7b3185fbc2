use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use super::{Validate, Violations};
use crate::error::AppResult;

/// `journey_id` 为空时创建独立事件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventCreation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub event_time: Option<NaiveTime>,
    #[serde(default)]
    pub journey_id: Option<i64>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location_description: Option<String>,
}

impl Validate for EventCreation {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        v.required("Event name", &self.name, 3, 100);
        v.max_length("Event description", self.description.as_deref(), 500);
        v.max_length("Event location name", self.location_name.as_deref(), 100);
        v.max_length(
            "Event location description",
            self.location_description.as_deref(),
            255,
        );
        v.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub event_time: Option<NaiveTime>,
    /// 将事件挂到另一个旅程下
    #[serde(default)]
    pub journey_id: Option<i64>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location_description: Option<String>,
}

impl Validate for EventUpdate {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.required("Event name", name, 3, 100);
        }
        v.max_length("Event description", self.description.as_deref(), 500);
        v.max_length("Event location name", self.location_name.as_deref(), 100);
        v.max_length(
            "Event location description",
            self.location_description.as_deref(),
            255,
        );
        v.into_result()
    }
}
