use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Deserialize;

use super::{Validate, Violations};
use crate::error::AppResult;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JourneyCreation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub tag_names: BTreeSet<String>,
    /// 参与者用户名，必须是已注册用户
    #[serde(default)]
    pub participant_usernames: BTreeSet<String>,
    #[serde(default)]
    pub origin_location_name: Option<String>,
    #[serde(default)]
    pub origin_location_description: Option<String>,
    #[serde(default)]
    pub destination_location_name: Option<String>,
    #[serde(default)]
    pub destination_location_description: Option<String>,
}

impl Validate for JourneyCreation {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        v.required("Journey name", &self.name, 3, 100);
        v.max_length("Journey description", self.description.as_deref(), 500);
        check_locations(
            &mut v,
            self.origin_location_name.as_deref(),
            self.origin_location_description.as_deref(),
            self.destination_location_name.as_deref(),
            self.destination_location_description.as_deref(),
        );
        check_dates(&mut v, self.start_date, self.end_date);
        v.into_result()
    }
}

/// 部分更新
///
/// `None` 表示不修改。地点名称为 `Some("")` 时清除该地点，
/// `tag_names` 和 `participant_usernames` 为 `Some` 时整体替换对应集合。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JourneyUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub tag_names: Option<BTreeSet<String>>,
    #[serde(default)]
    pub participant_usernames: Option<BTreeSet<String>>,
    #[serde(default)]
    pub origin_location_name: Option<String>,
    #[serde(default)]
    pub origin_location_description: Option<String>,
    #[serde(default)]
    pub destination_location_name: Option<String>,
    #[serde(default)]
    pub destination_location_description: Option<String>,
}

impl Validate for JourneyUpdate {
    fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.required("Journey name", name, 3, 100);
        }
        v.max_length("Journey description", self.description.as_deref(), 500);
        check_locations(
            &mut v,
            self.origin_location_name.as_deref(),
            self.origin_location_description.as_deref(),
            self.destination_location_name.as_deref(),
            self.destination_location_description.as_deref(),
        );
        check_dates(&mut v, self.start_date, self.end_date);
        v.into_result()
    }
}

fn check_locations(
    v: &mut Violations,
    origin_name: Option<&str>,
    origin_description: Option<&str>,
    destination_name: Option<&str>,
    destination_description: Option<&str>,
) {
    v.max_length("Origin location name", origin_name, 100);
    v.max_length("Origin location description", origin_description, 255);
    v.max_length("Destination location name", destination_name, 100);
    v.max_length("Destination location description", destination_description, 255);
}

pub(crate) fn check_dates(v: &mut Violations, start: Option<NaiveDate>, end: Option<NaiveDate>) {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            v.push("End date must not be before start date");
        }
    }
}
