use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Deserialize)]
pub struct TagQuery {
    pub tag: String,
}

#[derive(Debug, Deserialize)]
pub struct AddTagRequest {
    pub name: String,
}

/// 用户名或邮箱
#[derive(Debug, Deserialize)]
pub struct ParticipantRequest {
    pub identifier: String,
}

#[derive(Debug, Deserialize)]
pub struct SetLocationRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
