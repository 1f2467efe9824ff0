use super::comment::CommentView;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SaveArticleParams {
    pub title: String,
    pub content: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct UpdateArticleParams {
    pub title: String,
    pub content: String,
}

/// Returned with status 201 when an article or comment was created. The id belongs to
/// whatever was created, so callers wrap it in `ArticleId` or `CommentId`.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaveResponse {
    pub id: i64,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub title: String,
    pub content: String,
    pub author: String,
    pub view: i64,
    #[serde(default)]
    pub comments: Vec<CommentView>,
    pub created_at: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListItem {
    pub title: String,
    pub content: String,
    pub author: String,
    pub view: i64,
    pub created_at: NaiveDateTime,
    pub num_comments: i64,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleResponse {
    pub title: String,
    pub content: String,
    pub modified_at: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleSearchType {
    Title,
    Content,
    #[default]
    TitleAndContent,
    Author,
}

/// Query for `GET /api/articles`. Pages are numbered starting at 1.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, SmartDefault)]
pub struct ListArticlesParams {
    #[default(1)]
    pub page: u32,
    #[default(10)]
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub search_type: Option<ArticleSearchType>,
}
