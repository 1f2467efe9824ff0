use super::newtypes::CommentId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SaveCommentParams {
    pub content: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct UpdateCommentParams {
    pub content: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CommentView {
    pub id: CommentId,
    pub content: String,
    pub author: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentResponse {
    pub content: String,
    pub modified_at: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, SmartDefault)]
pub struct ListCommentsParams {
    #[default(1)]
    pub page: u32,
    #[default(10)]
    pub size: u32,
}
