use super::ApiClient;
use crate::{
    common::{
        article::SaveResponse,
        comment::{
            CommentView, ListCommentsParams, SaveCommentParams, UpdateCommentParams,
            UpdateCommentResponse,
        },
        newtypes::{ArticleId, CommentId},
        Page,
    },
    error::ClientResult,
};

pub fn comments_path(article_id: ArticleId) -> String {
    format!("/api/articles/{article_id}/comments")
}

pub fn comment_path(article_id: ArticleId, comment_id: CommentId) -> String {
    format!("/api/articles/{article_id}/comments/{comment_id}")
}

impl ApiClient {
    pub async fn create_comment(
        &self,
        article_id: ArticleId,
        params: &SaveCommentParams,
    ) -> ClientResult<SaveResponse> {
        self.post(&comments_path(article_id), params).await
    }

    pub async fn get_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> ClientResult<CommentView> {
        self.get::<_, ()>(&comment_path(article_id, comment_id), None)
            .await
    }

    pub async fn list_comments(
        &self,
        article_id: ArticleId,
        params: &ListCommentsParams,
    ) -> ClientResult<Page<CommentView>> {
        self.get(&comments_path(article_id), Some(params)).await
    }

    pub async fn update_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
        params: &UpdateCommentParams,
    ) -> ClientResult<UpdateCommentResponse> {
        self.put(&comment_path(article_id, comment_id), params)
            .await
    }
}
