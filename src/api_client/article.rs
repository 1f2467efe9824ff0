use super::ApiClient;
use crate::{
    common::{
        article::{
            ArticleListItem, ArticleView, ListArticlesParams, SaveArticleParams, SaveResponse,
            UpdateArticleParams, UpdateArticleResponse,
        },
        newtypes::ArticleId,
        Page,
    },
    error::ClientResult,
};

pub fn articles_path() -> String {
    "/api/articles".to_string()
}

pub fn article_path(id: ArticleId) -> String {
    format!("/api/articles/{id}")
}

impl ApiClient {
    pub async fn create_article(&self, params: &SaveArticleParams) -> ClientResult<SaveResponse> {
        self.post(&articles_path(), params).await
    }

    pub async fn get_article(&self, id: ArticleId) -> ClientResult<ArticleView> {
        self.get::<_, ()>(&article_path(id), None).await
    }

    pub async fn list_articles(
        &self,
        params: &ListArticlesParams,
    ) -> ClientResult<Page<ArticleListItem>> {
        self.get(&articles_path(), Some(params)).await
    }

    pub async fn update_article(
        &self,
        id: ArticleId,
        params: &UpdateArticleParams,
    ) -> ClientResult<UpdateArticleResponse> {
        self.put(&article_path(id), params).await
    }
}
