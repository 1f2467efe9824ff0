//! User actions on the board. Each action knows which request to send and where the user
//! should be sent afterwards.

use crate::{
    api_client::{
        article::{article_path, articles_path},
        comment::{comment_path, comments_path},
        ApiClient, DispatchOutcome, FailureReason, Request,
    },
    common::{
        article::{SaveArticleParams, UpdateArticleParams},
        comment::{SaveCommentParams, UpdateCommentParams},
        newtypes::{ArticleId, CommentId},
    },
    error::ClientResult,
};
use http::Method;
use log::info;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    CreateArticle {
        title: String,
        content: String,
    },
    UpdateArticle {
        id: ArticleId,
        title: String,
        content: String,
    },
    DeleteArticle {
        id: ArticleId,
    },
    CreateComment {
        article_id: ArticleId,
        content: String,
    },
    UpdateComment {
        article_id: ArticleId,
        comment_id: CommentId,
        content: String,
    },
    DeleteComment {
        article_id: ArticleId,
        comment_id: CommentId,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Create,
    Update,
    Delete,
}

/// What to show the user once an action finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub success: bool,
    pub message: &'static str,
    pub redirect: String,
}

impl Notice {
    /// Process exit status for command line use, 0 on success and 1 on failure.
    pub fn exit_status(&self) -> u8 {
        if self.success {
            0
        } else {
            1
        }
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::CreateArticle { .. } | Action::CreateComment { .. } => ActionKind::Create,
            Action::UpdateArticle { .. } | Action::UpdateComment { .. } => ActionKind::Update,
            Action::DeleteArticle { .. } | Action::DeleteComment { .. } => ActionKind::Delete,
        }
    }

    pub fn request(&self) -> ClientResult<Request> {
        let request = match self {
            Action::CreateArticle { title, content } => Request {
                method: Method::POST,
                path: articles_path(),
                body: Some(json(&SaveArticleParams {
                    title: title.clone(),
                    content: content.clone(),
                })?),
            },
            Action::UpdateArticle { id, title, content } => Request {
                method: Method::PUT,
                path: article_path(*id),
                body: Some(json(&UpdateArticleParams {
                    title: title.clone(),
                    content: content.clone(),
                })?),
            },
            Action::DeleteArticle { id } => Request {
                method: Method::DELETE,
                path: article_path(*id),
                body: None,
            },
            Action::CreateComment {
                article_id,
                content,
            } => Request {
                method: Method::POST,
                path: comments_path(*article_id),
                body: Some(json(&SaveCommentParams {
                    content: content.clone(),
                })?),
            },
            Action::UpdateComment {
                article_id,
                comment_id,
                content,
            } => Request {
                method: Method::PUT,
                path: comment_path(*article_id, *comment_id),
                body: Some(json(&UpdateCommentParams {
                    content: content.clone(),
                })?),
            },
            Action::DeleteComment {
                article_id,
                comment_id,
            } => Request {
                method: Method::DELETE,
                path: comment_path(*article_id, *comment_id),
                body: None,
            },
        };
        Ok(request)
    }

    /// Page to show after the action, regardless of outcome. Article level actions go back
    /// to the board (or the article which was edited), comment actions to their article.
    pub fn redirect(&self, board_path: &str) -> String {
        let board_path = board_path.trim_end_matches('/');
        match self {
            Action::CreateArticle { .. } | Action::DeleteArticle { .. } => board_path.to_string(),
            Action::UpdateArticle { id, .. } => format!("{board_path}/{id}"),
            Action::CreateComment { article_id, .. }
            | Action::UpdateComment { article_id, .. }
            | Action::DeleteComment { article_id, .. } => format!("{board_path}/{article_id}"),
        }
    }

    pub fn notice(&self, outcome: &DispatchOutcome, board_path: &str) -> Notice {
        let success = outcome.is_success();
        let message = match (self.kind(), success) {
            (ActionKind::Create, true) => "Registration completed.",
            (ActionKind::Create, false) => "Registration failed.",
            (ActionKind::Update, true) => "Update completed.",
            (ActionKind::Update, false) => "Update failed.",
            (ActionKind::Delete, true) => "Deletion completed.",
            (ActionKind::Delete, false) => "Deletion failed.",
        };
        Notice {
            success,
            message,
            redirect: self.redirect(board_path),
        }
    }
}

fn json<T: Serialize>(params: &T) -> ClientResult<String> {
    Ok(serde_json::to_string(params)?)
}

impl ApiClient {
    /// Runs a single action from start to end: build the request, dispatch it once and
    /// turn the outcome into a notice for the user.
    pub async fn perform(&self, action: &Action, board_path: &str) -> Notice {
        let outcome = match action.request() {
            Ok(request) => self.dispatch_request(&request).await,
            Err(e) => DispatchOutcome::Failure(FailureReason::Transport(e.message())),
        };
        if let DispatchOutcome::Failure(reason) = &outcome {
            info!("{:?} failed: {reason}", action.kind());
        }
        action.notice(&outcome, board_path)
    }
}
