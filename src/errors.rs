use crate::models::message::{
    Message, DELETE_DENIED, INTERNAL_ERROR, POST_NOT_FOUND, UPDATE_DENIED, USER_NOT_FOUND,
};
use crate::store::StoreError;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use thiserror::Error;
use tracing::error;

/// Mutation an ownership check guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Update,
    Delete,
}

impl Action {
    pub fn denial_message(self) -> &'static str {
        match self {
            Action::Update => UPDATE_DENIED,
            Action::Delete => DELETE_DENIED,
        }
    }
}

/// Every way a post handler can fail, and the status each one answers with:
///
/// | variant        | status |
/// |----------------|--------|
/// | `PostNotFound` | 404    |
/// | `UserNotFound` | 404    |
/// | `Forbidden`    | 403    |
/// | `Internal`     | 500    |
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Post not found.")]
    PostNotFound,

    #[error("User not found.")]
    UserNotFound,

    #[error("{}", .0.denial_message())]
    Forbidden(Action),

    #[error("persistence failure: {0}")]
    Internal(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::PostNotFound | ApiError::UserNotFound => Status::NotFound,
            ApiError::Forbidden(_) => Status::Forbidden,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }

    /// The text sent to the client. Internal causes never leave the process.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::PostNotFound => POST_NOT_FOUND,
            ApiError::UserNotFound => USER_NOT_FOUND,
            ApiError::Forbidden(action) => action.denial_message(),
            ApiError::Internal(_) => INTERNAL_ERROR,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        if let ApiError::Internal(cause) = &self {
            error!(method = %req.method(), uri = %req.uri(), %cause, "request failed");
        }
        (self.status(), Json(Message::new(self.message()))).respond_to(req)
    }
}
