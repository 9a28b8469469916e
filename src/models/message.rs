use serde::Serialize;

pub const POST_NOT_FOUND: &str = "Post not found.";
pub const USER_NOT_FOUND: &str = "User not found.";
pub const POST_UPDATED: &str = "Successfuly updated the post.";
pub const POST_DELETED: &str = "Successfuly deleted the post.";
pub const UPDATE_DENIED: &str = "Access denied. Only author of this post can update it.";
pub const DELETE_DENIED: &str = "Access denied. Only author of this post can delete it.";
pub const INTERNAL_ERROR: &str = "Something happened wrong. Try again.";
pub const UNAUTHORIZED: &str = "Unauthorized.";
pub const INVALID_BODY: &str = "Invalid request body.";
pub const NOT_FOUND: &str = "Not found.";

/// `{"message": "..."}` body used for every non-record response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Self {
        Message { message }
    }
}
