//! Persistence port for posts, users and likes.
//!
//! Handlers only ever talk to [`PostStore`]; the MySQL adapter is wired in at
//! ignition and the in-memory one backs tests.

pub mod memory;
pub mod mysql;

use crate::models::ids::{PostId, UserId};
use crate::models::post::{NewPost, Post, PostChanges};
use crate::models::user::User;
use thiserror::Error;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid database url: {0}")]
    Url(#[from] mysql_async::UrlError),

    #[error("database error: {0}")]
    Database(#[from] mysql_async::Error),

    #[error("inserted row could not be read back: {0}")]
    MissingInsert(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Which relations to attach to a post read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    Likes,
    Nothing,
}

/// Row filter for post listings. The default matches every post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub user_id: Option<UserId>,
}

impl PostFilter {
    pub fn by_user(user_id: UserId) -> Self {
        PostFilter {
            user_id: Some(user_id),
        }
    }
}

/// Filter for writes: the post `id`, but only while `owner` still owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedPost {
    pub id: PostId,
    pub owner: UserId,
}

#[rocket::async_trait]
pub trait PostStore: Send + Sync {
    /// Posts matching `filter`, likes included, ordered by id.
    async fn find_posts(&self, filter: PostFilter) -> StoreResult<Vec<Post>>;

    async fn find_post(&self, id: PostId, include: Include) -> StoreResult<Option<Post>>;

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Inserts a post owned by `owner` and returns the stored row.
    async fn create_post(&self, owner: UserId, post: NewPost) -> StoreResult<Post>;

    /// Applies `changes` to the rows matching `filter`; returns how many changed.
    ///
    /// A matching row the update leaves identical may count as zero.
    async fn update_posts(&self, filter: OwnedPost, changes: &PostChanges) -> StoreResult<u64>;

    /// Deletes the rows matching `filter` along with their likes; returns how many posts went.
    async fn delete_posts(&self, filter: OwnedPost) -> StoreResult<u64>;
}
