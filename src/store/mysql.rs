use super::{Include, OwnedPost, PostFilter, PostStore, StoreError, StoreResult};
use crate::models::ids::{PostId, UserId};
use crate::models::like::Like;
use crate::models::our_date_time::OurDateTime;
use crate::models::post::{NewPost, Post, PostChanges};
use crate::models::user::User;
use chrono::NaiveDateTime;
use mysql_async::{params, prelude::*, Conn, Opts, Pool, TxOpts};
use std::collections::HashMap;
use tracing::debug;

const POST_COLUMNS: &str = "id, title, body, UserId, createdAt, updatedAt";

// id, title, body, UserId, createdAt, updatedAt
type PostRow = (u64, String, String, u64, NaiveDateTime, NaiveDateTime);
// id, UserId, PostId, createdAt, updatedAt
type LikeRow = (u64, u64, u64, NaiveDateTime, NaiveDateTime);

/// `PostStore` over a MySQL connection pool.
pub struct MySqlStore {
    pool: Pool,
}

impl MySqlStore {
    pub fn new(pool: Pool) -> Self {
        MySqlStore { pool }
    }

    /// Builds a pool from a `mysql://` url.
    pub fn from_url(url: &str) -> StoreResult<Self> {
        let opts = Opts::from_url(url)?;
        Ok(MySqlStore::new(Pool::new(opts)))
    }
}

fn post_from_row((id, title, body, user_id, created, updated): PostRow) -> Post {
    Post {
        id: PostId(id),
        title,
        body,
        user_id: UserId(user_id),
        created_at: OurDateTime::from(created),
        updated_at: OurDateTime::from(updated),
        likes: None,
    }
}

fn like_from_row((id, user_id, post_id, created, updated): LikeRow) -> Like {
    Like {
        id,
        user_id: UserId(user_id),
        post_id: PostId(post_id),
        created_at: OurDateTime::from(created),
        updated_at: OurDateTime::from(updated),
    }
}

async fn select_post(conn: &mut Conn, id: PostId) -> StoreResult<Option<Post>> {
    let row: Option<PostRow> = conn
        .exec_first(
            format!("SELECT {POST_COLUMNS} FROM Posts WHERE id = :id LIMIT 1"),
            params! { "id" => id.0 },
        )
        .await?;
    Ok(row.map(post_from_row))
}

/// Loads the likes of every post in one query and attaches them.
async fn attach_likes(conn: &mut Conn, posts: &mut [Post]) -> StoreResult<()> {
    if posts.is_empty() {
        return Ok(());
    }

    let ids: Vec<u64> = posts.iter().map(|post| post.id.0).collect();
    let query_str = format!(
        "SELECT id, UserId, PostId, createdAt, updatedAt FROM Likes WHERE PostId IN ({}) ORDER BY id",
        vec!["?"; ids.len()].join(", ")
    );
    let rows: Vec<LikeRow> = conn.exec(query_str, ids).await?;

    group_likes(posts, rows.into_iter().map(like_from_row));
    Ok(())
}

/// Hands each post the likes pointing at it. Posts nobody liked get an empty list.
fn group_likes(posts: &mut [Post], likes: impl IntoIterator<Item = Like>) {
    let mut by_post: HashMap<PostId, Vec<Like>> = HashMap::new();
    for like in likes {
        by_post.entry(like.post_id).or_default().push(like);
    }
    for post in posts.iter_mut() {
        post.likes = Some(by_post.remove(&post.id).unwrap_or_default());
    }
}

#[rocket::async_trait]
impl PostStore for MySqlStore {
    async fn find_posts(&self, filter: PostFilter) -> StoreResult<Vec<Post>> {
        let mut conn = self.pool.get_conn().await?;

        let rows: Vec<PostRow> = match filter.user_id {
            Some(user_id) => {
                conn.exec(
                    format!("SELECT {POST_COLUMNS} FROM Posts WHERE UserId = :user_id ORDER BY id"),
                    params! { "user_id" => user_id.0 },
                )
                .await?
            }
            None => {
                conn.query(format!("SELECT {POST_COLUMNS} FROM Posts ORDER BY id"))
                    .await?
            }
        };

        let mut posts: Vec<Post> = rows.into_iter().map(post_from_row).collect();
        attach_likes(&mut conn, &mut posts).await?;
        Ok(posts)
    }

    async fn find_post(&self, id: PostId, include: Include) -> StoreResult<Option<Post>> {
        let mut conn = self.pool.get_conn().await?;
        let mut post = match select_post(&mut conn, id).await? {
            Some(post) => post,
            None => return Ok(None),
        };
        if include == Include::Likes {
            attach_likes(&mut conn, std::slice::from_mut(&mut post)).await?;
        }
        Ok(Some(post))
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let mut conn = self.pool.get_conn().await?;
        let row: Option<(u64, NaiveDateTime, NaiveDateTime)> = conn
            .exec_first(
                "SELECT id, createdAt, updatedAt FROM Users WHERE id = :id LIMIT 1",
                params! { "id" => id.0 },
            )
            .await?;

        Ok(row.map(|(id, created, updated)| User {
            id: UserId(id),
            created_at: OurDateTime::from(created),
            updated_at: OurDateTime::from(updated),
        }))
    }

    async fn create_post(&self, owner: UserId, post: NewPost) -> StoreResult<Post> {
        let mut conn = self.pool.get_conn().await?;
        let now = OurDateTime::now().naive_utc();

        // MySQL has no "RETURNING *": insert, then re-select by the generated id
        conn.exec_drop(
            r"INSERT INTO Posts (title, body, UserId, createdAt, updatedAt)
              VALUES (:title, :body, :user_id, :created_at, :updated_at)",
            params! {
                "title" => post.title(),
                "body" => post.body(),
                "user_id" => owner.0,
                "created_at" => now,
                "updated_at" => now,
            },
        )
        .await?;

        let id = conn
            .last_insert_id()
            .map(PostId)
            .ok_or_else(|| StoreError::MissingInsert("no insert id reported".to_string()))?;
        debug!(post_id = %id, user_id = %owner, "inserted post");

        select_post(&mut conn, id)
            .await?
            .ok_or_else(|| StoreError::MissingInsert(format!("post {id}")))
    }

    /// Returns changed rows: MySQL does not count a row whose values the update
    /// left as they were.
    async fn update_posts(&self, filter: OwnedPost, changes: &PostChanges) -> StoreResult<u64> {
        let mut conn = self.pool.get_conn().await?;

        conn.exec_drop(
            r"UPDATE Posts
              SET title = COALESCE(:title, title),
                  body = COALESCE(:body, body),
                  updatedAt = :updated_at
              WHERE id = :id AND UserId = :user_id",
            params! {
                "title" => changes.title.as_deref(),
                "body" => changes.body.as_deref(),
                "updated_at" => OurDateTime::now().naive_utc(),
                "id" => filter.id.0,
                "user_id" => filter.owner.0,
            },
        )
        .await?;

        Ok(conn.affected_rows())
    }

    async fn delete_posts(&self, filter: OwnedPost) -> StoreResult<u64> {
        let mut conn = self.pool.get_conn().await?;
        let mut tx = conn.start_transaction(TxOpts::default()).await?;

        tx.exec_drop(
            r"DELETE Likes FROM Likes
              JOIN Posts ON Posts.id = Likes.PostId
              WHERE Posts.id = :id AND Posts.UserId = :user_id",
            params! { "id" => filter.id.0, "user_id" => filter.owner.0 },
        )
        .await?;
        tx.exec_drop(
            "DELETE FROM Posts WHERE id = :id AND UserId = :user_id",
            params! { "id" => filter.id.0, "user_id" => filter.owner.0 },
        )
        .await?;
        let deleted = tx.affected_rows();

        tx.commit().await?;
        Ok(deleted)
    }
}
