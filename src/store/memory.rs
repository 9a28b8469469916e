use super::{Include, OwnedPost, PostFilter, PostStore, StoreResult};
use crate::models::ids::{PostId, UserId};
use crate::models::like::Like;
use crate::models::our_date_time::OurDateTime;
use crate::models::post::{NewPost, Post, PostChanges};
use crate::models::user::User;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    posts: BTreeMap<PostId, Post>,
    likes: Vec<Like>,
    last_post_id: u64,
    last_like_id: u64,
}

impl Tables {
    fn with_likes(&self, post: &Post) -> Post {
        let likes = self
            .likes
            .iter()
            .filter(|like| like.post_id == post.id)
            .cloned()
            .collect();
        Post {
            likes: Some(likes),
            ..post.clone()
        }
    }

    fn owned_mut(&mut self, filter: OwnedPost) -> Option<&mut Post> {
        self.posts
            .get_mut(&filter.id)
            .filter(|post| post.is_owned_by(filter.owner))
    }
}

/// `PostStore` kept in process memory. Ids are assigned from 1 like an
/// auto-increment column.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub async fn add_user(&self, id: UserId) -> User {
        let now = OurDateTime::now();
        let user = User {
            id,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.users.insert(id, user.clone());
        user
    }

    pub async fn add_like(&self, user_id: UserId, post_id: PostId) -> Like {
        let mut tables = self.tables.write().await;
        tables.last_like_id += 1;
        let now = OurDateTime::now();
        let like = Like {
            id: tables.last_like_id,
            user_id,
            post_id,
            created_at: now,
            updated_at: now,
        };
        tables.likes.push(like.clone());
        like
    }

    pub async fn like_count(&self) -> usize {
        self.tables.read().await.likes.len()
    }
}

#[rocket::async_trait]
impl PostStore for MemoryStore {
    async fn find_posts(&self, filter: PostFilter) -> StoreResult<Vec<Post>> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|post| filter.user_id.map_or(true, |user_id| post.is_owned_by(user_id)))
            .map(|post| tables.with_likes(post))
            .collect())
    }

    async fn find_post(&self, id: PostId, include: Include) -> StoreResult<Option<Post>> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).map(|post| match include {
            Include::Likes => tables.with_likes(post),
            Include::Nothing => post.clone(),
        }))
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn create_post(&self, owner: UserId, post: NewPost) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;
        tables.last_post_id += 1;
        let now = OurDateTime::now();
        let post = Post {
            id: PostId(tables.last_post_id),
            title: post.title().to_string(),
            body: post.body().to_string(),
            user_id: owner,
            created_at: now,
            updated_at: now,
            likes: None,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_posts(&self, filter: OwnedPost, changes: &PostChanges) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        match tables.owned_mut(filter) {
            Some(post) => {
                changes.apply_to(post, OurDateTime::now());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_posts(&self, filter: OwnedPost) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        if tables.owned_mut(filter).is_none() {
            return Ok(0);
        }
        tables.posts.remove(&filter.id);
        tables.likes.retain(|like| like.post_id != filter.id);
        Ok(1)
    }
}
