//! What each post operation means, independent of HTTP.
//!
//! Updates and deletes are a single write filtered on both the post id and the
//! caller as owner; that filter is what enforces ownership. Only when the write
//! matches nothing is the post read back, to tell the caller whether it was
//! missing (404) or someone else's (403). That read can race with other writers
//! and be stale; apart from an owner's no-op update it never grants anything.

use crate::errors::{Action, ApiError};
use crate::models::ids::{PostId, UserId};
use crate::models::post::{NewPost, Post, PostChanges};
use crate::store::{Include, OwnedPost, PostFilter, PostStore};
use tracing::{info, warn};

pub type ApiResult<T> = Result<T, ApiError>;

pub async fn list_posts(store: &dyn PostStore) -> ApiResult<Vec<Post>> {
    Ok(store.find_posts(PostFilter::default()).await?)
}

pub async fn get_post(store: &dyn PostStore, id: PostId) -> ApiResult<Post> {
    store
        .find_post(id, Include::Likes)
        .await?
        .ok_or(ApiError::PostNotFound)
}

/// Posts owned by `user_id`. A known user without posts gets an empty list.
pub async fn list_user_posts(store: &dyn PostStore, user_id: UserId) -> ApiResult<Vec<Post>> {
    if store.find_user(user_id).await?.is_none() {
        return Err(ApiError::UserNotFound);
    }
    Ok(store.find_posts(PostFilter::by_user(user_id)).await?)
}

pub async fn create_post(
    store: &dyn PostStore,
    caller: UserId,
    new_post: NewPost,
) -> ApiResult<Post> {
    let post = store.create_post(caller, new_post).await?;
    info!(post_id = %post.id, user_id = %caller, "post created");
    Ok(post)
}

pub async fn update_post(
    store: &dyn PostStore,
    caller: UserId,
    id: PostId,
    changes: &PostChanges,
) -> ApiResult<()> {
    let filter = OwnedPost { id, owner: caller };
    if store.update_posts(filter, changes).await? > 0 {
        info!(post_id = %id, user_id = %caller, "post updated");
        return Ok(());
    }
    explain_rejection(store, filter, Action::Update).await
}

pub async fn delete_post(store: &dyn PostStore, caller: UserId, id: PostId) -> ApiResult<()> {
    let filter = OwnedPost { id, owner: caller };
    if store.delete_posts(filter).await? > 0 {
        info!(post_id = %id, user_id = %caller, "post deleted");
        return Ok(());
    }
    explain_rejection(store, filter, Action::Delete).await
}

/// Works out why an owner-scoped write reported no row.
///
/// An update of a post the caller owns is a success even at zero rows.
async fn explain_rejection(
    store: &dyn PostStore,
    filter: OwnedPost,
    action: Action,
) -> ApiResult<()> {
    let error = match store.find_post(filter.id, Include::Nothing).await {
        Ok(None) => ApiError::PostNotFound,
        Ok(Some(post)) if !post.is_owned_by(filter.owner) => {
            warn!(
                post_id = %filter.id,
                user_id = %filter.owner,
                owner_id = %post.user_id,
                ?action,
                "non-owner tried to modify post"
            );
            ApiError::Forbidden(action)
        }
        // MySQL reports changed rows, so rewriting a post with its current
        // values looks like a miss
        Ok(Some(_)) if action == Action::Update => return Ok(()),
        Ok(Some(_)) => {
            // the row moved under us between the write and this read
            warn!(post_id = %filter.id, ?action, "owned post matched no row on write");
            ApiError::PostNotFound
        }
        Err(e) => ApiError::Internal(e),
    };
    Err(error)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::user::User;
    use crate::store::{MemoryStore, StoreResult};

    const ALICE: UserId = UserId(1);
    const BOB: UserId = UserId(2);

    fn draft(title: &str, body: &str) -> NewPost {
        NewPost {
            title: Some(title.to_string()),
            body: Some(body.to_string()),
        }
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_user(ALICE).await;
        store.add_user(BOB).await;
        store
    }

    #[rocket::async_test]
    async fn get_post_includes_likes() {
        let store = seeded().await;
        let post = create_post(&store, ALICE, draft("hi", "there")).await.unwrap();
        store.add_like(BOB, post.id).await;

        let fetched = get_post(&store, post.id).await.unwrap();
        assert_eq!(fetched.title, "hi");
        let likes = fetched.likes.unwrap();
        assert_eq!(likes.len(), 1);
        assert_eq!(likes[0].user_id, BOB);
    }

    #[rocket::async_test]
    async fn missing_post_is_not_found() {
        let store = seeded().await;
        assert!(matches!(
            get_post(&store, PostId(999)).await,
            Err(ApiError::PostNotFound)
        ));
    }

    #[rocket::async_test]
    async fn user_posts() {
        let store = seeded().await;
        assert!(list_user_posts(&store, BOB).await.unwrap().is_empty());
        assert!(matches!(
            list_user_posts(&store, UserId(42)).await,
            Err(ApiError::UserNotFound)
        ));

        create_post(&store, ALICE, draft("a", "1")).await.unwrap();
        create_post(&store, BOB, draft("b", "2")).await.unwrap();
        let alices = list_user_posts(&store, ALICE).await.unwrap();
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].user_id, ALICE);
        assert_eq!(list_posts(&store).await.unwrap().len(), 2);
    }

    #[rocket::async_test]
    async fn only_owner_may_update() {
        let store = seeded().await;
        let post = create_post(&store, ALICE, draft("old", "body")).await.unwrap();
        let changes = PostChanges {
            title: Some("new".into()),
            body: None,
        };

        assert!(matches!(
            update_post(&store, BOB, post.id, &changes).await,
            Err(ApiError::Forbidden(Action::Update))
        ));
        assert_eq!(get_post(&store, post.id).await.unwrap().title, "old");

        update_post(&store, ALICE, post.id, &changes).await.unwrap();
        let updated = get_post(&store, post.id).await.unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!(updated.body, "body");
    }

    #[rocket::async_test]
    async fn only_owner_may_delete() {
        let store = seeded().await;
        let post = create_post(&store, ALICE, draft("t", "b")).await.unwrap();

        assert!(matches!(
            delete_post(&store, BOB, post.id).await,
            Err(ApiError::Forbidden(Action::Delete))
        ));
        assert!(get_post(&store, post.id).await.is_ok());

        delete_post(&store, ALICE, post.id).await.unwrap();
        assert!(matches!(
            get_post(&store, post.id).await,
            Err(ApiError::PostNotFound)
        ));
    }

    #[rocket::async_test]
    async fn missing_post_wins_over_ownership() {
        let store = seeded().await;
        assert!(matches!(
            update_post(&store, BOB, PostId(999), &PostChanges::default()).await,
            Err(ApiError::PostNotFound)
        ));
        assert!(matches!(
            delete_post(&store, BOB, PostId(999)).await,
            Err(ApiError::PostNotFound)
        ));
    }

    /// Reports changed rows the way MySQL does: zero when nothing differs.
    struct ChangedRows(MemoryStore);

    #[rocket::async_trait]
    impl PostStore for ChangedRows {
        async fn find_posts(&self, filter: PostFilter) -> StoreResult<Vec<Post>> {
            self.0.find_posts(filter).await
        }

        async fn find_post(&self, id: PostId, include: Include) -> StoreResult<Option<Post>> {
            self.0.find_post(id, include).await
        }

        async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
            self.0.find_user(id).await
        }

        async fn create_post(&self, owner: UserId, post: NewPost) -> StoreResult<Post> {
            self.0.create_post(owner, post).await
        }

        async fn update_posts(&self, filter: OwnedPost, changes: &PostChanges) -> StoreResult<u64> {
            let before = self.0.find_post(filter.id, Include::Nothing).await?;
            let unchanged = before.map_or(false, |post| {
                changes.title.as_ref().map_or(true, |title| *title == post.title)
                    && changes.body.as_ref().map_or(true, |body| *body == post.body)
            });
            if unchanged {
                return Ok(0);
            }
            self.0.update_posts(filter, changes).await
        }

        async fn delete_posts(&self, filter: OwnedPost) -> StoreResult<u64> {
            self.0.delete_posts(filter).await
        }
    }

    #[rocket::async_test]
    async fn owner_rewriting_same_values_succeeds() {
        let store = ChangedRows(seeded().await);
        let post = create_post(&store, ALICE, draft("same", "text")).await.unwrap();
        let changes = PostChanges {
            title: Some("same".into()),
            body: Some("text".into()),
        };

        assert!(update_post(&store, ALICE, post.id, &changes).await.is_ok());
        assert!(update_post(&store, ALICE, post.id, &PostChanges::default()).await.is_ok());
        assert!(matches!(
            update_post(&store, BOB, post.id, &changes).await,
            Err(ApiError::Forbidden(Action::Update))
        ));
        assert!(matches!(
            update_post(&store, ALICE, PostId(999), &changes).await,
            Err(ApiError::PostNotFound)
        ));
    }

    #[rocket::async_test]
    async fn create_takes_caller_as_owner() {
        let store = seeded().await;
        let post = create_post(&store, BOB, NewPost::default()).await.unwrap();
        assert_eq!(post.user_id, BOB);
        assert_eq!(post.title, "");
        assert!(post.likes.is_none());
    }
}
