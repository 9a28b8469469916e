use super::{JsonBody, JsonResponse};
use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::fairings::db::DBConnection;
use crate::models::ids::{PostId, UserId};
use crate::models::message::{Message, POST_DELETED, POST_UPDATED};
use crate::models::post::{NewPost, Post, PostChanges};
use crate::service;
use rocket::serde::json::Json;
use rocket::State;

// A path segment that is not an id can't name a row, so it is reported the
// same way as an id with no row behind it.
fn post_id(raw: &str) -> Result<PostId, ApiError> {
    raw.parse().map_err(|_| ApiError::PostNotFound)
}

fn user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse().map_err(|_| ApiError::UserNotFound)
}

#[get("/posts")]
pub async fn get_posts(db_conn: &State<DBConnection>) -> JsonResponse<Vec<Post>> {
    let posts = service::list_posts(db_conn.store()).await?;
    Ok(Json(posts))
}

#[get("/posts/<id>")]
pub async fn get_post(id: &str, db_conn: &State<DBConnection>) -> JsonResponse<Post> {
    let post = service::get_post(db_conn.store(), post_id(id)?).await?;
    Ok(Json(post))
}

#[get("/users/<id>/posts")]
pub async fn get_user_posts(id: &str, db_conn: &State<DBConnection>) -> JsonResponse<Vec<Post>> {
    let posts = service::list_user_posts(db_conn.store(), user_id(id)?).await?;
    Ok(Json(posts))
}

#[post("/posts", data = "<new_post>")]
pub async fn create_post(
    user: AuthUser,
    new_post: JsonBody<NewPost>,
    db_conn: &State<DBConnection>,
) -> JsonResponse<Post> {
    let post = service::create_post(db_conn.store(), user.id(), new_post.into_inner()).await?;
    Ok(Json(post))
}

#[put("/posts/<id>", data = "<changes>")]
pub async fn update_post(
    id: &str,
    user: AuthUser,
    changes: JsonBody<PostChanges>,
    db_conn: &State<DBConnection>,
) -> JsonResponse<Message> {
    service::update_post(db_conn.store(), user.id(), post_id(id)?, &changes.0).await?;
    Ok(Json(Message::new(POST_UPDATED)))
}

#[delete("/posts/<id>")]
pub async fn delete_post(
    id: &str,
    user: AuthUser,
    db_conn: &State<DBConnection>,
) -> JsonResponse<Message> {
    service::delete_post(db_conn.store(), user.id(), post_id(id)?).await?;
    Ok(Json(Message::new(POST_DELETED)))
}
