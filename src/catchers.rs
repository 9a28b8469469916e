use crate::models::message::{Message, INTERNAL_ERROR, INVALID_BODY, NOT_FOUND, UNAUTHORIZED};
use rocket::serde::json::Json;

#[catch(400)]
pub fn bad_request() -> Json<Message> {
    Json(Message::new(INVALID_BODY))
}

#[catch(401)]
pub fn unauthorized() -> Json<Message> {
    Json(Message::new(UNAUTHORIZED))
}

#[catch(404)]
pub fn not_found() -> Json<Message> {
    Json(Message::new(NOT_FOUND))
}

#[catch(422)]
pub fn unprocessable_entity() -> Json<Message> {
    Json(Message::new(INVALID_BODY))
}

#[catch(500)]
pub fn internal_server_error() -> Json<Message> {
    Json(Message::new(INTERNAL_ERROR))
}
