use crate::errors::ApiError;
use rocket::data::{self, Data, FromData};
use rocket::serde::json::{self, Json};
use rocket::serde::Deserialize;
use rocket::Request;

pub mod post;

pub type JsonResponse<T> = Result<Json<T>, ApiError>;

/// JSON request body where an empty body reads as `{}`.
///
/// Anything else goes through `Json`, so malformed JSON is still a 400 and a
/// mistyped field a 422.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[rocket::async_trait]
impl<'r, T: Deserialize<'r> + Default> FromData<'r> for JsonBody<T> {
    type Error = json::Error<'r>;

    async fn from_data(req: &'r Request<'_>, mut data: Data<'r>) -> data::Outcome<'r, Self> {
        if data.peek(1).await.is_empty() && data.peek_complete() {
            return data::Outcome::Success(JsonBody(T::default()));
        }
        Json::<T>::from_data(req, data)
            .await
            .map(|body| JsonBody(body.into_inner()))
    }
}
