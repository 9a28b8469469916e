use crate::config::{AppConfig, DEFAULT_AUTH_HEADER};
use crate::models::ids::UserId;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no authenticated identity on request")]
    Missing,
    #[error("authenticated identity is not a user id")]
    Malformed,
}

/// The authenticated caller.
///
/// Authentication happens upstream; this guard only picks up the user id the
/// authenticating layer forwarded. Routes that take an `AuthUser` answer 401
/// when it is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

impl AuthUser {
    pub fn id(&self) -> UserId {
        self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let header = req
            .rocket()
            .state::<AppConfig>()
            .map(|config| config.auth_header.as_str())
            .unwrap_or(DEFAULT_AUTH_HEADER);

        let raw = match req.headers().get_one(header) {
            Some(raw) => raw,
            None => return Outcome::Error((Status::Unauthorized, AuthError::Missing)),
        };

        match raw.trim().parse::<UserId>() {
            Ok(user_id) => Outcome::Success(AuthUser(user_id)),
            Err(_) => {
                debug!(header, value = raw, "rejecting malformed identity");
                Outcome::Error((Status::Unauthorized, AuthError::Malformed))
            }
        }
    }
}
