use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::Error;
use crate::typedid::{TypedId, TypedIdMarker};

pub type UserId = TypedId<User>;

pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Clone, Debug)]
pub struct User;

impl TypedIdMarker for User {
    fn tag() -> &'static str {
        "USR"
    }
}

/// The signed-in user a request is acting on behalf of. Authentication
/// happens upstream; by the time a request reaches this service the user id
/// is carried in the `X-User-Id` header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
}

impl Session {
    pub fn new(user_id: UserId) -> Session {
        Session { user_id }
    }
}

impl FromRequest for Session {
    type Error = Error;
    type Future = Ready<Result<Session, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .headers()
            .get(USER_ID_HEADER)
            .ok_or(Error::MissingSession)
            .and_then(|value| value.to_str().map_err(|_| Error::InvalidSession))
            .and_then(|value| value.parse().map_err(|_| Error::InvalidSession))
            .map(Session::new);

        ready(result)
    }
}
