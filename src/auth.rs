//! Signed-in user resolved from the identity cookie.
//!
//! Accounts and sign-in live in the external auth service; it stores the
//! numeric user id as the `actix-identity` id. This module only reads it.

use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use actix_web_flash_messages::FlashMessage;
use serde::Serialize;

use crate::domain::types::UserId;
use crate::models::config::ServerConfig;
use crate::routes::redirect;

/// The user behind the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
}

impl AuthenticatedUser {
    /// Reads the user from an identity, if it holds a valid user id.
    pub fn from_identity(identity: &Identity) -> Option<Self> {
        let id = identity.id().ok()?;
        let id = id.parse::<i32>().ok()?;
        UserId::new(id).ok().map(|id| Self { id })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .get_identity()
            .ok()
            .and_then(|identity| Self::from_identity(&identity));

        if let Some(user) = user {
            return ready(Ok(user));
        }

        let login_url = req
            .app_data::<web::Data<ServerConfig>>()
            .map(|config| config.auth_service_url.clone())
            .unwrap_or_else(|| "/".to_string());

        FlashMessage::error("You must be signed in to do that!").send();
        let response: HttpResponse = redirect(&login_url);
        ready(Err(
            InternalError::from_response("not signed in", response).into()
        ))
    }
}
