use actix_identity::Identity;
use actix_web::{Responder, get};
use actix_web_flash_messages::FlashMessage;

use crate::routes::redirect;

#[get("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
        FlashMessage::success("Logged out successfully").send();
    }
    redirect("/listings")
}
