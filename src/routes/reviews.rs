use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::auth::AuthenticatedUser;
use crate::forms::reviews::ReviewForm;
use crate::repository::DieselRepository;
use crate::routes::redirect;
use crate::services::ServiceError;
use crate::services::reviews::{
    create_review as create_review_service, delete_review as delete_review_service,
};

#[post("/listings/{listing_id}/reviews")]
pub async fn create_review(
    listing_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ReviewForm>,
) -> impl Responder {
    let listing_id = listing_id.into_inner();
    let listing_url = format!("/listings/{listing_id}");
    match create_review_service(listing_id, form, &user, repo.get_ref()) {
        Ok(_) => {
            FlashMessage::success("New review created!").send();
            redirect(&listing_url)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&listing_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Listing you requested does not exist!").send();
            redirect("/listings")
        }
        Err(err) => {
            log::error!("Failed to create review: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/listings/{listing_id}/reviews/{review_id}/delete")]
pub async fn delete_review(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (listing_id, review_id) = path.into_inner();
    let listing_url = format!("/listings/{listing_id}");
    match delete_review_service(listing_id, review_id, &user, repo.get_ref()) {
        Ok(()) => {
            FlashMessage::success("Review deleted!").send();
            redirect(&listing_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You do not have permission to delete this review").send();
            redirect(&listing_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Review not found").send();
            redirect(&listing_url)
        }
        Err(err) => {
            log::error!("Failed to delete review: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
