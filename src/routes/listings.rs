use actix_identity::Identity;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::listings::ListingForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, render_template_with_status};
use crate::services::ServiceError;
use crate::services::listings::{
    create_listing as create_listing_service, delete_listing as delete_listing_service,
    listing_for_edit as listing_for_edit_service, search_listings as search_listings_service,
    show_listing as show_listing_service, show_listings as show_listings_service,
    update_listing as update_listing_service,
};

const NO_PERMISSION: &str = "You don't have permission to do that!";
const LISTING_NOT_FOUND: &str = "Listing you requested does not exist!";

#[derive(Deserialize)]
pub struct ListingsQueryParams {
    pub filter: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQueryParams {
    pub q: Option<String>,
}

fn listing_url(listing_id: i32) -> String {
    format!("/listings/{listing_id}")
}

fn not_found_redirect() -> HttpResponse {
    FlashMessage::error(LISTING_NOT_FOUND).send();
    redirect("/listings")
}

#[get("/")]
pub async fn root() -> impl Responder {
    redirect("/listings")
}

#[get("/listings")]
pub async fn index(
    params: web::Query<ListingsQueryParams>,
    identity: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let user = identity.as_ref().and_then(AuthenticatedUser::from_identity);
    match show_listings_service(params.filter.as_deref(), repo.get_ref()) {
        Ok(page) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "index",
                &server_config.auth_service_url,
            );
            context.insert("listings", &page.listings);
            context.insert("current_filter", &page.current_filter);
            render_template(&tera, "listings/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render listings index: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/listings/search")]
pub async fn search(
    params: web::Query<SearchQueryParams>,
    identity: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let user = identity.as_ref().and_then(AuthenticatedUser::from_identity);
    match search_listings_service(params.q.as_deref(), repo.get_ref()) {
        Ok(Some(page)) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "index",
                &server_config.auth_service_url,
            );
            context.insert("listings", &page.listings);
            context.insert("current_filter", &page.current_filter);
            context.insert("search_query", &page.query);
            render_template(&tera, "listings/index.html", &context)
        }
        Ok(None) => redirect("/listings"),
        Err(err) => {
            log::error!("Failed to search listings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/listings/new")]
pub async fn new_listing(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        Some(&user),
        "new",
        &server_config.auth_service_url,
    );
    context.insert("form", &ListingForm::default());
    render_template(&tera, "listings/new.html", &context)
}

#[post("/listings")]
pub async fn create_listing(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ListingForm>,
) -> impl Responder {
    match create_listing_service(form.clone(), &user, repo.get_ref()) {
        Ok(listing) => {
            FlashMessage::success("Successfully created a new listing!").send();
            redirect(&listing_url(listing.id))
        }
        Err(ServiceError::Form(message)) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "new",
                &server_config.auth_service_url,
            );
            context.insert("form", &form);
            context.insert("form_error", &message);
            render_template_with_status(
                &tera,
                StatusCode::BAD_REQUEST,
                "listings/new.html",
                &context,
            )
        }
        Err(err) => {
            log::error!("Failed to create listing: {err}");
            FlashMessage::error("Failed to create a new listing. Please try again.").send();
            redirect("/listings/new")
        }
    }
}

#[get("/listings/{listing_id}")]
pub async fn show_listing(
    listing_id: web::Path<i32>,
    identity: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let user = identity.as_ref().and_then(AuthenticatedUser::from_identity);
    match show_listing_service(listing_id.into_inner(), user.as_ref(), repo.get_ref()) {
        Ok(details) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "show",
                &server_config.auth_service_url,
            );
            context.insert("listing", &details.listing);
            context.insert("owner", &details.owner);
            context.insert("reviews", &details.reviews);
            context.insert("average_rating", &details.average_rating);
            context.insert("is_owner", &details.is_owner);
            render_template(&tera, "listings/show.html", &context)
        }
        Err(ServiceError::NotFound) => not_found_redirect(),
        Err(err) => {
            log::error!("Failed to render listing: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/listings/{listing_id}/edit")]
pub async fn edit_listing(
    listing_id: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let listing_id = listing_id.into_inner();
    match listing_for_edit_service(listing_id, &user, repo.get_ref()) {
        Ok((listing, form)) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "edit",
                &server_config.auth_service_url,
            );
            context.insert("listing_id", &listing_id);
            context.insert("listing", &listing);
            context.insert("form", &form);
            render_template(&tera, "listings/edit.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(NO_PERMISSION).send();
            redirect(&listing_url(listing_id))
        }
        Err(ServiceError::NotFound) => not_found_redirect(),
        Err(err) => {
            log::error!("Failed to render listing edit form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/listings/{listing_id}/update")]
pub async fn update_listing(
    listing_id: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ListingForm>,
) -> impl Responder {
    let listing_id = listing_id.into_inner();
    match update_listing_service(listing_id, form.clone(), &user, repo.get_ref()) {
        Ok(()) => {
            FlashMessage::success("Listing updated!").send();
            redirect(&listing_url(listing_id))
        }
        Err(ServiceError::Form(message)) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "edit",
                &server_config.auth_service_url,
            );
            context.insert("listing_id", &listing_id);
            context.insert("form", &form);
            context.insert("form_error", &message);
            render_template_with_status(
                &tera,
                StatusCode::BAD_REQUEST,
                "listings/edit.html",
                &context,
            )
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(NO_PERMISSION).send();
            redirect(&listing_url(listing_id))
        }
        Err(ServiceError::NotFound) => not_found_redirect(),
        Err(err) => {
            log::error!("Failed to update listing: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/listings/{listing_id}/delete")]
pub async fn delete_listing(
    listing_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let listing_id = listing_id.into_inner();
    match delete_listing_service(listing_id, &user, repo.get_ref()) {
        Ok(()) => {
            FlashMessage::success("Listing deleted!").send();
            redirect("/listings")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(NO_PERMISSION).send();
            redirect(&listing_url(listing_id))
        }
        Err(ServiceError::NotFound) => not_found_redirect(),
        Err(err) => {
            log::error!("Failed to delete listing: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
