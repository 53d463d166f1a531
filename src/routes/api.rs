use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::services::api::{ApiV1ListingsQueryParams, api_v1_listings as api_v1_listings_service};

#[get("/v1/listings")]
pub async fn api_v1_listings(
    params: web::Query<ApiV1ListingsQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_v1_listings_service(params.into_inner(), repo.get_ref()) {
        Ok(listings) => HttpResponse::Ok().json(listings),
        Err(err) => {
            log::error!("Failed to list listings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
