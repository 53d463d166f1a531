use actix_identity::Identity;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, Responder, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::domain::types::ListingCategory;
use crate::models::config::ServerConfig;

pub mod api;
pub mod auth;
pub mod listings;
pub mod reviews;

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_template_with_status(tera, StatusCode::OK, template, context)
}

pub fn render_template_with_status(
    tera: &Tera,
    status: StatusCode,
    template: &str,
    context: &Context,
) -> HttpResponse {
    HttpResponse::build(status).body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info => "info",
        Level::Debug => "secondary",
    }
}

pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();
    let categories = ListingCategory::ALL
        .iter()
        .map(|category| category.as_str())
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context.insert("categories", &categories);
    context
}

/// Fallback for unmatched routes.
pub async fn not_found(
    identity: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let user = identity.as_ref().and_then(AuthenticatedUser::from_identity);
    let mut context = base_context(
        &flash_messages,
        user.as_ref(),
        "error",
        &server_config.auth_service_url,
    );
    context.insert("status", &StatusCode::NOT_FOUND.as_u16());
    context.insert("message", "Page Not Found");
    render_template_with_status(&tera, StatusCode::NOT_FOUND, "error.html", &context)
}
