use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use rentroot::db::establish_connection_pool;
use rentroot::models::config::ServerConfig;
use rentroot::repository::DieselRepository;
use rentroot::routes::api::api_v1_listings;
use rentroot::routes::auth::logout;
use rentroot::routes::listings::{
    create_listing, delete_listing, edit_listing, index, new_listing, root, search,
    show_listing, update_listing,
};
use rentroot::routes::not_found;
use rentroot::routes::reviews::{create_review, delete_review};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load server configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let tera = match Tera::new(&format!("{}/**/*", server_config.templates_dir)) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Template parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let secret_key = Key::from(server_config.secret.as_bytes());
    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting RentRoot on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        App::new()
            .wrap(message_framework)
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .service(Files::new("/assets", server_config.static_dir.clone()))
            .service(web::scope("/api").service(api_v1_listings))
            .service(logout)
            .service(root)
            .service(index)
            .service(search)
            .service(new_listing)
            .service(create_listing)
            .service(show_listing)
            .service(edit_listing)
            .service(update_listing)
            .service(delete_listing)
            .service(create_review)
            .service(delete_review)
            .default_service(web::to(not_found))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(tera.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
