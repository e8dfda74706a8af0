mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    if config.admin_user_ids.is_empty() {
        log::warn!("ADMIN_USER_IDS is empty; the admin API will refuse every request");
    }

    HttpServer::new(move || {
        let admin_ids = config_data.admin_user_ids.clone();
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .wrap(logger::middleware())
            .wrap(cors::middleware(&origin))
            .service(
                web::scope("/api")
                    .service(api_access::mount_access())
                    .service(api_admin::mount_admin().wrap(api_admin::AdminGuard::new(admin_ids))),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
