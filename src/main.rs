use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quiz_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        if let Err(err) = config.validate_for_production() {
            log::error!("Refusing to start: {}", err);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()));
        }
    }

    let bind_address = config.bind_address();

    let state = AppState::new(config).await.map_err(|err| {
        log::error!("Failed to initialise application state: {}", err);
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    })?;

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    let jwt_service = web::Data::new(state.jwt_service.clone());
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
