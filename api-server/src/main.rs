use actix_web::{middleware, web, App, HttpServer};
use catch_host::SessionStore;

mod config;
mod routes;

use config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Catch API Server");

    let config = ServerConfig::from_env();
    tracing::info!("Binding to {}", config.bind_address);

    // One store for the whole process, shared by every worker
    let store = web::Data::new(SessionStore::new());

    let json_limit = config.json_limit_bytes;
    let cors_max_age = config.cors_max_age_secs;

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors(cors_max_age))
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(routes::json_config(json_limit))
            .configure(routes::configure)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await
}
