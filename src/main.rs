mod commands;
mod config;
mod constants;
mod database;
mod dispatcher;
mod errors;
mod handlers;
mod models;
mod queries;
mod routes;
mod utils;
mod validators;

use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};

use crate::config::CONFIG;
use crate::database::{DatabaseInitializer, SqliteConnectionFactory};
use crate::dispatcher::Dispatcher;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let factory = SqliteConnectionFactory::from_url(&CONFIG.database_url).map_err(|e| {
        error!("Invalid DATABASE_URL '{}': {}", CONFIG.database_url, e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // The server still starts when bootstrap fails; requests surface the
    // store errors as 500s until it becomes reachable.
    info!("Initializing database at {}", CONFIG.database_url);
    if let Err(e) = DatabaseInitializer::new(factory.options().clone(), CONFIG.seed_sample_data)
        .initialize()
        .await
    {
        error!("Failed to initialize database: {}", e);
    }

    let dispatcher = web::Data::new(Dispatcher::new(Arc::new(factory)));

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(dispatcher.clone())
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
