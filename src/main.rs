use crate::config::config::Config;
use crate::model::response::GenericResponse;
use crate::repository::database::Database;
use crate::service::tracker::TrackerService;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder, Result};
use log::info;
use std::sync::Arc;

mod config;
mod controller;
mod engine;
mod model;
mod repository;
mod service;
mod util;

#[get("/health")]
async fn health_check() -> impl Responder {
    let response = GenericResponse {
        status: "success".to_string(),
        message: "Everything is working as expected".to_string(),
    };
    HttpResponse::Ok().json(response)
}

async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(GenericResponse::failed("Resource not found")))
}

pub struct AppState {
    tracker: TrackerService,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::init();
    log4rs::init_file(&config.log_config_path, Default::default())
        .expect("Log config file not found.");

    let db = Database::new(&config);
    let tracker = TrackerService::new(Arc::new(db), &config);
    let app_data = web::Data::new(AppState { tracker });

    info!(
        "Starting prediction tracker on {}:{}",
        config.server_host, config.server_port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .configure(controller::handler::config)
            .service(health_check)
            .default_service(web::route().to(not_found))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
