use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod handlers;

use handlers::{dutch, health, odds};
use quindutch::fetcher::{ClientConfig, OddsClient};

/// Application state shared across handlers
pub struct AppState {
    pub client: OddsClient,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("{}:{}", host, port);

    let app_state = Arc::new(AppState {
        client: OddsClient::new(ClientConfig::default()),
    });

    info!("Starting quinella dutching API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .route("/odds/{race_no}", web::get().to(odds::race_odds))
            .route("/dutch", web::post().to(dutch::dutch_race))
    })
    .bind(&addr)?
    .run()
    .await
}
