extern crate actix_web;
extern crate env_logger;
#[macro_use]
extern crate log;

extern crate league_manager;
use league_manager::config::Config;
use league_manager::web::{self, app_state::AppState};

use actix_web::{middleware, App, HttpServer};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            error!("Invalid configuration: {}", error);
            std::process::exit(1);
        }
    };

    // Start the database executors, each with its own connection
    let addr = match web::app_state::start_executors(&config.database_url, config.db_executors) {
        Ok(addr) => addr,
        Err(error) => {
            error!("Could not open {}: {}", config.database_url, error);
            std::process::exit(1);
        }
    };
    let state = actix_web::web::Data::new(AppState { db: addr });

    let url = config.bind_address();
    info!("Listening http server {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(web::configure)
    })
    .bind(&url)?
    .run()
    .await
}
