use std::io;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use clientjob::config::Config;
use clientjob::handlers::{self, GatewayState, ServiceClients};
use dotenv::dotenv;
use log::info;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    let config = Config::from_env().map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    let services = ServiceClients::connect(&config).map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    let address = config.server.addr();
    let state = web::Data::new(GatewayState::new(config, services));

    info!("Starting api gateway at {}", address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(handlers::routes)
    })
    .bind(address)?
    .run()
    .await
}
