use std::error::Error;
use std::sync::Arc;

use clientjob::config::Config;
use clientjob::db;
use clientjob::repository::postgres::PgJobRepository;
use clientjob::rpc::job_service::JobServiceServer;
use clientjob::services::JobGrpc;
use clientjob::usecase::JobUseCase;
use dotenv::dotenv;
use log::info;
use tonic::transport::Server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let config = Config::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    let pool = db::create_pool(&config.db).await?;
    db::migrate(&pool).await?;

    let repo = Arc::new(PgJobRepository::new(pool));
    let use_case = JobUseCase::new(config.service_timeout()?, repo);

    let address = tokio::net::lookup_host(config.job_service.addr())
        .await?
        .next()
        .ok_or_else(|| format!("cannot resolve {}", config.job_service.addr()))?;

    info!("job service listening on {}", address);
    Server::builder()
        .add_service(JobServiceServer::new(JobGrpc::new(use_case)))
        .serve(address)
        .await?;
    Ok(())
}
