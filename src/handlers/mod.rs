use std::time::Duration;

use actix_web::web;
use serde::Deserialize;
use tonic::transport::{Channel, Endpoint};

use crate::config::{Config, WebAddress};
use crate::errors::AppError;
use crate::rpc::client_service::ClientServiceClient;
use crate::rpc::job_service::JobServiceClient;

pub mod client;
pub mod job;
mod join;


/// Stubs for both backends; each handler clones what it needs.
#[derive(Debug, Clone)]
pub struct ServiceClients {
    pub client: ClientServiceClient,
    pub job: JobServiceClient,
}

impl ServiceClients {
    pub fn new(client_channel: Channel, job_channel: Channel) -> Self {
        ServiceClients {
            client: ClientServiceClient::new(client_channel),
            job: JobServiceClient::new(job_channel),
        }
    }

    /// Channels connect on first use, so the gateway starts even if a backend is down.
    pub fn connect(config: &Config) -> Result<Self, AppError> {
        let client_channel = lazy_channel(&config.client_service)?;
        let job_channel = lazy_channel(&config.job_service)?;
        Ok(Self::new(client_channel, job_channel))
    }
}

fn lazy_channel(address: &WebAddress) -> Result<Channel, AppError> {
    let endpoint = Endpoint::from_shared(address.uri()).map_err(|err| {
        AppError::InternalServerError(format!("invalid service address {}: {}", address.uri(), err))
    })?;
    Ok(endpoint.connect_lazy())
}

pub struct GatewayState {
    pub config: Config,
    pub services: ServiceClients,
}

impl GatewayState {
    pub fn new(config: Config, services: ServiceClients) -> Self {
        GatewayState { config, services }
    }

    /// Deadline for one request. `CONTEXT_TIMEOUT` is parsed each time, so
    /// a bad value surfaces as a 400 on the request that hit it.
    pub fn deadline(&self) -> Result<Duration, AppError> {
        self.config
            .context
            .duration()
            .map_err(|err| AppError::BadRequest(format!("CONTEXT_TIMEOUT: {}", err)))
    }
}

/// `?page=&limit=`; both are required and must be unsigned integers.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
}

impl ListQuery {
    pub fn page_and_limit(&self) -> Result<(u64, u64), AppError> {
        Ok((
            number("page", self.page.as_deref())?,
            number("limit", self.limit.as_deref())?,
        ))
    }
}

fn number(name: &str, value: Option<&str>) -> Result<u64, AppError> {
    let value = value.ok_or_else(|| AppError::InternalServerError(format!("{} is required", name)))?;
    value
        .parse::<u64>()
        .map_err(|err| AppError::InternalServerError(format!("{} {:?}: {}", name, value, err)))
}

fn rpc<T>(result: Result<tonic::Response<T>, tonic::Status>) -> Result<T, AppError> {
    result.map(tonic::Response::into_inner).map_err(AppError::from)
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/v1")
            .service(
                web::resource("/client")
                    .route(web::post().to(client::create_client))
                    .route(web::put().to(client::update_client)),
            )
            .service(web::resource("/client/unique-email").route(web::post().to(client::unique_email)))
            .service(web::resource("/client/refresh").route(web::put().to(client::update_refresh)))
            .service(web::resource("/client/password").route(web::put().to(client::update_password)))
            .service(
                web::resource("/client/{id}")
                    .route(web::get().to(client::get_client))
                    .route(web::delete().to(client::delete_client)),
            )
            .service(web::resource("/clients/active").route(web::get().to(client::get_all_clients)))
            .service(web::resource("/clients/deleted").route(web::get().to(client::get_all_deleted_clients)))
            .service(web::resource("/clients/hidden").route(web::get().to(client::get_all_hidden_clients)))
            .service(
                web::resource("/job")
                    .route(web::post().to(job::create_job))
                    .route(web::put().to(job::update_job)),
            )
            .service(web::resource("/job/add-client").route(web::post().to(job::add_client_to_job)))
            .service(web::resource("/job/remove-client").route(web::delete().to(job::remove_client_from_job)))
            .service(
                web::resource("/job/{id}")
                    .route(web::get().to(job::get_job))
                    .route(web::delete().to(job::delete_job)),
            )
            .service(web::resource("/jobs/active").route(web::get().to(job::get_all_jobs)))
            .service(web::resource("/jobs/deleted").route(web::get().to(job::get_all_deleted_jobs)))
            .service(web::resource("/jobs/client-jobs").route(web::post().to(job::get_clients_with_job)))
            .service(web::resource("/jobs/job-clients").route(web::post().to(job::get_jobs_with_client))),
    );
}
