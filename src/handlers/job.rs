use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use super::client::ClientResponse;
use super::join::{best_effort_join, JoinFailure};
use super::{rpc, GatewayState, ListQuery};
use crate::errors::AppError;
use crate::rpc::client_service::ClientWithGuid;
use crate::rpc::job_service::{
    self as jobproto, ClientJobRequest, JobWithGuid, ListJobResponse, ListRequest,
};
use crate::utils::timeout::within;
use crate::utils::validation::{validate_payload, validate_rfc3339};

#[derive(Debug, Deserialize, Validate)]
pub struct JobBody {
    #[serde(default)]
    id: String,
    #[validate(length(min = 1, max = 128))]
    name: String,
    #[serde(default)]
    salary: f32,
    #[serde(default)]
    level: String,
    #[serde(default)]
    location_type: String,
    #[serde(default)]
    employment_type: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    company: String,
}

impl From<JobBody> for jobproto::Job {
    fn from(body: JobBody) -> Self {
        jobproto::Job {
            id: body.id,
            name: body.name,
            salary: body.salary,
            level: body.level,
            location_type: body.location_type,
            employment_type: body.employment_type,
            address: body.address,
            company: body.company,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: String,
    pub name: String,
    pub salary: f32,
    pub level: String,
    pub location_type: String,
    pub employment_type: String,
    pub address: String,
    pub company: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<jobproto::Job> for JobResponse {
    fn from(job: jobproto::Job) -> Self {
        JobResponse {
            id: job.id,
            name: job.name,
            salary: job.salary,
            level: job.level,
            location_type: job.location_type,
            employment_type: job.employment_type,
            address: job.address,
            company: job.company,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct JobListResponse {
    jobs: Vec<JobResponse>,
}

impl From<ListJobResponse> for JobListResponse {
    fn from(list: ListJobResponse) -> Self {
        JobListResponse {
            jobs: list.jobs.into_iter().map(JobResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddClientBody {
    #[validate(length(min = 1))]
    client_id: String,
    #[validate(length(min = 1))]
    job_id: String,
    #[validate(length(min = 1), custom = "validate_rfc3339")]
    start_date: String,
    #[serde(default)]
    #[validate(custom = "validate_rfc3339")]
    end_date: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RemoveClientBody {
    #[validate(length(min = 1))]
    client_id: String,
    #[validate(length(min = 1))]
    job_id: String,
}

/// Body of both composed views; only the id the view is keyed on is read.
#[derive(Debug, Deserialize)]
pub struct ClientJobQuery {
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    job_id: String,
    #[serde(default)]
    page: u64,
    #[serde(default)]
    limit: u64,
}

/// A job together with the engagement dates it was reached through.
#[derive(Debug, Serialize)]
pub struct DatedJob {
    #[serde(flatten)]
    job: JobResponse,
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DatedClient {
    #[serde(flatten)]
    client: ClientResponse,
    start_date: String,
    end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClientWithJobs {
    client: ClientResponse,
    jobs: Vec<DatedJob>,
    failures: Vec<JoinFailure>,
}

#[derive(Debug, Serialize)]
pub struct JobWithClients {
    job: DatedJob,
    clients: Vec<DatedClient>,
    failures: Vec<JoinFailure>,
}

/// Wire dates use the empty string for "none".
fn present(date: String) -> Option<String> {
    if date.is_empty() {
        None
    } else {
        Some(date)
    }
}

pub async fn create_job(
    state: web::Data<GatewayState>,
    body: web::Json<JobBody>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*body)?;
    let deadline = state.deadline()?;
    let message = jobproto::Job::from(body.into_inner());
    let mut jobs = state.services.job.clone();

    let created = within(deadline, "CreateJob", async { rpc(jobs.create_job(message).await) }).await?;
    Ok(HttpResponse::Created().json(json!({ "id": created.job_id })))
}

pub async fn update_job(
    state: web::Data<GatewayState>,
    body: web::Json<JobBody>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*body)?;
    if body.id.is_empty() {
        return Err(AppError::BadRequest("id is required".to_string()));
    }
    let deadline = state.deadline()?;
    let message = jobproto::Job::from(body.into_inner());
    let mut jobs = state.services.job.clone();

    let updated = within(deadline, "UpdateJob", async { rpc(jobs.update_job(message).await) }).await?;
    Ok(HttpResponse::Ok().json(JobResponse::from(updated)))
}

pub async fn delete_job(
    state: web::Data<GatewayState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deadline = state.deadline()?;
    let job_id = path.into_inner();
    let mut jobs = state.services.job.clone();

    let deleted = within(deadline, "DeleteJob", async {
        rpc(jobs.delete_job(JobWithGuid { job_id }).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "status": deleted.status })))
}

pub async fn get_job(
    state: web::Data<GatewayState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deadline = state.deadline()?;
    let job_id = path.into_inner();
    let mut jobs = state.services.job.clone();

    let job = within(deadline, "GetJob", async {
        rpc(jobs.get_job(JobWithGuid { job_id }).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(JobResponse::from(job)))
}

pub async fn get_all_jobs(
    state: web::Data<GatewayState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let deadline = state.deadline()?;
    let (page, limit) = query.page_and_limit()?;
    let mut jobs = state.services.job.clone();

    let list = within(deadline, "GetAllJobs", async {
        rpc(jobs.get_all_jobs(ListRequest { page, limit }).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(JobListResponse::from(list)))
}

pub async fn get_all_deleted_jobs(
    state: web::Data<GatewayState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let deadline = state.deadline()?;
    let (page, limit) = query.page_and_limit()?;
    let mut jobs = state.services.job.clone();

    let list = within(deadline, "GetAllDeletedJobs", async {
        rpc(jobs.get_all_deleted_jobs(ListRequest { page, limit }).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(JobListResponse::from(list)))
}

pub async fn add_client_to_job(
    state: web::Data<GatewayState>,
    body: web::Json<AddClientBody>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*body)?;
    let deadline = state.deadline()?;
    let AddClientBody {
        client_id,
        job_id,
        start_date,
        end_date,
    } = body.into_inner();
    let mut jobs = state.services.job.clone();

    let added = within(deadline, "AddClientJob", async {
        let link = jobproto::ClientJob {
            client_id,
            job_id,
            start_date,
            end_date,
            ..Default::default()
        };
        rpc(jobs.add_client_job(link).await)
    })
    .await?;
    Ok(HttpResponse::Created().json(json!({ "status": added.status })))
}

pub async fn remove_client_from_job(
    state: web::Data<GatewayState>,
    body: web::Json<RemoveClientBody>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*body)?;
    let deadline = state.deadline()?;
    let RemoveClientBody { client_id, job_id } = body.into_inner();
    let mut jobs = state.services.job.clone();

    let removed = within(deadline, "DeleteClientJob", async {
        let link = jobproto::ClientJob {
            client_id,
            job_id,
            ..Default::default()
        };
        rpc(jobs.delete_client_job(link).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "status": removed.status })))
}

/// The client plus every job it is linked to on the requested page.
pub async fn get_clients_with_job(
    state: web::Data<GatewayState>,
    body: web::Json<ClientJobQuery>,
) -> Result<HttpResponse, AppError> {
    let ClientJobQuery {
        client_id, page, limit, ..
    } = body.into_inner();
    if client_id.is_empty() {
        return Err(AppError::BadRequest("client_id is required".to_string()));
    }
    let deadline = state.deadline()?;
    let mut clients = state.services.client.clone();
    let mut jobs = state.services.job.clone();

    let view = within(deadline, "GetClientsWithJob", async {
        let client = rpc(clients.get_client(ClientWithGuid { guid: client_id.clone() }).await)?;
        let request = ClientJobRequest { id: client_id, page, limit };
        let rows = rpc(jobs.get_client_jobs(request).await)?.client_jobs;

        let joined = best_effort_join(
            rows,
            |row| row.job_id.clone(),
            |row| {
                let mut jobs = jobs.clone();
                async move {
                    let job = rpc(jobs.get_job(JobWithGuid { job_id: row.job_id }).await)?;
                    Ok(DatedJob {
                        job: JobResponse::from(job),
                        start_date: present(row.start_date),
                        end_date: present(row.end_date),
                    })
                }
            },
        )
        .await;

        Ok(ClientWithJobs {
            client: ClientResponse::from(client),
            jobs: joined.items,
            failures: joined.failures,
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// The job plus every client linked to it on the requested page. The
/// job-level dates are those of the first association row returned.
pub async fn get_jobs_with_client(
    state: web::Data<GatewayState>,
    body: web::Json<ClientJobQuery>,
) -> Result<HttpResponse, AppError> {
    let ClientJobQuery {
        job_id, page, limit, ..
    } = body.into_inner();
    if job_id.is_empty() {
        return Err(AppError::BadRequest("job_id is required".to_string()));
    }
    let deadline = state.deadline()?;
    let clients = state.services.client.clone();
    let mut jobs = state.services.job.clone();

    let view = within(deadline, "GetJobsWithClient", async {
        let job = rpc(jobs.get_job(JobWithGuid { job_id: job_id.clone() }).await)?;
        let request = ClientJobRequest { id: job_id, page, limit };
        let rows = rpc(jobs.get_job_clients(request).await)?.client_jobs;
        let (start_date, end_date) = match rows.first() {
            Some(first) => (present(first.start_date.clone()), present(first.end_date.clone())),
            None => (None, None),
        };

        let joined = best_effort_join(
            rows,
            |row| row.client_id.clone(),
            |row| {
                let mut clients = clients.clone();
                async move {
                    let client = rpc(clients.get_client(ClientWithGuid { guid: row.client_id }).await)?;
                    Ok(DatedClient {
                        client: ClientResponse::from(client),
                        start_date: row.start_date,
                        end_date: present(row.end_date),
                    })
                }
            },
        )
        .await;

        Ok(JobWithClients {
            job: DatedJob {
                job: JobResponse::from(job),
                start_date,
                end_date,
            },
            clients: joined.items,
            failures: joined.failures,
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(view))
}
