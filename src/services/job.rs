use async_trait::async_trait;
use tonic::{Request, Response, Status};

use super::respond;
use crate::errors::AppError;
use crate::models::client_job::ClientJob;
use crate::models::job::{Job, JobInput};
use crate::models::page::Page;
use crate::rpc::job_service::{
    self as jobproto, ClientJobRequest, JobService, JobWithGuid, ListClientJobResponse, ListJobResponse,
    ListRequest, ResponseStatus,
};
use crate::rpc::{format_optional_time, format_time, parse_optional_time};
use crate::usecase::JobUseCase;
use crate::utils::validation::parse_rfc3339;

pub struct JobGrpc {
    use_case: JobUseCase,
}

impl JobGrpc {
    pub fn new(use_case: JobUseCase) -> Self {
        JobGrpc { use_case }
    }

    async fn add(&self, message: jobproto::ClientJob) -> Result<bool, AppError> {
        let start_date = parse_rfc3339(&message.start_date)?;
        let end_date = parse_optional_time(&message.end_date)?;
        self.use_case
            .add_client_job(&message.client_id, &message.job_id, start_date, end_date)
            .await
    }
}

pub fn to_message(job: &Job) -> jobproto::Job {
    jobproto::Job {
        id: job.id.clone(),
        name: job.name.clone(),
        salary: job.salary as f32,
        level: job.level.clone(),
        location_type: job.location_type.clone(),
        employment_type: job.employment_type.clone(),
        address: job.address.clone(),
        company: job.company.clone(),
        created_at: format_time(job.created_at),
        updated_at: format_time(job.updated_at),
        deleted_at: format_optional_time(job.deletion.deleted_at()),
    }
}

fn to_input(message: jobproto::Job) -> JobInput {
    JobInput {
        name: message.name,
        salary: f64::from(message.salary),
        level: message.level,
        location_type: message.location_type,
        employment_type: message.employment_type,
        address: message.address,
        company: message.company,
    }
}

fn to_list(jobs: Vec<Job>) -> ListJobResponse {
    ListJobResponse {
        jobs: jobs.iter().map(to_message).collect(),
    }
}

fn client_job_message(row: &ClientJob) -> jobproto::ClientJob {
    jobproto::ClientJob {
        client_id: row.client_id.clone(),
        job_id: row.job_id.clone(),
        start_date: format_time(row.start_date),
        end_date: format_optional_time(row.end_date),
        created_at: format_time(row.created_at),
        updated_at: format_time(row.updated_at),
    }
}

fn to_client_jobs(rows: Vec<ClientJob>) -> ListClientJobResponse {
    ListClientJobResponse {
        client_jobs: rows.iter().map(client_job_message).collect(),
    }
}

#[async_trait]
impl JobService for JobGrpc {
    async fn create_job(&self, request: Request<jobproto::Job>) -> Result<Response<JobWithGuid>, Status> {
        let input = to_input(request.into_inner());
        let result = self
            .use_case
            .create_job(input)
            .await
            .map(|job| JobWithGuid { job_id: job.id });
        respond("CreateJob", result)
    }

    async fn update_job(&self, request: Request<jobproto::Job>) -> Result<Response<jobproto::Job>, Status> {
        let message = request.into_inner();
        let id = message.id.clone();
        let result = self
            .use_case
            .update_job(&id, to_input(message))
            .await
            .map(|job| to_message(&job));
        respond("UpdateJob", result)
    }

    async fn delete_job(&self, request: Request<JobWithGuid>) -> Result<Response<ResponseStatus>, Status> {
        let job_id = request.into_inner().job_id;
        let result = self
            .use_case
            .delete_job(&job_id)
            .await
            .map(|()| ResponseStatus { status: true });
        respond("DeleteJob", result)
    }

    async fn get_job(&self, request: Request<JobWithGuid>) -> Result<Response<jobproto::Job>, Status> {
        let job_id = request.into_inner().job_id;
        let result = self.use_case.get_job(&job_id).await.map(|job| to_message(&job));
        respond("GetJob", result)
    }

    async fn get_all_jobs(&self, request: Request<ListRequest>) -> Result<Response<ListJobResponse>, Status> {
        let ListRequest { page, limit } = request.into_inner();
        let result = self.use_case.get_all_jobs(Page::new(page, limit)).await.map(to_list);
        respond("GetAllJobs", result)
    }

    async fn get_all_deleted_jobs(
        &self,
        request: Request<ListRequest>,
    ) -> Result<Response<ListJobResponse>, Status> {
        let ListRequest { page, limit } = request.into_inner();
        let result = self
            .use_case
            .get_all_deleted_jobs(Page::new(page, limit))
            .await
            .map(to_list);
        respond("GetAllDeletedJobs", result)
    }

    async fn add_client_job(
        &self,
        request: Request<jobproto::ClientJob>,
    ) -> Result<Response<ResponseStatus>, Status> {
        let result = self
            .add(request.into_inner())
            .await
            .map(|status| ResponseStatus { status });
        respond("AddClientJob", result)
    }

    async fn delete_client_job(
        &self,
        request: Request<jobproto::ClientJob>,
    ) -> Result<Response<ResponseStatus>, Status> {
        let message = request.into_inner();
        let result = self
            .use_case
            .delete_client_job(&message.client_id, &message.job_id)
            .await
            .map(|()| ResponseStatus { status: true });
        respond("DeleteClientJob", result)
    }

    async fn get_client_jobs(
        &self,
        request: Request<ClientJobRequest>,
    ) -> Result<Response<ListClientJobResponse>, Status> {
        let ClientJobRequest { id, page, limit } = request.into_inner();
        let result = self
            .use_case
            .get_client_jobs(&id, Page::new(page, limit))
            .await
            .map(to_client_jobs);
        respond("GetClientJobs", result)
    }

    async fn get_job_clients(
        &self,
        request: Request<ClientJobRequest>,
    ) -> Result<Response<ListClientJobResponse>, Status> {
        let ClientJobRequest { id, page, limit } = request.into_inner();
        let result = self
            .use_case
            .get_job_clients(&id, Page::new(page, limit))
            .await
            .map(to_client_jobs);
        respond("GetJobClients", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryJobRepository;
    use std::sync::Arc;
    use std::time::Duration;
    use tonic::Code;

    fn service() -> JobGrpc {
        let repo = Arc::new(MemoryJobRepository::new());
        JobGrpc::new(JobUseCase::new(Duration::from_secs(5), repo))
    }

    fn link(client_id: &str, start_date: &str, end_date: &str) -> jobproto::ClientJob {
        jobproto::ClientJob {
            client_id: client_id.into(),
            job_id: "j1".into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn salary_narrows_to_wire_float() {
        let service = service();
        let job = jobproto::Job {
            name: "Engineer".into(),
            salary: 1000.0,
            company: "Acme".into(),
            ..Default::default()
        };
        let guid = service.create_job(Request::new(job)).await.unwrap().into_inner();
        let fetched = service.get_job(Request::new(guid)).await.unwrap().into_inner();
        assert_eq!(fetched.salary, 1000.0);
        assert_eq!(fetched.company, "Acme");
    }

    #[tokio::test]
    async fn empty_end_date_means_ongoing() {
        let service = service();
        service
            .add_client_job(Request::new(link("c1", "2023-01-01T00:00:00Z", "")))
            .await
            .unwrap();

        let request = ClientJobRequest { id: "c1".into(), page: 1, limit: 10 };
        let rows = service
            .get_client_jobs(Request::new(request))
            .await
            .unwrap()
            .into_inner()
            .client_jobs;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start_date, "2023-01-01T00:00:00Z");
        assert_eq!(rows[0].end_date, "");
    }

    #[tokio::test]
    async fn malformed_dates_are_invalid_arguments() {
        let service = service();
        let status = service
            .add_client_job(Request::new(link("c1", "last year", "")))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn duplicate_live_link_already_exists() {
        let service = service();
        let first = link("c1", "2023-01-01T00:00:00Z", "");
        service.add_client_job(Request::new(first.clone())).await.unwrap();
        let status = service.add_client_job(Request::new(first)).await.unwrap_err();
        assert_eq!(status.code(), Code::AlreadyExists);
    }
}
