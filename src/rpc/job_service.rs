//! `clientjob.job.JobService`: messages, server and client.

use tonic::codegen::*;
use tonic::transport::Channel;
use tonic::{Request, Response, Status};

use super::{unary, unimplemented};

pub const SERVICE_NAME: &str = "clientjob.job.JobService";

#[derive(Clone, PartialEq, prost::Message)]
pub struct Job {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(float, tag = "3")]
    pub salary: f32,
    #[prost(string, tag = "4")]
    pub level: String,
    #[prost(string, tag = "5")]
    pub location_type: String,
    #[prost(string, tag = "6")]
    pub employment_type: String,
    #[prost(string, tag = "7")]
    pub address: String,
    #[prost(string, tag = "8")]
    pub company: String,
    #[prost(string, tag = "9")]
    pub created_at: String,
    #[prost(string, tag = "10")]
    pub updated_at: String,
    #[prost(string, tag = "11")]
    pub deleted_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct JobWithGuid {
    #[prost(string, tag = "1")]
    pub job_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResponseStatus {
    #[prost(bool, tag = "1")]
    pub status: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListRequest {
    #[prost(uint64, tag = "1")]
    pub page: u64,
    #[prost(uint64, tag = "2")]
    pub limit: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListJobResponse {
    #[prost(message, repeated, tag = "1")]
    pub jobs: Vec<Job>,
}

/// One association row; also the request for add/remove.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ClientJob {
    #[prost(string, tag = "1")]
    pub client_id: String,
    #[prost(string, tag = "2")]
    pub job_id: String,
    #[prost(string, tag = "3")]
    pub start_date: String,
    #[prost(string, tag = "4")]
    pub end_date: String,
    #[prost(string, tag = "5")]
    pub created_at: String,
    #[prost(string, tag = "6")]
    pub updated_at: String,
}

/// `id` is a client id for `GetClientJobs` and a job id for `GetJobClients`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ClientJobRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(uint64, tag = "2")]
    pub page: u64,
    #[prost(uint64, tag = "3")]
    pub limit: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListClientJobResponse {
    #[prost(message, repeated, tag = "1")]
    pub client_jobs: Vec<ClientJob>,
}

#[async_trait::async_trait]
pub trait JobService: Send + Sync + 'static {
    async fn create_job(&self, request: Request<Job>) -> Result<Response<JobWithGuid>, Status>;

    async fn update_job(&self, request: Request<Job>) -> Result<Response<Job>, Status>;

    async fn delete_job(&self, request: Request<JobWithGuid>) -> Result<Response<ResponseStatus>, Status>;

    async fn get_job(&self, request: Request<JobWithGuid>) -> Result<Response<Job>, Status>;

    async fn get_all_jobs(&self, request: Request<ListRequest>) -> Result<Response<ListJobResponse>, Status>;

    async fn get_all_deleted_jobs(
        &self,
        request: Request<ListRequest>,
    ) -> Result<Response<ListJobResponse>, Status>;

    async fn add_client_job(&self, request: Request<ClientJob>) -> Result<Response<ResponseStatus>, Status>;

    async fn delete_client_job(
        &self,
        request: Request<ClientJob>,
    ) -> Result<Response<ResponseStatus>, Status>;

    async fn get_client_jobs(
        &self,
        request: Request<ClientJobRequest>,
    ) -> Result<Response<ListClientJobResponse>, Status>;

    async fn get_job_clients(
        &self,
        request: Request<ClientJobRequest>,
    ) -> Result<Response<ListClientJobResponse>, Status>;
}

#[derive(Debug)]
pub struct JobServiceServer<T: JobService> {
    inner: Arc<T>,
}

impl<T: JobService> JobServiceServer<T> {
    pub fn new(inner: T) -> Self {
        Self::from_arc(Arc::new(inner))
    }

    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T: JobService> Clone for JobServiceServer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, B> Service<http::Request<B>> for JobServiceServer<T>
where
    T: JobService,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = std::convert::Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = Arc::clone(&self.inner);
        match req.uri().path() {
            "/clientjob.job.JobService/CreateJob" => {
                unary_route!(JobService, inner, req, create_job, Job, JobWithGuid)
            }
            "/clientjob.job.JobService/UpdateJob" => {
                unary_route!(JobService, inner, req, update_job, Job, Job)
            }
            "/clientjob.job.JobService/DeleteJob" => {
                unary_route!(JobService, inner, req, delete_job, JobWithGuid, ResponseStatus)
            }
            "/clientjob.job.JobService/GetJob" => {
                unary_route!(JobService, inner, req, get_job, JobWithGuid, Job)
            }
            "/clientjob.job.JobService/GetAllJobs" => {
                unary_route!(JobService, inner, req, get_all_jobs, ListRequest, ListJobResponse)
            }
            "/clientjob.job.JobService/GetAllDeletedJobs" => unary_route!(
                JobService,
                inner,
                req,
                get_all_deleted_jobs,
                ListRequest,
                ListJobResponse
            ),
            "/clientjob.job.JobService/AddClientJob" => {
                unary_route!(JobService, inner, req, add_client_job, ClientJob, ResponseStatus)
            }
            "/clientjob.job.JobService/DeleteClientJob" => {
                unary_route!(JobService, inner, req, delete_client_job, ClientJob, ResponseStatus)
            }
            "/clientjob.job.JobService/GetClientJobs" => unary_route!(
                JobService,
                inner,
                req,
                get_client_jobs,
                ClientJobRequest,
                ListClientJobResponse
            ),
            "/clientjob.job.JobService/GetJobClients" => unary_route!(
                JobService,
                inner,
                req,
                get_job_clients,
                ClientJobRequest,
                ListClientJobResponse
            ),
            _ => Box::pin(async move { Ok(unimplemented()) }),
        }
    }
}

impl<T: JobService> tonic::server::NamedService for JobServiceServer<T> {
    const NAME: &'static str = SERVICE_NAME;
}

#[derive(Debug, Clone)]
pub struct JobServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl JobServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn create_job(
        &mut self,
        request: impl tonic::IntoRequest<Job>,
    ) -> Result<Response<JobWithGuid>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "CreateJob",
            "/clientjob.job.JobService/CreateJob",
        )
        .await
    }

    pub async fn update_job(&mut self, request: impl tonic::IntoRequest<Job>) -> Result<Response<Job>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "UpdateJob",
            "/clientjob.job.JobService/UpdateJob",
        )
        .await
    }

    pub async fn delete_job(
        &mut self,
        request: impl tonic::IntoRequest<JobWithGuid>,
    ) -> Result<Response<ResponseStatus>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "DeleteJob",
            "/clientjob.job.JobService/DeleteJob",
        )
        .await
    }

    pub async fn get_job(
        &mut self,
        request: impl tonic::IntoRequest<JobWithGuid>,
    ) -> Result<Response<Job>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "GetJob",
            "/clientjob.job.JobService/GetJob",
        )
        .await
    }

    pub async fn get_all_jobs(
        &mut self,
        request: impl tonic::IntoRequest<ListRequest>,
    ) -> Result<Response<ListJobResponse>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "GetAllJobs",
            "/clientjob.job.JobService/GetAllJobs",
        )
        .await
    }

    pub async fn get_all_deleted_jobs(
        &mut self,
        request: impl tonic::IntoRequest<ListRequest>,
    ) -> Result<Response<ListJobResponse>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "GetAllDeletedJobs",
            "/clientjob.job.JobService/GetAllDeletedJobs",
        )
        .await
    }

    pub async fn add_client_job(
        &mut self,
        request: impl tonic::IntoRequest<ClientJob>,
    ) -> Result<Response<ResponseStatus>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "AddClientJob",
            "/clientjob.job.JobService/AddClientJob",
        )
        .await
    }

    pub async fn delete_client_job(
        &mut self,
        request: impl tonic::IntoRequest<ClientJob>,
    ) -> Result<Response<ResponseStatus>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "DeleteClientJob",
            "/clientjob.job.JobService/DeleteClientJob",
        )
        .await
    }

    pub async fn get_client_jobs(
        &mut self,
        request: impl tonic::IntoRequest<ClientJobRequest>,
    ) -> Result<Response<ListClientJobResponse>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "GetClientJobs",
            "/clientjob.job.JobService/GetClientJobs",
        )
        .await
    }

    pub async fn get_job_clients(
        &mut self,
        request: impl tonic::IntoRequest<ClientJobRequest>,
    ) -> Result<Response<ListClientJobResponse>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "GetJobClients",
            "/clientjob.job.JobService/GetJobClients",
        )
        .await
    }
}
