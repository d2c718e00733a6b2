//! `clientjob.client.ClientService`: messages, server and client.

use tonic::codegen::*;
use tonic::transport::Channel;
use tonic::{Request, Response, Status};

use super::{unary, unimplemented};

pub const SERVICE_NAME: &str = "clientjob.client.ClientService";

#[derive(Clone, PartialEq, prost::Message)]
pub struct Client {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub first_name: String,
    #[prost(string, tag = "3")]
    pub last_name: String,
    #[prost(uint32, tag = "4")]
    pub age: u32,
    #[prost(string, tag = "5")]
    pub gender: String,
    #[prost(string, tag = "6")]
    pub phone_number: String,
    #[prost(string, tag = "7")]
    pub address: String,
    #[prost(string, tag = "8")]
    pub email: String,
    #[prost(string, tag = "9")]
    pub password: String,
    #[prost(bool, tag = "10")]
    pub status: bool,
    #[prost(string, tag = "11")]
    pub refresh: String,
    #[prost(string, tag = "12")]
    pub created_at: String,
    #[prost(string, tag = "13")]
    pub updated_at: String,
    #[prost(string, tag = "14")]
    pub deleted_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ClientWithGuid {
    #[prost(string, tag = "1")]
    pub guid: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteClientResponse {
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
pub struct ListClientResponse {
    #[prost(message, repeated, tag = "1")]
    pub clients: Vec<Client>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct IsUnique {
    #[prost(string, tag = "1")]
    pub email: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResponseStatus {
    #[prost(bool, tag = "1")]
    pub status: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RefreshRequest {
    #[prost(string, tag = "1")]
    pub client_id: String,
    #[prost(string, tag = "2")]
    pub refresh_token: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdatePasswordRequest {
    #[prost(string, tag = "1")]
    pub client_id: String,
    #[prost(string, tag = "2")]
    pub new_password: String,
}

#[async_trait::async_trait]
pub trait ClientService: Send + Sync + 'static {
    async fn create_client(&self, request: Request<Client>) -> Result<Response<ClientWithGuid>, Status>;

    async fn update_client(&self, request: Request<Client>) -> Result<Response<Client>, Status>;

    async fn delete_client(
        &self,
        request: Request<ClientWithGuid>,
    ) -> Result<Response<DeleteClientResponse>, Status>;

    async fn get_client(&self, request: Request<ClientWithGuid>) -> Result<Response<Client>, Status>;

    async fn get_all_clients(
        &self,
        request: Request<ListRequest>,
    ) -> Result<Response<ListClientResponse>, Status>;

    async fn get_all_deleted_clients(
        &self,
        request: Request<ListRequest>,
    ) -> Result<Response<ListClientResponse>, Status>;

    async fn get_all_hidden_clients(
        &self,
        request: Request<ListRequest>,
    ) -> Result<Response<ListClientResponse>, Status>;

    async fn unique_email(&self, request: Request<IsUnique>) -> Result<Response<ResponseStatus>, Status>;

    async fn update_refresh(
        &self,
        request: Request<RefreshRequest>,
    ) -> Result<Response<ResponseStatus>, Status>;

    async fn update_password(
        &self,
        request: Request<UpdatePasswordRequest>,
    ) -> Result<Response<ResponseStatus>, Status>;
}

#[derive(Debug)]
pub struct ClientServiceServer<T: ClientService> {
    inner: Arc<T>,
}

impl<T: ClientService> ClientServiceServer<T> {
    pub fn new(inner: T) -> Self {
        Self::from_arc(Arc::new(inner))
    }

    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T: ClientService> Clone for ClientServiceServer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, B> Service<http::Request<B>> for ClientServiceServer<T>
where
    T: ClientService,
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
            "/clientjob.client.ClientService/CreateClient" => {
                unary_route!(ClientService, inner, req, create_client, Client, ClientWithGuid)
            }
            "/clientjob.client.ClientService/UpdateClient" => {
                unary_route!(ClientService, inner, req, update_client, Client, Client)
            }
            "/clientjob.client.ClientService/DeleteClient" => unary_route!(
                ClientService,
                inner,
                req,
                delete_client,
                ClientWithGuid,
                DeleteClientResponse
            ),
            "/clientjob.client.ClientService/GetClient" => {
                unary_route!(ClientService, inner, req, get_client, ClientWithGuid, Client)
            }
            "/clientjob.client.ClientService/GetAllClients" => unary_route!(
                ClientService,
                inner,
                req,
                get_all_clients,
                ListRequest,
                ListClientResponse
            ),
            "/clientjob.client.ClientService/GetAllDeletedClients" => unary_route!(
                ClientService,
                inner,
                req,
                get_all_deleted_clients,
                ListRequest,
                ListClientResponse
            ),
            "/clientjob.client.ClientService/GetAllHiddenClients" => unary_route!(
                ClientService,
                inner,
                req,
                get_all_hidden_clients,
                ListRequest,
                ListClientResponse
            ),
            "/clientjob.client.ClientService/UniqueEmail" => {
                unary_route!(ClientService, inner, req, unique_email, IsUnique, ResponseStatus)
            }
            "/clientjob.client.ClientService/UpdateRefresh" => unary_route!(
                ClientService,
                inner,
                req,
                update_refresh,
                RefreshRequest,
                ResponseStatus
            ),
            "/clientjob.client.ClientService/UpdatePassword" => unary_route!(
                ClientService,
                inner,
                req,
                update_password,
                UpdatePasswordRequest,
                ResponseStatus
            ),
            _ => Box::pin(async move { Ok(unimplemented()) }),
        }
    }
}

impl<T: ClientService> tonic::server::NamedService for ClientServiceServer<T> {
    const NAME: &'static str = SERVICE_NAME;
}

/// Typed stub over a shared [`Channel`]; cloning is cheap.
#[derive(Debug, Clone)]
pub struct ClientServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl ClientServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn create_client(
        &mut self,
        request: impl tonic::IntoRequest<Client>,
    ) -> Result<Response<ClientWithGuid>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "CreateClient",
            "/clientjob.client.ClientService/CreateClient",
        )
        .await
    }

    pub async fn update_client(
        &mut self,
        request: impl tonic::IntoRequest<Client>,
    ) -> Result<Response<Client>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "UpdateClient",
            "/clientjob.client.ClientService/UpdateClient",
        )
        .await
    }

    pub async fn delete_client(
        &mut self,
        request: impl tonic::IntoRequest<ClientWithGuid>,
    ) -> Result<Response<DeleteClientResponse>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "DeleteClient",
            "/clientjob.client.ClientService/DeleteClient",
        )
        .await
    }

    pub async fn get_client(
        &mut self,
        request: impl tonic::IntoRequest<ClientWithGuid>,
    ) -> Result<Response<Client>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "GetClient",
            "/clientjob.client.ClientService/GetClient",
        )
        .await
    }

    pub async fn get_all_clients(
        &mut self,
        request: impl tonic::IntoRequest<ListRequest>,
    ) -> Result<Response<ListClientResponse>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "GetAllClients",
            "/clientjob.client.ClientService/GetAllClients",
        )
        .await
    }

    pub async fn get_all_deleted_clients(
        &mut self,
        request: impl tonic::IntoRequest<ListRequest>,
    ) -> Result<Response<ListClientResponse>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "GetAllDeletedClients",
            "/clientjob.client.ClientService/GetAllDeletedClients",
        )
        .await
    }

    pub async fn get_all_hidden_clients(
        &mut self,
        request: impl tonic::IntoRequest<ListRequest>,
    ) -> Result<Response<ListClientResponse>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "GetAllHiddenClients",
            "/clientjob.client.ClientService/GetAllHiddenClients",
        )
        .await
    }

    pub async fn unique_email(
        &mut self,
        request: impl tonic::IntoRequest<IsUnique>,
    ) -> Result<Response<ResponseStatus>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "UniqueEmail",
            "/clientjob.client.ClientService/UniqueEmail",
        )
        .await
    }

    pub async fn update_refresh(
        &mut self,
        request: impl tonic::IntoRequest<RefreshRequest>,
    ) -> Result<Response<ResponseStatus>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "UpdateRefresh",
            "/clientjob.client.ClientService/UpdateRefresh",
        )
        .await
    }

    pub async fn update_password(
        &mut self,
        request: impl tonic::IntoRequest<UpdatePasswordRequest>,
    ) -> Result<Response<ResponseStatus>, Status> {
        unary(
            &mut self.inner,
            request.into_request(),
            SERVICE_NAME,
            "UpdatePassword",
            "/clientjob.client.ClientService/UpdatePassword",
        )
        .await
    }
}
