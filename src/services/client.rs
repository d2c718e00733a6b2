use async_trait::async_trait;
use tonic::{Request, Response, Status};

use super::respond;
use crate::models::client::{Client, ClientInput};
use crate::models::page::Page;
use crate::rpc::client_service::{
    self as clientproto, ClientService, ClientWithGuid, DeleteClientResponse, IsUnique, ListClientResponse,
    ListRequest, RefreshRequest, ResponseStatus, UpdatePasswordRequest,
};
use crate::rpc::{format_optional_time, format_time};
use crate::usecase::ClientUseCase;

pub struct ClientGrpc {
    use_case: ClientUseCase,
}

impl ClientGrpc {
    pub fn new(use_case: ClientUseCase) -> Self {
        ClientGrpc { use_case }
    }
}

pub fn to_message(client: &Client) -> clientproto::Client {
    clientproto::Client {
        id: client.id.clone(),
        first_name: client.first_name.clone(),
        last_name: client.last_name.clone(),
        age: client.age,
        gender: client.gender.clone(),
        phone_number: client.phone_number.clone(),
        address: client.address.clone(),
        email: client.email.clone(),
        password: client.password.clone(),
        status: client.status,
        refresh: client.refresh.clone(),
        created_at: format_time(client.created_at),
        updated_at: format_time(client.updated_at),
        deleted_at: format_optional_time(client.deletion.deleted_at()),
    }
}

fn to_input(message: clientproto::Client) -> ClientInput {
    ClientInput {
        first_name: message.first_name,
        last_name: message.last_name,
        age: message.age,
        gender: message.gender,
        phone_number: message.phone_number,
        address: message.address,
        email: message.email,
        password: message.password,
        status: message.status,
        refresh: message.refresh,
    }
}

fn to_list(clients: Vec<Client>) -> ListClientResponse {
    ListClientResponse {
        clients: clients.iter().map(to_message).collect(),
    }
}

#[async_trait]
impl ClientService for ClientGrpc {
    async fn create_client(
        &self,
        request: Request<clientproto::Client>,
    ) -> Result<Response<ClientWithGuid>, Status> {
        let input = to_input(request.into_inner());
        let result = self
            .use_case
            .create_client(input)
            .await
            .map(|client| ClientWithGuid { guid: client.id });
        respond("CreateClient", result)
    }

    async fn update_client(
        &self,
        request: Request<clientproto::Client>,
    ) -> Result<Response<clientproto::Client>, Status> {
        let message = request.into_inner();
        let id = message.id.clone();
        let result = self
            .use_case
            .update_client(&id, to_input(message))
            .await
            .map(|client| to_message(&client));
        respond("UpdateClient", result)
    }

    async fn delete_client(
        &self,
        request: Request<ClientWithGuid>,
    ) -> Result<Response<DeleteClientResponse>, Status> {
        let guid = request.into_inner().guid;
        let result = self
            .use_case
            .delete_client(&guid)
            .await
            .map(|()| DeleteClientResponse { status: true });
        respond("DeleteClient", result)
    }

    async fn get_client(
        &self,
        request: Request<ClientWithGuid>,
    ) -> Result<Response<clientproto::Client>, Status> {
        let guid = request.into_inner().guid;
        let result = self.use_case.get_client(&guid).await.map(|client| to_message(&client));
        respond("GetClient", result)
    }

    async fn get_all_clients(
        &self,
        request: Request<ListRequest>,
    ) -> Result<Response<ListClientResponse>, Status> {
        let ListRequest { page, limit } = request.into_inner();
        let result = self.use_case.get_all_clients(Page::new(page, limit)).await.map(to_list);
        respond("GetAllClients", result)
    }

    async fn get_all_deleted_clients(
        &self,
        request: Request<ListRequest>,
    ) -> Result<Response<ListClientResponse>, Status> {
        let ListRequest { page, limit } = request.into_inner();
        let result = self
            .use_case
            .get_all_deleted_clients(Page::new(page, limit))
            .await
            .map(to_list);
        respond("GetAllDeletedClients", result)
    }

    async fn get_all_hidden_clients(
        &self,
        request: Request<ListRequest>,
    ) -> Result<Response<ListClientResponse>, Status> {
        let ListRequest { page, limit } = request.into_inner();
        let result = self
            .use_case
            .get_all_hidden_clients(Page::new(page, limit))
            .await
            .map(to_list);
        respond("GetAllHiddenClients", result)
    }

    async fn unique_email(&self, request: Request<IsUnique>) -> Result<Response<ResponseStatus>, Status> {
        let email = request.into_inner().email;
        let result = self
            .use_case
            .unique_email(&email)
            .await
            .map(|status| ResponseStatus { status });
        respond("UniqueEmail", result)
    }

    async fn update_refresh(
        &self,
        request: Request<RefreshRequest>,
    ) -> Result<Response<ResponseStatus>, Status> {
        let RefreshRequest { client_id, refresh_token } = request.into_inner();
        let result = self
            .use_case
            .update_refresh(&client_id, &refresh_token)
            .await
            .map(|status| ResponseStatus { status });
        respond("UpdateRefresh", result)
    }

    async fn update_password(
        &self,
        request: Request<UpdatePasswordRequest>,
    ) -> Result<Response<ResponseStatus>, Status> {
        let UpdatePasswordRequest { client_id, new_password } = request.into_inner();
        let result = self
            .use_case
            .update_password(&client_id, &new_password)
            .await
            .map(|status| ResponseStatus { status });
        respond("UpdatePassword", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryClientRepository;
    use std::sync::Arc;
    use std::time::Duration;
    use tonic::Code;

    fn service() -> ClientGrpc {
        let repo = Arc::new(MemoryClientRepository::new());
        ClientGrpc::new(ClientUseCase::new(Duration::from_secs(5), repo))
    }

    fn message(email: &str) -> clientproto::Client {
        clientproto::Client {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            age: 30,
            email: email.into(),
            password: "secret".into(),
            status: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_client_reads_back_with_timestamps() {
        let service = service();
        let guid = service
            .create_client(Request::new(message("a@x.com")))
            .await
            .unwrap()
            .into_inner();

        let fetched = service.get_client(Request::new(guid.clone())).await.unwrap().into_inner();
        assert_eq!(fetched.id, guid.guid);
        assert_eq!(fetched.age, 30);
        assert_eq!(fetched.email, "a@x.com");
        assert_ne!(fetched.password, "secret");
        assert!(fetched.created_at.ends_with('Z'));
        assert_eq!(fetched.deleted_at, "");
    }

    #[tokio::test]
    async fn missing_rows_are_not_found_on_the_wire() {
        let service = service();
        let guid = ClientWithGuid { guid: "nope".into() };
        let status = service.delete_client(Request::new(guid.clone())).await.unwrap_err();
        assert_eq!(status.code(), Code::NotFound);

        let status = service.get_client(Request::new(guid)).await.unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn deleted_listing_carries_deletion_time() {
        let service = service();
        let guid = service
            .create_client(Request::new(message("b@x.com")))
            .await
            .unwrap()
            .into_inner();
        service.delete_client(Request::new(guid)).await.unwrap();

        let list = ListRequest { page: 1, limit: 10 };
        let deleted = service
            .get_all_deleted_clients(Request::new(list.clone()))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(deleted.clients.len(), 1);
        assert!(!deleted.clients[0].deleted_at.is_empty());

        let live = service.get_all_clients(Request::new(list)).await.unwrap().into_inner();
        assert!(live.clients.is_empty());
    }
}
