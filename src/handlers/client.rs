use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use super::{rpc, GatewayState, ListQuery};
use crate::errors::AppError;
use crate::rpc::client_service::{
    self as clientproto, ClientWithGuid, IsUnique, ListClientResponse, ListRequest, RefreshRequest,
    UpdatePasswordRequest,
};
use crate::utils::timeout::within;
use crate::utils::validation::validate_payload;

#[derive(Debug, Deserialize, Validate)]
pub struct ClientBody {
    #[serde(default)]
    id: String,
    #[validate(length(min = 1, max = 64))]
    first_name: String,
    #[validate(length(min = 1, max = 64))]
    last_name: String,
    #[serde(default)]
    age: u64,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    phone_number: String,
    #[serde(default)]
    address: String,
    #[validate(email)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    status: bool,
    #[serde(default)]
    refresh: String,
}

impl ClientBody {
    fn into_message(self) -> Result<clientproto::Client, AppError> {
        let age = u32::try_from(self.age)
            .map_err(|_| AppError::BadRequest(format!("age {} is out of range", self.age)))?;
        Ok(clientproto::Client {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            age,
            gender: self.gender,
            phone_number: self.phone_number,
            address: self.address,
            email: self.email,
            password: self.password,
            status: self.status,
            refresh: self.refresh,
            ..Default::default()
        })
    }
}

/// Client as the gateway returns it; the password hash stays behind.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u64,
    pub gender: String,
    pub phone_number: String,
    pub address: String,
    pub email: String,
    pub status: bool,
    pub refresh: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<clientproto::Client> for ClientResponse {
    fn from(client: clientproto::Client) -> Self {
        ClientResponse {
            id: client.id,
            first_name: client.first_name,
            last_name: client.last_name,
            age: u64::from(client.age),
            gender: client.gender,
            phone_number: client.phone_number,
            address: client.address,
            email: client.email,
            status: client.status,
            refresh: client.refresh,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct ClientListResponse {
    clients: Vec<ClientResponse>,
}

impl From<ListClientResponse> for ClientListResponse {
    fn from(list: ListClientResponse) -> Self {
        ClientListResponse {
            clients: list.clients.into_iter().map(ClientResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UniqueEmailBody {
    #[validate(email)]
    email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshBody {
    #[validate(length(min = 1))]
    client_id: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PasswordBody {
    #[validate(length(min = 1))]
    client_id: String,
    #[validate(length(min = 1))]
    new_password: String,
}

pub async fn create_client(
    state: web::Data<GatewayState>,
    body: web::Json<ClientBody>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*body)?;
    let deadline = state.deadline()?;
    let message = body.into_inner().into_message()?;
    let mut clients = state.services.client.clone();

    let created = within(deadline, "CreateClient", async {
        let taken = rpc(clients.unique_email(IsUnique { email: message.email.clone() }).await)?;
        if taken.status {
            return Err(AppError::Conflict(format!("email {} is already in use", message.email)));
        }
        rpc(clients.create_client(message).await)
    })
    .await?;

    Ok(HttpResponse::Created().json(json!({ "id": created.guid })))
}

pub async fn update_client(
    state: web::Data<GatewayState>,
    body: web::Json<ClientBody>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*body)?;
    if body.id.is_empty() {
        return Err(AppError::BadRequest("id is required".to_string()));
    }
    let deadline = state.deadline()?;
    let message = body.into_inner().into_message()?;
    let mut clients = state.services.client.clone();

    let updated = within(deadline, "UpdateClient", async {
        rpc(clients.update_client(message).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ClientResponse::from(updated)))
}

pub async fn delete_client(
    state: web::Data<GatewayState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deadline = state.deadline()?;
    let guid = path.into_inner();
    let mut clients = state.services.client.clone();

    let deleted = within(deadline, "DeleteClient", async {
        rpc(clients.delete_client(ClientWithGuid { guid }).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "status": deleted.status })))
}

pub async fn get_client(
    state: web::Data<GatewayState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deadline = state.deadline()?;
    let guid = path.into_inner();
    let mut clients = state.services.client.clone();

    let client = within(deadline, "GetClient", async {
        rpc(clients.get_client(ClientWithGuid { guid }).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ClientResponse::from(client)))
}

pub async fn get_all_clients(
    state: web::Data<GatewayState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let deadline = state.deadline()?;
    let (page, limit) = query.page_and_limit()?;
    let mut clients = state.services.client.clone();

    let list = within(deadline, "GetAllClients", async {
        rpc(clients.get_all_clients(ListRequest { page, limit }).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ClientListResponse::from(list)))
}

pub async fn get_all_deleted_clients(
    state: web::Data<GatewayState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let deadline = state.deadline()?;
    let (page, limit) = query.page_and_limit()?;
    let mut clients = state.services.client.clone();

    let list = within(deadline, "GetAllDeletedClients", async {
        rpc(clients.get_all_deleted_clients(ListRequest { page, limit }).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ClientListResponse::from(list)))
}

pub async fn get_all_hidden_clients(
    state: web::Data<GatewayState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let deadline = state.deadline()?;
    let (page, limit) = query.page_and_limit()?;
    let mut clients = state.services.client.clone();

    let list = within(deadline, "GetAllHiddenClients", async {
        rpc(clients.get_all_hidden_clients(ListRequest { page, limit }).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ClientListResponse::from(list)))
}

pub async fn unique_email(
    state: web::Data<GatewayState>,
    body: web::Json<UniqueEmailBody>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*body)?;
    let deadline = state.deadline()?;
    let email = body.into_inner().email;
    let mut clients = state.services.client.clone();

    let unique = within(deadline, "UniqueEmail", async {
        rpc(clients.unique_email(IsUnique { email }).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "status": unique.status })))
}

pub async fn update_refresh(
    state: web::Data<GatewayState>,
    body: web::Json<RefreshBody>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*body)?;
    let deadline = state.deadline()?;
    let RefreshBody { client_id, refresh_token } = body.into_inner();
    let mut clients = state.services.client.clone();

    let updated = within(deadline, "UpdateRefresh", async {
        let request = RefreshRequest { client_id, refresh_token };
        rpc(clients.update_refresh(request).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "status": updated.status })))
}

pub async fn update_password(
    state: web::Data<GatewayState>,
    body: web::Json<PasswordBody>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*body)?;
    let deadline = state.deadline()?;
    let PasswordBody { client_id, new_password } = body.into_inner();
    let mut clients = state.services.client.clone();

    let updated = within(deadline, "UpdatePassword", async {
        let request = UpdatePasswordRequest { client_id, new_password };
        rpc(clients.update_password(request).await)
    })
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "status": updated.status })))
}
