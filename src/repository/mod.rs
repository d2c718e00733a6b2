use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::client::{Client, ClientInput};
use crate::models::client_job::ClientJob;
use crate::models::deletion::Liveness;
use crate::models::job::{Job, JobInput};
use crate::models::page::Page;

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Storage for the `clients` table. Every "zero rows affected" outcome is `AppError::NotFound`.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create_client(&self, client: &Client) -> Result<(), AppError>;

    /// Rewrites the mutable fields of a live client and returns the stored row.
    async fn update_client(
        &self,
        id: &str,
        input: &ClientInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Client, AppError>;

    /// Sets `deleted_at`; fails when the client is absent or already deleted.
    async fn delete_client(&self, id: &str, deleted_at: DateTime<Utc>) -> Result<(), AppError>;

    async fn get_client(&self, id: &str) -> Result<Client, AppError>;

    async fn list_clients(&self, liveness: Liveness, page: Page) -> Result<Vec<Client>, AppError>;

    /// Clients with `status = false`, whatever their deletion state.
    async fn list_hidden_clients(&self, page: Page) -> Result<Vec<Client>, AppError>;

    /// True iff a live client already uses `email`.
    async fn email_in_use(&self, email: &str) -> Result<bool, AppError>;

    async fn update_refresh(
        &self,
        id: &str,
        refresh: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;
}

/// Storage for the `jobs` and `client_jobs` tables.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create_job(&self, job: &Job) -> Result<(), AppError>;

    async fn update_job(
        &self,
        id: &str,
        input: &JobInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Job, AppError>;

    async fn delete_job(&self, id: &str, deleted_at: DateTime<Utc>) -> Result<(), AppError>;

    async fn get_job(&self, id: &str) -> Result<Job, AppError>;

    async fn list_jobs(&self, liveness: Liveness, page: Page) -> Result<Vec<Job>, AppError>;

    async fn add_client_job(&self, client_job: &ClientJob) -> Result<bool, AppError>;

    async fn delete_client_job(
        &self,
        client_id: &str,
        job_id: &str,
        deleted_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Live association rows of one client.
    async fn client_jobs(&self, client_id: &str, page: Page) -> Result<Vec<ClientJob>, AppError>;

    /// Live association rows of one job.
    async fn job_clients(&self, job_id: &str, page: Page) -> Result<Vec<ClientJob>, AppError>;
}
