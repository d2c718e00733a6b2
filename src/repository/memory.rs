//! In-process stand-ins for the Postgres repositories, used by tests.
//!
//! Rows keep insertion order, deletion only sets `deleted_at`, and the
//! partial unique index on live `(client_id, job_id)` pairs is honoured.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::client::{Client, ClientInput};
use crate::models::client_job::ClientJob;
use crate::models::deletion::{Deletion, Liveness};
use crate::models::job::{Job, JobInput};
use crate::models::page::Page;
use crate::repository::{ClientRepository, JobRepository};

fn no_rows() -> AppError {
    AppError::NotFound("no sql rows".to_string())
}

fn locked<T>(rows: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct MemoryClientRepository {
    rows: Mutex<Vec<Client>>,
}

impl MemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row, deleted ones included.
    pub fn all(&self) -> Vec<Client> {
        locked(&self.rows).clone()
    }

    fn with_live<T>(&self, id: &str, f: impl FnOnce(&mut Client) -> T) -> Result<T, AppError> {
        let mut rows = locked(&self.rows);
        rows.iter_mut()
            .find(|client| client.id == id && !client.deletion.is_deleted())
            .map(f)
            .ok_or_else(no_rows)
    }
}

#[async_trait]
impl ClientRepository for MemoryClientRepository {
    async fn create_client(&self, client: &Client) -> Result<(), AppError> {
        let mut rows = locked(&self.rows);
        if rows.iter().any(|row| row.id == client.id) {
            return Err(AppError::Conflict(format!("duplicate id {}", client.id)));
        }
        rows.push(client.clone());
        Ok(())
    }

    async fn update_client(
        &self,
        id: &str,
        input: &ClientInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Client, AppError> {
        self.with_live(id, |client| {
            client.apply(input, updated_at);
            client.clone()
        })
    }

    async fn delete_client(&self, id: &str, deleted_at: DateTime<Utc>) -> Result<(), AppError> {
        self.with_live(id, |client| client.deletion = Deletion::Deleted { at: deleted_at })
    }

    async fn get_client(&self, id: &str) -> Result<Client, AppError> {
        self.with_live(id, |client| client.clone())
            .map_err(|_| AppError::NotFound(format!("client {} not found", id)))
    }

    async fn list_clients(&self, liveness: Liveness, page: Page) -> Result<Vec<Client>, AppError> {
        let matching: Vec<Client> = locked(&self.rows)
            .iter()
            .filter(|client| liveness.matches(&client.deletion))
            .cloned()
            .collect();
        Ok(page.slice(&matching))
    }

    async fn list_hidden_clients(&self, page: Page) -> Result<Vec<Client>, AppError> {
        let matching: Vec<Client> = locked(&self.rows)
            .iter()
            .filter(|client| !client.status)
            .cloned()
            .collect();
        Ok(page.slice(&matching))
    }

    async fn email_in_use(&self, email: &str) -> Result<bool, AppError> {
        Ok(locked(&self.rows)
            .iter()
            .any(|client| client.email == email && !client.deletion.is_deleted()))
    }

    async fn update_refresh(
        &self,
        id: &str,
        refresh: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        self.with_live(id, |client| {
            client.refresh = refresh.to_string();
            client.updated_at = updated_at;
            true
        })
    }

    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        self.with_live(id, |client| {
            client.password = password_hash.to_string();
            client.updated_at = updated_at;
            true
        })
    }
}

#[derive(Default)]
pub struct MemoryJobRepository {
    jobs: Mutex<Vec<Job>>,
    client_jobs: Mutex<Vec<ClientJob>>,
}

impl MemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every association row, removed ones included.
    pub fn all_client_jobs(&self) -> Vec<ClientJob> {
        locked(&self.client_jobs).clone()
    }

    fn live_jobs_by(&self, keep: impl Fn(&ClientJob) -> bool, page: Page) -> Vec<ClientJob> {
        let matching: Vec<ClientJob> = locked(&self.client_jobs)
            .iter()
            .filter(|row| !row.deletion.is_deleted() && keep(row))
            .cloned()
            .collect();
        page.slice(&matching)
    }
}

#[async_trait]
impl JobRepository for MemoryJobRepository {
    async fn create_job(&self, job: &Job) -> Result<(), AppError> {
        let mut jobs = locked(&self.jobs);
        if jobs.iter().any(|row| row.id == job.id) {
            return Err(AppError::Conflict(format!("duplicate id {}", job.id)));
        }
        jobs.push(job.clone());
        Ok(())
    }

    async fn update_job(
        &self,
        id: &str,
        input: &JobInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Job, AppError> {
        locked(&self.jobs)
            .iter_mut()
            .find(|job| job.id == id && !job.deletion.is_deleted())
            .map(|job| {
                job.apply(input, updated_at);
                job.clone()
            })
            .ok_or_else(no_rows)
    }

    async fn delete_job(&self, id: &str, deleted_at: DateTime<Utc>) -> Result<(), AppError> {
        locked(&self.jobs)
            .iter_mut()
            .find(|job| job.id == id && !job.deletion.is_deleted())
            .map(|job| job.deletion = Deletion::Deleted { at: deleted_at })
            .ok_or_else(no_rows)
    }

    async fn get_job(&self, id: &str) -> Result<Job, AppError> {
        locked(&self.jobs)
            .iter()
            .find(|job| job.id == id && !job.deletion.is_deleted())
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("job {} not found", id)))
    }

    async fn list_jobs(&self, liveness: Liveness, page: Page) -> Result<Vec<Job>, AppError> {
        let matching: Vec<Job> = locked(&self.jobs)
            .iter()
            .filter(|job| liveness.matches(&job.deletion))
            .cloned()
            .collect();
        Ok(page.slice(&matching))
    }

    async fn add_client_job(&self, client_job: &ClientJob) -> Result<bool, AppError> {
        let mut rows = locked(&self.client_jobs);
        let duplicate = rows.iter().any(|row| {
            row.client_id == client_job.client_id
                && row.job_id == client_job.job_id
                && !row.deletion.is_deleted()
        });
        if duplicate {
            return Err(AppError::Conflict(
                "duplicate key value violates unique constraint \"client_jobs_live_pair_idx\"".to_string(),
            ));
        }
        rows.push(client_job.clone());
        Ok(true)
    }

    async fn delete_client_job(
        &self,
        client_id: &str,
        job_id: &str,
        deleted_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut affected = 0;
        for row in locked(&self.client_jobs).iter_mut() {
            if row.client_id == client_id && row.job_id == job_id && !row.deletion.is_deleted() {
                row.deletion = Deletion::Deleted { at: deleted_at };
                row.updated_at = deleted_at;
                affected += 1;
            }
        }
        if affected == 0 {
            return Err(no_rows());
        }
        Ok(())
    }

    async fn client_jobs(&self, client_id: &str, page: Page) -> Result<Vec<ClientJob>, AppError> {
        Ok(self.live_jobs_by(|row| row.client_id == client_id, page))
    }

    async fn job_clients(&self, job_id: &str, page: Page) -> Result<Vec<ClientJob>, AppError> {
        Ok(self.live_jobs_by(|row| row.job_id == job_id, page))
    }
}
