use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::push_page;
use crate::errors::AppError;
use crate::models::client_job::{ClientJob, ClientJobRow};
use crate::models::deletion::Liveness;
use crate::models::job::{Job, JobInput, JobRow};
use crate::models::page::Page;
use crate::repository::JobRepository;

const JOB_COLUMNS: &str = "id, name, salary, level, location_type, employment_type, address, \
     company, created_at, updated_at, deleted_at";
const CLIENT_JOB_COLUMNS: &str =
    "client_id, job_id, start_date, end_date, created_at, updated_at, deleted_at";

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        PgJobRepository { pool }
    }

    fn select_jobs<'a>() -> QueryBuilder<'a, Postgres> {
        QueryBuilder::new(format!("SELECT {} FROM jobs", JOB_COLUMNS))
    }

    fn select_client_jobs<'a>() -> QueryBuilder<'a, Postgres> {
        QueryBuilder::new(format!("SELECT {} FROM client_jobs", CLIENT_JOB_COLUMNS))
    }

    /// Live association rows where `column` equals `id`.
    async fn associations(
        &self,
        column: &'static str,
        id: &str,
        page: Page,
    ) -> Result<Vec<ClientJob>, AppError> {
        let mut query = Self::select_client_jobs();
        query.push(" WHERE ").push(column).push(" = ").push_bind(id);
        query.push(" AND ").push(Liveness::Active.predicate());
        push_page(&mut query, page);

        let rows = query
            .build_query_as::<ClientJobRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ClientJob::from).collect())
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn create_job(&self, job: &Job) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO jobs (id, name, salary, level, location_type, employment_type, address, \
             company, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&job.id)
        .bind(&job.name)
        .bind(job.salary)
        .bind(&job.level)
        .bind(&job.location_type)
        .bind(&job.employment_type)
        .bind(&job.address)
        .bind(&job.company)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_job(
        &self,
        id: &str,
        input: &JobInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Job, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE jobs SET ");
        let mut separated = query.separated(", ");
        separated.push("name = ").push_bind_unseparated(&input.name);
        separated.push("salary = ").push_bind_unseparated(input.salary);
        separated.push("level = ").push_bind_unseparated(&input.level);
        separated.push("location_type = ").push_bind_unseparated(&input.location_type);
        separated.push("employment_type = ").push_bind_unseparated(&input.employment_type);
        separated.push("address = ").push_bind_unseparated(&input.address);
        separated.push("company = ").push_bind_unseparated(&input.company);
        separated.push("updated_at = ").push_bind_unseparated(updated_at);
        query.push(" WHERE id = ").push_bind(id);
        query.push(" AND ").push(Liveness::Active.predicate());
        query.push(" RETURNING ").push(JOB_COLUMNS);

        query
            .build_query_as::<JobRow>()
            .fetch_optional(&self.pool)
            .await?
            .map(Job::from)
            .ok_or_else(|| AppError::NotFound("no sql rows".to_string()))
    }

    async fn delete_job(&self, id: &str, deleted_at: DateTime<Utc>) -> Result<(), AppError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE jobs SET deleted_at = ");
        query.push_bind(deleted_at);
        query.push(" WHERE id = ").push_bind(id);
        query.push(" AND ").push(Liveness::Active.predicate());

        let result = query.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("no sql rows".to_string()));
        }
        Ok(())
    }

    async fn get_job(&self, id: &str) -> Result<Job, AppError> {
        let mut query = Self::select_jobs();
        query.push(" WHERE id = ").push_bind(id);
        query.push(" AND ").push(Liveness::Active.predicate());

        query
            .build_query_as::<JobRow>()
            .fetch_optional(&self.pool)
            .await?
            .map(Job::from)
            .ok_or_else(|| AppError::NotFound(format!("job {} not found", id)))
    }

    async fn list_jobs(&self, liveness: Liveness, page: Page) -> Result<Vec<Job>, AppError> {
        let mut query = Self::select_jobs();
        query.push(" WHERE ").push(liveness.predicate());
        push_page(&mut query, page);

        let rows = query.build_query_as::<JobRow>().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn add_client_job(&self, client_job: &ClientJob) -> Result<bool, AppError> {
        sqlx::query(
            "INSERT INTO client_jobs (client_id, job_id, start_date, end_date, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&client_job.client_id)
        .bind(&client_job.job_id)
        .bind(client_job.start_date)
        .bind(client_job.end_date)
        .bind(client_job.created_at)
        .bind(client_job.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(true)
    }

    async fn delete_client_job(
        &self,
        client_id: &str,
        job_id: &str,
        deleted_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE client_jobs SET deleted_at = ");
        query.push_bind(deleted_at);
        query.push(", updated_at = ").push_bind(deleted_at);
        query.push(" WHERE client_id = ").push_bind(client_id);
        query.push(" AND job_id = ").push_bind(job_id);
        query.push(" AND ").push(Liveness::Active.predicate());

        let result = query.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("no sql rows".to_string()));
        }
        Ok(())
    }

    async fn client_jobs(&self, client_id: &str, page: Page) -> Result<Vec<ClientJob>, AppError> {
        self.associations("client_id", client_id, page).await
    }

    async fn job_clients(&self, job_id: &str, page: Page) -> Result<Vec<ClientJob>, AppError> {
        self.associations("job_id", job_id, page).await
    }
}
