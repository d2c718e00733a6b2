use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::push_page;
use crate::errors::AppError;
use crate::models::client::{Client, ClientInput, ClientRow};
use crate::models::deletion::Liveness;
use crate::models::page::Page;
use crate::repository::ClientRepository;

const CLIENT_COLUMNS: &str = "id, first_name, last_name, age, gender, phone_number, address, \
     email, password, status, refresh, created_at, updated_at, deleted_at";

pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        PgClientRepository { pool }
    }

    fn select_query<'a>() -> QueryBuilder<'a, Postgres> {
        QueryBuilder::new(format!("SELECT {} FROM clients", CLIENT_COLUMNS))
    }

    async fn fetch_clients(&self, mut query: QueryBuilder<'_, Postgres>) -> Result<Vec<Client>, AppError> {
        let rows = query
            .build_query_as::<ClientRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn touch_live(&self, mut query: QueryBuilder<'_, Postgres>) -> Result<bool, AppError> {
        let result = query.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("no sql rows".to_string()));
        }
        Ok(true)
    }
}

fn age_column(age: u32) -> Result<i32, AppError> {
    i32::try_from(age).map_err(|_| AppError::BadRequest(format!("age {} out of range", age)))
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn create_client(&self, client: &Client) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO clients (id, first_name, last_name, age, gender, phone_number, address, \
             email, password, status, refresh, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(&client.id)
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(age_column(client.age)?)
        .bind(&client.gender)
        .bind(&client.phone_number)
        .bind(&client.address)
        .bind(&client.email)
        .bind(&client.password)
        .bind(client.status)
        .bind(&client.refresh)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_client(
        &self,
        id: &str,
        input: &ClientInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Client, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE clients SET ");
        let mut separated = query.separated(", ");
        separated.push("first_name = ").push_bind_unseparated(&input.first_name);
        separated.push("last_name = ").push_bind_unseparated(&input.last_name);
        separated.push("age = ").push_bind_unseparated(age_column(input.age)?);
        separated.push("gender = ").push_bind_unseparated(&input.gender);
        separated.push("phone_number = ").push_bind_unseparated(&input.phone_number);
        separated.push("address = ").push_bind_unseparated(&input.address);
        separated.push("email = ").push_bind_unseparated(&input.email);
        separated.push("status = ").push_bind_unseparated(input.status);
        separated.push("updated_at = ").push_bind_unseparated(updated_at);
        query.push(" WHERE id = ").push_bind(id);
        query.push(" AND ").push(Liveness::Active.predicate());
        query.push(" RETURNING ").push(CLIENT_COLUMNS);

        query
            .build_query_as::<ClientRow>()
            .fetch_optional(&self.pool)
            .await?
            .map(Client::from)
            .ok_or_else(|| AppError::NotFound("no sql rows".to_string()))
    }

    async fn delete_client(&self, id: &str, deleted_at: DateTime<Utc>) -> Result<(), AppError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE clients SET deleted_at = ");
        query.push_bind(deleted_at);
        query.push(" WHERE id = ").push_bind(id);
        query.push(" AND ").push(Liveness::Active.predicate());
        self.touch_live(query).await.map(|_| ())
    }

    async fn get_client(&self, id: &str) -> Result<Client, AppError> {
        let mut query = Self::select_query();
        query.push(" WHERE id = ").push_bind(id);
        query.push(" AND ").push(Liveness::Active.predicate());

        query
            .build_query_as::<ClientRow>()
            .fetch_optional(&self.pool)
            .await?
            .map(Client::from)
            .ok_or_else(|| AppError::NotFound(format!("client {} not found", id)))
    }

    async fn list_clients(&self, liveness: Liveness, page: Page) -> Result<Vec<Client>, AppError> {
        let mut query = Self::select_query();
        query.push(" WHERE ").push(liveness.predicate());
        push_page(&mut query, page);
        self.fetch_clients(query).await
    }

    async fn list_hidden_clients(&self, page: Page) -> Result<Vec<Client>, AppError> {
        let mut query = Self::select_query();
        query.push(" WHERE status = ").push_bind(false);
        push_page(&mut query, page);
        self.fetch_clients(query).await
    }

    async fn email_in_use(&self, email: &str) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM clients WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn update_refresh(
        &self,
        id: &str,
        refresh: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE clients SET refresh = ");
        query.push_bind(refresh);
        query.push(", updated_at = ").push_bind(updated_at);
        query.push(" WHERE id = ").push_bind(id);
        query.push(" AND ").push(Liveness::Active.predicate());
        self.touch_live(query).await
    }

    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE clients SET password = ");
        query.push_bind(password_hash);
        query.push(", updated_at = ").push_bind(updated_at);
        query.push(" WHERE id = ").push_bind(id);
        query.push(" AND ").push(Liveness::Active.predicate());
        self.touch_live(query).await
    }
}
