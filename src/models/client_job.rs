use chrono::{DateTime, Utc};

use super::deletion::Deletion;

/// One engagement of a client on a job. A missing `end_date` means ongoing.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientJob {
    pub client_id: String,
    pub job_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deletion: Deletion,
}

impl ClientJob {
    pub fn new(
        client_id: String,
        job_id: String,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        ClientJob {
            client_id,
            job_id,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
            deletion: Deletion::Active,
        }
    }
}

#[derive(sqlx::FromRow, Debug)]
pub struct ClientJobRow {
    pub client_id: String,
    pub job_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<ClientJobRow> for ClientJob {
    fn from(row: ClientJobRow) -> Self {
        ClientJob {
            client_id: row.client_id,
            job_id: row.job_id,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deletion: Deletion::from_column(row.deleted_at),
        }
    }
}
