use chrono::{DateTime, Utc};

use super::deletion::Deletion;

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: String,
    pub name: String,
    pub salary: f64,
    pub level: String,
    pub location_type: String,
    pub employment_type: String,
    pub address: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deletion: Deletion,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobInput {
    pub name: String,
    pub salary: f64,
    pub level: String,
    pub location_type: String,
    pub employment_type: String,
    pub address: String,
    pub company: String,
}

impl Job {
    pub fn new(id: String, input: JobInput, now: DateTime<Utc>) -> Self {
        Job {
            id,
            name: input.name,
            salary: input.salary,
            level: input.level,
            location_type: input.location_type,
            employment_type: input.employment_type,
            address: input.address,
            company: input.company,
            created_at: now,
            updated_at: now,
            deletion: Deletion::Active,
        }
    }

    pub fn apply(&mut self, input: &JobInput, now: DateTime<Utc>) {
        self.name = input.name.clone();
        self.salary = input.salary;
        self.level = input.level.clone();
        self.location_type = input.location_type.clone();
        self.employment_type = input.employment_type.clone();
        self.address = input.address.clone();
        self.company = input.company.clone();
        self.updated_at = now;
    }
}

#[derive(sqlx::FromRow, Debug)]
pub struct JobRow {
    pub id: String,
    pub name: String,
    pub salary: f64,
    pub level: String,
    pub location_type: String,
    pub employment_type: String,
    pub address: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            name: row.name,
            salary: row.salary,
            level: row.level,
            location_type: row.location_type,
            employment_type: row.employment_type,
            address: row.address,
            company: row.company,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deletion: Deletion::from_column(row.deleted_at),
        }
    }
}
