use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod client;
pub mod job;

pub use client::ClientUseCase;
pub use job::JobUseCase;

/// Fresh identifier and creation time for a new row.
fn before_create() -> (String, DateTime<Utc>) {
    (Uuid::new_v4().to_string(), Utc::now())
}
