pub mod client;
pub mod client_job;
pub mod deletion;
pub mod job;
pub mod page;
